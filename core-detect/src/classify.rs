//! Output device classification

use bridge_traits::audio::{AudioDeviceInfo, AudioDeviceType};
use tracing::debug;

use crate::state::DeviceState;

/// Route an output device contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Wired headphones, wired headset or USB headset
    Wired,
    /// A2DP, SCO or BLE headset
    Bluetooth,
    /// Speakers, HDMI, generic USB devices and anything unrecognized
    Other,
}

pub fn classify(device_type: AudioDeviceType) -> RouteClass {
    match device_type {
        AudioDeviceType::WiredHeadphones
        | AudioDeviceType::WiredHeadset
        | AudioDeviceType::UsbHeadset => RouteClass::Wired,
        AudioDeviceType::BluetoothA2dp
        | AudioDeviceType::BluetoothSco
        | AudioDeviceType::BleHeadset => RouteClass::Bluetooth,
        _ => RouteClass::Other,
    }
}

/// Fold an enumerated device list into a route snapshot.
///
/// Classification is inclusive: any matching device sets its flag. The
/// Bluetooth adapter is not consulted here.
pub fn classify_devices(devices: &[AudioDeviceInfo]) -> DeviceState {
    devices
        .iter()
        .fold(DeviceState::DISCONNECTED, |mut state, device| {
            let class = classify(device.device_type);
            debug!(
                device_id = device.id,
                device_type = %device.device_type.name(),
                route = ?class,
                "Checking output device"
            );

            match class {
                RouteClass::Wired => state.audio_jack = true,
                RouteClass::Bluetooth => state.bluetooth = true,
                RouteClass::Other => {}
            }
            state
        })
}
