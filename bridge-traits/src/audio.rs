//! Audio Output Device Abstraction
//!
//! Exposes the host's view of the currently active audio output devices.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Output device type tag
///
/// Mirrors the subset of `android.media.AudioDeviceInfo.TYPE_*` values that
/// matter for route detection. Anything else is carried as [`Other`] with the
/// raw platform code so it can still be logged.
///
/// [`Other`]: AudioDeviceType::Other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudioDeviceType {
    BuiltinEarpiece,
    BuiltinSpeaker,
    WiredHeadset,
    WiredHeadphones,
    BluetoothSco,
    BluetoothA2dp,
    Hdmi,
    UsbDevice,
    UsbHeadset,
    BleHeadset,
    Other(i32),
}

impl AudioDeviceType {
    /// Convert an Android `AudioDeviceInfo.TYPE_*` code
    pub fn from_android_code(code: i32) -> Self {
        match code {
            1 => Self::BuiltinEarpiece,
            2 => Self::BuiltinSpeaker,
            3 => Self::WiredHeadset,
            4 => Self::WiredHeadphones,
            7 => Self::BluetoothSco,
            8 => Self::BluetoothA2dp,
            9 => Self::Hdmi,
            11 => Self::UsbDevice,
            22 => Self::UsbHeadset,
            26 => Self::BleHeadset,
            other => Self::Other(other),
        }
    }

    /// The Android `AudioDeviceInfo.TYPE_*` code for this type
    pub fn android_code(&self) -> i32 {
        match self {
            Self::BuiltinEarpiece => 1,
            Self::BuiltinSpeaker => 2,
            Self::WiredHeadset => 3,
            Self::WiredHeadphones => 4,
            Self::BluetoothSco => 7,
            Self::BluetoothA2dp => 8,
            Self::Hdmi => 9,
            Self::UsbDevice => 11,
            Self::UsbHeadset => 22,
            Self::BleHeadset => 26,
            Self::Other(code) => *code,
        }
    }

    /// Constant-style name used in diagnostic logs
    pub fn name(&self) -> String {
        match self {
            Self::BuiltinEarpiece => "TYPE_BUILTIN_EARPIECE".to_string(),
            Self::BuiltinSpeaker => "TYPE_BUILTIN_SPEAKER".to_string(),
            Self::WiredHeadset => "TYPE_WIRED_HEADSET".to_string(),
            Self::WiredHeadphones => "TYPE_WIRED_HEADPHONES".to_string(),
            Self::BluetoothSco => "TYPE_BLUETOOTH_SCO".to_string(),
            Self::BluetoothA2dp => "TYPE_BLUETOOTH_A2DP".to_string(),
            Self::Hdmi => "TYPE_HDMI".to_string(),
            Self::UsbDevice => "TYPE_USB_DEVICE".to_string(),
            Self::UsbHeadset => "TYPE_USB_HEADSET".to_string(),
            Self::BleHeadset => "TYPE_BLE_HEADSET".to_string(),
            Self::Other(code) => format!("TYPE_UNKNOWN_{}", code),
        }
    }
}

/// An active audio output device as reported by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioDeviceInfo {
    /// Host-assigned device id
    pub id: i32,
    pub device_type: AudioDeviceType,
    /// Product name, if the host exposes one (e.g. "WH-1000XM4")
    pub product_name: Option<String>,
}

impl AudioDeviceInfo {
    pub fn new(id: i32, device_type: AudioDeviceType) -> Self {
        Self {
            id,
            device_type,
            product_name: None,
        }
    }

    pub fn with_product_name(mut self, name: impl Into<String>) -> Self {
        self.product_name = Some(name.into());
        self
    }
}

/// Audio device manager trait
///
/// Wraps the platform audio service:
/// - **Android**: `AudioManager.getDevices(GET_DEVICES_OUTPUTS)` on API 23+,
///   `isBluetoothA2dpOn()` / `isBluetoothScoOn()` on older releases
/// - **Simulated**: an in-memory device list
///
/// Implementations should return [`BridgeError::NotAvailable`] when the audio
/// service cannot be obtained; the core treats that as "no devices".
///
/// [`BridgeError::NotAvailable`]: crate::error::BridgeError::NotAvailable
pub trait AudioDeviceManager: Send + Sync {
    /// List currently active output devices
    fn output_devices(&self) -> Result<Vec<AudioDeviceInfo>>;

    /// Whether [`output_devices`](Self::output_devices) is supported on this host
    ///
    /// Hosts running an OS release without device enumeration return `false`
    /// and the core falls back to the legacy route flags.
    fn supports_device_enumeration(&self) -> bool {
        true
    }

    /// Legacy flag: audio is routed to a Bluetooth A2DP device
    fn is_bluetooth_a2dp_on(&self) -> Result<bool> {
        Ok(false)
    }

    /// Legacy flag: audio is routed over Bluetooth SCO
    fn is_bluetooth_sco_on(&self) -> Result<bool> {
        Ok(false)
    }
}
