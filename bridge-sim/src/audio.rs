//! Simulated Audio Device Manager

use bridge_traits::{
    audio::{AudioDeviceInfo, AudioDeviceManager, AudioDeviceType},
    error::{BridgeError, Result},
};
use parking_lot::RwLock;
use tracing::debug;

#[derive(Debug)]
struct AudioState {
    devices: Vec<AudioDeviceInfo>,
    available: bool,
    enumeration_supported: bool,
    a2dp_on: bool,
    sco_on: bool,
}

/// In-memory audio service.
///
/// Starts available, with device enumeration supported and no devices.
#[derive(Debug)]
pub struct SimulatedAudioManager {
    state: RwLock<AudioState>,
}

impl SimulatedAudioManager {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(AudioState {
                devices: Vec::new(),
                available: true,
                enumeration_supported: true,
                a2dp_on: false,
                sco_on: false,
            }),
        }
    }

    pub fn set_devices(&self, devices: Vec<AudioDeviceInfo>) {
        self.state.write().devices = devices;
    }

    /// Add an output device, replacing any existing device with the same id.
    pub fn connect(&self, id: i32, device_type: AudioDeviceType) {
        let mut state = self.state.write();
        state.devices.retain(|d| d.id != id);
        state.devices.push(AudioDeviceInfo::new(id, device_type));
        debug!(id, device_type = %device_type.name(), "Simulated device connected");
    }

    /// Remove an output device by id. Returns whether it was present.
    pub fn disconnect(&self, id: i32) -> bool {
        let mut state = self.state.write();
        let before = state.devices.len();
        state.devices.retain(|d| d.id != id);
        before != state.devices.len()
    }

    /// Simulate the audio service being unobtainable.
    pub fn set_available(&self, available: bool) {
        self.state.write().available = available;
    }

    /// Simulate an OS release without device enumeration.
    pub fn set_enumeration_supported(&self, supported: bool) {
        self.state.write().enumeration_supported = supported;
    }

    /// Set the legacy route flags reported when enumeration is unsupported.
    pub fn set_legacy_flags(&self, a2dp_on: bool, sco_on: bool) {
        let mut state = self.state.write();
        state.a2dp_on = a2dp_on;
        state.sco_on = sco_on;
    }

    fn ensure_available(state: &AudioState) -> Result<()> {
        if state.available {
            Ok(())
        } else {
            Err(BridgeError::NotAvailable(
                "audio service not obtainable".to_string(),
            ))
        }
    }
}

impl Default for SimulatedAudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioDeviceManager for SimulatedAudioManager {
    fn output_devices(&self) -> Result<Vec<AudioDeviceInfo>> {
        let state = self.state.read();
        Self::ensure_available(&state)?;

        if !state.enumeration_supported {
            return Err(BridgeError::NotAvailable(
                "device enumeration not supported".to_string(),
            ));
        }

        Ok(state.devices.clone())
    }

    fn supports_device_enumeration(&self) -> bool {
        self.state.read().enumeration_supported
    }

    fn is_bluetooth_a2dp_on(&self) -> Result<bool> {
        let state = self.state.read();
        Self::ensure_available(&state)?;
        Ok(state.a2dp_on)
    }

    fn is_bluetooth_sco_on(&self) -> Result<bool> {
        let state = self.state.read();
        Self::ensure_available(&state)?;
        Ok(state.sco_on)
    }
}
