//! # Simulated Bridge Implementations
//!
//! In-process implementations of every bridge trait, for hosts that have no
//! real audio-route signals (desktop builds) and for tests.
//!
//! ## Overview
//!
//! - `AudioDeviceManager` using an in-memory device list
//! - `BluetoothAdapter` using a toggleable power flag
//! - `BroadcastRegistry` using a synchronous dispatch hub
//! - `EventEmitter` recording every emitted event
//!
//! Each simulated service can be switched into a failure mode to exercise the
//! core's degraded paths.
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_sim::SimulatedHost;
//! use bridge_traits::broadcast::{actions, extras, BroadcastIntent};
//! use bridge_traits::AudioDeviceType;
//!
//! let host = SimulatedHost::new();
//! // ... build the monitor from host.audio, host.bluetooth, host.broadcasts, host.emitter
//!
//! host.audio.connect(1, AudioDeviceType::WiredHeadset);
//! host.broadcasts.send_broadcast(
//!     &BroadcastIntent::new(actions::HEADSET_PLUG).with_int_extra(extras::HEADSET_STATE, 1),
//! );
//! assert_eq!(host.emitter.events().len(), 1);
//! ```

mod audio;
mod bluetooth;
mod broadcast;
mod emitter;

pub use audio::SimulatedAudioManager;
pub use bluetooth::SimulatedBluetoothAdapter;
pub use broadcast::SimulatedBroadcastHub;
pub use emitter::{EmittedEvent, RecordingEmitter};

use std::sync::Arc;

/// A full set of simulated host services sharing one device model.
#[derive(Clone)]
pub struct SimulatedHost {
    pub audio: Arc<SimulatedAudioManager>,
    pub bluetooth: Arc<SimulatedBluetoothAdapter>,
    pub broadcasts: Arc<SimulatedBroadcastHub>,
    pub emitter: Arc<RecordingEmitter>,
}

impl SimulatedHost {
    /// No devices connected, adapter powered on.
    pub fn new() -> Self {
        Self {
            audio: Arc::new(SimulatedAudioManager::new()),
            bluetooth: Arc::new(SimulatedBluetoothAdapter::new(true)),
            broadcasts: Arc::new(SimulatedBroadcastHub::new()),
            emitter: Arc::new(RecordingEmitter::new()),
        }
    }
}

impl Default for SimulatedHost {
    fn default() -> Self {
        Self::new()
    }
}
