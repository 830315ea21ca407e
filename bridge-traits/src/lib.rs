//! # Host Bridge Traits
//!
//! Platform abstraction traits that must be implemented by each host platform
//! embedding the headphone detection core.
//!
//! ## Overview
//!
//! This crate defines the contract between the detection core and the
//! platform-specific host. Each trait represents a system service that the core
//! consumes but never owns: the host decides how to reach the OS (JNI on
//! Android, a simulator on desktop) and the core only sees these traits.
//!
//! ## Traits
//!
//! ### Audio routing
//! - [`AudioDeviceManager`](audio::AudioDeviceManager) - Enumerate active audio output devices
//! - [`BluetoothAdapter`](bluetooth::BluetoothAdapter) - Query the Bluetooth adapter power flag
//!
//! ### System events
//! - [`BroadcastRegistry`](broadcast::BroadcastRegistry) - Register/unregister a broadcast receiver
//! - [`BroadcastReceiver`](broadcast::BroadcastReceiver) - Callback invoked for each matching broadcast
//! - [`HostLifecycleListener`](lifecycle::HostLifecycleListener) - Host resume/pause/destroy callbacks
//!
//! ### Outbound
//! - [`EventEmitter`](emitter::EventEmitter) - Push a named event to the application runtime
//! - [`LoggerSink`](logging::LoggerSink) - Forward structured logs to host logging (Logcat, OSLog)
//!
//! ## Platform Requirements
//!
//! | Platform | Implementation Crate | Status |
//! |----------|---------------------|--------|
//! | Simulated / desktop | `bridge-sim` | ✅ Available |
//! | Android  | host application (JNI) | 📋 Host-provided |
//! | iOS      | not supported       | ❌ |
//!
//! ## Error Handling
//!
//! All bridge traits use the [`BridgeError`](error::BridgeError) type. The core
//! treats every bridge error as a degraded service: queries fall back to
//! "nothing connected" and subscription failures are logged, never raised.
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync` so that a single host object can be
//! shared between the monitor and the receiver it registers.
//!
//! ## Examples
//!
//! ### Implementing AudioDeviceManager
//!
//! ```ignore
//! use bridge_traits::audio::{AudioDeviceInfo, AudioDeviceManager, AudioDeviceType};
//! use bridge_traits::error::Result;
//!
//! struct JniAudioManager { /* JavaVM handle, AudioManager global ref */ }
//!
//! impl AudioDeviceManager for JniAudioManager {
//!     fn output_devices(&self) -> Result<Vec<AudioDeviceInfo>> {
//!         // audioManager.getDevices(AudioManager.GET_DEVICES_OUTPUTS)
//!         todo!()
//!     }
//! }
//! ```

pub mod audio;
pub mod bluetooth;
pub mod broadcast;
pub mod emitter;
pub mod error;
pub mod lifecycle;
pub mod logging;

pub use error::BridgeError;

// Re-export commonly used types
pub use audio::{AudioDeviceInfo, AudioDeviceManager, AudioDeviceType};
pub use bluetooth::{AdapterState, BluetoothAdapter};
pub use broadcast::{
    BroadcastIntent, BroadcastReceiver, BroadcastRegistry, ExtraValue, IntentFilter,
    ReceiverExport, ReceiverId,
};
pub use emitter::EventEmitter;
pub use lifecycle::{HostLifecycleListener, LifecycleEvent};
pub use logging::{ConsoleLogger, LogEntry, LogLevel, LoggerSink};
