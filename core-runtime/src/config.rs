//! # Monitor Configuration
//!
//! Builder-based configuration for the device state monitor.
//!
//! ## Overview
//!
//! `MonitorConfig` bundles the host bridges the monitor consumes together with
//! the few behavioral knobs it exposes. The builder validates everything up
//! front so a misconfigured host fails at module construction rather than at
//! the first broadcast.
//!
//! ## Required Dependencies
//!
//! - `AudioDeviceManager` - Output device enumeration
//! - `BroadcastRegistry` - System broadcast subscription
//! - `EventEmitter` - Host notification channel
//!
//! ## Optional Dependencies
//!
//! - `BluetoothAdapter` - Adapter power flag. Hosts without Bluetooth hardware
//!   leave it unset and the monitor never reports a Bluetooth route.
//!
//! When the `sim-shims` feature is enabled, simulated defaults from
//! `bridge-sim` are injected for missing required bridges.
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::MonitorConfig;
//! use std::sync::Arc;
//!
//! let config = MonitorConfig::builder()
//!     .audio_manager(Arc::new(JniAudioManager::new(vm)))
//!     .bluetooth_adapter(Arc::new(JniBluetoothAdapter::new(vm)))
//!     .broadcast_registry(Arc::new(JniBroadcastRegistry::new(vm)))
//!     .event_emitter(Arc::new(RctEventEmitter::new(vm)))
//!     .build()?;
//! ```

use crate::error::{Error, Result};
use crate::events::DEFAULT_EVENT_BUFFER_SIZE;
use bridge_traits::{
    AudioDeviceManager, BluetoothAdapter, BroadcastRegistry, EventEmitter, ReceiverExport,
};
use std::sync::Arc;

/// Name of the push notification channel.
pub const AUDIO_DEVICE_CHANGED_NOTIFICATION: &str = "AUDIO_DEVICE_CHANGED_NOTIFICATION";

/// Upper bound for the in-process event bus buffer.
pub const MAX_EVENT_BUS_CAPACITY: usize = 10_000;

/// Configuration for the device state monitor.
///
/// Use [`MonitorConfigBuilder`] to construct instances.
#[derive(Clone)]
pub struct MonitorConfig {
    /// Output device enumeration (required)
    pub audio_manager: Arc<dyn AudioDeviceManager>,

    /// Bluetooth adapter power flag (optional)
    pub bluetooth_adapter: Option<Arc<dyn BluetoothAdapter>>,

    /// System broadcast subscription (required)
    pub broadcast_registry: Arc<dyn BroadcastRegistry>,

    /// Host notification channel (required)
    pub event_emitter: Arc<dyn EventEmitter>,

    /// Event name used on the host notification channel
    pub notification_name: String,

    /// Use the legacy A2DP/SCO route flags when the host cannot enumerate devices
    pub legacy_route_fallback: bool,

    /// Visibility of the registered receiver
    pub receiver_export: ReceiverExport,

    /// Buffer size of the in-process event bus
    pub event_bus_capacity: usize,
}

impl std::fmt::Debug for MonitorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MonitorConfig")
            .field("audio_manager", &"AudioDeviceManager { ... }")
            .field(
                "bluetooth_adapter",
                &self
                    .bluetooth_adapter
                    .as_ref()
                    .map(|_| "BluetoothAdapter { ... }"),
            )
            .field("broadcast_registry", &"BroadcastRegistry { ... }")
            .field("event_emitter", &"EventEmitter { ... }")
            .field("notification_name", &self.notification_name)
            .field("legacy_route_fallback", &self.legacy_route_fallback)
            .field("receiver_export", &self.receiver_export)
            .field("event_bus_capacity", &self.event_bus_capacity)
            .finish()
    }
}

impl MonitorConfig {
    pub fn builder() -> MonitorConfigBuilder {
        MonitorConfigBuilder::default()
    }

    /// Validates the configuration and returns an error if invalid.
    ///
    /// This checks:
    /// - Notification name is not blank
    /// - Event bus capacity is within 1..=10_000
    pub fn validate(&self) -> Result<()> {
        if self.notification_name.trim().is_empty() {
            return Err(Error::Config(
                "Notification name cannot be empty".to_string(),
            ));
        }

        if self.event_bus_capacity == 0 {
            return Err(Error::Config(
                "Event bus capacity must be greater than 0".to_string(),
            ));
        }

        if self.event_bus_capacity > MAX_EVENT_BUS_CAPACITY {
            return Err(Error::Config(format!(
                "Event bus capacity exceeds maximum of {}",
                MAX_EVENT_BUS_CAPACITY
            )));
        }

        Ok(())
    }
}

#[cfg(not(feature = "sim-shims"))]
fn provide_default_audio_manager() -> Result<Arc<dyn AudioDeviceManager>> {
    Err(Error::CapabilityMissing {
        capability: "AudioDeviceManager".to_string(),
        message: "AudioDeviceManager implementation is required for output device enumeration. \
                 Android: inject an adapter over AudioManager.getDevices(GET_DEVICES_OUTPUTS). \
                 Desktop/tests: enable the 'sim-shims' feature to use SimulatedAudioManager."
            .to_string(),
    })
}

#[cfg(feature = "sim-shims")]
fn provide_default_audio_manager() -> Result<Arc<dyn AudioDeviceManager>> {
    Ok(Arc::new(bridge_sim::SimulatedAudioManager::new()))
}

#[cfg(not(feature = "sim-shims"))]
fn provide_default_broadcast_registry() -> Result<Arc<dyn BroadcastRegistry>> {
    Err(Error::CapabilityMissing {
        capability: "BroadcastRegistry".to_string(),
        message: "BroadcastRegistry implementation is required for route change notifications. \
                 Android: inject an adapter over Context.registerReceiver/unregisterReceiver. \
                 Desktop/tests: enable the 'sim-shims' feature to use SimulatedBroadcastHub."
            .to_string(),
    })
}

#[cfg(feature = "sim-shims")]
fn provide_default_broadcast_registry() -> Result<Arc<dyn BroadcastRegistry>> {
    Ok(Arc::new(bridge_sim::SimulatedBroadcastHub::new()))
}

#[cfg(not(feature = "sim-shims"))]
fn provide_default_event_emitter() -> Result<Arc<dyn EventEmitter>> {
    Err(Error::CapabilityMissing {
        capability: "EventEmitter".to_string(),
        message: "EventEmitter implementation is required for the notification channel. \
                 React Native: inject an adapter over RCTDeviceEventEmitter.emit. \
                 Desktop/tests: enable the 'sim-shims' feature to use RecordingEmitter."
            .to_string(),
    })
}

#[cfg(feature = "sim-shims")]
fn provide_default_event_emitter() -> Result<Arc<dyn EventEmitter>> {
    Ok(Arc::new(bridge_sim::RecordingEmitter::new()))
}

/// Builder for [`MonitorConfig`].
#[derive(Default)]
pub struct MonitorConfigBuilder {
    audio_manager: Option<Arc<dyn AudioDeviceManager>>,
    bluetooth_adapter: Option<Arc<dyn BluetoothAdapter>>,
    broadcast_registry: Option<Arc<dyn BroadcastRegistry>>,
    event_emitter: Option<Arc<dyn EventEmitter>>,
    notification_name: Option<String>,
    legacy_route_fallback: Option<bool>,
    receiver_export: Option<ReceiverExport>,
    event_bus_capacity: Option<usize>,
}

impl MonitorConfigBuilder {
    pub fn audio_manager(mut self, manager: Arc<dyn AudioDeviceManager>) -> Self {
        self.audio_manager = Some(manager);
        self
    }

    pub fn bluetooth_adapter(mut self, adapter: Arc<dyn BluetoothAdapter>) -> Self {
        self.bluetooth_adapter = Some(adapter);
        self
    }

    pub fn broadcast_registry(mut self, registry: Arc<dyn BroadcastRegistry>) -> Self {
        self.broadcast_registry = Some(registry);
        self
    }

    pub fn event_emitter(mut self, emitter: Arc<dyn EventEmitter>) -> Self {
        self.event_emitter = Some(emitter);
        self
    }

    /// Override the notification channel name.
    ///
    /// Defaults to [`AUDIO_DEVICE_CHANGED_NOTIFICATION`].
    pub fn notification_name(mut self, name: impl Into<String>) -> Self {
        self.notification_name = Some(name.into());
        self
    }

    /// Enable or disable the legacy route flags fallback (default: enabled).
    pub fn legacy_route_fallback(mut self, enabled: bool) -> Self {
        self.legacy_route_fallback = Some(enabled);
        self
    }

    /// Set receiver visibility (default: [`ReceiverExport::NotExported`]).
    pub fn receiver_export(mut self, export: ReceiverExport) -> Self {
        self.receiver_export = Some(export);
        self
    }

    /// Set the in-process event bus buffer size (default: 100).
    pub fn event_bus_capacity(mut self, capacity: usize) -> Self {
        self.event_bus_capacity = Some(capacity);
        self
    }

    /// Builds the final `MonitorConfig`.
    ///
    /// Returns an error if a required bridge is missing (and no shim is
    /// available) or if a value is out of range.
    pub fn build(self) -> Result<MonitorConfig> {
        let audio_manager = match self.audio_manager {
            Some(manager) => manager,
            None => provide_default_audio_manager()?,
        };

        let broadcast_registry = match self.broadcast_registry {
            Some(registry) => registry,
            None => provide_default_broadcast_registry()?,
        };

        let event_emitter = match self.event_emitter {
            Some(emitter) => emitter,
            None => provide_default_event_emitter()?,
        };

        let config = MonitorConfig {
            audio_manager,
            bluetooth_adapter: self.bluetooth_adapter,
            broadcast_registry,
            event_emitter,
            notification_name: self
                .notification_name
                .unwrap_or_else(|| AUDIO_DEVICE_CHANGED_NOTIFICATION.to_string()),
            legacy_route_fallback: self.legacy_route_fallback.unwrap_or(true),
            receiver_export: self.receiver_export.unwrap_or_default(),
            event_bus_capacity: self
                .event_bus_capacity
                .unwrap_or(DEFAULT_EVENT_BUFFER_SIZE),
        };

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::error::Result as BridgeResult;
    use bridge_traits::{
        AudioDeviceInfo, BroadcastReceiver, IntentFilter, ReceiverId,
    };
    use serde_json::Value;

    struct NoDevices;

    impl AudioDeviceManager for NoDevices {
        fn output_devices(&self) -> BridgeResult<Vec<AudioDeviceInfo>> {
            Ok(Vec::new())
        }
    }

    struct NullRegistry;

    impl BroadcastRegistry for NullRegistry {
        fn register_receiver(
            &self,
            _receiver: Arc<dyn BroadcastReceiver>,
            _filter: &IntentFilter,
            _export: ReceiverExport,
        ) -> BridgeResult<ReceiverId> {
            Ok(ReceiverId::generate())
        }

        fn unregister_receiver(&self, _id: &ReceiverId) -> BridgeResult<()> {
            Ok(())
        }
    }

    struct NullEmitter;

    impl EventEmitter for NullEmitter {
        fn emit(&self, _event_name: &str, _payload: Value) -> BridgeResult<()> {
            Ok(())
        }
    }

    fn complete_builder() -> MonitorConfigBuilder {
        MonitorConfig::builder()
            .audio_manager(Arc::new(NoDevices))
            .broadcast_registry(Arc::new(NullRegistry))
            .event_emitter(Arc::new(NullEmitter))
    }

    #[test]
    fn test_builder_with_all_required_bridges() {
        let config = complete_builder().build().unwrap();

        assert_eq!(config.notification_name, AUDIO_DEVICE_CHANGED_NOTIFICATION);
        assert!(config.legacy_route_fallback);
        assert_eq!(config.receiver_export, ReceiverExport::NotExported);
        assert_eq!(config.event_bus_capacity, DEFAULT_EVENT_BUFFER_SIZE);
        assert!(config.bluetooth_adapter.is_none());
    }

    #[cfg(not(feature = "sim-shims"))]
    #[test]
    fn test_builder_requires_audio_manager() {
        let result = MonitorConfig::builder()
            .broadcast_registry(Arc::new(NullRegistry))
            .event_emitter(Arc::new(NullEmitter))
            .build();

        let err_msg = result.unwrap_err().to_string();
        assert!(err_msg.contains("AudioDeviceManager"));
        assert!(err_msg.contains("output device enumeration"));
    }

    #[cfg(not(feature = "sim-shims"))]
    #[test]
    fn test_builder_requires_broadcast_registry() {
        let result = MonitorConfig::builder()
            .audio_manager(Arc::new(NoDevices))
            .event_emitter(Arc::new(NullEmitter))
            .build();

        assert!(matches!(
            result,
            Err(Error::CapabilityMissing { ref capability, .. }) if capability == "BroadcastRegistry"
        ));
    }

    #[cfg(not(feature = "sim-shims"))]
    #[test]
    fn test_builder_requires_event_emitter() {
        let result = MonitorConfig::builder()
            .audio_manager(Arc::new(NoDevices))
            .broadcast_registry(Arc::new(NullRegistry))
            .build();

        let err_msg = result.unwrap_err().to_string();
        assert!(err_msg.contains("EventEmitter"));
        assert!(err_msg.contains("notification channel"));
    }

    #[test]
    fn test_builder_overrides() {
        let config = complete_builder()
            .notification_name("ROUTE_CHANGED")
            .legacy_route_fallback(false)
            .receiver_export(ReceiverExport::Exported)
            .event_bus_capacity(8)
            .build()
            .unwrap();

        assert_eq!(config.notification_name, "ROUTE_CHANGED");
        assert!(!config.legacy_route_fallback);
        assert_eq!(config.receiver_export, ReceiverExport::Exported);
        assert_eq!(config.event_bus_capacity, 8);
    }

    #[test]
    fn test_validate_rejects_blank_notification_name() {
        let result = complete_builder().notification_name("  ").build();

        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Notification name cannot be empty"));
    }

    #[test]
    fn test_validate_rejects_zero_capacity() {
        assert!(complete_builder().event_bus_capacity(0).build().is_err());
    }

    #[test]
    fn test_validate_rejects_excessive_capacity() {
        let result = complete_builder()
            .event_bus_capacity(MAX_EVENT_BUS_CAPACITY + 1)
            .build();

        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_config_debug_hides_bridges() {
        let config = complete_builder().build().unwrap();
        let debug = format!("{:?}", config);

        assert!(debug.contains("AudioDeviceManager { ... }"));
        assert!(debug.contains("AUDIO_DEVICE_CHANGED_NOTIFICATION"));
    }

    #[test]
    fn test_config_is_cloneable() {
        let config = complete_builder().build().unwrap();
        let cloned = config.clone();

        assert!(Arc::ptr_eq(&config.audio_manager, &cloned.audio_manager));
    }
}
