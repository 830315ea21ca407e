//! Native module façade and bootstrap helpers.
//!
//! This crate wires host-provided bridge implementations (audio device
//! enumeration, Bluetooth adapter, broadcast registry, event emitter) into the
//! headphone detection core and exposes the surface the application runtime
//! binds to: `isAudioDeviceConnected`, the constants map, the no-op listener
//! hooks and the host lifecycle callbacks. Desktop builds and tests typically
//! enable the `sim-shims` feature (which depends on `bridge-sim`).

pub mod error;

pub use error::{CoreError, Result};

use std::collections::HashMap;
use std::sync::Arc;

use bridge_traits::{
    AudioDeviceManager, BluetoothAdapter, BroadcastRegistry, EventEmitter,
    HostLifecycleListener, LifecycleEvent,
};
use core_detect::{DeviceState, DeviceStateMonitor};
use core_runtime::config::{
    MonitorConfig, MonitorConfigBuilder, AUDIO_DEVICE_CHANGED_NOTIFICATION,
};
use core_runtime::events::EventStream;
use tracing::{debug, info};

#[cfg(feature = "sim-shims")]
pub use bridge_sim::SimulatedHost;

/// Name the module is registered under in the host runtime.
pub const MODULE_NAME: &str = "HeadphoneDetectV2";

/// Aggregated handle to the bridge dependencies the module requires.
pub struct ModuleDependencies {
    pub audio_manager: Arc<dyn AudioDeviceManager>,
    pub bluetooth_adapter: Option<Arc<dyn BluetoothAdapter>>,
    pub broadcast_registry: Arc<dyn BroadcastRegistry>,
    pub event_emitter: Arc<dyn EventEmitter>,
}

impl ModuleDependencies {
    /// Construct a dependency bundle from explicit bridge handles.
    ///
    /// The Bluetooth adapter is optional; see
    /// [`with_bluetooth_adapter`](Self::with_bluetooth_adapter).
    pub fn new(
        audio_manager: Arc<dyn AudioDeviceManager>,
        broadcast_registry: Arc<dyn BroadcastRegistry>,
        event_emitter: Arc<dyn EventEmitter>,
    ) -> Self {
        Self {
            audio_manager,
            bluetooth_adapter: None,
            broadcast_registry,
            event_emitter,
        }
    }

    pub fn with_bluetooth_adapter(mut self, adapter: Arc<dyn BluetoothAdapter>) -> Self {
        self.bluetooth_adapter = Some(adapter);
        self
    }

    /// Seed a config builder with these bridges, leaving knobs at defaults.
    pub fn into_config_builder(self) -> MonitorConfigBuilder {
        let builder = MonitorConfig::builder()
            .audio_manager(self.audio_manager)
            .broadcast_registry(self.broadcast_registry)
            .event_emitter(self.event_emitter);

        match self.bluetooth_adapter {
            Some(adapter) => builder.bluetooth_adapter(adapter),
            None => builder,
        }
    }
}

#[cfg(feature = "sim-shims")]
impl From<&SimulatedHost> for ModuleDependencies {
    fn from(host: &SimulatedHost) -> Self {
        ModuleDependencies::new(
            host.audio.clone(),
            host.broadcasts.clone(),
            host.emitter.clone(),
        )
        .with_bluetooth_adapter(host.bluetooth.clone())
    }
}

/// Primary façade exposed to the host runtime.
///
/// Cloning shares the underlying monitor. The route change receiver is
/// released when the last clone is dropped.
#[derive(Clone)]
pub struct HeadphoneDetectModule {
    monitor: Arc<DeviceStateMonitor>,
}

impl HeadphoneDetectModule {
    /// Create a module from bridge dependencies with default settings.
    pub fn new(deps: ModuleDependencies) -> Result<Self> {
        let config = deps.into_config_builder().build()?;
        Self::with_config(config)
    }

    /// Create a module from a configuration. Configs assembled or edited
    /// outside the builder are validated here.
    pub fn with_config(config: MonitorConfig) -> Result<Self> {
        debug!(?config, "Creating headphone detect module");
        Ok(Self {
            monitor: Arc::new(DeviceStateMonitor::new(config)?),
        })
    }

    pub fn name(&self) -> &'static str {
        MODULE_NAME
    }

    /// Constants published to the host, keyed by their JS-visible name.
    pub fn constants(&self) -> HashMap<String, String> {
        HashMap::from([(
            AUDIO_DEVICE_CHANGED_NOTIFICATION.to_string(),
            self.monitor.config().notification_name.clone(),
        )])
    }

    /// Current route snapshot. Resolves with all-`false` when host services
    /// are unavailable; never fails.
    pub async fn is_audio_device_connected(&self) -> DeviceState {
        debug!("isAudioDeviceConnected called");
        self.monitor.query_state()
    }

    /// Called by the runtime once the module is ready.
    pub fn initialize(&self) {
        info!(module = MODULE_NAME, "Initializing module");
        self.monitor.activate();
    }

    /// Required by the host event emitter contract; no-op.
    pub fn add_listener(&self, _event_name: &str) {}

    /// Required by the host event emitter contract; no-op.
    pub fn remove_listeners(&self, _count: f64) {}

    /// Drive the monitor from a host lifecycle transition.
    pub fn handle_lifecycle(&self, event: LifecycleEvent) {
        debug!(?event, "Host lifecycle transition");
        if event.allows_listeners() {
            self.monitor.activate();
        } else {
            self.monitor.deactivate();
        }
    }

    pub fn is_monitoring(&self) -> bool {
        self.monitor.is_active()
    }

    /// Access the underlying monitor.
    pub fn monitor(&self) -> &DeviceStateMonitor {
        &self.monitor
    }

    /// Subscribe to in-process route and subscription events.
    pub fn subscribe_events(&self) -> EventStream {
        self.monitor.subscribe_events()
    }
}

impl HostLifecycleListener for HeadphoneDetectModule {
    fn on_host_resume(&self) {
        self.handle_lifecycle(LifecycleEvent::Resumed);
    }

    fn on_host_pause(&self) {
        self.handle_lifecycle(LifecycleEvent::Paused);
    }

    fn on_host_destroy(&self) {
        self.handle_lifecycle(LifecycleEvent::Destroyed);
    }
}

/// Convenience bootstrapper for desktop builds and tests.
///
/// ```
/// # #[cfg(feature = "sim-shims")]
/// # fn example() -> core_service::Result<()> {
/// use core_service::bootstrap_simulated;
///
/// let (module, host) = bootstrap_simulated()?;
/// module.initialize();
/// assert_eq!(host.broadcasts.registration_count(), 1);
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "sim-shims")]
pub fn bootstrap_simulated() -> Result<(HeadphoneDetectModule, SimulatedHost)> {
    let host = SimulatedHost::new();
    let module = HeadphoneDetectModule::new(ModuleDependencies::from(&host))?;
    Ok((module, host))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_sim::SimulatedHost;
    use bridge_traits::error::Result as BridgeResult;
    use bridge_traits::{
        AudioDeviceInfo, AudioDeviceType, BroadcastReceiver, IntentFilter, ReceiverExport,
        ReceiverId,
    };
    use mockall::mock;

    mock! {
        Registry {}

        impl BroadcastRegistry for Registry {
            fn register_receiver(
                &self,
                receiver: Arc<dyn BroadcastReceiver>,
                filter: &IntentFilter,
                export: ReceiverExport,
            ) -> BridgeResult<ReceiverId>;

            fn unregister_receiver(&self, id: &ReceiverId) -> BridgeResult<()>;
        }
    }

    mock! {
        Audio {}

        impl AudioDeviceManager for Audio {
            fn output_devices(&self) -> BridgeResult<Vec<AudioDeviceInfo>>;
            fn supports_device_enumeration(&self) -> bool;
            fn is_bluetooth_a2dp_on(&self) -> BridgeResult<bool>;
            fn is_bluetooth_sco_on(&self) -> BridgeResult<bool>;
        }
    }

    fn simulated_module() -> (HeadphoneDetectModule, SimulatedHost) {
        let host = SimulatedHost::new();
        let deps = ModuleDependencies::new(
            host.audio.clone(),
            host.broadcasts.clone(),
            host.emitter.clone(),
        )
        .with_bluetooth_adapter(host.bluetooth.clone());
        (HeadphoneDetectModule::new(deps).unwrap(), host)
    }

    #[test]
    fn test_module_identity() {
        let (module, _host) = simulated_module();

        assert_eq!(module.name(), "HeadphoneDetectV2");
        assert_eq!(
            module.constants().get("AUDIO_DEVICE_CHANGED_NOTIFICATION"),
            Some(&"AUDIO_DEVICE_CHANGED_NOTIFICATION".to_string())
        );
    }

    #[test]
    fn test_listener_hooks_are_noops() {
        let (module, host) = simulated_module();

        module.add_listener("AUDIO_DEVICE_CHANGED_NOTIFICATION");
        module.remove_listeners(3.0);

        assert!(!module.is_monitoring());
        assert_eq!(host.broadcasts.registration_count(), 0);
    }

    #[test]
    fn test_lifecycle_drives_subscription() {
        let (module, host) = simulated_module();

        module.initialize();
        assert!(module.is_monitoring());

        module.on_host_pause();
        assert!(!module.is_monitoring());
        assert_eq!(host.broadcasts.registration_count(), 0);

        module.on_host_resume();
        module.on_host_resume();
        assert_eq!(host.broadcasts.registration_count(), 1);

        module.on_host_destroy();
        assert!(!module.is_monitoring());
    }

    #[test]
    fn test_pause_before_initialize_never_unregisters() {
        let mut registry = MockRegistry::new();
        registry.expect_register_receiver().never();
        registry.expect_unregister_receiver().never();

        let host = SimulatedHost::new();
        let deps =
            ModuleDependencies::new(host.audio.clone(), Arc::new(registry), host.emitter.clone());
        let module = HeadphoneDetectModule::new(deps).unwrap();

        module.on_host_pause();
        module.on_host_destroy();
    }

    #[tokio::test]
    async fn test_query_never_fails_without_audio_service() {
        let mut audio = MockAudio::new();
        audio.expect_supports_device_enumeration().return_const(true);
        audio.expect_output_devices().returning(|| {
            Err(bridge_traits::BridgeError::NotAvailable(
                "audio service".to_string(),
            ))
        });

        let host = SimulatedHost::new();
        let deps = ModuleDependencies::new(
            Arc::new(audio),
            host.broadcasts.clone(),
            host.emitter.clone(),
        )
        .with_bluetooth_adapter(host.bluetooth.clone());
        let module = HeadphoneDetectModule::new(deps).unwrap();

        assert_eq!(
            module.is_audio_device_connected().await,
            DeviceState::DISCONNECTED
        );
    }

    #[tokio::test]
    async fn test_query_reports_connected_devices() {
        let (module, host) = simulated_module();
        host.audio.connect(1, AudioDeviceType::WiredHeadset);
        host.audio.connect(2, AudioDeviceType::BluetoothA2dp);

        assert_eq!(
            module.is_audio_device_connected().await,
            DeviceState::new(true, true)
        );
    }

    #[cfg(feature = "sim-shims")]
    #[test]
    fn test_invalid_config_is_initialization_failure() {
        let host = SimulatedHost::new();
        let config = ModuleDependencies::from(&host)
            .into_config_builder()
            .event_bus_capacity(0)
            .build();

        let err = CoreError::from(config.unwrap_err());
        assert!(matches!(err, CoreError::InitializationFailed(_)));
    }

    #[test]
    fn test_with_config_rejects_edited_config() {
        let host = SimulatedHost::new();
        let mut config = ModuleDependencies::new(
            host.audio.clone(),
            host.broadcasts.clone(),
            host.emitter.clone(),
        )
        .into_config_builder()
        .build()
        .unwrap();
        config.event_bus_capacity = 0;

        let result = HeadphoneDetectModule::with_config(config);
        assert!(matches!(result, Err(CoreError::InitializationFailed(_))));

        let mut config = ModuleDependencies::new(
            host.audio.clone(),
            host.broadcasts.clone(),
            host.emitter.clone(),
        )
        .into_config_builder()
        .build()
        .unwrap();
        config.notification_name = "  ".to_string();

        let result = HeadphoneDetectModule::with_config(config);
        assert!(matches!(result, Err(CoreError::InitializationFailed(_))));
    }

    #[test]
    fn test_clones_share_subscription() {
        let (module, host) = simulated_module();
        let clone = module.clone();

        module.initialize();
        assert!(clone.is_monitoring());

        drop(module);
        assert_eq!(host.broadcasts.registration_count(), 1);

        drop(clone);
        assert_eq!(host.broadcasts.registration_count(), 0);
    }
}
