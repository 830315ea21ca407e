//! # Device State Monitor
//!
//! Answers "which audio output route is active" and pushes a fresh snapshot to
//! the host whenever a monitored system broadcast fires.
//!
//! ## State machine
//!
//! ```text
//!            activate()                 deactivate()
//! Inactive ─────────────> Active ─────────────────> Inactive
//!    │  deactivate(): no-op  │  activate(): no-op
//! ```
//!
//! At most one receiver is registered per monitor. Registration and
//! unregistration failures are logged and published on the event bus, never
//! returned: a monitor that failed to subscribe still answers
//! [`DeviceStateMonitor::query_state`].
//!
//! ## Route policy
//!
//! - Wired routes come from the enumerated output devices.
//! - Bluetooth routes additionally require the adapter to be present and
//!   enabled; stale Bluetooth entries are ignored while it is off.
//! - Hosts that cannot enumerate devices fall back to the legacy A2DP/SCO
//!   flags for Bluetooth (when enabled in config). `audio_jack` stays `false`
//!   on that path.
//! - An unavailable audio service reports no devices.

use bridge_traits::broadcast::{BroadcastIntent, BroadcastReceiver, ReceiverId};
use bridge_traits::error::BridgeError;
use core_runtime::config::MonitorConfig;
use core_runtime::Result;
use core_runtime::events::{CoreEvent, EventBus, EventStream, MonitorEvent, RouteEvent};
use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use tracing::{debug, error, info, warn};

use crate::classify::classify_devices;
use crate::signal::{self, SystemSignal};
use crate::state::DeviceState;

/// Subscription state of a [`DeviceStateMonitor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Inactive,
    Active,
}

struct MonitorInner {
    config: MonitorConfig,
    event_bus: EventBus,
}

impl MonitorInner {
    fn query_state(&self) -> DeviceState {
        let bluetooth_enabled = self.bluetooth_enabled();
        let audio = &self.config.audio_manager;

        if !audio.supports_device_enumeration() {
            return self.legacy_state(bluetooth_enabled);
        }

        match audio.output_devices() {
            Ok(devices) => {
                debug!(count = devices.len(), bluetooth_enabled, "Found output devices");
                let found = classify_devices(&devices);
                DeviceState::new(found.audio_jack, found.bluetooth && bluetooth_enabled)
            }
            Err(e) => {
                warn!(error = %e, "Audio service unavailable, reporting no devices");
                DeviceState::DISCONNECTED
            }
        }
    }

    fn bluetooth_enabled(&self) -> bool {
        let Some(adapter) = &self.config.bluetooth_adapter else {
            return false;
        };

        match adapter.is_enabled() {
            Ok(enabled) => enabled,
            Err(e) => {
                warn!(error = %e, "Bluetooth adapter unavailable, treating as disabled");
                false
            }
        }
    }

    fn legacy_state(&self, bluetooth_enabled: bool) -> DeviceState {
        if !self.config.legacy_route_fallback || !bluetooth_enabled {
            return DeviceState::DISCONNECTED;
        }

        let audio = &self.config.audio_manager;
        let flag = |name: &str, value: bridge_traits::error::Result<bool>| {
            value.unwrap_or_else(|e| {
                warn!(flag = name, error = %e, "Legacy route flag unavailable");
                false
            })
        };

        let a2dp_on = flag("a2dp", audio.is_bluetooth_a2dp_on());
        let sco_on = flag("sco", audio.is_bluetooth_sco_on());
        debug!(a2dp_on, sco_on, "Legacy Bluetooth route check");

        DeviceState::new(false, a2dp_on || sco_on)
    }

    fn handle_signal(&self, signal: &SystemSignal) {
        debug!(signal = signal.name(), "{}", signal.describe());

        let state = self.query_state();
        debug!(
            audio_jack = state.audio_jack,
            bluetooth = state.bluetooth,
            "Updated device state"
        );

        let delivery = match state.to_payload() {
            Ok(payload) => self
                .config
                .event_emitter
                .emit(&self.config.notification_name, payload)
                .map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };

        if let Err(message) = delivery {
            warn!(
                event = %self.config.notification_name,
                error = %message,
                "Failed to deliver route notification"
            );
            self.publish(CoreEvent::Monitor(MonitorEvent::NotificationFailed { message }));
        }

        self.publish(CoreEvent::Route(RouteEvent::Changed {
            audio_jack: state.audio_jack,
            bluetooth: state.bluetooth,
            signal: signal.name().to_string(),
        }));
    }

    fn publish(&self, event: CoreEvent) {
        // No subscribers is not an error
        let _ = self.event_bus.emit(event);
    }
}

/// Receiver handed to the host. Holds a weak reference so a registration
/// left behind by the host cannot keep the monitor alive.
struct RouteChangeReceiver {
    inner: Weak<MonitorInner>,
}

impl BroadcastReceiver for RouteChangeReceiver {
    fn on_receive(&self, intent: &BroadcastIntent) {
        let Some(signal) = SystemSignal::decode(intent) else {
            debug!("Ignoring broadcast without action");
            return;
        };

        match self.inner.upgrade() {
            Some(inner) => inner.handle_signal(&signal),
            None => debug!(signal = signal.name(), "Monitor dropped, ignoring broadcast"),
        }
    }
}

/// Audio route monitor bound to one host module instance.
pub struct DeviceStateMonitor {
    inner: Arc<MonitorInner>,
    subscription: Mutex<Option<ReceiverId>>,
}

impl DeviceStateMonitor {
    /// Create a monitor. Fails if `config` does not pass
    /// [`MonitorConfig::validate`].
    pub fn new(config: MonitorConfig) -> Result<Self> {
        config.validate()?;

        let event_bus = EventBus::new(config.event_bus_capacity);
        Ok(Self {
            inner: Arc::new(MonitorInner { config, event_bus }),
            subscription: Mutex::new(None),
        })
    }

    /// Compute the current route snapshot from live host state.
    pub fn query_state(&self) -> DeviceState {
        self.inner.query_state()
    }

    /// Register the route change receiver. No-op when already active.
    pub fn activate(&self) {
        let mut subscription = self.subscription.lock();

        if let Some(id) = subscription.as_ref() {
            debug!(receiver_id = %id, "Receiver already registered, skipping registration");
            return;
        }

        let receiver: Arc<dyn BroadcastReceiver> = Arc::new(RouteChangeReceiver {
            inner: Arc::downgrade(&self.inner),
        });
        let filter = signal::intent_filter();
        let config = &self.inner.config;

        match config
            .broadcast_registry
            .register_receiver(receiver, &filter, config.receiver_export)
        {
            Ok(id) => {
                info!(
                    receiver_id = %id,
                    actions = filter.actions().len(),
                    export = ?config.receiver_export,
                    "Route change receiver registered"
                );
                self.inner
                    .publish(CoreEvent::Monitor(MonitorEvent::Activated {
                        receiver_id: id.to_string(),
                    }));
                *subscription = Some(id);
            }
            Err(e) => {
                error!(error = %e, "Error registering receiver");
                self.inner
                    .publish(CoreEvent::Monitor(MonitorEvent::RegistrationFailed {
                        message: e.to_string(),
                    }));
            }
        }
    }

    /// Unregister the route change receiver. No-op when inactive.
    ///
    /// If the host rejects the unregistration the receiver is still live, so
    /// the handle is kept and the monitor stays active. A host that no longer
    /// knows the receiver releases the handle.
    pub fn deactivate(&self) {
        let mut subscription = self.subscription.lock();

        let Some(id) = subscription.as_ref() else {
            debug!("No receiver to unregister");
            return;
        };

        match self.inner.config.broadcast_registry.unregister_receiver(id) {
            Ok(()) => {
                info!(receiver_id = %id, "Route change receiver unregistered");
                self.inner
                    .publish(CoreEvent::Monitor(MonitorEvent::Deactivated {
                        receiver_id: id.to_string(),
                    }));
                *subscription = None;
            }
            Err(e @ BridgeError::ReceiverNotRegistered(_)) => {
                warn!(receiver_id = %id, error = %e, "Receiver already gone, releasing handle");
                self.inner
                    .publish(CoreEvent::Monitor(MonitorEvent::UnregistrationFailed {
                        receiver_id: id.to_string(),
                        message: e.to_string(),
                    }));
                *subscription = None;
            }
            Err(e) => {
                error!(receiver_id = %id, error = %e, "Error unregistering receiver");
                self.inner
                    .publish(CoreEvent::Monitor(MonitorEvent::UnregistrationFailed {
                        receiver_id: id.to_string(),
                        message: e.to_string(),
                    }));
            }
        }
    }

    pub fn state(&self) -> MonitorState {
        if self.subscription.lock().is_some() {
            MonitorState::Active
        } else {
            MonitorState::Inactive
        }
    }

    pub fn is_active(&self) -> bool {
        self.state() == MonitorState::Active
    }

    /// Handle of the live registration, if any.
    pub fn receiver_id(&self) -> Option<ReceiverId> {
        self.subscription.lock().clone()
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.inner.config
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.inner.event_bus
    }

    /// Subscribe to route and subscription events.
    pub fn subscribe_events(&self) -> EventStream {
        EventStream::new(self.inner.event_bus.subscribe())
    }
}

impl Drop for DeviceStateMonitor {
    fn drop(&mut self) {
        self.deactivate();
    }
}

impl std::fmt::Debug for DeviceStateMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceStateMonitor")
            .field("state", &self.state())
            .field("receiver_id", &self.receiver_id())
            .field("config", &self.inner.config)
            .finish()
    }
}
