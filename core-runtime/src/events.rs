//! # Event Bus System
//!
//! In-process event bus for the headphone detection core, built on
//! `tokio::sync::broadcast`.
//!
//! ## Overview
//!
//! The host notification channel (`AUDIO_DEVICE_CHANGED_NOTIFICATION`) goes
//! through the `EventEmitter` bridge and leaves the process. The event bus is
//! the Rust-side counterpart: route changes and monitor lifecycle transitions
//! are published here so in-process consumers (diagnostics, other native
//! modules) can observe them without a round trip through the host runtime.
//!
//! ```text
//! ┌──────────────────┐  emit   ┌───────────┐  subscribe  ┌────────────┐
//! │ DeviceStateMonitor├───────>│ EventBus  ├────────────>│ Subscriber │
//! └──────────────────┘         └───────────┘             └────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use core_runtime::events::{CoreEvent, EventBus, RouteEvent};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let bus = EventBus::new(16);
//! let mut rx = bus.subscribe();
//!
//! bus.emit(CoreEvent::Route(RouteEvent::Changed {
//!     audio_jack: true,
//!     bluetooth: false,
//!     signal: "HEADSET_PLUG".to_string(),
//! }))
//! .ok();
//!
//! let event = rx.recv().await.unwrap();
//! assert_eq!(event.description(), "Audio route changed");
//! # }
//! ```
//!
//! ## Error Handling
//!
//! - **`RecvError::Lagged(n)`**: the subscriber missed `n` events; it can keep
//!   receiving. Route events are full snapshots, so only the latest matters.
//! - **`RecvError::Closed`**: every sender was dropped; treat as shutdown.
//!
//! Emitting with no subscribers returns `SendError`; publishers ignore it.

use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::broadcast;

// Re-export commonly used types
pub use tokio::sync::broadcast::error::{RecvError, SendError};
pub use tokio::sync::broadcast::Receiver;

/// Default buffer size for the event bus channel.
pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 100;

// ============================================================================
// Core Event Types
// ============================================================================

/// Top-level event published on the bus.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "payload")]
pub enum CoreEvent {
    /// Audio route snapshots
    Route(RouteEvent),
    /// Subscription lifecycle of the monitor
    Monitor(MonitorEvent),
}

impl CoreEvent {
    /// Returns a human-readable description of the event.
    pub fn description(&self) -> &str {
        match self {
            CoreEvent::Route(e) => e.description(),
            CoreEvent::Monitor(e) => e.description(),
        }
    }

    /// Returns the severity level of the event.
    pub fn severity(&self) -> EventSeverity {
        match self {
            CoreEvent::Monitor(MonitorEvent::RegistrationFailed { .. })
            | CoreEvent::Monitor(MonitorEvent::UnregistrationFailed { .. }) => EventSeverity::Error,
            CoreEvent::Monitor(MonitorEvent::NotificationFailed { .. }) => EventSeverity::Warning,
            CoreEvent::Monitor(MonitorEvent::Activated { .. })
            | CoreEvent::Monitor(MonitorEvent::Deactivated { .. }) => EventSeverity::Info,
            CoreEvent::Route(_) => EventSeverity::Debug,
        }
    }
}

/// Event severity levels for filtering and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventSeverity {
    Debug,
    Info,
    Warning,
    Error,
}

// ============================================================================
// Route Events
// ============================================================================

/// Audio route state published after each recompute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum RouteEvent {
    /// A subscribed system signal fired and the route was recomputed.
    ///
    /// Published for every signal, even when the snapshot is unchanged.
    Changed {
        /// A wired headphone, wired headset or USB headset is active.
        audio_jack: bool,
        /// A Bluetooth A2DP, SCO or BLE headset is active and the adapter is on.
        bluetooth: bool,
        /// Name of the signal that triggered the recompute (diagnostics only).
        signal: String,
    },
}

impl RouteEvent {
    fn description(&self) -> &str {
        match self {
            RouteEvent::Changed { .. } => "Audio route changed",
        }
    }
}

// ============================================================================
// Monitor Events
// ============================================================================

/// Subscription lifecycle of the device state monitor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum MonitorEvent {
    /// A system receiver was registered.
    Activated { receiver_id: String },
    /// The system receiver was released.
    Deactivated { receiver_id: String },
    /// Registering the receiver failed; push notifications are unavailable.
    RegistrationFailed { message: String },
    /// The host rejected the unregistration. The handle is kept unless the
    /// host no longer knows the receiver.
    UnregistrationFailed {
        receiver_id: String,
        message: String,
    },
    /// The host emitter rejected a notification.
    NotificationFailed { message: String },
}

impl MonitorEvent {
    fn description(&self) -> &str {
        match self {
            MonitorEvent::Activated { .. } => "Monitoring activated",
            MonitorEvent::Deactivated { .. } => "Monitoring deactivated",
            MonitorEvent::RegistrationFailed { .. } => "Receiver registration failed",
            MonitorEvent::UnregistrationFailed { .. } => "Receiver unregistration failed",
            MonitorEvent::NotificationFailed { .. } => "Notification delivery failed",
        }
    }
}

// ============================================================================
// Event Bus
// ============================================================================

#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<CoreEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn emit(&self, event: CoreEvent) -> Result<usize, SendError<CoreEvent>> {
        self.sender.send(event)
    }

    pub fn subscribe(&self) -> Receiver<CoreEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUFFER_SIZE)
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}

// ============================================================================
// Event Stream Wrapper
// ============================================================================

type EventFilter = Box<dyn Fn(&CoreEvent) -> bool + Send + Sync>;

pub struct EventStream {
    receiver: Receiver<CoreEvent>,
    filter: Option<EventFilter>,
}

impl EventStream {
    pub fn new(receiver: Receiver<CoreEvent>) -> Self {
        Self {
            receiver,
            filter: None,
        }
    }

    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&CoreEvent) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Box::new(predicate));
        self
    }

    pub async fn recv(&mut self) -> Result<CoreEvent, RecvError> {
        loop {
            let event = self.receiver.recv().await?;

            let Some(filter) = &self.filter else {
                return Ok(event);
            };

            if filter(&event) {
                return Ok(event);
            }
        }
    }

    pub fn try_recv(&mut self) -> Option<Result<CoreEvent, RecvError>> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => {
                    let Some(filter) = &self.filter else {
                        return Some(Ok(event));
                    };

                    if filter(&event) {
                        return Some(Ok(event));
                    }
                }
                Err(broadcast::error::TryRecvError::Empty) => return None,
                Err(broadcast::error::TryRecvError::Lagged(n)) => {
                    return Some(Err(RecvError::Lagged(n)))
                }
                Err(broadcast::error::TryRecvError::Closed) => return Some(Err(RecvError::Closed)),
            }
        }
    }
}

impl fmt::Debug for EventStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventStream")
            .field("has_filter", &self.filter.is_some())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn route_changed(audio_jack: bool, bluetooth: bool) -> CoreEvent {
        CoreEvent::Route(RouteEvent::Changed {
            audio_jack,
            bluetooth,
            signal: "HEADSET_PLUG".to_string(),
        })
    }

    #[tokio::test]
    async fn test_event_bus_subscription() {
        let bus = EventBus::new(10);
        assert_eq!(bus.subscriber_count(), 0);

        let _sub1 = bus.subscribe();
        let _sub2 = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);
    }

    #[tokio::test]
    async fn test_event_emission_no_subscribers() {
        let bus = EventBus::new(10);
        assert!(bus.emit(route_changed(false, false)).is_err());
    }

    #[tokio::test]
    async fn test_multiple_subscribers_receive_same_event() {
        let bus = EventBus::new(10);
        let mut sub1 = bus.subscribe();
        let mut sub2 = bus.subscribe();

        let event = route_changed(true, true);
        assert_eq!(bus.emit(event.clone()).unwrap(), 2);

        assert_eq!(sub1.recv().await.unwrap(), event);
        assert_eq!(sub2.recv().await.unwrap(), event);
    }

    #[tokio::test]
    async fn test_event_stream_with_filter() {
        let bus = EventBus::new(10);
        let mut stream = EventStream::new(bus.subscribe())
            .filter(|event| matches!(event, CoreEvent::Monitor(_)));

        bus.emit(route_changed(true, false)).ok();
        let activated = CoreEvent::Monitor(MonitorEvent::Activated {
            receiver_id: "receiver-1".to_string(),
        });
        bus.emit(activated.clone()).ok();

        assert_eq!(stream.recv().await.unwrap(), activated);
    }

    #[tokio::test]
    async fn test_lagged_subscriber() {
        let bus = EventBus::new(2);
        let mut sub = bus.subscribe();

        for _ in 0..5 {
            bus.emit(route_changed(true, false)).ok();
        }

        let result = sub.recv().await;
        assert!(matches!(result, Err(RecvError::Lagged(_))));
    }

    #[test]
    fn test_event_severity() {
        let failed = CoreEvent::Monitor(MonitorEvent::RegistrationFailed {
            message: "SecurityException".to_string(),
        });
        assert_eq!(failed.severity(), EventSeverity::Error);

        let activated = CoreEvent::Monitor(MonitorEvent::Activated {
            receiver_id: "receiver-1".to_string(),
        });
        assert_eq!(activated.severity(), EventSeverity::Info);

        assert_eq!(route_changed(true, false).severity(), EventSeverity::Debug);
    }

    #[test]
    fn test_event_description() {
        let event = CoreEvent::Monitor(MonitorEvent::Deactivated {
            receiver_id: "receiver-1".to_string(),
        });
        assert_eq!(event.description(), "Monitoring deactivated");
    }

    #[test]
    fn test_event_serialization_shape() {
        let json = serde_json::to_value(route_changed(true, false)).unwrap();

        assert_eq!(json["type"], "Route");
        assert_eq!(json["payload"]["event"], "Changed");
        assert_eq!(json["payload"]["audio_jack"], true);
        assert_eq!(json["payload"]["signal"], "HEADSET_PLUG");
    }

    #[tokio::test]
    async fn test_try_recv_empty() {
        let bus = EventBus::new(10);
        let mut stream = EventStream::new(bus.subscribe());

        assert!(stream.try_recv().is_none());
    }

    #[tokio::test]
    async fn test_try_recv_skips_filtered_events() {
        let bus = EventBus::new(10);
        let mut stream = EventStream::new(bus.subscribe())
            .filter(|event| matches!(event, CoreEvent::Route(_)));

        bus.emit(CoreEvent::Monitor(MonitorEvent::NotificationFailed {
            message: "bridge gone".to_string(),
        }))
        .ok();
        bus.emit(route_changed(false, true)).ok();

        let received = stream.try_recv().unwrap().unwrap();
        assert_eq!(received, route_changed(false, true));
        assert!(stream.try_recv().is_none());
    }
}
