//! System Broadcast Abstraction
//!
//! Models the host's broadcast/intent delivery: a receiver registers interest
//! in a set of action names and is called back with each matching intent.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::Result;

/// Well-known broadcast action names (Android values)
pub mod actions {
    pub const HEADSET_PLUG: &str = "android.intent.action.HEADSET_PLUG";
    pub const BLUETOOTH_ADAPTER_STATE_CHANGED: &str =
        "android.bluetooth.adapter.action.STATE_CHANGED";
    pub const BLUETOOTH_CONNECTION_STATE_CHANGED: &str =
        "android.bluetooth.adapter.action.CONNECTION_STATE_CHANGED";
    pub const BLUETOOTH_ACL_CONNECTED: &str = "android.bluetooth.device.action.ACL_CONNECTED";
    pub const BLUETOOTH_ACL_DISCONNECTED: &str =
        "android.bluetooth.device.action.ACL_DISCONNECTED";
    pub const SCO_AUDIO_STATE_UPDATED: &str = "android.media.ACTION_SCO_AUDIO_STATE_UPDATED";
    pub const AUDIO_BECOMING_NOISY: &str = "android.media.AUDIO_BECOMING_NOISY";
}

/// Well-known intent extra keys (Android values)
pub mod extras {
    /// Headset plug state: 0 unplugged, 1 plugged
    pub const HEADSET_STATE: &str = "state";
    pub const HEADSET_NAME: &str = "name";
    pub const BLUETOOTH_ADAPTER_STATE: &str = "android.bluetooth.adapter.extra.STATE";
    pub const BLUETOOTH_DEVICE_ADDRESS: &str = "android.bluetooth.device.extra.DEVICE";
    pub const SCO_AUDIO_STATE: &str = "android.media.extra.SCO_AUDIO_STATE";
}

/// Value of an intent extra
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtraValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

/// A delivered broadcast
///
/// `action` is optional because hosts may deliver intents without one; such
/// intents carry no signal and are ignored by the core.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BroadcastIntent {
    pub action: Option<String>,
    #[serde(default)]
    pub extras: HashMap<String, ExtraValue>,
}

impl BroadcastIntent {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: Some(action.into()),
            extras: HashMap::new(),
        }
    }

    pub fn with_int_extra(mut self, key: impl Into<String>, value: i64) -> Self {
        self.extras.insert(key.into(), ExtraValue::Int(value));
        self
    }

    pub fn with_string_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extras.insert(key.into(), ExtraValue::Str(value.into()));
        self
    }

    pub fn int_extra(&self, key: &str) -> Option<i64> {
        match self.extras.get(key) {
            Some(ExtraValue::Int(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn string_extra(&self, key: &str) -> Option<&str> {
        match self.extras.get(key) {
            Some(ExtraValue::Str(value)) => Some(value.as_str()),
            _ => None,
        }
    }
}

/// Set of actions a receiver is interested in
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntentFilter {
    actions: Vec<String>,
}

impl IntentFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an action; duplicates are ignored
    pub fn add_action(mut self, action: impl Into<String>) -> Self {
        let action = action.into();
        if !self.actions.contains(&action) {
            self.actions.push(action);
        }
        self
    }

    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    pub fn matches(&self, intent: &BroadcastIntent) -> bool {
        intent
            .action
            .as_deref()
            .is_some_and(|action| self.actions.iter().any(|a| a == action))
    }
}

/// Visibility of a registered receiver to other applications
///
/// Maps to `Context.RECEIVER_NOT_EXPORTED` / `RECEIVER_EXPORTED` on Android 8+.
/// Hosts on older releases ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReceiverExport {
    #[default]
    NotExported,
    Exported,
}

/// Handle to a registered receiver
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReceiverId(pub String);

impl ReceiverId {
    /// Generate a fresh unique id
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for ReceiverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Callback for delivered broadcasts
///
/// Hosts call `on_receive` on their event-dispatch thread. A call must run to
/// completion before the next intent is delivered to the same receiver.
pub trait BroadcastReceiver: Send + Sync {
    fn on_receive(&self, intent: &BroadcastIntent);
}

/// Broadcast registry trait
///
/// - **Android**: `Context.registerReceiver` / `unregisterReceiver`
/// - **Simulated**: in-process dispatch hub
///
/// # Example
///
/// ```ignore
/// use bridge_traits::broadcast::{actions, BroadcastRegistry, IntentFilter, ReceiverExport};
///
/// fn watch_plug(registry: &dyn BroadcastRegistry, receiver: Arc<dyn BroadcastReceiver>) -> Result<ReceiverId> {
///     let filter = IntentFilter::new().add_action(actions::HEADSET_PLUG);
///     registry.register_receiver(receiver, &filter, ReceiverExport::NotExported)
/// }
/// ```
pub trait BroadcastRegistry: Send + Sync {
    /// Register a receiver for every action in `filter`
    fn register_receiver(
        &self,
        receiver: Arc<dyn BroadcastReceiver>,
        filter: &IntentFilter,
        export: ReceiverExport,
    ) -> Result<ReceiverId>;

    /// Unregister a previously registered receiver
    ///
    /// Returns [`BridgeError::ReceiverNotRegistered`] for unknown ids.
    ///
    /// [`BridgeError::ReceiverNotRegistered`]: crate::error::BridgeError::ReceiverNotRegistered
    fn unregister_receiver(&self, id: &ReceiverId) -> Result<()>;
}
