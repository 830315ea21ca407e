//! System signal decoding
//!
//! Broadcasts are decoded into [`SystemSignal`] for logging only. Every
//! signal, known or not, leads to the same recompute-and-notify action.

use bridge_traits::bluetooth::AdapterState;
use bridge_traits::broadcast::{actions, extras, BroadcastIntent, IntentFilter};
use core_runtime::logging::redact_device_address;

/// Value reported when the headset plug intent carries no state extra.
const HEADSET_STATE_MISSING: i64 = -1;

/// `BluetoothAdapter.ERROR`, reported when the adapter state extra is missing.
const ADAPTER_STATE_ERROR: i64 = i32::MIN as i64;

/// Actions the monitor subscribes to.
pub const MONITORED_ACTIONS: [&str; 7] = [
    actions::HEADSET_PLUG,
    actions::BLUETOOTH_ADAPTER_STATE_CHANGED,
    actions::BLUETOOTH_CONNECTION_STATE_CHANGED,
    actions::BLUETOOTH_ACL_CONNECTED,
    actions::BLUETOOTH_ACL_DISCONNECTED,
    actions::SCO_AUDIO_STATE_UPDATED,
    actions::AUDIO_BECOMING_NOISY,
];

/// Filter covering [`MONITORED_ACTIONS`].
pub fn intent_filter() -> IntentFilter {
    MONITORED_ACTIONS
        .iter()
        .fold(IntentFilter::new(), |filter, action| filter.add_action(*action))
}

/// A decoded system broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SystemSignal {
    HeadsetPlug { state: i64, name: Option<String> },
    AdapterStateChanged { state: AdapterState },
    ConnectionStateChanged,
    AclConnected { device: Option<String> },
    AclDisconnected { device: Option<String> },
    ScoAudioStateUpdated { state: Option<i64> },
    BecomingNoisy,
    Unknown(String),
}

impl SystemSignal {
    /// Decode an intent. Returns `None` for intents without an action.
    pub fn decode(intent: &BroadcastIntent) -> Option<Self> {
        let action = intent.action.as_deref()?;

        let signal = match action {
            actions::HEADSET_PLUG => SystemSignal::HeadsetPlug {
                state: intent
                    .int_extra(extras::HEADSET_STATE)
                    .unwrap_or(HEADSET_STATE_MISSING),
                name: intent.string_extra(extras::HEADSET_NAME).map(str::to_string),
            },
            actions::BLUETOOTH_ADAPTER_STATE_CHANGED => SystemSignal::AdapterStateChanged {
                state: AdapterState::from_android_code(
                    intent
                        .int_extra(extras::BLUETOOTH_ADAPTER_STATE)
                        .unwrap_or(ADAPTER_STATE_ERROR),
                ),
            },
            actions::BLUETOOTH_CONNECTION_STATE_CHANGED => SystemSignal::ConnectionStateChanged,
            actions::BLUETOOTH_ACL_CONNECTED => SystemSignal::AclConnected {
                device: intent
                    .string_extra(extras::BLUETOOTH_DEVICE_ADDRESS)
                    .map(str::to_string),
            },
            actions::BLUETOOTH_ACL_DISCONNECTED => SystemSignal::AclDisconnected {
                device: intent
                    .string_extra(extras::BLUETOOTH_DEVICE_ADDRESS)
                    .map(str::to_string),
            },
            actions::SCO_AUDIO_STATE_UPDATED => SystemSignal::ScoAudioStateUpdated {
                state: intent.int_extra(extras::SCO_AUDIO_STATE),
            },
            actions::AUDIO_BECOMING_NOISY => SystemSignal::BecomingNoisy,
            other => SystemSignal::Unknown(other.to_string()),
        };

        Some(signal)
    }

    /// Short stable name, used as a structured log field.
    pub fn name(&self) -> &'static str {
        match self {
            SystemSignal::HeadsetPlug { .. } => "HEADSET_PLUG",
            SystemSignal::AdapterStateChanged { .. } => "ADAPTER_STATE_CHANGED",
            SystemSignal::ConnectionStateChanged => "CONNECTION_STATE_CHANGED",
            SystemSignal::AclConnected { .. } => "ACL_CONNECTED",
            SystemSignal::AclDisconnected { .. } => "ACL_DISCONNECTED",
            SystemSignal::ScoAudioStateUpdated { .. } => "SCO_AUDIO_STATE_UPDATED",
            SystemSignal::BecomingNoisy => "AUDIO_BECOMING_NOISY",
            SystemSignal::Unknown(_) => "UNKNOWN",
        }
    }

    /// Human-readable line for logs. Device addresses are redacted.
    pub fn describe(&self) -> String {
        match self {
            SystemSignal::HeadsetPlug { state, name } => match name {
                Some(name) => format!("Headset plug state changed: {} ({})", state, name),
                None => format!("Headset plug state changed: {}", state),
            },
            SystemSignal::AdapterStateChanged { state } => {
                format!("Bluetooth adapter state changed: {}", state.name())
            }
            SystemSignal::ConnectionStateChanged => {
                "Bluetooth connection state changed".to_string()
            }
            SystemSignal::AclConnected { device } => {
                with_device("Bluetooth ACL connected", device.as_deref())
            }
            SystemSignal::AclDisconnected { device } => {
                with_device("Bluetooth ACL disconnected", device.as_deref())
            }
            SystemSignal::ScoAudioStateUpdated { state } => match state {
                Some(state) => format!("SCO audio state updated: {}", state),
                None => "SCO audio state updated".to_string(),
            },
            SystemSignal::BecomingNoisy => "Audio becoming noisy".to_string(),
            SystemSignal::Unknown(action) => format!("Unhandled action: {}", action),
        }
    }
}

fn with_device(message: &str, device: Option<&str>) -> String {
    match device {
        Some(address) => format!("{} ({})", message, redact_device_address(address)),
        None => message.to_string(),
    }
}
