//! Audio route snapshot

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which audio output routes are currently active.
///
/// Always recomputed from live host state; never updated incrementally.
/// Serializes as `{ "audioJack": bool, "bluetooth": bool }`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceState {
    pub audio_jack: bool,
    pub bluetooth: bool,
}

impl DeviceState {
    /// Neither route active.
    pub const DISCONNECTED: DeviceState = DeviceState {
        audio_jack: false,
        bluetooth: false,
    };

    pub fn new(audio_jack: bool, bluetooth: bool) -> Self {
        Self {
            audio_jack,
            bluetooth,
        }
    }

    /// Payload sent on the host notification channel.
    pub fn to_payload(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}
