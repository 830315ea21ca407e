//! Outbound Event Emission

use serde_json::Value;

use crate::error::Result;

/// Event emitter trait
///
/// Pushes a named event with a JSON payload to the application runtime:
/// - **React Native**: `RCTDeviceEventEmitter.emit(eventName, params)`
/// - **Simulated**: records emitted events for inspection
///
/// The core never retries a failed emission.
pub trait EventEmitter: Send + Sync {
    fn emit(&self, event_name: &str, payload: Value) -> Result<()>;
}
