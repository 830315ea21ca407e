//! Recording Event Emitter

use bridge_traits::{
    emitter::EventEmitter,
    error::{BridgeError, Result},
};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};

/// An event captured by [`RecordingEmitter`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmittedEvent {
    pub name: String,
    pub payload: Value,
}

/// Event emitter that keeps every emitted event in memory.
#[derive(Debug, Default)]
pub struct RecordingEmitter {
    events: Mutex<Vec<EmittedEvent>>,
    failing: AtomicBool,
}

impl RecordingEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every emission, as when the JS bridge is torn down.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn events(&self) -> Vec<EmittedEvent> {
        self.events.lock().clone()
    }

    pub fn events_named(&self, name: &str) -> Vec<EmittedEvent> {
        self.events
            .lock()
            .iter()
            .filter(|e| e.name == name)
            .cloned()
            .collect()
    }

    pub fn last_event(&self) -> Option<EmittedEvent> {
        self.events.lock().last().cloned()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl EventEmitter for RecordingEmitter {
    fn emit(&self, event_name: &str, payload: Value) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(BridgeError::OperationFailed(format!(
                "emitter rejected {}",
                event_name
            )));
        }

        self.events.lock().push(EmittedEvent {
            name: event_name.to_string(),
            payload,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_records_in_order() {
        let emitter = RecordingEmitter::new();
        emitter.emit("A", json!({"n": 1})).unwrap();
        emitter.emit("B", json!({"n": 2})).unwrap();
        emitter.emit("A", json!({"n": 3})).unwrap();

        assert_eq!(emitter.events().len(), 3);
        assert_eq!(emitter.events_named("A").len(), 2);
        assert_eq!(emitter.last_event().unwrap().payload, json!({"n": 3}));

        emitter.clear();
        assert!(emitter.events().is_empty());
    }

    #[test]
    fn test_failing_emitter_records_nothing() {
        let emitter = RecordingEmitter::new();
        emitter.set_failing(true);

        assert!(emitter.emit("A", Value::Null).is_err());
        assert!(emitter.events().is_empty());
    }
}
