//! Simulated Bluetooth Adapter

use bridge_traits::{
    bluetooth::BluetoothAdapter,
    error::{BridgeError, Result},
};
use std::sync::atomic::{AtomicBool, Ordering};

/// Toggleable Bluetooth adapter.
#[derive(Debug)]
pub struct SimulatedBluetoothAdapter {
    enabled: AtomicBool,
    failing: AtomicBool,
}

impl SimulatedBluetoothAdapter {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: AtomicBool::new(enabled),
            failing: AtomicBool::new(false),
        }
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    /// Make every query fail, as when the Bluetooth service is missing.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl Default for SimulatedBluetoothAdapter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl BluetoothAdapter for SimulatedBluetoothAdapter {
    fn is_enabled(&self) -> Result<bool> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(BridgeError::NotAvailable(
                "bluetooth service not obtainable".to_string(),
            ));
        }
        Ok(self.enabled.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let adapter = SimulatedBluetoothAdapter::new(false);
        assert!(!adapter.is_enabled().unwrap());

        adapter.set_enabled(true);
        assert!(adapter.is_enabled().unwrap());

        adapter.set_failing(true);
        assert!(adapter.is_enabled().is_err());
    }
}
