//! Bluetooth Adapter Abstraction

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Bluetooth adapter power state
///
/// Carried by adapter state-change broadcasts. Only used for diagnostics; the
/// core never derives route state from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdapterState {
    Off,
    TurningOn,
    On,
    TurningOff,
    Unknown(i64),
}

impl AdapterState {
    /// Convert an Android `BluetoothAdapter.STATE_*` code
    pub fn from_android_code(code: i64) -> Self {
        match code {
            10 => Self::Off,
            11 => Self::TurningOn,
            12 => Self::On,
            13 => Self::TurningOff,
            other => Self::Unknown(other),
        }
    }

    pub fn name(&self) -> String {
        match self {
            Self::Off => "STATE_OFF".to_string(),
            Self::TurningOn => "STATE_TURNING_ON".to_string(),
            Self::On => "STATE_ON".to_string(),
            Self::TurningOff => "STATE_TURNING_OFF".to_string(),
            Self::Unknown(code) => format!("UNKNOWN_STATE_{}", code),
        }
    }
}

/// Bluetooth adapter trait
///
/// - **Android**: `BluetoothAdapter.getDefaultAdapter()?.isEnabled`
/// - **Simulated**: a toggleable flag
///
/// Devices without Bluetooth hardware simply do not provide an adapter; the
/// core then reports no Bluetooth route.
pub trait BluetoothAdapter: Send + Sync {
    /// Whether the adapter is powered on
    fn is_enabled(&self) -> Result<bool>;
}
