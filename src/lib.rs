//! Workspace entry crate.
//!
//! Exposes feature flags that map to the individual workspace crates so host
//! applications can depend on `headphone-detect` alone:
//!
//! - `host`: the [`HeadphoneDetectModule`] façade, with bridges injected by the
//!   embedding runtime
//! - `sim-shims` (default): additionally the simulated host from `bridge-sim`

#[cfg(feature = "host")]
pub use core_service::{
    CoreError, HeadphoneDetectModule, ModuleDependencies, Result, MODULE_NAME,
};

#[cfg(feature = "sim-shims")]
pub use core_service::{bootstrap_simulated, SimulatedHost};
