//! # Headphone Detection Core
//!
//! Audio route detection (wired jack vs. Bluetooth) over host bridges.
//!
//! ## Overview
//!
//! - [`DeviceState`]: the two-flag route snapshot reported to the host
//! - [`classify`]: maps output device types to routes
//! - [`SystemSignal`]: decoded system broadcasts, used for diagnostics only
//! - [`DeviceStateMonitor`]: on-demand queries plus the lifecycle-bound
//!   broadcast subscription that pushes snapshots to the host
//!
//! ## Usage
//!
//! ```ignore
//! use core_detect::DeviceStateMonitor;
//! use core_runtime::config::MonitorConfig;
//!
//! let monitor = DeviceStateMonitor::new(MonitorConfig::builder()
//!     .audio_manager(audio)
//!     .bluetooth_adapter(adapter)
//!     .broadcast_registry(registry)
//!     .event_emitter(emitter)
//!     .build()?)?;
//!
//! monitor.activate();
//! let state = monitor.query_state();
//! ```

pub mod classify;
pub mod monitor;
pub mod signal;
pub mod state;

pub use classify::{classify, classify_devices, RouteClass};
pub use monitor::{DeviceStateMonitor, MonitorState};
pub use signal::SystemSignal;
pub use state::DeviceState;
