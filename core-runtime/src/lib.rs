//! # Core Runtime Module
//!
//! Provides the ambient runtime infrastructure for the headphone detection core:
//! - Logging and tracing infrastructure with host log forwarding
//! - Monitor configuration and bridge validation
//! - In-process event bus for route and monitor events
//!
//! ## Overview
//!
//! This crate holds everything the detection logic needs that is not itself
//! detection logic. `core-detect` and `core-service` depend on it; host
//! bridges do not.

pub mod config;
pub mod error;
pub mod events;
pub mod logging;

pub use error::{Error, Result};
