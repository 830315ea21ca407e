//! Host Lifecycle
//!
//! Lifecycle callbacks delivered by the application runtime to native modules.

use serde::{Deserialize, Serialize};

/// Host lifecycle transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleEvent {
    /// The native module was initialized by the runtime
    Initialized,
    /// The host activity returned to the foreground
    Resumed,
    /// The host activity went to the background
    Paused,
    /// The host is being torn down
    Destroyed,
}

impl LifecycleEvent {
    /// Whether system listeners may be held in this phase
    pub fn allows_listeners(&self) -> bool {
        matches!(self, Self::Initialized | Self::Resumed)
    }
}

/// Lifecycle listener trait
///
/// Implemented by native modules that need to release OS resources while the
/// host is backgrounded:
/// - **Android**: `LifecycleEventListener` (`onHostResume`, `onHostPause`, `onHostDestroy`)
///
/// Hosts invoke these callbacks from a single thread.
pub trait HostLifecycleListener: Send + Sync {
    fn on_host_resume(&self);

    fn on_host_pause(&self);

    fn on_host_destroy(&self);
}
