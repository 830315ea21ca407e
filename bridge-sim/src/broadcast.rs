//! Simulated Broadcast Hub

use bridge_traits::{
    broadcast::{
        BroadcastIntent, BroadcastReceiver, BroadcastRegistry, IntentFilter, ReceiverExport,
        ReceiverId,
    },
    error::{BridgeError, Result},
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};

struct Registration {
    receiver: Arc<dyn BroadcastReceiver>,
    filter: IntentFilter,
    export: ReceiverExport,
}

/// Synchronous in-process broadcast dispatcher.
///
/// [`send_broadcast`](Self::send_broadcast) delivers an intent to every
/// matching receiver on the calling thread, one receiver at a time. The
/// registry lock is released before receivers run, so a receiver may
/// register or unregister from inside its callback.
pub struct SimulatedBroadcastHub {
    registrations: Mutex<HashMap<ReceiverId, Registration>>,
    fail_register: AtomicBool,
    fail_unregister: AtomicBool,
}

impl SimulatedBroadcastHub {
    pub fn new() -> Self {
        Self {
            registrations: Mutex::new(HashMap::new()),
            fail_register: AtomicBool::new(false),
            fail_unregister: AtomicBool::new(false),
        }
    }

    /// Make `register_receiver` fail, as with a `SecurityException`.
    pub fn set_fail_register(&self, fail: bool) {
        self.fail_register.store(fail, Ordering::SeqCst);
    }

    /// Make `unregister_receiver` fail.
    pub fn set_fail_unregister(&self, fail: bool) {
        self.fail_unregister.store(fail, Ordering::SeqCst);
    }

    /// Deliver an intent. Returns the number of receivers invoked.
    pub fn send_broadcast(&self, intent: &BroadcastIntent) -> usize {
        let targets: Vec<Arc<dyn BroadcastReceiver>> = {
            let registrations = self.registrations.lock();
            registrations
                .values()
                .filter(|r| r.filter.matches(intent))
                .map(|r| Arc::clone(&r.receiver))
                .collect()
        };

        trace!(
            action = ?intent.action,
            receivers = targets.len(),
            "Dispatching simulated broadcast"
        );

        for receiver in &targets {
            receiver.on_receive(intent);
        }

        targets.len()
    }

    /// Number of live registrations.
    pub fn registration_count(&self) -> usize {
        self.registrations.lock().len()
    }

    pub fn is_registered(&self, id: &ReceiverId) -> bool {
        self.registrations.lock().contains_key(id)
    }

    /// Filter of a live registration.
    pub fn filter_for(&self, id: &ReceiverId) -> Option<IntentFilter> {
        self.registrations.lock().get(id).map(|r| r.filter.clone())
    }

    /// Export flag of a live registration.
    pub fn export_for(&self, id: &ReceiverId) -> Option<ReceiverExport> {
        self.registrations.lock().get(id).map(|r| r.export)
    }
}

impl Default for SimulatedBroadcastHub {
    fn default() -> Self {
        Self::new()
    }
}

impl BroadcastRegistry for SimulatedBroadcastHub {
    fn register_receiver(
        &self,
        receiver: Arc<dyn BroadcastReceiver>,
        filter: &IntentFilter,
        export: ReceiverExport,
    ) -> Result<ReceiverId> {
        if self.fail_register.load(Ordering::SeqCst) {
            return Err(BridgeError::OperationFailed(
                "receiver registration rejected".to_string(),
            ));
        }

        let id = ReceiverId::generate();
        self.registrations.lock().insert(
            id.clone(),
            Registration {
                receiver,
                filter: filter.clone(),
                export,
            },
        );

        debug!(receiver_id = %id, actions = filter.actions().len(), "Receiver registered");
        Ok(id)
    }

    fn unregister_receiver(&self, id: &ReceiverId) -> Result<()> {
        if self.fail_unregister.load(Ordering::SeqCst) {
            return Err(BridgeError::OperationFailed(
                "receiver unregistration rejected".to_string(),
            ));
        }

        match self.registrations.lock().remove(id) {
            Some(_) => {
                debug!(receiver_id = %id, "Receiver unregistered");
                Ok(())
            }
            None => Err(BridgeError::ReceiverNotRegistered(id.to_string())),
        }
    }
}
