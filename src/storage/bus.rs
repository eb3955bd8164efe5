//! Storage change bus and per-context rehydration dispatch.
//!
//! A write in one context raises a change notification, carrying only the key
//! name, in every *other* attached context. The writer never hears about its
//! own write. Delivery is a per-context FIFO queue drained by the context's
//! own event loop (`WindowContext::pump_storage_events`), which models the
//! host environment's asynchronous storage events.

use std::collections::HashMap;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::error::SyncError;
use crate::storage::medium::StorageMedium;

/// Couples the shared storage medium with the fan-out of change
/// notifications to attached contexts.
pub struct StorageHub {
    medium: Arc<dyn StorageMedium>,
    contexts: Mutex<Vec<(Uuid, Sender<String>)>>,
}

impl StorageHub {
    pub fn new(medium: Arc<dyn StorageMedium>) -> Arc<Self> {
        Arc::new(Self {
            medium,
            contexts: Mutex::new(Vec::new()),
        })
    }

    /// Attach a new window context. Returns its write handle and the queue
    /// on which foreign-key change notifications arrive.
    pub fn attach(self: &Arc<Self>) -> (ContextStorage, Receiver<String>) {
        let (tx, rx) = channel();
        let context_id = Uuid::new_v4();
        self.contexts.lock().unwrap().push((context_id, tx));
        let storage = ContextStorage {
            hub: Arc::clone(self),
            context_id,
        };
        (storage, rx)
    }

    fn broadcast(&self, writer: Uuid, key: &str) {
        let mut contexts = self.contexts.lock().unwrap();
        // A failed send means that context's queue is gone (window closed);
        // drop it from the fan-out list.
        contexts.retain(|(id, tx)| *id == writer || tx.send(key.to_string()).is_ok());
    }
}

/// One context's handle onto the shared storage. Writes go to the medium and
/// then notify every other context.
#[derive(Clone)]
pub struct ContextStorage {
    hub: Arc<StorageHub>,
    context_id: Uuid,
}

impl ContextStorage {
    pub fn context_id(&self) -> Uuid {
        self.context_id
    }

    pub fn read(&self, key: &str) -> Option<String> {
        self.hub.medium.read(key)
    }

    pub fn write(&self, key: &str, value: &str) -> Result<(), SyncError> {
        self.hub.medium.write(key, value)?;
        self.hub.broadcast(self.context_id, key);
        Ok(())
    }
}

/// Typed dispatch table mapping a store key to its rehydration callback.
/// Built once per context; a single bus subscription fans out through it to
/// every registered store.
#[derive(Default)]
pub struct RehydrationDispatcher {
    routes: HashMap<&'static str, Box<dyn Fn() + Send>>,
}

impl RehydrationDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, key: &'static str, rehydrate: impl Fn() + Send + 'static) {
        if self.routes.insert(key, Box::new(rehydrate)).is_some() {
            log::warn!("rehydration route for {} replaced; one store owns each key", key);
        }
    }

    /// Invoke the matching store's rehydration. Returns whether a route was
    /// registered for the key.
    pub fn dispatch(&self, key: &str) -> bool {
        match self.routes.get(key) {
            Some(rehydrate) => {
                rehydrate();
                true
            }
            None => false,
        }
    }
}
