//! Generic persisted store: an in-process state container that loads its
//! initial value from storage and writes every mutation back through the
//! envelope codec.

use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::codec;
use crate::storage::bus::ContextStorage;

pub struct PersistedStore<T> {
    inner: Arc<Inner<T>>,
}

struct Inner<T> {
    key: &'static str,
    state: Mutex<T>,
    storage: ContextStorage,
}

impl<T> Clone for PersistedStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> PersistedStore<T>
where
    T: Clone + Serialize + DeserializeOwned,
{
    /// Rehydrate-or-default construction: an existing storage value wins,
    /// otherwise the store seeds with `default`. Nothing is written back
    /// until the first mutation.
    pub fn new(storage: ContextStorage, key: &'static str, default: T) -> Self {
        let state = codec::decode(storage.read(key).as_deref()).unwrap_or(default);
        Self {
            inner: Arc::new(Inner {
                key,
                state: Mutex::new(state),
                storage,
            }),
        }
    }

    pub fn key(&self) -> &'static str {
        self.inner.key
    }

    /// Synchronous clone of the current in-memory state.
    pub fn get(&self) -> T {
        self.inner.state.lock().unwrap().clone()
    }

    /// Mutate in place. When `mutate` reports a change, the full new state is
    /// persisted; a `false` return skips the storage write entirely (the
    /// no-op path for unregistered ids).
    pub fn update(&self, mutate: impl FnOnce(&mut T) -> bool) {
        let mut state = self.inner.state.lock().unwrap();
        if mutate(&mut state) {
            self.persist(&state);
        }
    }

    /// Replace the whole state and persist.
    pub fn replace(&self, next: T) {
        let mut state = self.inner.state.lock().unwrap();
        *state = next;
        self.persist(&state);
    }

    /// Reload from storage. A missing or undecodable value leaves the
    /// current in-memory state untouched; rehydrating never resets a store
    /// to its default.
    pub fn rehydrate(&self) {
        let decoded = codec::decode(self.inner.storage.read(self.inner.key).as_deref());
        if let Some(next) = decoded {
            *self.inner.state.lock().unwrap() = next;
        }
    }

    // Persistence is best effort: on failure the in-memory state stays
    // correct for this context and other contexts simply never observe the
    // change. No retry.
    fn persist(&self, state: &T) {
        let encoded = match codec::encode(state) {
            Ok(encoded) => encoded,
            Err(e) => {
                log::warn!("failed to encode {}: {}", self.inner.key, e);
                return;
            }
        };
        if let Err(e) = self.inner.storage.write(self.inner.key, &encoded) {
            log::warn!("failed to persist {}: {}", self.inner.key, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde::Deserialize;

    use super::*;
    use crate::error::SyncError;
    use crate::storage::bus::StorageHub;
    use crate::storage::medium::{MemoryMedium, StorageMedium};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Counter {
        value: u32,
    }

    const KEY: &str = "store:counter";

    #[test]
    fn seeds_default_when_storage_is_empty() {
        let hub = StorageHub::new(Arc::new(MemoryMedium::new()));
        let (storage, _rx) = hub.attach();
        let store = PersistedStore::new(storage, KEY, Counter { value: 7 });
        assert_eq!(store.get(), Counter { value: 7 });
    }

    #[test]
    fn existing_storage_value_wins_over_default() {
        let hub = StorageHub::new(Arc::new(MemoryMedium::new()));
        let (a, _a_rx) = hub.attach();
        let first = PersistedStore::new(a, KEY, Counter { value: 0 });
        first.update(|c| {
            c.value = 42;
            true
        });

        let (b, _b_rx) = hub.attach();
        let second = PersistedStore::new(b, KEY, Counter { value: 0 });
        assert_eq!(second.get(), Counter { value: 42 });
    }

    #[test]
    fn update_returning_false_writes_nothing() {
        let medium = Arc::new(MemoryMedium::new());
        let hub = StorageHub::new(medium.clone());
        let (storage, _rx) = hub.attach();
        let store = PersistedStore::new(storage, KEY, Counter { value: 0 });
        store.update(|_| false);
        assert_eq!(medium.read(KEY), None);
    }

    #[test]
    fn rehydrate_with_nothing_stored_keeps_current_state() {
        let hub = StorageHub::new(Arc::new(MemoryMedium::new()));
        let (storage, _rx) = hub.attach();
        let store = PersistedStore::new(storage, KEY, Counter { value: 5 });
        store.rehydrate();
        assert_eq!(store.get(), Counter { value: 5 });
    }

    #[test]
    fn rehydrate_is_idempotent() {
        let hub = StorageHub::new(Arc::new(MemoryMedium::new()));
        let (a, _a_rx) = hub.attach();
        let writer = PersistedStore::new(a, KEY, Counter { value: 0 });
        writer.update(|c| {
            c.value = 9;
            true
        });

        let (b, _b_rx) = hub.attach();
        let reader = PersistedStore::new(b, KEY, Counter { value: 0 });
        reader.rehydrate();
        let once = reader.get();
        reader.rehydrate();
        assert_eq!(reader.get(), once);
        assert_eq!(once, Counter { value: 9 });
    }

    struct FullMedium;

    impl StorageMedium for FullMedium {
        fn read(&self, _key: &str) -> Option<String> {
            None
        }

        fn write(&self, _key: &str, _value: &str) -> Result<(), SyncError> {
            Err(SyncError::StorageWrite("quota exceeded".into()))
        }
    }

    #[test]
    fn write_failure_is_swallowed_and_local_state_stays_correct() {
        let hub = StorageHub::new(Arc::new(FullMedium));
        let (storage, _rx) = hub.attach();
        let (_other, other_rx) = hub.attach();
        let store = PersistedStore::new(storage, KEY, Counter { value: 0 });

        store.update(|c| {
            c.value = 3;
            true
        });

        assert_eq!(store.get(), Counter { value: 3 });
        // The failed write must not be announced to anyone.
        assert!(other_rx.try_recv().is_err());
    }
}
