//! Window visibility registry.
//!
//! Some windows are hidden rather than destroyed to avoid remount cost, so
//! "is the dock showing" cannot be answered by asking whether it exists.
//! Every window reports its own visibility here; absence of an entry means
//! "untracked", which is distinct from `false`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::codec::ordered_pairs;
use crate::events::WINDOW_VISIBILITY_KEY;
use crate::storage::bus::ContextStorage;
use crate::storage::store::PersistedStore;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowVisibilityState {
    #[serde(with = "ordered_pairs")]
    pub windows: IndexMap<String, bool>,
}

#[derive(Clone)]
pub struct WindowVisibilityRegistry {
    store: PersistedStore<WindowVisibilityState>,
}

impl WindowVisibilityRegistry {
    pub fn new(storage: ContextStorage) -> Self {
        Self {
            store: PersistedStore::new(
                storage,
                WINDOW_VISIBILITY_KEY,
                WindowVisibilityState::default(),
            ),
        }
    }

    /// Register a window with its current visibility, fetched fresh from the
    /// native host at mount time. Unlike list-box registration this always
    /// overwrites: a remounting window knows better than a stale entry.
    pub fn add_window(&self, id: &str, visible: bool) {
        self.store
            .update(|state| state.windows.insert(id.to_string(), visible) != Some(visible));
    }

    /// Update a tracked window's visibility. No-op for a window that was
    /// never registered; updates before registration are lost.
    pub fn set_window_open_state(&self, id: &str, visible: bool) {
        self.store.update(|state| match state.windows.get_mut(id) {
            Some(current) if *current != visible => {
                *current = visible;
                true
            }
            _ => false,
        });
    }

    /// `None` for a window that was never registered.
    pub fn visibility(&self, id: &str) -> Option<bool> {
        self.store.get().windows.get(id).copied()
    }

    pub fn snapshot(&self) -> WindowVisibilityState {
        self.store.get()
    }

    pub fn rehydrate(&self) {
        self.store.rehydrate()
    }
}
