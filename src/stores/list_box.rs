//! Standalone list-box registry.
//!
//! One entry per logical selectable list (microphones, cameras, system-audio
//! sources, ...) shared by every window. A requesting window registers an
//! entry and populates its candidates; the auxiliary selector window, running
//! in a different context, reads whichever entry is currently open and writes
//! the user's choice back. At most one list-box is open at a time.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::codec::ordered_pairs;
use crate::events::LIST_BOX_REGISTRY_KEY;
use crate::storage::bus::ContextStorage;
use crate::storage::store::PersistedStore;

/// One selectable row. `id: None` marks a row that stands for "no selection"
/// (e.g. "No microphone") and never appears in `selected_items`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: Option<String>,
    pub label: String,
}

impl Item {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            label: label.into(),
        }
    }

    pub fn none_row(label: impl Into<String>) -> Self {
        Self {
            id: None,
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListBox {
    pub label: String,
    pub items: Vec<Item>,
    /// Authoritative record of what the user picked. May reference an id no
    /// longer present in `items` (device disconnected); consumers decide how
    /// to surface that, this layer keeps it as-is.
    pub selected_items: Vec<Item>,
}

/// The selection, for single-select consumers: the first selected item.
/// Callers go through this accessor rather than indexing positionally.
pub fn primary_selection(list: &ListBox) -> Option<&Item> {
    list.selected_items.first()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListBoxRegistryState {
    #[serde(with = "ordered_pairs")]
    pub list_boxes: IndexMap<String, ListBox>,
    /// The one list-box currently displayed in the selector window, if any.
    pub open_list_box_id: Option<String>,
}

impl ListBoxRegistryState {
    /// What the selector window should present. An open id whose entry has
    /// not replicated yet renders as an empty list, never an error.
    pub fn open_presentation(&self) -> Option<(String, ListBox)> {
        let id = self.open_list_box_id.clone()?;
        let list_box = self.list_boxes.get(&id).cloned().unwrap_or_default();
        Some((id, list_box))
    }
}

#[derive(Clone)]
pub struct ListBoxRegistry {
    store: PersistedStore<ListBoxRegistryState>,
}

impl ListBoxRegistry {
    pub fn new(storage: ContextStorage) -> Self {
        Self {
            store: PersistedStore::new(
                storage,
                LIST_BOX_REGISTRY_KEY,
                ListBoxRegistryState::default(),
            ),
        }
    }

    /// Register a list-box. First registration wins: a re-add across window
    /// remounts keeps the existing items and selection.
    pub fn add_list_box(&self, id: &str, label: &str) {
        self.store.update(|state| {
            if state.list_boxes.contains_key(id) {
                return false;
            }
            state.list_boxes.insert(
                id.to_string(),
                ListBox {
                    label: label.to_string(),
                    ..ListBox::default()
                },
            );
            true
        });
    }

    /// Replace an entry's candidate items. Selection is untouched. No-op for
    /// an unregistered id.
    pub fn set_items(&self, id: &str, items: Vec<Item>) {
        self.store.update(|state| match state.list_boxes.get_mut(id) {
            Some(list_box) => {
                list_box.items = items;
                true
            }
            None => false,
        });
    }

    /// Replace an entry's selection. No-op for an unregistered id. Rows with
    /// `id: None` stand for the absence of a selection and are dropped
    /// rather than stored, so picking the "No device" row clears it.
    pub fn set_selected_items(&self, id: &str, items: Vec<Item>) {
        self.store.update(|state| match state.list_boxes.get_mut(id) {
            Some(list_box) => {
                list_box.selected_items =
                    items.into_iter().filter(|item| item.id.is_some()).collect();
                true
            }
            None => false,
        });
    }

    /// Mark a list-box as the one displayed in the selector window. Opening
    /// a second id supersedes the first; no explicit close is required for
    /// the one being replaced. No-op for an unregistered id.
    pub fn open_list_box(&self, id: &str) {
        self.store.update(|state| {
            if !state.list_boxes.contains_key(id) {
                return false;
            }
            state.open_list_box_id = Some(id.to_string());
            true
        });
    }

    /// Clear the open pointer. Idempotent.
    pub fn close_list_box(&self) {
        self.store
            .update(|state| state.open_list_box_id.take().is_some());
    }

    pub fn get_list_box(&self, id: &str) -> Option<ListBox> {
        self.store.get().list_boxes.get(id).cloned()
    }

    pub fn open_list_box_id(&self) -> Option<String> {
        self.store.get().open_list_box_id
    }

    pub fn open_presentation(&self) -> Option<(String, ListBox)> {
        self.store.get().open_presentation()
    }

    pub fn snapshot(&self) -> ListBoxRegistryState {
        self.store.get()
    }

    pub fn rehydrate(&self) {
        self.store.rehydrate()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::storage::bus::StorageHub;
    use crate::storage::medium::MemoryMedium;

    fn registry() -> ListBoxRegistry {
        let hub = StorageHub::new(Arc::new(MemoryMedium::new()));
        let (storage, _rx) = hub.attach();
        ListBoxRegistry::new(storage)
    }

    fn mic_items() -> Vec<Item> {
        vec![
            Item::none_row("No microphone"),
            Item::new("built-in", "MacBook Pro Microphone"),
        ]
    }

    #[test]
    fn registration_is_idempotent() {
        let registry = registry();
        registry.add_list_box("mic", "Microphone");
        registry.set_items("mic", mic_items());
        registry.set_selected_items("mic", vec![Item::new("built-in", "MacBook Pro Microphone")]);

        registry.add_list_box("mic", "Microphone");

        let list_box = registry.get_list_box("mic").unwrap();
        assert_eq!(list_box.items, mic_items());
        assert_eq!(
            list_box.selected_items,
            vec![Item::new("built-in", "MacBook Pro Microphone")]
        );
    }

    #[test]
    fn mutating_an_unregistered_id_creates_no_entry() {
        let registry = registry();
        registry.set_items("ghost", mic_items());
        registry.set_selected_items("ghost", mic_items());
        registry.open_list_box("ghost");

        assert!(registry.snapshot().list_boxes.is_empty());
        assert_eq!(registry.open_list_box_id(), None);
    }

    #[test]
    fn only_one_list_box_is_open_at_a_time() {
        let registry = registry();
        registry.add_list_box("a", "A");
        registry.add_list_box("b", "B");

        registry.open_list_box("a");
        registry.open_list_box("b");
        assert_eq!(registry.open_list_box_id().as_deref(), Some("b"));

        registry.close_list_box();
        assert_eq!(registry.open_list_box_id(), None);
        registry.close_list_box();
        assert_eq!(registry.open_list_box_id(), None);
    }

    #[test]
    fn replacing_items_keeps_the_selection() {
        let registry = registry();
        registry.add_list_box("mic", "Microphone");
        registry.set_items("mic", mic_items());
        registry.set_selected_items("mic", vec![Item::new("built-in", "MacBook Pro Microphone")]);

        // Device disconnected: the refreshed item list no longer carries it.
        registry.set_items("mic", vec![Item::none_row("No microphone")]);

        let list_box = registry.get_list_box("mic").unwrap();
        assert_eq!(
            primary_selection(&list_box),
            Some(&Item::new("built-in", "MacBook Pro Microphone"))
        );
    }

    #[test]
    fn selecting_the_none_row_clears_the_selection() {
        let registry = registry();
        registry.add_list_box("mic", "Microphone");
        registry.set_items("mic", mic_items());
        registry.set_selected_items("mic", vec![Item::new("built-in", "MacBook Pro Microphone")]);

        registry.set_selected_items("mic", vec![Item::none_row("No microphone")]);

        let list_box = registry.get_list_box("mic").unwrap();
        assert!(list_box.selected_items.is_empty());
        assert_eq!(primary_selection(&list_box), None);
    }

    #[test]
    fn open_presentation_renders_missing_entry_as_empty_list() {
        let state = ListBoxRegistryState {
            list_boxes: IndexMap::new(),
            open_list_box_id: Some("cam".to_string()),
        };
        let (id, list_box) = state.open_presentation().unwrap();
        assert_eq!(id, "cam");
        assert!(list_box.items.is_empty());
        assert!(list_box.selected_items.is_empty());
    }

    #[test]
    fn registry_round_trips_in_insertion_order() {
        let hub = StorageHub::new(Arc::new(MemoryMedium::new()));
        let (a, _a_rx) = hub.attach();
        let writer = ListBoxRegistry::new(a);
        for id in ["mic", "cam", "sys"] {
            writer.add_list_box(id, id);
        }

        let (b, _b_rx) = hub.attach();
        let reader = ListBoxRegistry::new(b);
        let order: Vec<String> = reader.snapshot().list_boxes.keys().cloned().collect();
        assert_eq!(order, vec!["mic", "cam", "sys"]);
    }

    #[test]
    fn none_id_rows_survive_the_codec() {
        let hub = StorageHub::new(Arc::new(MemoryMedium::new()));
        let (a, _a_rx) = hub.attach();
        let writer = ListBoxRegistry::new(a);
        writer.add_list_box("mic", "Microphone");
        writer.set_items("mic", mic_items());

        let (b, _b_rx) = hub.attach();
        let reader = ListBoxRegistry::new(b);
        assert_eq!(reader.get_list_box("mic").unwrap().items, mic_items());
    }
}
