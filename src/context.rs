//! Per-window wiring: one `WindowContext` per open window, holding that
//! context's stores and its single bus subscription.

use std::sync::mpsc::Receiver;
use std::sync::Arc;

use uuid::Uuid;

use crate::events::{
    HOTKEY_BINDINGS_KEY, LIST_BOX_REGISTRY_KEY, RECORDING_PREFERENCES_KEY, RECORDING_STATE_KEY,
    WINDOW_VISIBILITY_KEY,
};
use crate::storage::bus::{ContextStorage, RehydrationDispatcher, StorageHub};
use crate::stores::hotkeys::HotkeyStore;
use crate::stores::list_box::ListBoxRegistry;
use crate::stores::recording::{RecordingPreferencesStore, RecordingStateStore};
use crate::stores::visibility::WindowVisibilityRegistry;

pub struct WindowContext {
    pub list_boxes: ListBoxRegistry,
    pub window_visibility: WindowVisibilityRegistry,
    pub recording_preferences: RecordingPreferencesStore,
    pub recording_state: RecordingStateStore,
    pub hotkeys: HotkeyStore,
    storage: ContextStorage,
    notifications: Receiver<String>,
    dispatcher: RehydrationDispatcher,
}

impl WindowContext {
    /// Attach a new window context to the shared hub. Each store seeds from
    /// whatever is already in storage and registers its rehydration route
    /// exactly once.
    pub fn attach(hub: &Arc<StorageHub>) -> Self {
        let (storage, notifications) = hub.attach();

        let list_boxes = ListBoxRegistry::new(storage.clone());
        let window_visibility = WindowVisibilityRegistry::new(storage.clone());
        let recording_preferences = RecordingPreferencesStore::new(storage.clone());
        let recording_state = RecordingStateStore::new(storage.clone());
        let hotkeys = HotkeyStore::new(storage.clone());

        let mut dispatcher = RehydrationDispatcher::new();
        {
            let store = list_boxes.clone();
            dispatcher.register(LIST_BOX_REGISTRY_KEY, move || store.rehydrate());
        }
        {
            let store = window_visibility.clone();
            dispatcher.register(WINDOW_VISIBILITY_KEY, move || store.rehydrate());
        }
        {
            let store = recording_preferences.clone();
            dispatcher.register(RECORDING_PREFERENCES_KEY, move || store.rehydrate());
        }
        {
            let store = recording_state.clone();
            dispatcher.register(RECORDING_STATE_KEY, move || store.rehydrate());
        }
        {
            let store = hotkeys.clone();
            dispatcher.register(HOTKEY_BINDINGS_KEY, move || store.rehydrate());
        }

        Self {
            list_boxes,
            window_visibility,
            recording_preferences,
            recording_state,
            hotkeys,
            storage,
            notifications,
            dispatcher,
        }
    }

    pub fn context_id(&self) -> Uuid {
        self.storage.context_id()
    }

    /// Drain pending change notifications from other contexts, rehydrating
    /// each affected store. Called from the window's event loop. Returns the
    /// number of notifications that matched a registered store.
    pub fn pump_storage_events(&self) -> usize {
        let mut dispatched = 0;
        while let Ok(key) = self.notifications.try_recv() {
            if self.dispatcher.dispatch(&key) {
                dispatched += 1;
            } else {
                log::debug!("no store registered for changed key {}", key);
            }
        }
        dispatched
    }
}
