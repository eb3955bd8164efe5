//! Global hotkey bindings, replicated so every window renders the same
//! shortcut hints and the settings panel edits take effect everywhere.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::codec::ordered_pairs;
use crate::events::HOTKEY_BINDINGS_KEY;
use crate::storage::bus::ContextStorage;
use crate::storage::store::PersistedStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HotkeyMode {
    Safe,   // Ctrl+Shift prefix (default, avoids macOS conflicts)
    Native, // Cmd+Shift prefix (requires disabling macOS Screenshot.app shortcuts)
}

impl HotkeyMode {
    pub fn modifier_prefix(&self) -> &'static str {
        match self {
            HotkeyMode::Safe => "ctrl+shift",
            HotkeyMode::Native => "super+shift",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotkeyBindings {
    pub mode: HotkeyMode,
    /// Ordered action → combo map; order is the settings panel's display
    /// order.
    #[serde(with = "ordered_pairs")]
    pub bindings: IndexMap<String, String>,
}

impl HotkeyBindings {
    pub fn defaults_for(mode: HotkeyMode) -> Self {
        let prefix = mode.modifier_prefix();
        let actions = [
            ("toggle_dock", "2"),
            ("record_region", "7"),
            ("record_fullscreen", "9"),
            ("stop_recording", "6"),
            ("cancel_recording", "0"),
        ];
        let bindings = actions
            .iter()
            .map(|(action, key)| (action.to_string(), format!("{}+{}", prefix, key)))
            .collect();
        Self { mode, bindings }
    }
}

impl Default for HotkeyBindings {
    fn default() -> Self {
        Self::defaults_for(HotkeyMode::Safe)
    }
}

#[derive(Clone)]
pub struct HotkeyStore {
    store: PersistedStore<HotkeyBindings>,
}

impl HotkeyStore {
    pub fn new(storage: ContextStorage) -> Self {
        Self {
            store: PersistedStore::new(storage, HOTKEY_BINDINGS_KEY, HotkeyBindings::default()),
        }
    }

    /// Switch the modifier prefix. Bindings carrying the old prefix are
    /// remapped in place; fully custom combos are left alone.
    pub fn set_mode(&self, mode: HotkeyMode) {
        self.store.update(|state| {
            if state.mode == mode {
                return false;
            }
            let old = state.mode.modifier_prefix();
            let new = mode.modifier_prefix();
            for combo in state.bindings.values_mut() {
                if let Some(rest) = combo.strip_prefix(old) {
                    *combo = format!("{}{}", new, rest);
                }
            }
            state.mode = mode;
            true
        });
    }

    pub fn set_binding(&self, action: &str, combo: &str) {
        self.store.update(|state| {
            state
                .bindings
                .insert(action.to_string(), combo.to_string())
                .as_deref()
                != Some(combo)
        });
    }

    pub fn binding(&self, action: &str) -> Option<String> {
        self.store.get().bindings.get(action).cloned()
    }

    pub fn get(&self) -> HotkeyBindings {
        self.store.get()
    }

    pub fn rehydrate(&self) {
        self.store.rehydrate()
    }
}
