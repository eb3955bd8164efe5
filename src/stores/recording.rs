//! Recording preferences and recording session state, replicated so the
//! dock, the input-options panel, and the editor all agree on them.

use serde::{Deserialize, Serialize};

use crate::events::{RECORDING_PREFERENCES_KEY, RECORDING_STATE_KEY};
use crate::storage::bus::ContextStorage;
use crate::storage::store::PersistedStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityPreset {
    Low,    // 720p, 5 Mbps
    Medium, // 1080p, 8 Mbps
    High,   // Native, 12 Mbps
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingPreferences {
    pub quality: QualityPreset,
    pub fps: u32,
    pub include_cursor: bool,
    pub show_mouse_clicks: bool,
    pub include_microphone: bool,
    pub include_system_audio: bool,
    pub exclude_app_audio: bool,
}

impl Default for RecordingPreferences {
    fn default() -> Self {
        Self {
            quality: QualityPreset::High,
            fps: 60,
            include_cursor: true,
            show_mouse_clicks: true,
            include_microphone: false,
            include_system_audio: true,
            exclude_app_audio: true,
        }
    }
}

#[derive(Clone)]
pub struct RecordingPreferencesStore {
    store: PersistedStore<RecordingPreferences>,
}

impl RecordingPreferencesStore {
    pub fn new(storage: ContextStorage) -> Self {
        Self {
            store: PersistedStore::new(
                storage,
                RECORDING_PREFERENCES_KEY,
                RecordingPreferences::default(),
            ),
        }
    }

    pub fn get(&self) -> RecordingPreferences {
        self.store.get()
    }

    pub fn set(&self, preferences: RecordingPreferences) {
        self.store.replace(preferences);
    }

    pub fn update(&self, mutate: impl FnOnce(&mut RecordingPreferences)) {
        self.store.update(|preferences| {
            mutate(preferences);
            true
        });
    }

    pub fn rehydrate(&self) {
        self.store.rehydrate()
    }
}

/// Recording session lifecycle, published by whichever window drives the
/// transition and observed by all others.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum RecordingState {
    #[default]
    Idle,
    Selecting,
    Starting,
    Recording {
        started_at: String,
    },
    Stopping,
    Completed,
    Failed {
        message: String,
    },
    Cancelled,
}

impl RecordingState {
    /// `Recording` stamped with the current time.
    pub fn recording_now() -> Self {
        RecordingState::Recording {
            started_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(
            self,
            RecordingState::Starting | RecordingState::Recording { .. } | RecordingState::Stopping
        )
    }
}

#[derive(Clone)]
pub struct RecordingStateStore {
    store: PersistedStore<RecordingState>,
}

impl RecordingStateStore {
    pub fn new(storage: ContextStorage) -> Self {
        Self {
            store: PersistedStore::new(storage, RECORDING_STATE_KEY, RecordingState::default()),
        }
    }

    pub fn get(&self) -> RecordingState {
        self.store.get()
    }

    pub fn set(&self, state: RecordingState) {
        self.store.replace(state);
    }

    pub fn rehydrate(&self) {
        self.store.rehydrate()
    }
}
