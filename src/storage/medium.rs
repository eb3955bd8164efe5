//! Key/value backing for the persisted stores.
//!
//! The medium only stores strings; envelope encoding lives in `codec`. Change
//! notification is layered on top by `storage::bus` — a medium on its own
//! notifies nobody.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::error::SyncError;

pub trait StorageMedium: Send + Sync {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str) -> Result<(), SyncError>;
}

/// Shared in-process medium. Every context attached to the same instance
/// observes the same slots; this is the medium used by tests and by the
/// single-process window simulation.
#[derive(Clone, Default)]
pub struct MemoryMedium {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryMedium {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageMedium for MemoryMedium {
    fn read(&self, key: &str) -> Option<String> {
        self.slots.lock().unwrap().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), SyncError> {
        self.slots
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Disk-backed medium: one JSON file per key under a state directory.
pub struct FileMedium {
    dir: PathBuf,
}

impl FileMedium {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Default location under the platform data directory.
    pub fn in_data_dir() -> Self {
        let dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join("CaptureSync")
            .join("state");
        Self::new(dir)
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        // Keys use a "store:name" scheme; keep filenames portable.
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
            .collect();
        self.dir.join(format!("{}.json", name))
    }
}

impl StorageMedium for FileMedium {
    fn read(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.slot_path(key)).ok()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), SyncError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.slot_path(key), value)?;
        Ok(())
    }
}
