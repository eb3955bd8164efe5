use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("Storage write failed: {0}")]
    StorageWrite(String),

    #[error("Selector window unavailable: {0}")]
    SelectorWindow(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Serialize for SyncError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
