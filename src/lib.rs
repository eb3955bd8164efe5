//! Cross-window state replication for the capture app.
//!
//! Each open window (recording dock, input-options panel, selection popup,
//! region selector, editor) runs in an isolated context. The only channel
//! between them is a key/value storage medium whose writes raise a change
//! notification, carrying the key name, in every *other* context. Persisted
//! stores replicate one slice of application state each; the standalone
//! list-box protocol in [`selector`] builds device selection on top.

pub mod codec;
pub mod context;
pub mod error;
pub mod events;
pub mod selector;
pub mod storage;
pub mod stores;

pub use context::WindowContext;
pub use error::SyncError;
