//! Storage slot keys and host event names shared by every window context.

/// One storage key per persisted store. Exactly one logical store owns each
/// key; change notifications carry the key name and nothing else.
pub const LIST_BOX_REGISTRY_KEY: &str = "store:list-boxes";
pub const WINDOW_VISIBILITY_KEY: &str = "store:window-visibility";
pub const RECORDING_PREFERENCES_KEY: &str = "store:recording-preferences";
pub const RECORDING_STATE_KEY: &str = "store:recording-state";
pub const HOTKEY_BINDINGS_KEY: &str = "store:hotkey-bindings";

/// Host push event raised when the shared selector window is hidden, so the
/// requesting window can re-enable its open affordance. Distinct from the
/// registry's `close_list_box`.
pub const SELECTOR_CLOSED: &str = "selector:closed";
