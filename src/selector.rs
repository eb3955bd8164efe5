//! Cross-window selection protocol over the shared selector window.
//!
//! The requesting window never holds a reference to the selector window. It
//! publishes candidates through the list-box registry and asks the native
//! host to surface the shared selector window at a computed position; the
//! selector context rehydrates, renders the open entry, and writes the choice
//! back. The requester re-enables its open affordance when the host pushes
//! the `selector:closed` event (`events::SELECTOR_CLOSED`).

use serde::{Deserialize, Serialize};

use crate::error::SyncError;
use crate::stores::list_box::{Item, ListBoxRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelPosition {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelSize {
    pub width: f64,
    pub height: f64,
}

/// The native windowing host, as far as this protocol is concerned. One
/// shared OS-level selector window exists; showing it for a new request
/// repositions the same window.
pub trait SelectorWindowHost {
    fn show_selector_window(
        &self,
        position: PanelPosition,
        size: PanelSize,
        parent_id: &str,
    ) -> Result<(), SyncError>;

    fn hide_selector_window(&self) -> Result<(), SyncError>;

    fn is_selector_window_open(&self) -> bool;
}

#[derive(Debug, Clone)]
pub struct SelectionRequest {
    pub list_box_id: String,
    pub label: String,
    pub items: Vec<Item>,
    pub parent_window_id: String,
    pub position: PanelPosition,
    pub size: PanelSize,
}

/// Requester side: register the list-box, surface the selector window next
/// to the requesting control, publish the candidates, and mark the entry
/// open. Registration is idempotent, so a remounted requester reusing an id
/// keeps the previous selection.
pub fn request_selection<H: SelectorWindowHost>(
    registry: &ListBoxRegistry,
    host: &H,
    request: SelectionRequest,
) -> Result<(), SyncError> {
    registry.add_list_box(&request.list_box_id, &request.label);
    host.show_selector_window(request.position, request.size, &request.parent_window_id)?;
    registry.set_items(&request.list_box_id, request.items);
    registry.open_list_box(&request.list_box_id);
    Ok(())
}

/// Selector side: commit the user's choice, close the open pointer, and
/// retire the window. The requester observes the selection through its own
/// rehydration and the window teardown through the host's closed event.
pub fn submit_selection<H: SelectorWindowHost>(
    registry: &ListBoxRegistry,
    host: &H,
    list_box_id: &str,
    selected: Vec<Item>,
) -> Result<(), SyncError> {
    registry.set_selected_items(list_box_id, selected);
    registry.close_list_box();
    host.hide_selector_window()
}
