pub mod hotkeys;
pub mod list_box;
pub mod recording;
pub mod visibility;
