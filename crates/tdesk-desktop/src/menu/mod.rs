//! Context menu models
//!
//! Menus are computed from state and returned as plain visibility flags;
//! picked items come back as typed actions the engine applies.

mod layout_menu;
mod outcome;
mod panel_menu;
mod target;

pub use layout_menu::{
    LayoutAction, LayoutMenu, ACTION_ADD_CUSTOM, ACTION_ADD_EXTERNAL, ACTION_REMOVE,
};
pub use outcome::{Download, MenuOutcome, MARKDOWN_MIME};
pub use panel_menu::{PanelAction, PanelMenu};
pub use target::{ChildTarget, PanelTarget};
