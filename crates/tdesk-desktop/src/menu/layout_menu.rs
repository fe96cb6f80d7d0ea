//! Layout child context menu

use crate::menu::target::ChildTarget;
use crate::state::DesktopState;
use crate::types::PremadeId;

/// Menu action string for "Add Custom"
pub const ACTION_ADD_CUSTOM: &str = "layout-add-custom";
/// Menu action string for "Add External"
pub const ACTION_ADD_EXTERNAL: &str = "layout-add-external";
/// Menu action string for "Remove"
pub const ACTION_REMOVE: &str = "layout-remove";

/// An action picked from the layout child menu
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayoutAction {
    /// Fill the slot with registry content
    AssignPremade(PremadeId),
    /// Turn the slot into an editable custom area
    AddCustom,
    /// Turn the slot into an external page
    AddExternal,
    /// Remove the targeted child
    Remove,
}

impl LayoutAction {
    /// Parse a menu selection. A premade ID wins over an action string.
    pub fn from_menu(action: Option<&str>, premade_id: Option<&str>) -> Option<Self> {
        if let Some(id) = premade_id.filter(|id| !id.is_empty()) {
            return Some(Self::AssignPremade(id.to_string()));
        }
        match action? {
            ACTION_ADD_CUSTOM => Some(Self::AddCustom),
            ACTION_ADD_EXTERNAL => Some(Self::AddExternal),
            ACTION_REMOVE => Some(Self::Remove),
            _ => None,
        }
    }
}

/// Visible items of the layout child menu
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayoutMenu {
    /// "Remove" is offered only for a stored, non-empty child
    pub show_remove: bool,
}

impl LayoutMenu {
    /// Compute the menu for a target
    pub fn for_target(state: &DesktopState, target: &ChildTarget) -> Self {
        let show_remove = target
            .child_id()
            .and_then(|child_id| {
                state
                    .find_panel(target.parent_panel_id())?
                    .panel
                    .as_layout()?
                    .child(child_id)
            })
            .is_some_and(|child| !child.is_empty());
        Self { show_remove }
    }
}
