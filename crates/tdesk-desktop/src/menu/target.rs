//! Context menu targets

use crate::types::{ChildId, PanelId};

/// What the layout child menu acts on: an empty slot or a stored child
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ChildTarget {
    /// A slot with no child record yet
    Slot {
        parent_panel_id: PanelId,
        slot_index: usize,
    },
    /// An existing child record
    Child {
        parent_panel_id: PanelId,
        child_id: ChildId,
    },
}

impl ChildTarget {
    /// Target an empty slot
    pub fn slot(parent_panel_id: &str, slot_index: usize) -> Self {
        Self::Slot {
            parent_panel_id: parent_panel_id.to_string(),
            slot_index,
        }
    }

    /// Target an existing child
    pub fn child(parent_panel_id: &str, child_id: &str) -> Self {
        Self::Child {
            parent_panel_id: parent_panel_id.to_string(),
            child_id: child_id.to_string(),
        }
    }

    /// The layout panel holding the slot
    pub fn parent_panel_id(&self) -> &str {
        match self {
            Self::Slot {
                parent_panel_id, ..
            }
            | Self::Child {
                parent_panel_id, ..
            } => parent_panel_id,
        }
    }

    pub fn child_id(&self) -> Option<&str> {
        match self {
            Self::Child { child_id, .. } => Some(child_id),
            Self::Slot { .. } => None,
        }
    }

    pub fn slot_index(&self) -> Option<usize> {
        match self {
            Self::Slot { slot_index, .. } => Some(*slot_index),
            Self::Child { .. } => None,
        }
    }
}

/// What the panel context menu acts on
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PanelTarget {
    /// A top-level panel
    Panel { panel_id: PanelId },
    /// A child inside a layout panel
    LayoutChild { panel_id: PanelId, child_id: ChildId },
}

impl PanelTarget {
    pub fn panel(panel_id: &str) -> Self {
        Self::Panel {
            panel_id: panel_id.to_string(),
        }
    }

    pub fn layout_child(panel_id: &str, child_id: &str) -> Self {
        Self::LayoutChild {
            panel_id: panel_id.to_string(),
            child_id: child_id.to_string(),
        }
    }

    /// The top-level panel, or the layout holding the child
    pub fn panel_id(&self) -> &str {
        match self {
            Self::Panel { panel_id } | Self::LayoutChild { panel_id, .. } => panel_id,
        }
    }

    pub fn is_top_level(&self) -> bool {
        matches!(self, Self::Panel { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_target_accessors() {
        let slot = ChildTarget::slot("panel-1", 2);
        assert_eq!(slot.parent_panel_id(), "panel-1");
        assert_eq!(slot.slot_index(), Some(2));
        assert_eq!(slot.child_id(), None);

        let child = ChildTarget::child("panel-1", "layout-child-x");
        assert_eq!(child.child_id(), Some("layout-child-x"));
        assert_eq!(child.slot_index(), None);
    }

    #[test]
    fn test_panel_target_accessors() {
        assert!(PanelTarget::panel("p").is_top_level());
        let t = PanelTarget::layout_child("p", "c");
        assert!(!t.is_top_level());
        assert_eq!(t.panel_id(), "p");
    }
}
