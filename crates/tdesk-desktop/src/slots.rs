//! Slot resolution for layout panels
//!
//! Turns a layout body into the ordered list of cells a renderer draws.
//! Each cell is either an occupying child or a "+" placeholder; clicking a
//! placeholder opens the layout child menu at its slot index.

use crate::menu::ChildTarget;
use crate::panel::{LayoutBody, LayoutChild, LayoutMode};

/// One renderable cell of a layout panel
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Slot<'a> {
    /// An occupying child
    Child {
        index: usize,
        child: &'a LayoutChild,
    },
    /// An empty "+" cell. `existing` is the non-occupying child stored at
    /// this index, if any.
    Placeholder {
        index: usize,
        existing: Option<&'a LayoutChild>,
    },
}

impl<'a> Slot<'a> {
    /// Visual slot index
    pub fn index(&self) -> usize {
        match self {
            Self::Child { index, .. } | Self::Placeholder { index, .. } => *index,
        }
    }

    /// Whether this is a "+" cell
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder { .. })
    }

    /// Child record at this slot, occupying or not
    pub fn child(&self) -> Option<&'a LayoutChild> {
        match self {
            Self::Child { child, .. } => Some(child),
            Self::Placeholder { existing, .. } => *existing,
        }
    }

    /// Menu target for interacting with this slot.
    ///
    /// A stored child is addressed by ID so actions reuse it instead of
    /// inserting a second record.
    pub fn target(&self, parent_panel_id: &str) -> ChildTarget {
        match self.child() {
            Some(child) => ChildTarget::child(parent_panel_id, &child.id),
            None => ChildTarget::slot(parent_panel_id, self.index()),
        }
    }

    fn at(body: &'a LayoutBody, index: usize) -> Self {
        match body.sub_panels.get(index) {
            Some(child) if child.is_occupying() => Slot::Child { index, child },
            existing => Slot::Placeholder { index, existing },
        }
    }
}

/// Resolve the slots of a layout body.
///
/// Grid mode enumerates every cell of the reconciled grid. Horizontal and
/// vertical modes show two cells while they hold fewer than two children,
/// then exactly one cell per child.
pub fn resolve_slots(body: &LayoutBody) -> Vec<Slot<'_>> {
    let count = match body.layout_mode {
        LayoutMode::Grid => body.effective_grid_size().cells(),
        LayoutMode::Horizontal | LayoutMode::Vertical => body.sub_panels.len().max(2),
    };
    (0..count).map(|index| Slot::at(body, index)).collect()
}

/// Slot index the header "Add" button appends at.
///
/// Only horizontal and vertical layouts with at least two children offer it.
pub fn append_slot_index(body: &LayoutBody) -> Option<usize> {
    let len = body.sub_panels.len();
    match body.layout_mode {
        LayoutMode::Horizontal | LayoutMode::Vertical if len >= 2 => Some(len),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::ChildKind;

    fn child(id: &str, kind: ChildKind, content: &str) -> LayoutChild {
        LayoutChild {
            kind,
            content: content.into(),
            ..LayoutChild::new_blank(id.into(), 0)
        }
    }

    fn body(mode: LayoutMode, children: Vec<LayoutChild>) -> LayoutBody {
        LayoutBody {
            sub_panels: children,
            ..LayoutBody::new(mode)
        }
    }

    #[test]
    fn test_empty_grid_has_four_placeholders() {
        let b = body(LayoutMode::Grid, vec![]);
        let slots = resolve_slots(&b);
        assert_eq!(slots.len(), 4);
        assert!(slots.iter().all(Slot::is_placeholder));
        assert_eq!(slots.iter().map(Slot::index).collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_grid_enumerates_all_cells() {
        let mut b = body(
            LayoutMode::Grid,
            vec![
                child("a", ChildKind::Custom, ""),
                child("b", ChildKind::Premade, ""),
            ],
        );
        b.grid_rows = Some(3);
        let slots = resolve_slots(&b);
        assert_eq!(slots.len(), 6);
        assert!(!slots[0].is_placeholder());
        assert!(slots[1].is_placeholder());
        assert_eq!(slots[1].child().map(|c| c.id.as_str()), Some("b"));
        assert!(slots[5].is_placeholder());
    }

    #[test]
    fn test_grid_uses_reconciled_size() {
        let children = (0..7)
            .map(|i| child(&format!("c{}", i), ChildKind::External, ""))
            .collect();
        let b = body(LayoutMode::Grid, children);
        assert_eq!(resolve_slots(&b).len(), 9);
    }

    #[test]
    fn test_horizontal_zero_children() {
        let b = body(LayoutMode::Horizontal, vec![]);
        let slots = resolve_slots(&b);
        assert_eq!(slots.len(), 2);
        assert!(slots.iter().all(Slot::is_placeholder));
    }

    #[test]
    fn test_horizontal_one_child() {
        let b = body(LayoutMode::Horizontal, vec![child("a", ChildKind::Custom, "")]);
        let slots = resolve_slots(&b);
        assert_eq!(slots.len(), 2);
        assert!(!slots[0].is_placeholder());
        assert!(slots[1].is_placeholder());
        assert_eq!(append_slot_index(&b), None);
    }

    #[test]
    fn test_horizontal_two_children() {
        let b = body(
            LayoutMode::Horizontal,
            vec![
                child("a", ChildKind::Custom, ""),
                child("b", ChildKind::External, ""),
            ],
        );
        let slots = resolve_slots(&b);
        assert_eq!(slots.len(), 2);
        assert!(slots.iter().all(|s| !s.is_placeholder()));
        assert_eq!(append_slot_index(&b), Some(2));
    }

    #[test]
    fn test_vertical_loading_premade_is_placeholder() {
        let b = body(
            LayoutMode::Vertical,
            vec![
                child("a", ChildKind::Premade, ""),
                child("b", ChildKind::Premade, "<p>done</p>"),
                child("c", ChildKind::Custom, ""),
            ],
        );
        let slots = resolve_slots(&b);
        assert_eq!(slots.len(), 3);
        assert!(slots[0].is_placeholder());
        assert!(!slots[1].is_placeholder());
        assert!(!slots[2].is_placeholder());
    }

    #[test]
    fn test_slot_targets() {
        let b = body(LayoutMode::Grid, vec![child("a", ChildKind::Empty, "")]);
        let slots = resolve_slots(&b);
        assert_eq!(slots[0].target("panel-1"), ChildTarget::child("panel-1", "a"));
        assert_eq!(slots[3].target("panel-1"), ChildTarget::slot("panel-1", 3));
    }
}
