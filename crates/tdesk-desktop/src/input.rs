//! Pointer drag state for moving and resizing panels
//!
//! During a drag only the preview rectangle changes; the panel itself is
//! updated once, when the drag ends.

use crate::math::{Rect, Size, Vec2};
use crate::types::PanelId;

/// Result of routing a pointer event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputResult {
    /// The event was consumed
    Handled,
    /// Nothing was being dragged
    Unhandled,
}

/// Current drag operation
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    /// Dragging a panel by its header
    MovePanel {
        panel_id: PanelId,
        /// Pointer position relative to the panel's top-left corner
        offset: Vec2,
        preview: Rect,
    },
    /// Dragging a panel's resize handle
    ResizePanel {
        panel_id: PanelId,
        start_mouse: Vec2,
        start_size: Size,
        preview: Rect,
    },
}

impl DragState {
    /// Begin moving a panel currently at `rect`, grabbed at `pointer`
    pub fn start_move(panel_id: &str, rect: Rect, pointer: Vec2) -> Self {
        Self::MovePanel {
            panel_id: panel_id.to_string(),
            offset: pointer - rect.position(),
            preview: rect,
        }
    }

    /// Begin resizing a panel currently at `rect`, grabbed at `pointer`
    pub fn start_resize(panel_id: &str, rect: Rect, pointer: Vec2) -> Self {
        Self::ResizePanel {
            panel_id: panel_id.to_string(),
            start_mouse: pointer,
            start_size: rect.size(),
            preview: rect,
        }
    }

    pub fn is_dragging(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// Panel being dragged
    pub fn panel_id(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::MovePanel { panel_id, .. } | Self::ResizePanel { panel_id, .. } => Some(panel_id),
        }
    }

    /// Where the panel would land if the drag ended now
    pub fn preview(&self) -> Option<Rect> {
        match self {
            Self::Idle => None,
            Self::MovePanel { preview, .. } | Self::ResizePanel { preview, .. } => Some(*preview),
        }
    }

    /// Track the pointer. Resizes never go below `min_size`.
    pub fn update(&mut self, pointer: Vec2, min_size: Size) -> Option<Rect> {
        match self {
            Self::Idle => None,
            Self::MovePanel {
                offset, preview, ..
            } => {
                let pos = pointer - *offset;
                preview.x = pos.x;
                preview.y = pos.y;
                Some(*preview)
            }
            Self::ResizePanel {
                start_mouse,
                start_size,
                preview,
                ..
            } => {
                let size = calculate_resize(*start_size, pointer - *start_mouse, min_size);
                preview.width = size.width;
                preview.height = size.height;
                Some(*preview)
            }
        }
    }
}

/// Size after dragging the bottom-right handle by `delta`
pub fn calculate_resize(start_size: Size, delta: Vec2, min_size: Size) -> Size {
    Size::new(start_size.width + delta.x, start_size.height + delta.y).at_least(min_size)
}
