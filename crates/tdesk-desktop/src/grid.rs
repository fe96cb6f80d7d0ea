//! Grid sizing for grid-mode layout panels

use serde::{Deserialize, Serialize};

/// Rows and columns of a grid layout
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    pub rows: u32,
    pub cols: u32,
}

impl GridSize {
    /// The 2x2 grid every layout starts from
    pub const MIN: GridSize = GridSize { rows: 2, cols: 2 };

    /// Create a new grid size
    pub const fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    /// Number of addressable cells
    pub fn cells(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Reconcile a stored grid size with the number of children.
    ///
    /// Unset dimensions are derived from the child count. Set dimensions grow
    /// to the recommended size once children outnumber them, but never shrink.
    pub fn ensure(current: Option<GridSize>, child_count: usize) -> GridSize {
        let recommended = compute_grid_size_for_count(child_count);
        match current {
            Some(size) if size.cells() >= recommended.cells() => size,
            _ => recommended,
        }
    }
}

/// Smallest roughly-square grid holding `count` children.
///
/// Returns 2x2 for `count <= 4`; beyond that columns and rows grow
/// alternately, columns first while they do not exceed rows.
pub fn compute_grid_size_for_count(count: usize) -> GridSize {
    let needed = count.max(4);
    let mut size = GridSize::MIN;
    while size.cells() < needed {
        if size.cols <= size.rows {
            size.cols += 1;
        } else {
            size.rows += 1;
        }
    }
    size
}
