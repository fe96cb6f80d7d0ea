//! Layout panel body: a container of nested children

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::grid::{compute_grid_size_for_count, GridSize};
use crate::panel::child::LayoutChild;
use crate::types::{unique_id, ChildId};

/// Arrangement of a layout panel's children
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Fixed rows × cols matrix, grown explicitly
    #[default]
    Grid,
    /// Side-by-side split that grows one pane at a time
    Horizontal,
    /// Stacked split that grows one pane at a time
    Vertical,
}

impl LayoutMode {
    /// Get all layout modes
    pub fn all() -> &'static [LayoutMode] {
        &[Self::Grid, Self::Horizontal, Self::Vertical]
    }

    /// Parse from string ID ("grid", "horizontal", "vertical")
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "grid" => Some(Self::Grid),
            "horizontal" => Some(Self::Horizontal),
            "vertical" => Some(Self::Vertical),
            _ => None,
        }
    }

    /// Get the string ID
    pub fn id(&self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Grid => "Grid",
            Self::Horizontal => "Horizontal",
            Self::Vertical => "Vertical",
        }
    }

    /// Grid dimensions a fresh layout panel of this mode starts with
    pub fn initial_grid(&self) -> GridSize {
        match self {
            Self::Grid => GridSize::MIN,
            Self::Horizontal => GridSize::new(1, 2),
            Self::Vertical => GridSize::new(2, 1),
        }
    }
}

/// Read a grid dimension, treating null, zero, negative and non-numeric as unset.
fn grid_dim<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_f64)
        .filter(|n| n.is_finite() && *n >= 1.0)
        .map(|n| n.floor().min(f64::from(u32::MAX)) as u32))
}

/// Body of a layout panel
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutBody {
    #[serde(default)]
    pub layout_mode: LayoutMode,
    #[serde(default)]
    pub sub_panels: Vec<LayoutChild>,
    #[serde(default, deserialize_with = "grid_dim", skip_serializing_if = "Option::is_none")]
    pub grid_rows: Option<u32>,
    #[serde(default, deserialize_with = "grid_dim", skip_serializing_if = "Option::is_none")]
    pub grid_cols: Option<u32>,
}

impl LayoutBody {
    /// Create an empty layout in the given mode
    pub fn new(mode: LayoutMode) -> Self {
        let grid = mode.initial_grid();
        Self {
            layout_mode: mode,
            sub_panels: Vec::new(),
            grid_rows: Some(grid.rows),
            grid_cols: Some(grid.cols),
        }
    }

    /// Stored grid dimensions, if both are set
    pub fn grid_size(&self) -> Option<GridSize> {
        match (self.grid_rows, self.grid_cols) {
            (Some(rows), Some(cols)) => Some(GridSize::new(rows, cols)),
            _ => None,
        }
    }

    /// Grid dimensions after reconciliation with the child count, without
    /// writing them back.
    pub fn effective_grid_size(&self) -> GridSize {
        GridSize::ensure(self.grid_size(), self.sub_panels.len())
    }

    /// Reconcile and store the grid dimensions. Never shrinks.
    pub fn ensure_grid_dimensions(&mut self) -> GridSize {
        let size = self.effective_grid_size();
        self.grid_rows = Some(size.rows);
        self.grid_cols = Some(size.cols);
        size
    }

    /// Grow the grid by one row
    pub fn add_grid_row(&mut self) -> GridSize {
        let size = self.ensure_grid_dimensions();
        self.grid_rows = Some(size.rows + 1);
        GridSize::new(size.rows + 1, size.cols)
    }

    /// Grow the grid by one column
    pub fn add_grid_col(&mut self) -> GridSize {
        let size = self.ensure_grid_dimensions();
        self.grid_cols = Some(size.cols + 1);
        GridSize::new(size.rows, size.cols + 1)
    }

    /// Switch arrangement. Entering grid mode recomputes rows and cols from
    /// the child count; children are never touched.
    pub fn set_mode(&mut self, mode: LayoutMode) {
        self.layout_mode = mode;
        if mode == LayoutMode::Grid {
            let size = compute_grid_size_for_count(self.sub_panels.len());
            self.grid_rows = Some(size.rows);
            self.grid_cols = Some(size.cols);
        }
    }

    /// Array index of the child with this ID
    pub fn child_index(&self, child_id: &str) -> Option<usize> {
        self.sub_panels.iter().position(|c| c.id == child_id)
    }

    /// Child with this ID
    pub fn child(&self, child_id: &str) -> Option<&LayoutChild> {
        self.sub_panels.iter().find(|c| c.id == child_id)
    }

    /// Mutable child with this ID
    pub fn child_mut(&mut self, child_id: &str) -> Option<&mut LayoutChild> {
        self.sub_panels.iter_mut().find(|c| c.id == child_id)
    }

    /// Resolve a menu target to a child, creating one if needed.
    ///
    /// An existing `child_id` resolves to that child unchanged. Otherwise a
    /// blank custom child is inserted at `slot_index` clamped into
    /// `0..=len` (end of the array when absent) and later children shift
    /// right. Returns the array index of the resolved child.
    pub fn ensure_child_at_slot(&mut self, child_id: Option<&str>, slot_index: Option<usize>) -> usize {
        if let Some(index) = child_id.and_then(|id| self.child_index(id)) {
            return index;
        }

        let len = self.sub_panels.len();
        let index = slot_index.map_or(len, |i| i.min(len));
        let id = self.new_child_id();
        self.sub_panels.insert(index, LayoutChild::new_blank(id, index));
        index
    }

    /// Remove the child with this ID, returning it
    pub fn remove_child(&mut self, child_id: &str) -> Option<LayoutChild> {
        let index = self.child_index(child_id)?;
        Some(self.sub_panels.remove(index))
    }

    fn new_child_id(&self) -> ChildId {
        unique_id("layout-child", |candidate| self.child_index(candidate).is_some())
    }
}
