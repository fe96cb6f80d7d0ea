//! Engine configuration
//!
//! Construction-time knobs for a [`DesktopEngine`](crate::DesktopEngine).
//! User-facing preferences live in [`Settings`](crate::Settings) instead and
//! are persisted with the rest of the state.

use serde::{Deserialize, Serialize};

use crate::math::{Size, Vec2};

/// Storage key the state snapshot is written under.
pub const DEFAULT_STORAGE_KEY: &str = "webDesktopStateV1";

/// Configuration for a desktop engine instance
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesktopConfig {
    /// Key of the state snapshot in the [`StateStore`](tdesk_store::StateStore)
    pub storage_key: String,
    /// Size of new panels when nothing more specific applies
    pub default_panel_size: Size,
    /// Where panels spawn when no position is given
    pub default_panel_position: Vec2,
    /// Smallest size a resize drag can produce
    pub min_panel_size: Size,
    /// Offset applied to panels copied by "duplicate tab"
    pub duplicate_offset: f32,
    /// Position of the per-tab dice panel
    pub dice_panel_position: Vec2,
    /// Size of the per-tab dice panel
    pub dice_panel_size: Size,
    /// Lowest z-index "send to back" may produce before the tab is renumbered
    pub z_floor: i64,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            default_panel_size: Size::new(320.0, 200.0),
            default_panel_position: Vec2::new(80.0, 80.0),
            min_panel_size: Size::new(180.0, 120.0),
            duplicate_offset: 20.0,
            dice_panel_position: Vec2::new(32.0, 32.0),
            dice_panel_size: Size::new(360.0, 240.0),
            z_floor: -10_000,
        }
    }
}
