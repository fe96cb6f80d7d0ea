//! Tabletop Desktop Core
//!
//! This crate provides the state engine behind a browser virtual desktop of
//! tabs and floating panels:
//! - Tabs holding floating panels (create, close, duplicate, reorder)
//! - Layout panels nesting independently typed children in a grid, row or column
//! - Slot resolution telling a renderer which slots show content and which show "+"
//! - Context menu models and the child mutation protocol behind them
//! - Premade content fetched asynchronously and guarded against stale results
//! - Z-order, drag/resize state and full-snapshot persistence
//!
//! ## Architecture
//!
//! - [`panel`]: Entity model (`Panel`, `PanelBody`, `LayoutChild`, dice)
//! - [`state`]: Tabs, the persisted `DesktopState`, and lookups
//! - [`grid`]: Grid sizing for layout panels
//! - [`slots`]: Slot resolution for layout panels
//! - [`menu`]: Panel and layout child context menus
//! - [`premade`]: Premade registry, submenu tree and content loaders
//! - [`persistence`]: Load, save, import and export of the state snapshot
//! - [`input`]: Drag state machine for moving and resizing panels
//! - [`zorder`]: Z-index counter and renumbering
//!
//! ## Example
//!
//! ```rust
//! use tdesk_desktop::{
//!     ChildTarget, DesktopEngine, LayoutAction, LayoutMode, NewPanel, PremadeRegistry,
//! };
//! use tdesk_store::MemoryStore;
//!
//! let mut engine = DesktopEngine::with_store(Box::new(MemoryStore::new()), PremadeRegistry::default());
//! let layout = engine
//!     .add_panel(NewPanel::Layout { mode: LayoutMode::Grid }, None)
//!     .unwrap();
//!
//! engine.apply_layout_action(&ChildTarget::slot(&layout, 2), LayoutAction::AddCustom);
//!
//! let slots = engine.layout_slots(&layout).unwrap();
//! assert_eq!(slots.len(), 4);
//! assert!(!slots[0].is_placeholder());
//! ```
//!
//! ## Design Principles
//!
//! 1. **Explicit context**: all mutable state lives on [`DesktopEngine`]; no globals
//! 2. **Silent misses**: operations on a missing tab, panel or child do nothing
//! 3. **Full snapshots**: every committed change rewrites the whole state blob
//! 4. **Host-driven I/O**: fetches and dice rolls go through collaborator traits

pub mod config;
pub mod error;
pub mod grid;
pub mod input;
pub mod math;
pub mod menu;
pub mod panel;
pub mod persistence;
pub mod premade;
pub mod settings;
pub mod slots;
pub mod state;
pub mod types;
pub mod zorder;

mod engine;

// Re-export core types for convenience
pub use config::DesktopConfig;
pub use error::{DesktopError, DesktopResult};
pub use grid::{compute_grid_size_for_count, GridSize};
pub use input::{DragState, InputResult};
pub use math::{Rect, Size, Vec2};
pub use menu::{
    ChildTarget, Download, LayoutAction, LayoutMenu, MenuOutcome, PanelAction, PanelMenu,
    PanelTarget,
};
pub use panel::{
    build_notation, ChildKind, DiceCounts, DiceRoller, DieKind, LayoutBody, LayoutChild,
    LayoutMode, Panel, PanelBody, PanelKind,
};
pub use premade::{DirLoader, MemoryLoader, PremadeDef, PremadeLoader, PremadeRegistry};
pub use settings::{BackgroundMode, Settings, TabBarPosition};
pub use slots::{append_slot_index, resolve_slots, Slot};
pub use state::{DesktopState, Tab};
pub use types::{ChildId, PanelId, PremadeId, RequestId, TabId};
pub use zorder::ZOrder;

pub use engine::{
    normalize_external_url, DesktopEngine, FetchOrigin, FetchQueue, FetchTarget, NewPanel,
    PendingFetch,
};
