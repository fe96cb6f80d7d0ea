//! Desktop engine
//!
//! The single context object every handler goes through. It owns the state,
//! the z-order counter, drag state, pending premade fetches and the store
//! snapshots are written to.
//!
//! Every successful mutation ends in [`DesktopEngine::commit`], which writes
//! a full snapshot and bumps the render revision. Failed writes are logged
//! and the in-memory change stands.

mod dice_ops;
mod fetch;
mod layout_ops;
mod panel_ops;
mod tab_ops;

pub use fetch::{FetchOrigin, FetchQueue, FetchTarget, PendingFetch};
pub use panel_ops::{normalize_external_url, NewPanel};

use tdesk_store::StateStore;
use tracing::{debug, info, warn};

use crate::config::DesktopConfig;
use crate::error::DesktopResult;
use crate::input::DragState;
use crate::persistence;
use crate::premade::PremadeRegistry;
use crate::settings::Settings;
use crate::state::{DesktopState, FoundPanel, FoundSubPanel, Tab};
use crate::zorder::ZOrder;

/// Desktop engine coordinating state, persistence and pending work
pub struct DesktopEngine {
    /// Persisted desktop state
    state: DesktopState,
    /// Construction-time configuration
    config: DesktopConfig,
    /// Where snapshots are written
    store: Box<dyn StateStore>,
    /// Premade definitions
    registry: PremadeRegistry,
    /// Z-index source
    z_order: ZOrder,
    /// Current pointer drag
    drag: DragState,
    /// Premade fetches awaiting completion
    fetches: FetchQueue,
    /// Whether the dice roller has been initialized
    dice_ready: bool,
    /// Incremented on every commit
    revision: u64,
    /// Player view: state is projected on load and never written back
    read_only: bool,
}

impl DesktopEngine {
    /// Create an engine over `store`, loading any saved state.
    pub fn new(store: Box<dyn StateStore>, registry: PremadeRegistry, config: DesktopConfig) -> Self {
        let (state, z_order) = persistence::load_state(store.as_ref(), &config);
        Self {
            state,
            config,
            store,
            registry,
            z_order,
            drag: DragState::default(),
            fetches: FetchQueue::default(),
            dice_ready: false,
            revision: 0,
            read_only: false,
        }
    }

    /// Create a read-only engine showing only the player tab of the saved
    /// state. Commits never write to `store`.
    pub fn player(store: Box<dyn StateStore>, registry: PremadeRegistry, config: DesktopConfig) -> Self {
        let (state, z_order) = persistence::load_player_view(store.as_ref(), &config);
        Self {
            state,
            config,
            store,
            registry,
            z_order,
            drag: DragState::default(),
            fetches: FetchQueue::default(),
            dice_ready: false,
            revision: 0,
            read_only: true,
        }
    }

    /// Create an engine with the default configuration
    pub fn with_store(store: Box<dyn StateStore>, registry: PremadeRegistry) -> Self {
        Self::new(store, registry, DesktopConfig::default())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn state(&self) -> &DesktopState {
        &self.state
    }

    pub fn config(&self) -> &DesktopConfig {
        &self.config
    }

    pub fn registry(&self) -> &PremadeRegistry {
        &self.registry
    }

    /// Replace the premade registry
    pub fn set_registry(&mut self, registry: PremadeRegistry) {
        self.registry = registry;
    }

    pub fn settings(&self) -> &Settings {
        &self.state.settings
    }

    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    /// Last z-index handed out
    pub fn z_counter(&self) -> i64 {
        self.z_order.current()
    }

    /// Render revision; changes after every commit
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether this is a player view that never saves
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.state.active_tab()
    }

    pub fn active_tab_id(&self) -> &str {
        &self.state.active_tab_id
    }

    /// Find a top-level panel in any tab
    pub fn find_panel(&self, panel_id: &str) -> Option<FoundPanel<'_>> {
        self.state.find_panel(panel_id)
    }

    /// Find a layout child. Logs a warning on a miss.
    pub fn find_sub_panel(&self, layout_id: &str, child_id: &str) -> Option<FoundSubPanel<'_>> {
        self.state.find_sub_panel(layout_id, child_id)
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Persist a snapshot and bump the revision.
    pub fn commit(&mut self) {
        if self.read_only {
            debug!("read-only view, not saving");
        } else if let Err(e) = self.save() {
            warn!(error = %e, "failed to save state");
        }
        self.revision += 1;
    }

    /// Write the current state to the store.
    pub fn save(&self) -> DesktopResult<()> {
        let json = persistence::serialize_state(&self.state)?;
        self.store.set(&self.config.storage_key, &json)?;
        debug!(bytes = json.len(), "saved desktop state");
        Ok(())
    }

    /// Re-read the saved snapshot, discarding in-memory state.
    pub fn reload(&mut self) {
        let (state, z_order) = if self.read_only {
            persistence::load_player_view(self.store.as_ref(), &self.config)
        } else {
            persistence::load_state(self.store.as_ref(), &self.config)
        };
        self.replace_state(state, z_order);
    }

    /// Pretty-printed JSON of the whole state
    pub fn export_json(&self) -> DesktopResult<String> {
        persistence::export_state(&self.state)
    }

    /// Replace the state with an imported snapshot.
    ///
    /// On error the current state is left untouched.
    pub fn import_json(&mut self, raw: &str) -> DesktopResult<()> {
        let (state, z_order) = persistence::import_state(raw, &self.config)?;
        info!(tabs = state.tabs.len(), "imported desktop state");
        self.replace_state(state, z_order);
        self.commit();
        Ok(())
    }

    fn replace_state(&mut self, state: DesktopState, z_order: ZOrder) {
        self.state = state;
        self.z_order = z_order;
        self.drag = DragState::default();
        self.fetches.clear();
    }

    // =========================================================================
    // Settings
    // =========================================================================

    /// Modify settings; values are clamped before committing.
    pub fn update_settings(&mut self, f: impl FnOnce(&mut Settings)) {
        f(&mut self.state.settings);
        self.state.settings.normalize();
        self.commit();
    }
}
