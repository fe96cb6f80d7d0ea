//! Tab operations

use tracing::info;

use crate::engine::DesktopEngine;
use crate::error::{DesktopError, DesktopResult};
use crate::input::DragState;
use crate::math::Vec2;
use crate::persistence::new_dice_panel;
use crate::state::Tab;
use crate::types::TabId;

/// Title of a tab created by "add tab"
pub const NEW_TAB_TITLE: &str = "New Tab";

impl DesktopEngine {
    /// Append an empty tab (holding only its dice panel) and show it
    pub fn add_tab(&mut self) -> TabId {
        let id = self.state.new_tab_id();
        let mut tab = Tab::new(id.clone(), NEW_TAB_TITLE);
        let dice = new_dice_panel(tab.new_panel_id(), &self.config);
        tab.panels.push(dice);
        self.state.tabs.push(tab);
        self.state.active_tab_id = id.clone();
        info!(tab_id = %id, "added tab");
        self.commit();
        id
    }

    /// Close a tab and all of its panels.
    ///
    /// Closing the last tab is an error. A missing tab or a declined
    /// `confirm` returns `Ok(false)`. If the closed tab was active, the tab
    /// before it becomes active.
    pub fn close_tab(&mut self, tab_id: &str, confirm: impl FnOnce(&Tab) -> bool) -> DesktopResult<bool> {
        if self.state.tabs.len() <= 1 {
            return Err(DesktopError::InvalidOperation {
                op: "close_tab",
                reason: "at least one tab must remain",
            });
        }
        let Some(index) = self.state.tab_index(tab_id) else {
            return Ok(false);
        };
        if !confirm(&self.state.tabs[index]) {
            return Ok(false);
        }

        let tab = self.state.tabs.remove(index);
        if self.state.active_tab_id == tab_id {
            let next = index.saturating_sub(1).min(self.state.tabs.len() - 1);
            self.state.active_tab_id = self.state.tabs[next].id.clone();
        }
        if self
            .drag
            .panel_id()
            .is_some_and(|id| tab.panel_index(id).is_some())
        {
            self.drag = DragState::Idle;
        }
        info!(tab_id, panels = tab.panels.len(), "closed tab");
        self.commit();
        Ok(true)
    }

    /// Copy a tab with fresh panel IDs, offsetting every panel, and show
    /// the copy. Layout child IDs are kept.
    pub fn duplicate_tab(&mut self, tab_id: &str) -> Option<TabId> {
        let original = self.state.tab(tab_id)?;
        let offset = Vec2::new(self.config.duplicate_offset, self.config.duplicate_offset);

        let id = self.state.new_tab_id();
        let mut copy = Tab::new(id.clone(), format!("{} (copy)", original.title));
        for panel in &original.panels {
            let mut clone = panel.clone();
            clone.id = copy.new_panel_id();
            clone.set_position(panel.position() + offset);
            copy.panels.push(clone);
        }

        self.state.tabs.push(copy);
        self.state.active_tab_id = id.clone();
        info!(from = tab_id, tab_id = %id, "duplicated tab");
        self.commit();
        Some(id)
    }

    /// Rename a tab. Blank names are ignored.
    pub fn rename_tab(&mut self, tab_id: &str, title: &str) -> bool {
        let title = title.trim();
        if title.is_empty() {
            return false;
        }
        let Some(tab) = self.state.tab_mut(tab_id) else {
            return false;
        };
        tab.title = title.to_string();
        self.commit();
        true
    }

    /// Move tab `from_id` to the index currently held by `to_id`
    pub fn reorder_tabs(&mut self, from_id: &str, to_id: &str) -> bool {
        if from_id == to_id {
            return false;
        }
        let (Some(from), Some(to)) = (self.state.tab_index(from_id), self.state.tab_index(to_id)) else {
            return false;
        };
        let moved = self.state.tabs.remove(from);
        self.state.tabs.insert(to, moved);
        self.commit();
        true
    }

    /// Show another tab
    pub fn switch_tab(&mut self, tab_id: &str) -> bool {
        if self.state.tab_index(tab_id).is_none() {
            return false;
        }
        if self.state.active_tab_id != tab_id {
            self.state.active_tab_id = tab_id.to_string();
            self.drag = DragState::Idle;
            self.commit();
        }
        true
    }
}
