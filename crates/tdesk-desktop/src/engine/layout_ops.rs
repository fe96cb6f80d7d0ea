//! Layout child mutations driven by the layout child menu

use tracing::debug;

use crate::engine::fetch::{FetchOrigin, FetchTarget};
use crate::engine::DesktopEngine;
use crate::grid::GridSize;
use crate::menu::{ChildTarget, LayoutAction, LayoutMenu, MenuOutcome};
use crate::panel::{ChildKind, LayoutBody, LayoutMode, CHILD_CUSTOM_PLACEHOLDER};
use crate::slots::{append_slot_index, resolve_slots, Slot};
use crate::types::ChildId;

/// Title given to a child by "Add Custom"
pub const CUSTOM_PANEL_TITLE: &str = "Custom Panel";

/// Title given to a child by "Add External"
pub const EXTERNAL_PANEL_TITLE: &str = "External Panel";

impl DesktopEngine {
    fn layout_mut(&mut self, panel_id: &str) -> Option<&mut LayoutBody> {
        self.state.find_panel_mut(panel_id)?.as_layout_mut()
    }

    /// Resolved slots of a layout panel, or `None` if it is not a layout
    pub fn layout_slots(&self, panel_id: &str) -> Option<Vec<Slot<'_>>> {
        let body = self.state.find_panel(panel_id)?.panel.as_layout()?;
        Some(resolve_slots(body))
    }

    /// Target of the header "Add" button of a horizontal or vertical layout
    pub fn layout_append_target(&self, panel_id: &str) -> Option<ChildTarget> {
        let body = self.state.find_panel(panel_id)?.panel.as_layout()?;
        append_slot_index(body).map(|index| ChildTarget::slot(panel_id, index))
    }

    /// Visible items of the layout child menu for `target`
    pub fn layout_menu(&self, target: &ChildTarget) -> LayoutMenu {
        LayoutMenu::for_target(&self.state, target)
    }

    /// Resolve a target to a child, inserting a blank custom child if none
    /// exists yet. Commits when a child was created.
    pub fn ensure_child_at_slot(&mut self, target: &ChildTarget) -> Option<ChildId> {
        let body = self.layout_mut(target.parent_panel_id())?;
        let before = body.sub_panels.len();
        let index = body.ensure_child_at_slot(target.child_id(), target.slot_index());
        let id = body.sub_panels[index].id.clone();
        if body.sub_panels.len() != before {
            self.commit();
        }
        Some(id)
    }

    /// Apply a layout child menu action.
    ///
    /// A missing layout panel is a silent no-op. Assigning a premade commits
    /// once with empty content and returns the fetch to complete.
    pub fn apply_layout_action(&mut self, target: &ChildTarget, action: LayoutAction) -> MenuOutcome {
        let layout_id = target.parent_panel_id().to_string();
        if self.layout_mut(&layout_id).is_none() {
            debug!(layout_id = %layout_id, "layout action on missing layout panel");
            return MenuOutcome::Unchanged;
        }

        if action == LayoutAction::Remove {
            let removed = target
                .child_id()
                .and_then(|child_id| self.layout_mut(&layout_id)?.remove_child(child_id));
            if removed.is_none() {
                return MenuOutcome::Unchanged;
            }
            self.commit();
            return MenuOutcome::Changed;
        }

        let generation = self.fetches.bump_generation();
        let premade_name = match &action {
            LayoutAction::AssignPremade(id) => self.registry.name(id).to_string(),
            _ => String::new(),
        };

        let Some(body) = self.layout_mut(&layout_id) else {
            return MenuOutcome::Unchanged;
        };
        let index = body.ensure_child_at_slot(target.child_id(), target.slot_index());
        let child = &mut body.sub_panels[index];
        child.generation = generation;
        let child_id = child.id.clone();

        match action {
            LayoutAction::AssignPremade(premade_id) => {
                child.kind = ChildKind::Premade;
                child.premade_id = Some(premade_id.clone());
                child.title = premade_name;
                child.content.clear();
                self.commit();
                let target = FetchTarget::Child {
                    layout_id,
                    child_id,
                };
                let request_id =
                    self.enqueue_fetch(premade_id, target, generation, FetchOrigin::Assign);
                MenuOutcome::Fetching(request_id)
            }
            LayoutAction::AddCustom => {
                child.kind = ChildKind::Custom;
                child.custom_content = CHILD_CUSTOM_PLACEHOLDER.to_string();
                child.title = CUSTOM_PANEL_TITLE.to_string();
                self.commit();
                MenuOutcome::Changed
            }
            LayoutAction::AddExternal => {
                child.kind = ChildKind::External;
                child.external_url.clear();
                child.title = EXTERNAL_PANEL_TITLE.to_string();
                self.commit();
                MenuOutcome::Changed
            }
            LayoutAction::Remove => MenuOutcome::Unchanged,
        }
    }

    /// Grow a grid layout by one row. `None` unless the panel is a grid.
    pub fn add_grid_row(&mut self, panel_id: &str) -> Option<GridSize> {
        let body = self.layout_mut(panel_id)?;
        if body.layout_mode != LayoutMode::Grid {
            return None;
        }
        let size = body.add_grid_row();
        self.commit();
        Some(size)
    }

    /// Grow a grid layout by one column. `None` unless the panel is a grid.
    pub fn add_grid_col(&mut self, panel_id: &str) -> Option<GridSize> {
        let body = self.layout_mut(panel_id)?;
        if body.layout_mode != LayoutMode::Grid {
            return None;
        }
        let size = body.add_grid_col();
        self.commit();
        Some(size)
    }
}
