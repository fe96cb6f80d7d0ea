//! Top-level panel operations: creation, closing, geometry, layering,
//! content edits, and the panel context menu.

use tracing::{debug, info};

use crate::engine::fetch::{FetchOrigin, FetchTarget};
use crate::engine::layout_ops::{CUSTOM_PANEL_TITLE, EXTERNAL_PANEL_TITLE};
use crate::engine::DesktopEngine;
use crate::input::{DragState, InputResult};
use crate::math::{Rect, Size, Vec2};
use crate::menu::{Download, MenuOutcome, PanelAction, PanelMenu, PanelTarget};
use crate::panel::{
    ChildKind, CustomBody, ExternalBody, LayoutBody, LayoutMode, Panel, PanelBody, PanelKind,
    PremadeBody, CUSTOM_PLACEHOLDER,
};
use crate::types::{PanelId, PremadeId};

/// Title a layout child gets from "load custom" when it has none
const LOADED_CUSTOM_TITLE: &str = "Custom";

/// What "add panel" should create
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NewPanel {
    Premade { premade_id: PremadeId },
    Custom,
    External { url: String },
    Layout { mode: LayoutMode },
}

/// Trim a user-entered URL and assume `https://` when no scheme is given.
///
/// An empty URL stays empty.
pub fn normalize_external_url(url: &str) -> String {
    let url = url.trim();
    if url.is_empty() {
        return String::new();
    }
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

impl DesktopEngine {
    // =========================================================================
    // Creation and removal
    // =========================================================================

    /// Add a panel to the active tab at `position` (or the default spawn
    /// point). Returns the new panel's ID.
    pub fn add_panel(&mut self, request: NewPanel, position: Option<Vec2>) -> Option<PanelId> {
        let default_size = self.config.default_panel_size;
        let pos = position.unwrap_or(self.config.default_panel_position);

        let (title, size, body) = match request {
            NewPanel::Premade { premade_id } => {
                let size = self
                    .registry
                    .get(&premade_id)
                    .map_or(default_size, |def| def.size_or(default_size));
                let title = self.registry.name(&premade_id).to_string();
                let body = PanelBody::Premade(PremadeBody {
                    premade_id: Some(premade_id),
                    cached_content: None,
                });
                (title, size, body)
            }
            NewPanel::Custom => {
                let body = PanelBody::Custom(CustomBody {
                    custom_content: CUSTOM_PLACEHOLDER.to_string(),
                    is_editing_custom: false,
                });
                (CUSTOM_PANEL_TITLE.to_string(), default_size, body)
            }
            NewPanel::External { url } => {
                let body = PanelBody::External(ExternalBody {
                    external_url: normalize_external_url(&url),
                });
                (EXTERNAL_PANEL_TITLE.to_string(), default_size, body)
            }
            NewPanel::Layout { mode } => {
                let size = match mode {
                    LayoutMode::Grid => Size::new(default_size.width, default_size.width),
                    LayoutMode::Horizontal => default_size,
                    LayoutMode::Vertical => Size::new(default_size.height, default_size.width),
                };
                let title = format!("{} Layout", mode.display_name());
                (title, size, PanelBody::Layout(LayoutBody::new(mode)))
            }
        };

        let tab = self.state.active_tab_mut()?;
        let id = tab.new_panel_id();
        let z = self.z_order.next();
        let kind = body.kind();
        tab.panels
            .push(Panel::new(id.clone(), title, body, Rect::from_pos_size(pos, size), z));
        info!(panel_id = %id, kind = kind.id(), "added panel");
        self.commit();
        Some(id)
    }

    /// Close a panel.
    ///
    /// Non-closable panels are never removed. Custom panels are removed only
    /// if `confirm` returns true; it is not called for other kinds.
    pub fn close_panel(&mut self, panel_id: &str, confirm: impl FnOnce(&Panel) -> bool) -> bool {
        let Some(loc) = self.state.locate_panel(panel_id) else {
            return false;
        };
        let panel = &self.state.tabs[loc.tab].panels[loc.panel];
        if !panel.closable {
            debug!(panel_id, "refusing to close non-closable panel");
            return false;
        }
        if panel.kind() == PanelKind::Custom && !confirm(panel) {
            return false;
        }

        self.state.tabs[loc.tab].panels.remove(loc.panel);
        if self.drag.panel_id() == Some(panel_id) {
            self.drag = DragState::Idle;
        }
        self.commit();
        true
    }

    /// Flip a panel's minimized flag
    pub fn toggle_minimized(&mut self, panel_id: &str) -> Option<bool> {
        let panel = self.state.find_panel_mut(panel_id)?;
        panel.minimized = !panel.minimized;
        let minimized = panel.minimized;
        self.commit();
        Some(minimized)
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    pub fn move_panel(&mut self, panel_id: &str, pos: Vec2) -> bool {
        let Some(panel) = self.state.find_panel_mut(panel_id) else {
            return false;
        };
        panel.set_position(pos);
        self.commit();
        true
    }

    /// Resize a panel, clamped to the configured minimum
    pub fn resize_panel(&mut self, panel_id: &str, size: Size) -> bool {
        let min = self.config.min_panel_size;
        let Some(panel) = self.state.find_panel_mut(panel_id) else {
            return false;
        };
        panel.set_size(size.at_least(min));
        self.commit();
        true
    }

    /// Begin dragging a panel by its header
    pub fn start_move(&mut self, panel_id: &str, pointer: Vec2) -> InputResult {
        let Some(found) = self.state.find_panel(panel_id) else {
            return InputResult::Unhandled;
        };
        self.drag = DragState::start_move(panel_id, found.panel.rect(), pointer);
        InputResult::Handled
    }

    /// Begin dragging a panel's resize handle
    pub fn start_resize(&mut self, panel_id: &str, pointer: Vec2) -> InputResult {
        let Some(found) = self.state.find_panel(panel_id) else {
            return InputResult::Unhandled;
        };
        self.drag = DragState::start_resize(panel_id, found.panel.rect(), pointer);
        InputResult::Handled
    }

    /// Track the pointer during a drag; returns the preview rectangle
    pub fn pointer_move(&mut self, pointer: Vec2) -> Option<Rect> {
        self.drag.update(pointer, self.config.min_panel_size)
    }

    /// Finish a drag, writing the preview into the panel and persisting.
    pub fn end_drag(&mut self) -> InputResult {
        let drag = std::mem::take(&mut self.drag);
        let (Some(panel_id), Some(preview)) = (drag.panel_id(), drag.preview()) else {
            return InputResult::Unhandled;
        };
        if let Some(panel) = self.state.find_panel_mut(panel_id) {
            panel.set_position(preview.position());
            panel.set_size(preview.size());
            self.commit();
        }
        InputResult::Handled
    }

    // =========================================================================
    // Layering
    // =========================================================================

    /// Raise a panel above every other. Returns its new z-index.
    pub fn bring_to_front(&mut self, panel_id: &str) -> Option<i64> {
        let loc = self.state.locate_panel(panel_id)?;
        let z = self
            .z_order
            .bring_to_front(&mut self.state.tabs[loc.tab].panels, loc.panel)?;
        self.commit();
        Some(z)
    }

    /// Lower a panel below every sibling in its tab. Returns its new z-index.
    pub fn send_to_back(&mut self, panel_id: &str) -> Option<i64> {
        let loc = self.state.locate_panel(panel_id)?;
        let floor = self.config.z_floor;
        let z = self
            .z_order
            .send_to_back(&mut self.state.tabs[loc.tab].panels, loc.panel, floor)?;
        self.commit();
        Some(z)
    }

    // =========================================================================
    // Content edits
    // =========================================================================

    /// Open the custom editor of a top-level custom panel
    pub fn begin_custom_edit(&mut self, panel_id: &str) -> bool {
        self.set_editing(panel_id, true)
    }

    /// Close the custom editor without saving
    pub fn end_custom_edit(&mut self, panel_id: &str) -> bool {
        self.set_editing(panel_id, false)
    }

    fn set_editing(&mut self, panel_id: &str, editing: bool) -> bool {
        match self.state.find_panel_mut(panel_id).map(|p| &mut p.body) {
            Some(PanelBody::Custom(body)) => {
                body.is_editing_custom = editing;
                self.revision += 1;
                true
            }
            _ => false,
        }
    }

    /// Save edited custom markup.
    ///
    /// On a top-level custom panel this also closes the editor. On a layout
    /// child the child becomes custom.
    pub fn set_custom_content(&mut self, target: &PanelTarget, text: &str) -> bool {
        let generation = self.fetches.bump_generation();
        let written = match target {
            PanelTarget::Panel { panel_id } => {
                match self.state.find_panel_mut(panel_id).map(|p| &mut p.body) {
                    Some(PanelBody::Custom(body)) => {
                        body.custom_content = text.to_string();
                        body.is_editing_custom = false;
                        true
                    }
                    _ => false,
                }
            }
            PanelTarget::LayoutChild { panel_id, child_id } => {
                match self.state.find_sub_panel_mut(panel_id, child_id) {
                    Some(child) => {
                        child.kind = ChildKind::Custom;
                        child.custom_content = text.to_string();
                        child.generation = generation;
                        true
                    }
                    None => false,
                }
            }
        };
        if written {
            self.commit();
        }
        written
    }

    /// Save an edited external URL, normalized
    pub fn set_external_url(&mut self, target: &PanelTarget, url: &str) -> bool {
        let url = normalize_external_url(url);
        let generation = self.fetches.bump_generation();
        let written = match target {
            PanelTarget::Panel { panel_id } => {
                match self.state.find_panel_mut(panel_id).map(|p| &mut p.body) {
                    Some(PanelBody::External(body)) => {
                        body.external_url = url;
                        true
                    }
                    _ => false,
                }
            }
            PanelTarget::LayoutChild { panel_id, child_id } => {
                match self.state.find_sub_panel_mut(panel_id, child_id) {
                    Some(child) => {
                        child.kind = ChildKind::External;
                        child.external_url = url;
                        child.generation = generation;
                        true
                    }
                    None => false,
                }
            }
        };
        if written {
            self.commit();
        }
        written
    }

    // =========================================================================
    // Panel context menu
    // =========================================================================

    /// Visible items of the panel menu, or `None` if the target is gone
    pub fn panel_menu(&self, target: &PanelTarget) -> Option<PanelMenu> {
        PanelMenu::for_target(&self.state, &self.registry, target)
    }

    /// Apply a panel menu action. Invalid or stale targets are no-ops.
    pub fn apply_panel_action(&mut self, target: &PanelTarget, action: PanelAction) -> MenuOutcome {
        if self.state.find_panel(target.panel_id()).is_none() {
            return MenuOutcome::Unchanged;
        }

        match action {
            PanelAction::AssignPremade(premade_id) => self.assign_premade(target, premade_id),
            PanelAction::ReadMore => self.premade_source(target),
            PanelAction::DownloadCustom => self.download_custom(target),
            PanelAction::LoadCustom(text) => self.load_custom(target, &text),
            PanelAction::OpenExternal => match target {
                PanelTarget::Panel { panel_id } => match self.state.find_panel(panel_id) {
                    Some(found) => match &found.panel.body {
                        PanelBody::External(body) if !body.external_url.is_empty() => {
                            MenuOutcome::OpenUrl(body.external_url.clone())
                        }
                        _ => MenuOutcome::Unchanged,
                    },
                    None => MenuOutcome::Unchanged,
                },
                PanelTarget::LayoutChild { .. } => MenuOutcome::Unchanged,
            },
            PanelAction::SetLayoutMode(mode) => match target {
                PanelTarget::Panel { panel_id } => {
                    match self.state.find_panel_mut(panel_id).and_then(Panel::as_layout_mut) {
                        Some(body) => {
                            body.set_mode(mode);
                            self.commit();
                            MenuOutcome::Changed
                        }
                        None => MenuOutcome::Unchanged,
                    }
                }
                PanelTarget::LayoutChild { .. } => MenuOutcome::Unchanged,
            },
            PanelAction::RemoveLayoutChild => match target {
                PanelTarget::LayoutChild { panel_id, child_id } => {
                    let removed = self
                        .state
                        .find_panel_mut(panel_id)
                        .and_then(Panel::as_layout_mut)
                        .and_then(|body| body.remove_child(child_id));
                    if removed.is_none() {
                        return MenuOutcome::Unchanged;
                    }
                    self.commit();
                    MenuOutcome::Changed
                }
                PanelTarget::Panel { .. } => MenuOutcome::Unchanged,
            },
            PanelAction::SendToFront => match target {
                PanelTarget::Panel { panel_id } => {
                    self.bring_to_front(panel_id);
                    MenuOutcome::Changed
                }
                PanelTarget::LayoutChild { .. } => MenuOutcome::Unchanged,
            },
            PanelAction::SendToBack => match target {
                PanelTarget::Panel { panel_id } => {
                    self.send_to_back(panel_id);
                    MenuOutcome::Changed
                }
                PanelTarget::LayoutChild { .. } => MenuOutcome::Unchanged,
            },
        }
    }

    fn assign_premade(&mut self, target: &PanelTarget, premade_id: PremadeId) -> MenuOutcome {
        let title = self.registry.name(&premade_id).to_string();
        let generation = self.fetches.bump_generation();

        let fetch_target = match target {
            PanelTarget::Panel { panel_id } => {
                let Some(panel) = self.state.find_panel_mut(panel_id) else {
                    return MenuOutcome::Unchanged;
                };
                panel.body = PanelBody::Premade(PremadeBody {
                    premade_id: Some(premade_id.clone()),
                    cached_content: None,
                });
                panel.title = title;
                panel.generation = generation;
                FetchTarget::Panel {
                    panel_id: panel_id.clone(),
                }
            }
            PanelTarget::LayoutChild { panel_id, child_id } => {
                let Some(child) = self.state.find_sub_panel_mut(panel_id, child_id) else {
                    return MenuOutcome::Unchanged;
                };
                child.kind = ChildKind::Premade;
                child.premade_id = Some(premade_id.clone());
                child.title = title;
                child.content.clear();
                child.generation = generation;
                FetchTarget::Child {
                    layout_id: panel_id.clone(),
                    child_id: child_id.clone(),
                }
            }
        };

        self.commit();
        let request_id = self.enqueue_fetch(premade_id, fetch_target, generation, FetchOrigin::Assign);
        MenuOutcome::Fetching(request_id)
    }

    fn premade_source(&self, target: &PanelTarget) -> MenuOutcome {
        let premade_id = match target {
            PanelTarget::Panel { panel_id } => {
                match self.state.find_panel(panel_id).map(|f| &f.panel.body) {
                    Some(PanelBody::Premade(body)) => body.premade_id.as_deref(),
                    _ => None,
                }
            }
            PanelTarget::LayoutChild { panel_id, child_id } => self
                .state
                .find_sub_panel(panel_id, child_id)
                .filter(|found| found.child.kind == ChildKind::Premade)
                .and_then(|found| found.child.premade_id.as_deref()),
        };
        premade_id
            .and_then(|id| self.registry.get(id))
            .and_then(|def| def.source.clone())
            .map_or(MenuOutcome::Unchanged, MenuOutcome::OpenUrl)
    }

    fn download_custom(&self, target: &PanelTarget) -> MenuOutcome {
        match target {
            PanelTarget::Panel { panel_id } => match self.state.find_panel(panel_id) {
                Some(found) => match &found.panel.body {
                    PanelBody::Custom(body) => MenuOutcome::Download(Download::markdown(
                        &found.panel.title,
                        &body.custom_content,
                    )),
                    _ => MenuOutcome::Unchanged,
                },
                None => MenuOutcome::Unchanged,
            },
            PanelTarget::LayoutChild { panel_id, child_id } => {
                match self.state.find_sub_panel(panel_id, child_id) {
                    Some(found) if found.child.kind == ChildKind::Custom => MenuOutcome::Download(
                        Download::markdown(&found.child.title, found.child.custom_text()),
                    ),
                    _ => MenuOutcome::Unchanged,
                }
            }
        }
    }

    fn load_custom(&mut self, target: &PanelTarget, text: &str) -> MenuOutcome {
        let generation = self.fetches.bump_generation();
        let written = match target {
            PanelTarget::Panel { panel_id } => {
                match self.state.find_panel_mut(panel_id).map(|p| &mut p.body) {
                    Some(PanelBody::Custom(body)) => {
                        body.custom_content = text.to_string();
                        true
                    }
                    _ => false,
                }
            }
            PanelTarget::LayoutChild { panel_id, child_id } => {
                match self.state.find_sub_panel_mut(panel_id, child_id) {
                    Some(child) => {
                        child.kind = ChildKind::Custom;
                        child.content = text.to_string();
                        if child.title.is_empty() {
                            child.title = LOADED_CUSTOM_TITLE.to_string();
                        }
                        child.generation = generation;
                        true
                    }
                    None => false,
                }
            }
        };
        if !written {
            return MenuOutcome::Unchanged;
        }
        self.commit();
        MenuOutcome::Changed
    }
}
