//! Panel context menu for top-level panels and layout children

use crate::menu::target::PanelTarget;
use crate::panel::{ChildKind, LayoutMode, PanelBody, PanelKind};
use crate::premade::PremadeRegistry;
use crate::state::DesktopState;
use crate::types::PremadeId;

/// Item groups shown in the panel context menu
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PanelMenu {
    /// Premade picker
    pub premade: bool,
    /// "Read more" link to the premade's source
    pub premade_source: bool,
    /// Download/load custom content
    pub custom: bool,
    /// "Open in new tab"
    pub external: bool,
    /// Grid/horizontal/vertical switch
    pub layout: bool,
    /// Send to front/back
    pub layering: bool,
    /// Remove the layout child
    pub child_remove: bool,
}

impl PanelMenu {
    /// Compute visible items for a target. `None` if the target is gone.
    pub fn for_target(
        state: &DesktopState,
        registry: &PremadeRegistry,
        target: &PanelTarget,
    ) -> Option<Self> {
        let panel = state.find_panel(target.panel_id())?.panel;

        let menu = match target {
            PanelTarget::Panel { .. } => {
                let kind = panel.kind();
                let premade_id = match &panel.body {
                    PanelBody::Premade(body) => body.premade_id.as_deref(),
                    _ => None,
                };
                let premade = kind == PanelKind::Premade;
                Self {
                    premade,
                    premade_source: premade && has_source(registry, premade_id),
                    custom: kind == PanelKind::Custom,
                    external: kind == PanelKind::External,
                    layout: kind == PanelKind::Layout,
                    layering: true,
                    child_remove: false,
                }
            }
            PanelTarget::LayoutChild { child_id, .. } => {
                let child = panel.as_layout()?.child(child_id)?;
                let premade = matches!(child.kind, ChildKind::Premade | ChildKind::Empty);
                let source = child.kind == ChildKind::Premade
                    && has_source(registry, child.premade_id.as_deref());
                Self {
                    premade,
                    premade_source: premade && source,
                    custom: matches!(child.kind, ChildKind::Custom | ChildKind::Empty),
                    external: false,
                    layout: false,
                    layering: false,
                    child_remove: !child.is_empty(),
                }
            }
        };
        Some(menu)
    }
}

fn has_source(registry: &PremadeRegistry, premade_id: Option<&str>) -> bool {
    premade_id
        .and_then(|id| registry.get(id))
        .is_some_and(|def| def.source.is_some())
}

/// An action picked from the panel context menu
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PanelAction {
    /// Swap the target's content for registry content
    AssignPremade(PremadeId),
    /// Open the premade's source page
    ReadMore,
    /// Save the custom content as a markdown file
    DownloadCustom,
    /// Replace custom content with uploaded text
    LoadCustom(String),
    /// Open the external URL in a browser tab
    OpenExternal,
    /// Switch a layout panel's arrangement
    SetLayoutMode(LayoutMode),
    /// Remove the targeted layout child
    RemoveLayoutChild,
    SendToFront,
    SendToBack,
}
