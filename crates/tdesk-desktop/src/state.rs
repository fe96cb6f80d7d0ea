//! Application state: tabs, their panels, and lookups across them

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::panel::{LayoutChild, Panel};
use crate::settings::Settings;
use crate::types::{string_or_null, unique_id, PanelId, TabId};

/// ID of the tab in a fresh desktop
pub const DEFAULT_TAB_ID: &str = "tab-1";

/// Title of the tab in a fresh desktop
pub const DEFAULT_TAB_TITLE: &str = "Tab 1";

/// A desktop tab and the panels on it
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tab {
    pub id: TabId,
    #[serde(default, deserialize_with = "string_or_null")]
    pub title: String,
    /// Panels in insertion order; stacking is by `z_index`
    #[serde(default)]
    pub panels: Vec<Panel>,
}

impl Tab {
    /// Create an empty tab
    pub fn new(id: TabId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            panels: Vec::new(),
        }
    }

    /// Index of a panel in this tab
    pub fn panel_index(&self, panel_id: &str) -> Option<usize> {
        self.panels.iter().position(|p| p.id == panel_id)
    }

    /// Panel by ID
    pub fn panel(&self, panel_id: &str) -> Option<&Panel> {
        self.panels.iter().find(|p| p.id == panel_id)
    }

    /// Mutable panel by ID
    pub fn panel_mut(&mut self, panel_id: &str) -> Option<&mut Panel> {
        self.panels.iter_mut().find(|p| p.id == panel_id)
    }

    /// Panels sorted back to front
    pub fn panels_by_z(&self) -> Vec<&Panel> {
        let mut panels: Vec<&Panel> = self.panels.iter().collect();
        panels.sort_by_key(|p| p.z_index);
        panels
    }

    /// Fresh panel ID not used in this tab
    pub fn new_panel_id(&self) -> PanelId {
        unique_id("panel", |candidate| self.panel_index(candidate).is_some())
    }
}

/// Where a top-level panel lives
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelLocation {
    /// Index into `DesktopState::tabs`
    pub tab: usize,
    /// Index into `Tab::panels`
    pub panel: usize,
}

/// Result of [`DesktopState::find_panel`]
#[derive(Clone, Copy, Debug)]
pub struct FoundPanel<'a> {
    pub tab: &'a Tab,
    pub panel: &'a Panel,
}

/// Result of [`DesktopState::find_sub_panel`]
#[derive(Clone, Copy, Debug)]
pub struct FoundSubPanel<'a> {
    pub tab: &'a Tab,
    pub layout: &'a Panel,
    pub child: &'a LayoutChild,
}

/// The persisted desktop: settings, tabs and the active tab
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesktopState {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub tabs: Vec<Tab>,
    #[serde(default, deserialize_with = "string_or_null")]
    pub active_tab_id: TabId,
}

impl Default for DesktopState {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            tabs: vec![Tab::new(DEFAULT_TAB_ID.to_string(), DEFAULT_TAB_TITLE)],
            active_tab_id: DEFAULT_TAB_ID.to_string(),
        }
    }
}

impl DesktopState {
    /// Index of a tab
    pub fn tab_index(&self, tab_id: &str) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == tab_id)
    }

    /// Tab by ID
    pub fn tab(&self, tab_id: &str) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == tab_id)
    }

    /// Mutable tab by ID
    pub fn tab_mut(&mut self, tab_id: &str) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|t| t.id == tab_id)
    }

    /// The tab currently shown
    pub fn active_tab(&self) -> Option<&Tab> {
        self.tab(&self.active_tab_id)
    }

    /// Mutable tab currently shown
    pub fn active_tab_mut(&mut self) -> Option<&mut Tab> {
        let id = self.active_tab_id.clone();
        self.tab_mut(&id)
    }

    /// Point `active_tab_id` at the first tab if it names no tab.
    pub fn repair_active_tab(&mut self) {
        if self.tab_index(&self.active_tab_id).is_none() {
            if let Some(first) = self.tabs.first() {
                self.active_tab_id = first.id.clone();
            }
        }
    }

    /// Fresh tab ID not used by any tab
    pub fn new_tab_id(&self) -> TabId {
        unique_id("tab", |candidate| self.tab_index(candidate).is_some())
    }

    /// Locate a top-level panel in any tab
    pub fn locate_panel(&self, panel_id: &str) -> Option<PanelLocation> {
        self.tabs.iter().enumerate().find_map(|(tab, t)| {
            t.panel_index(panel_id)
                .map(|panel| PanelLocation { tab, panel })
        })
    }

    /// Find a top-level panel in any tab
    pub fn find_panel(&self, panel_id: &str) -> Option<FoundPanel<'_>> {
        let loc = self.locate_panel(panel_id)?;
        let tab = &self.tabs[loc.tab];
        Some(FoundPanel {
            tab,
            panel: &tab.panels[loc.panel],
        })
    }

    /// Mutable top-level panel in any tab
    pub fn find_panel_mut(&mut self, panel_id: &str) -> Option<&mut Panel> {
        self.tabs.iter_mut().find_map(|t| t.panel_mut(panel_id))
    }

    /// Find a child of a layout panel. Logs a warning on a miss.
    pub fn find_sub_panel(&self, layout_id: &str, child_id: &str) -> Option<FoundSubPanel<'_>> {
        let found = self.find_panel(layout_id).and_then(|found| {
            let child = found.panel.as_layout()?.child(child_id)?;
            Some(FoundSubPanel {
                tab: found.tab,
                layout: found.panel,
                child,
            })
        });
        if found.is_none() {
            warn!(layout_id, child_id, "layout child not found");
        }
        found
    }

    /// Mutable child of a layout panel. Logs a warning on a miss.
    pub fn find_sub_panel_mut(&mut self, layout_id: &str, child_id: &str) -> Option<&mut LayoutChild> {
        let child = self
            .find_panel_mut(layout_id)
            .and_then(|p| p.as_layout_mut())
            .and_then(|layout| layout.child_mut(child_id));
        if child.is_none() {
            warn!(layout_id, child_id, "layout child not found");
        }
        child
    }

    /// Every panel in every tab
    pub fn all_panels(&self) -> impl Iterator<Item = &Panel> {
        self.tabs.iter().flat_map(|t| t.panels.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Rect;
    use crate::panel::{ChildKind, LayoutBody, LayoutMode, PanelBody};

    fn layout_panel(id: &str, children: &[&str]) -> Panel {
        let mut body = LayoutBody::new(LayoutMode::Grid);
        for child in children {
            let mut c = LayoutChild::new_blank((*child).into(), 0);
            c.kind = ChildKind::External;
            body.sub_panels.push(c);
        }
        Panel::new(
            id.into(),
            "Grid Layout",
            PanelBody::Layout(body),
            Rect::new(0.0, 0.0, 320.0, 320.0),
            1,
        )
    }

    fn two_tab_state() -> DesktopState {
        let mut state = DesktopState::default();
        state.tabs[0].panels.push(layout_panel("panel-a", &["c1", "c2"]));
        let mut second = Tab::new("tab-2".into(), "Second");
        second.panels.push(layout_panel("panel-b", &["c3"]));
        state.tabs.push(second);
        state
    }

    #[test]
    fn test_default_state() {
        let state = DesktopState::default();
        assert_eq!(state.tabs.len(), 1);
        assert_eq!(state.tabs[0].id, "tab-1");
        assert_eq!(state.tabs[0].title, "Tab 1");
        assert_eq!(state.active_tab_id, "tab-1");
        assert!(state.active_tab().is_some());
    }

    #[test]
    fn test_find_panel_across_tabs() {
        let state = two_tab_state();
        let found = state.find_panel("panel-b").unwrap();
        assert_eq!(found.tab.id, "tab-2");
        assert_eq!(found.panel.id, "panel-b");
        assert_eq!(
            state.locate_panel("panel-b"),
            Some(PanelLocation { tab: 1, panel: 0 })
        );
        assert!(state.find_panel("panel-z").is_none());
    }

    #[test]
    fn test_find_sub_panel() {
        let state = two_tab_state();
        let found = state.find_sub_panel("panel-a", "c2").unwrap();
        assert_eq!(found.tab.id, "tab-1");
        assert_eq!(found.layout.id, "panel-a");
        assert_eq!(found.child.id, "c2");

        assert!(state.find_sub_panel("panel-a", "c3").is_none());
        assert!(state.find_sub_panel("panel-z", "c1").is_none());
    }

    #[test]
    fn test_find_sub_panel_mut() {
        let mut state = two_tab_state();
        state.find_sub_panel_mut("panel-b", "c3").unwrap().title = "Renamed".into();
        assert_eq!(state.find_sub_panel("panel-b", "c3").unwrap().child.title, "Renamed");
    }

    #[test]
    fn test_repair_active_tab() {
        let mut state = two_tab_state();
        state.active_tab_id = "tab-gone".into();
        state.repair_active_tab();
        assert_eq!(state.active_tab_id, "tab-1");
    }

    #[test]
    fn test_state_json_shape() {
        let value = serde_json::to_value(DesktopState::default()).unwrap();
        assert_eq!(value["activeTabId"], "tab-1");
        assert_eq!(value["tabs"][0]["panels"], serde_json::json!([]));
        assert_eq!(value["settings"]["tabBarPosition"], "bottom");
    }
}
