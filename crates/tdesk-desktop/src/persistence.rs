//! State persistence: load, save, import and export
//!
//! The whole [`DesktopState`] is stored as one JSON document under a single
//! key. Loading is forgiving: anything unreadable falls back to defaults
//! piece by piece, so a damaged snapshot never prevents startup. Import is
//! strict about its shape and never partially applies.

use serde_json::{Map, Value};
use tdesk_store::StateStore;
use tracing::{debug, info, warn};

use crate::config::DesktopConfig;
use crate::error::{DesktopError, DesktopResult};
use crate::math::Rect;
use crate::panel::{DiceBody, Panel, PanelBody, PanelKind};
use crate::settings::Settings;
use crate::state::{DesktopState, Tab};
use crate::zorder::ZOrder;

/// Suggested file name for exported layouts
pub const EXPORT_FILE_NAME: &str = "web-desktop-layout.json";

/// Title of the per-tab dice panel
pub const DICE_PANEL_TITLE: &str = "Dice Roller";

/// Title of the tab shown by the player view
pub const PLAYER_TAB_TITLE: &str = "Player";

// =============================================================================
// Loading
// =============================================================================

/// Read the snapshot from `store`, falling back to the default state.
pub fn load_state(store: &dyn StateStore, config: &DesktopConfig) -> (DesktopState, ZOrder) {
    let raw = match store.get(&config.storage_key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key = %config.storage_key, "no saved state, using defaults");
            return finish_state(DesktopState::default(), config);
        }
        Err(e) => {
            warn!(error = %e, "failed to read saved state");
            return finish_state(DesktopState::default(), config);
        }
    };

    match parse_state(&raw, config) {
        Ok(loaded) => {
            info!(tabs = loaded.0.tabs.len(), "loaded desktop state");
            loaded
        }
        Err(e) => {
            warn!(error = %e, "failed to load state");
            finish_state(DesktopState::default(), config)
        }
    }
}

/// Parse and repair a snapshot.
///
/// Fails only when the text is not a JSON object. Ill-typed settings fall
/// back to defaults, unreadable tabs and panels are dropped with a warning,
/// and an empty tab list is replaced by the default tab.
pub fn parse_state(raw: &str, config: &DesktopConfig) -> DesktopResult<(DesktopState, ZOrder)> {
    let value: Value = serde_json::from_str(raw)?;
    let state = state_from_value(value, config)?;
    Ok(finish_state(state, config))
}

/// Serialize for storage
pub fn serialize_state(state: &DesktopState) -> DesktopResult<String> {
    Ok(serde_json::to_string(state)?)
}

/// Serialize for export, pretty-printed
pub fn export_state(state: &DesktopState) -> DesktopResult<String> {
    Ok(serde_json::to_string_pretty(state)?)
}

/// Validate and parse an imported snapshot.
///
/// The document must carry a non-empty `tabs` array and a `settings` value.
pub fn import_state(raw: &str, config: &DesktopConfig) -> DesktopResult<(DesktopState, ZOrder)> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| DesktopError::ImportRejected(e.to_string()))?;

    let has_tabs = value
        .get("tabs")
        .and_then(Value::as_array)
        .is_some_and(|tabs| !tabs.is_empty());
    let has_settings = value
        .get("settings")
        .is_some_and(|s| !s.is_null() && *s != Value::Bool(false));
    if !has_tabs || !has_settings {
        return Err(DesktopError::ImportRejected("Invalid format".to_string()));
    }

    let state = state_from_value(value, config)
        .map_err(|e| DesktopError::ImportRejected(e.to_string()))?;
    if state.tabs.is_empty() {
        return Err(DesktopError::ImportRejected("no readable tabs".to_string()));
    }
    Ok(finish_state(state, config))
}

fn state_from_value(value: Value, config: &DesktopConfig) -> DesktopResult<DesktopState> {
    let Value::Object(mut obj) = value else {
        return Err(DesktopError::SerializationError(
            "state is not a JSON object".to_string(),
        ));
    };

    let mut settings_value = obj.remove("settings").unwrap_or(Value::Null);
    Settings::repair_value(&mut settings_value);
    let mut settings: Settings = serde_json::from_value(settings_value)?;
    settings.normalize();

    let active_tab_id = obj
        .get("activeTabId")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let mut z_seed = 1;
    let tabs = match obj.remove("tabs") {
        Some(Value::Array(tabs)) => tabs
            .into_iter()
            .filter_map(|tab| tab_from_value(tab, &mut z_seed, config))
            .collect(),
        _ => Vec::new(),
    };

    Ok(DesktopState {
        settings,
        tabs,
        active_tab_id,
    })
}

fn tab_from_value(value: Value, z_seed: &mut i64, config: &DesktopConfig) -> Option<Tab> {
    let Value::Object(mut obj) = value else {
        warn!("dropping tab that is not an object");
        return None;
    };
    let Some(id) = obj.get("id").and_then(Value::as_str).map(str::to_string) else {
        warn!("dropping tab without an id");
        return None;
    };
    let title = obj
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let mut tab = Tab::new(id, title);
    if let Some(Value::Array(panels)) = obj.remove("panels") {
        for panel in panels {
            if let Some(panel) = panel_from_value(panel, z_seed, config) {
                if tab.panel_index(&panel.id).is_some() {
                    warn!(tab_id = %tab.id, panel_id = %panel.id, "dropping duplicate panel id");
                    continue;
                }
                tab.panels.push(panel);
            }
        }
    }
    Some(tab)
}

/// Repair one panel object and parse it.
///
/// A missing or non-integer `zIndex` takes the next value of the running
/// seed; existing ones push the seed above themselves. Dice panels get their
/// geometry defaults filled in.
fn panel_from_value(mut value: Value, z_seed: &mut i64, config: &DesktopConfig) -> Option<Panel> {
    let obj = value.as_object_mut()?;

    match obj.get("zIndex").and_then(Value::as_i64) {
        Some(z) => *z_seed = (*z_seed).max(z.saturating_add(1)),
        None => {
            obj.insert("zIndex".to_string(), Value::from(*z_seed));
            *z_seed += 1;
        }
    }

    if obj.get("type").and_then(Value::as_str) == Some(PanelKind::Dice.id()) {
        fill_dice_defaults(obj, config);
    }

    match serde_json::from_value::<Panel>(value) {
        Ok(panel) => Some(panel),
        Err(e) => {
            warn!(error = %e, "dropping unreadable panel");
            None
        }
    }
}

fn fill_dice_defaults(obj: &mut Map<String, Value>, config: &DesktopConfig) {
    let defaults = [
        ("x", config.dice_panel_position.x),
        ("y", config.dice_panel_position.y),
        ("width", config.dice_panel_size.width),
        ("height", config.dice_panel_size.height),
    ];
    for (key, default) in defaults {
        if !obj.get(key).is_some_and(Value::is_number) {
            obj.insert(key.to_string(), Value::from(default));
        }
    }
    if !obj.get("minimized").is_some_and(Value::is_boolean) {
        obj.insert("minimized".to_string(), Value::Bool(false));
    }
}

/// Apply whole-state invariants and seed the z-order counter.
fn finish_state(mut state: DesktopState, config: &DesktopConfig) -> (DesktopState, ZOrder) {
    if state.tabs.is_empty() {
        let default = DesktopState::default();
        state.tabs = default.tabs;
        state.active_tab_id = default.active_tab_id;
    }
    state.repair_active_tab();
    ensure_dice_panels(&mut state, config);

    let z_order = ZOrder::seeded(state.all_panels().map(|p| p.z_index));
    (state, z_order)
}

// =============================================================================
// Player view
// =============================================================================

/// Reduce a state to the tab titled [`PLAYER_TAB_TITLE`], or the default tab
/// when there is none, and make it active. Settings are kept.
pub fn player_view(state: DesktopState) -> DesktopState {
    let DesktopState { settings, tabs, .. } = state;
    let tab = tabs
        .into_iter()
        .find(|t| t.title == PLAYER_TAB_TITLE)
        .or_else(|| DesktopState::default().tabs.into_iter().next());

    let tabs: Vec<Tab> = tab.into_iter().collect();
    let active_tab_id = tabs.first().map(|t| t.id.clone()).unwrap_or_default();
    DesktopState {
        settings,
        tabs,
        active_tab_id,
    }
}

/// Load the saved snapshot and project it with [`player_view`].
pub fn load_player_view(store: &dyn StateStore, config: &DesktopConfig) -> (DesktopState, ZOrder) {
    let (state, _) = load_state(store, config);
    let has_player = state.tabs.iter().any(|t| t.title == PLAYER_TAB_TITLE);
    debug!(has_player, "projecting player view");
    finish_state(player_view(state), config)
}

// =============================================================================
// Dice panels
// =============================================================================

/// Give every tab exactly one non-closable dice panel.
///
/// A missing dice panel is created at the front of the tab's panel list;
/// extra ones beyond the first are left alone.
pub fn ensure_dice_panels(state: &mut DesktopState, config: &DesktopConfig) {
    for tab in &mut state.tabs {
        match tab.panels.iter_mut().find(|p| p.kind() == PanelKind::Dice) {
            Some(panel) => {
                if panel.title.is_empty() {
                    panel.title = DICE_PANEL_TITLE.to_string();
                }
                panel.closable = false;
            }
            None => {
                let panel = new_dice_panel(tab.new_panel_id(), config);
                tab.panels.insert(0, panel);
            }
        }
    }
}

/// A fresh dice panel at the configured position
pub fn new_dice_panel(id: String, config: &DesktopConfig) -> Panel {
    let rect = Rect::from_pos_size(config.dice_panel_position, config.dice_panel_size);
    let mut panel = Panel::new(
        id,
        DICE_PANEL_TITLE,
        PanelBody::Dice(DiceBody::default()),
        rect,
        1,
    );
    panel.closable = false;
    panel
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::BackgroundMode;
    use serde_json::json;
    use tdesk_store::MemoryStore;

    fn config() -> DesktopConfig {
        DesktopConfig::default()
    }

    #[test]
    fn test_missing_snapshot_gives_default_with_dice() {
        let store = MemoryStore::new();
        let (state, z) = load_state(&store, &config());
        assert_eq!(state.tabs.len(), 1);
        assert_eq!(state.tabs[0].id, "tab-1");
        let dice = &state.tabs[0].panels[0];
        assert_eq!(dice.kind(), PanelKind::Dice);
        assert!(!dice.closable);
        assert_eq!(dice.title, "Dice Roller");
        assert_eq!(dice.rect(), Rect::new(32.0, 32.0, 360.0, 240.0));
        assert!(z.current() >= 2);
    }

    #[test]
    fn test_corrupt_snapshot_gives_default() {
        let store = MemoryStore::new();
        store.set("webDesktopStateV1", "{ nope").unwrap();
        let (state, _) = load_state(&store, &config());
        assert_eq!(state.active_tab_id, "tab-1");
    }

    #[test]
    fn test_parse_repairs_pieces() {
        let raw = json!({
            "settings": { "backgroundMode": "Tiled", "backgroundOpacity": 4 },
            "tabs": [
                { "id": "t1", "title": "One", "panels": [
                    { "id": "p1", "type": "custom", "customContent": "x" },
                    { "id": "p2", "type": "mystery" },
                    { "id": "p3", "type": "external", "externalUrl": "https://a", "zIndex": 7 }
                ]},
                "garbage",
                { "title": "no id" }
            ],
            "activeTabId": "missing"
        })
        .to_string();

        let (state, z) = parse_state(&raw, &config()).unwrap();
        assert_eq!(state.settings.background_mode, BackgroundMode::Tiled);
        assert_eq!(state.settings.background_opacity, 1.0);
        assert_eq!(state.tabs.len(), 1);
        assert_eq!(state.active_tab_id, "t1");

        let tab = &state.tabs[0];
        let ids: Vec<_> = tab.panels.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids[1..], ["p1", "p3"]);
        assert_eq!(tab.panel("p1").unwrap().z_index, 1);
        assert_eq!(tab.panel("p3").unwrap().z_index, 7);
        assert_eq!(z.current(), 8);
    }

    #[test]
    fn test_existing_dice_panel_is_repaired() {
        let raw = json!({
            "settings": {},
            "tabs": [{ "id": "t1", "title": "T", "panels": [
                { "id": "d", "type": "dice", "title": "", "closable": true, "zIndex": 3,
                  "diceCounts": { "d6": 2 } }
            ]}],
            "activeTabId": "t1"
        })
        .to_string();

        let (state, _) = parse_state(&raw, &config()).unwrap();
        let panels = &state.tabs[0].panels;
        assert_eq!(panels.len(), 1);
        assert_eq!(panels[0].title, "Dice Roller");
        assert!(!panels[0].closable);
        assert_eq!(panels[0].rect(), Rect::new(32.0, 32.0, 360.0, 240.0));
    }

    #[test]
    fn test_empty_tabs_replaced() {
        let raw = r#"{ "settings": {}, "tabs": [], "activeTabId": "x" }"#;
        let (state, _) = parse_state(raw, &config()).unwrap();
        assert_eq!(state.tabs[0].id, "tab-1");
        assert_eq!(state.active_tab_id, "tab-1");
    }

    #[test]
    fn test_import_validation() {
        let cfg = config();
        let err = import_state("not json", &cfg).unwrap_err();
        assert!(matches!(err, DesktopError::ImportRejected(_)));

        let err = import_state(r#"{ "settings": {}, "tabs": [] }"#, &cfg).unwrap_err();
        assert_eq!(err, DesktopError::ImportRejected("Invalid format".into()));

        let err = import_state(r#"{ "tabs": [{ "id": "t", "panels": [] }] }"#, &cfg).unwrap_err();
        assert_eq!(err, DesktopError::ImportRejected("Invalid format".into()));

        let (state, _) = import_state(
            r#"{ "settings": {}, "tabs": [{ "id": "t", "title": "T", "panels": [] }], "activeTabId": "t" }"#,
            &cfg,
        )
        .unwrap();
        assert_eq!(state.active_tab_id, "t");
    }

    #[test]
    fn test_player_view_keeps_only_player_tab() {
        let raw = json!({
            "settings": { "backgroundColor": "#000000" },
            "tabs": [
                { "id": "gm", "title": "GM Notes", "panels": [
                    { "id": "secret", "type": "custom", "customContent": "x", "zIndex": 40 }
                ]},
                { "id": "pl", "title": "Player", "panels": [
                    { "id": "map", "type": "external", "externalUrl": "https://a", "zIndex": 3 }
                ]}
            ],
            "activeTabId": "gm"
        })
        .to_string();
        let store = MemoryStore::new();
        store.set("webDesktopStateV1", &raw).unwrap();

        let (state, z) = load_player_view(&store, &config());
        assert_eq!(state.tabs.len(), 1);
        assert_eq!(state.active_tab_id, "pl");
        assert!(state.tabs[0].panel("map").is_some());
        assert!(state.find_panel("secret").is_none());
        assert_eq!(state.settings.background_color, "#000000");
        assert_eq!(z.current(), 4);
    }

    #[test]
    fn test_player_view_without_player_tab_uses_default() {
        let raw = json!({
            "settings": {},
            "tabs": [{ "id": "gm", "title": "GM Notes", "panels": [] }],
            "activeTabId": "gm"
        })
        .to_string();
        let store = MemoryStore::new();
        store.set("webDesktopStateV1", &raw).unwrap();

        let (state, _) = load_player_view(&store, &config());
        assert_eq!(state.tabs.len(), 1);
        assert_eq!(state.active_tab_id, "tab-1");
        assert_eq!(state.tabs[0].panels[0].kind(), PanelKind::Dice);
    }

    #[test]
    fn test_export_round_trips() {
        let (state, _) = load_state(&MemoryStore::new(), &config());
        let text = export_state(&state).unwrap();
        assert!(text.contains('\n'));
        let (again, _) = parse_state(&text, &config()).unwrap();
        assert_eq!(again, state);
    }
}
