//! Top-level floating panels

use serde::{Deserialize, Serialize};

use crate::math::{Rect, Size, Vec2};
use crate::panel::dice::DiceBody;
use crate::panel::layout::LayoutBody;
use crate::types::{string_or_null, PanelId, PremadeId};

/// Instructional content seeded into a new custom panel.
pub const CUSTOM_PLACEHOLDER: &str =
    "<p>Click the ✎ in the top right corner to edit this panel.</p>";

/// Content shown when premade content could not be loaded.
pub const FETCH_FAILED_MARKER: &str = "<em>Failed to load panel.</em>";

/// Discriminant of a panel's body
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PanelKind {
    Premade,
    Custom,
    External,
    Layout,
    Dice,
}

impl PanelKind {
    /// Parse from string ID ("premade", "custom", …)
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "premade" => Some(Self::Premade),
            "custom" => Some(Self::Custom),
            "external" => Some(Self::External),
            "layout" => Some(Self::Layout),
            "dice" => Some(Self::Dice),
            _ => None,
        }
    }

    /// Get the string ID
    pub fn id(&self) -> &'static str {
        match self {
            Self::Premade => "premade",
            Self::Custom => "custom",
            Self::External => "external",
            Self::Layout => "layout",
            Self::Dice => "dice",
        }
    }
}

/// Premade panel body
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PremadeBody {
    #[serde(default)]
    pub premade_id: Option<PremadeId>,
    /// Fetched body, `None` until loaded
    #[serde(default)]
    pub cached_content: Option<String>,
}

/// Custom markup panel body
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomBody {
    #[serde(default, deserialize_with = "string_or_null")]
    pub custom_content: String,
    /// Whether the editor is open; not persisted
    #[serde(skip)]
    pub is_editing_custom: bool,
}

/// External page panel body
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalBody {
    #[serde(default, deserialize_with = "string_or_null")]
    pub external_url: String,
}

/// Type-specific panel fields, tagged by `"type"` in JSON
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PanelBody {
    Premade(PremadeBody),
    Custom(CustomBody),
    External(ExternalBody),
    Layout(LayoutBody),
    Dice(DiceBody),
}

impl PanelBody {
    /// Body discriminant
    pub fn kind(&self) -> PanelKind {
        match self {
            Self::Premade(_) => PanelKind::Premade,
            Self::Custom(_) => PanelKind::Custom,
            Self::External(_) => PanelKind::External,
            Self::Layout(_) => PanelKind::Layout,
            Self::Dice(_) => PanelKind::Dice,
        }
    }
}

fn default_closable() -> bool {
    true
}

/// A top-level floating window on a tab's desktop
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Panel {
    pub id: PanelId,
    #[serde(default, deserialize_with = "string_or_null")]
    pub title: String,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub width: f32,
    #[serde(default)]
    pub height: f32,
    /// Stacking order within the tab; higher paints on top
    #[serde(default)]
    pub z_index: i64,
    #[serde(default)]
    pub minimized: bool,
    #[serde(default = "default_closable")]
    pub closable: bool,
    #[serde(flatten)]
    pub body: PanelBody,
    /// Content generation; a premade fetch only lands if this still matches
    #[serde(skip)]
    pub(crate) generation: u64,
}

impl Panel {
    /// Create a panel with the given geometry
    pub fn new(id: PanelId, title: impl Into<String>, body: PanelBody, rect: Rect, z_index: i64) -> Self {
        Self {
            id,
            title: title.into(),
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            z_index,
            minimized: false,
            closable: true,
            body,
            generation: 0,
        }
    }

    /// Body discriminant
    pub fn kind(&self) -> PanelKind {
        self.body.kind()
    }

    /// Top-left corner
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Width and height
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Bounding rectangle
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Move the top-left corner
    pub fn set_position(&mut self, pos: Vec2) {
        self.x = pos.x;
        self.y = pos.y;
    }

    /// Change width and height
    pub fn set_size(&mut self, size: Size) {
        self.width = size.width;
        self.height = size.height;
    }

    /// Current content generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn as_layout(&self) -> Option<&LayoutBody> {
        match &self.body {
            PanelBody::Layout(body) => Some(body),
            _ => None,
        }
    }

    pub fn as_layout_mut(&mut self) -> Option<&mut LayoutBody> {
        match &mut self.body {
            PanelBody::Layout(body) => Some(body),
            _ => None,
        }
    }

    pub fn as_dice(&self) -> Option<&DiceBody> {
        match &self.body {
            PanelBody::Dice(body) => Some(body),
            _ => None,
        }
    }

    pub fn as_dice_mut(&mut self) -> Option<&mut DiceBody> {
        match &mut self.body {
            PanelBody::Dice(body) => Some(body),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::layout::LayoutMode;
    use serde_json::json;

    #[test]
    fn test_panel_kind_ids() {
        for kind in [
            PanelKind::Premade,
            PanelKind::Custom,
            PanelKind::External,
            PanelKind::Layout,
            PanelKind::Dice,
        ] {
            assert_eq!(PanelKind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(PanelKind::from_id("iframe"), None);
    }

    #[test]
    fn test_panel_serializes_flat() {
        let panel = Panel::new(
            "panel-1".into(),
            "Custom Panel",
            PanelBody::Custom(CustomBody {
                custom_content: "hi".into(),
                is_editing_custom: true,
            }),
            Rect::new(80.0, 80.0, 320.0, 200.0),
            3,
        );
        let value = serde_json::to_value(&panel).unwrap();
        assert_eq!(value["type"], "custom");
        assert_eq!(value["customContent"], "hi");
        assert_eq!(value["zIndex"], 3);
        assert_eq!(value["closable"], true);
        assert!(value.get("isEditingCustom").is_none());
        assert!(value.get("body").is_none());
    }

    #[test]
    fn test_panel_deserializes_layout() {
        let value = json!({
            "id": "panel-9",
            "type": "layout",
            "title": "Grid Layout",
            "x": 10, "y": 20, "width": 320, "height": 320,
            "zIndex": 4,
            "minimized": false,
            "layoutMode": "horizontal",
            "subPanels": [{ "id": "layout-child-1", "type": "custom", "customContent": "x" }]
        });
        let panel: Panel = serde_json::from_value(value).unwrap();
        assert_eq!(panel.kind(), PanelKind::Layout);
        assert!(panel.closable);
        let layout = panel.as_layout().unwrap();
        assert_eq!(layout.layout_mode, LayoutMode::Horizontal);
        assert_eq!(layout.sub_panels.len(), 1);
        assert_eq!(layout.grid_rows, None);
    }

    #[test]
    fn test_premade_cache_null_is_none() {
        let value = json!({
            "id": "p", "type": "premade", "premadeId": "goblin", "cachedContent": null, "zIndex": 1
        });
        let panel: Panel = serde_json::from_value(value).unwrap();
        match panel.body {
            PanelBody::Premade(body) => {
                assert_eq!(body.premade_id.as_deref(), Some("goblin"));
                assert_eq!(body.cached_content, None);
            }
            other => panic!("unexpected body {:?}", other),
        }
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let value = json!({ "id": "p", "type": "iframe", "zIndex": 1 });
        assert!(serde_json::from_value::<Panel>(value).is_err());
    }
}
