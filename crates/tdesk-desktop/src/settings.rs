//! User settings persisted with the desktop state

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Where the tab bar is docked
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabBarPosition {
    Top,
    #[default]
    Bottom,
}

impl TabBarPosition {
    /// Parse from string ID ("top", "bottom")
    pub fn from_id(id: &str) -> Option<Self> {
        match id.to_lowercase().as_str() {
            "top" => Some(Self::Top),
            "bottom" => Some(Self::Bottom),
            _ => None,
        }
    }

    /// Get the string ID
    pub fn id(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }
}

/// How the background image is fitted to the desktop
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundMode {
    /// Whole image visible, letterboxed
    Fit,
    /// Image covers the desktop, cropped
    #[default]
    Envelop,
    /// Image repeated at natural size
    Tiled,
}

impl BackgroundMode {
    /// Get all available modes
    pub fn all() -> &'static [BackgroundMode] {
        &[Self::Fit, Self::Envelop, Self::Tiled]
    }

    /// Parse from string ID ("fit", "envelop", "tiled")
    pub fn from_id(id: &str) -> Option<Self> {
        match id.to_lowercase().as_str() {
            "fit" => Some(Self::Fit),
            "envelop" => Some(Self::Envelop),
            "tiled" => Some(Self::Tiled),
            _ => None,
        }
    }

    /// Get the string ID
    pub fn id(&self) -> &'static str {
        match self {
            Self::Fit => "fit",
            Self::Envelop => "envelop",
            Self::Tiled => "tiled",
        }
    }
}

/// Default desktop background color
pub const DEFAULT_BACKGROUND_COLOR: &str = "#1e1f22";

fn default_opacity() -> f64 {
    1.0
}

fn default_color() -> String {
    DEFAULT_BACKGROUND_COLOR.to_string()
}

fn default_video_muted() -> bool {
    true
}

const SETTINGS_FIELDS: [&str; 6] = [
    "tabBarPosition",
    "backgroundUrl",
    "backgroundMode",
    "backgroundOpacity",
    "backgroundColor",
    "backgroundVideoMuted",
];

fn field_is_valid(key: &str, value: &Value) -> bool {
    match key {
        "tabBarPosition" => value
            .as_str()
            .is_some_and(|s| TabBarPosition::from_id(s).is_some()),
        "backgroundMode" => value
            .as_str()
            .is_some_and(|s| BackgroundMode::from_id(s).is_some()),
        "backgroundOpacity" => value.is_number(),
        "backgroundVideoMuted" => value.is_boolean(),
        _ => value.is_string(),
    }
}

/// Desktop-wide user settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub tab_bar_position: TabBarPosition,
    #[serde(default)]
    pub background_url: String,
    #[serde(default)]
    pub background_mode: BackgroundMode,
    /// Background opacity in `0.0..=1.0`
    #[serde(default = "default_opacity")]
    pub background_opacity: f64,
    #[serde(default = "default_color")]
    pub background_color: String,
    /// Whether a video background plays without sound
    #[serde(default = "default_video_muted")]
    pub background_video_muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tab_bar_position: TabBarPosition::default(),
            background_url: String::new(),
            background_mode: BackgroundMode::default(),
            background_opacity: default_opacity(),
            background_color: default_color(),
            background_video_muted: default_video_muted(),
        }
    }
}

impl Settings {
    /// Clamp values into their valid ranges.
    pub fn normalize(&mut self) {
        if !self.background_opacity.is_finite() {
            self.background_opacity = default_opacity();
        }
        self.background_opacity = self.background_opacity.clamp(0.0, 1.0);
        self.background_url = self.background_url.trim().to_string();
    }

    /// Drop ill-typed fields from a raw settings object so the defaults apply.
    ///
    /// A missing or non-object `settings` value is replaced by an empty object.
    pub(crate) fn repair_value(value: &mut Value) {
        if !value.is_object() {
            *value = Value::Object(Map::new());
        }
        let Some(obj) = value.as_object_mut() else {
            return;
        };

        for key in SETTINGS_FIELDS {
            if obj.get(key).is_some_and(|v| !field_is_valid(key, v)) {
                obj.remove(key);
            }
        }

        // Enum IDs are matched case-insensitively but stored lowercase
        for key in ["tabBarPosition", "backgroundMode"] {
            if let Some(Value::String(s)) = obj.get_mut(key) {
                *s = s.to_lowercase();
            }
        }
    }
}
