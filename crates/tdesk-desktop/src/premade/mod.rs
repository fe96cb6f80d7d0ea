//! Premade panel registry
//!
//! Premade panels are static content entries: an ID, a display name that
//! doubles as a menu path (`"Monsters/Goblin"`), and a file holding the
//! body. The registry only answers lookups; bodies come from a
//! [`PremadeLoader`].

mod loader;
mod menu;

pub use loader::{DirLoader, MemoryLoader, PremadeLoader};
pub use menu::{build_menu_tree, MenuNode};

use serde::{Deserialize, Serialize};

use crate::error::DesktopResult;
use crate::math::Size;
use crate::types::PremadeId;

/// Title used when a premade ID is not registered
pub const FALLBACK_PREMADE_NAME: &str = "Premade Panel";

/// Registry ID marking a menu separator rather than a panel
pub const SEPARATOR_ID: &str = "-";

/// A registered premade panel
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PremadeDef {
    pub id: PremadeId,
    #[serde(default)]
    pub name: String,
    /// Path of the body, relative to the loader's root
    #[serde(default)]
    pub file: String,
    /// "Read more" link
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default)]
    pub height: Option<f32>,
    /// Directory segments the file was found under
    #[serde(default)]
    pub folders: Vec<String>,
}

impl PremadeDef {
    /// Create a definition with no source, size or folders
    pub fn new(id: &str, name: &str, file: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            file: file.to_string(),
            source: None,
            width: None,
            height: None,
            folders: Vec::new(),
        }
    }

    /// Whether this entry is a menu separator
    pub fn is_separator(&self) -> bool {
        self.id == SEPARATOR_ID
    }

    /// Panel size, each dimension falling back to `default`
    pub fn size_or(&self, default: Size) -> Size {
        Size::new(
            self.width.unwrap_or(default.width),
            self.height.unwrap_or(default.height),
        )
    }
}

/// Lookup of premade definitions by ID
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PremadeRegistry {
    defs: Vec<PremadeDef>,
}

impl PremadeRegistry {
    /// Create a registry; order is kept for the menu
    pub fn new(defs: Vec<PremadeDef>) -> Self {
        Self { defs }
    }

    /// Parse a JSON array of definitions
    pub fn from_json(json: &str) -> DesktopResult<Self> {
        let defs: Vec<PremadeDef> = serde_json::from_str(json)?;
        Ok(Self::new(defs))
    }

    /// Definition by ID. Separators are never returned.
    pub fn get(&self, id: &str) -> Option<&PremadeDef> {
        self.defs.iter().find(|d| d.id == id && !d.is_separator())
    }

    /// Display name, or [`FALLBACK_PREMADE_NAME`] for unknown IDs
    pub fn name(&self, id: &str) -> &str {
        self.get(id).map_or(FALLBACK_PREMADE_NAME, |d| d.name.as_str())
    }

    /// All definitions, separators included
    pub fn defs(&self) -> &[PremadeDef] {
        &self.defs
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Nested submenu for picking a premade
    pub fn menu_tree(&self) -> Vec<MenuNode> {
        build_menu_tree(&self.defs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REGISTRY_JSON: &str = r#"[
        { "id": "goblin", "name": "Monsters/Goblin", "file": "panels/monsters/goblin.html",
          "source": "https://example.com/goblin", "width": 400, "height": null,
          "folders": ["monsters"] },
        { "id": "-", "name": "" },
        { "id": "rules", "name": "Rules", "file": "panels/rules.html" }
    ]"#;

    #[test]
    fn test_from_json() {
        let registry = PremadeRegistry::from_json(REGISTRY_JSON).unwrap();
        assert_eq!(registry.len(), 3);

        let goblin = registry.get("goblin").unwrap();
        assert_eq!(goblin.width, Some(400.0));
        assert_eq!(goblin.height, None);
        assert_eq!(goblin.folders, vec!["monsters".to_string()]);
        assert_eq!(goblin.size_or(Size::new(320.0, 200.0)), Size::new(400.0, 200.0));
    }

    #[test]
    fn test_name_fallback() {
        let registry = PremadeRegistry::from_json(REGISTRY_JSON).unwrap();
        assert_eq!(registry.name("rules"), "Rules");
        assert_eq!(registry.name("dragon"), "Premade Panel");
        assert_eq!(registry.name("-"), "Premade Panel");
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(PremadeRegistry::from_json("{ not json").is_err());
    }
}
