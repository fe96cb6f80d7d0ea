//! Layout children: the content slots nested inside a layout panel

use serde::{Deserialize, Serialize};

use crate::types::{is_blank, string_or_null, ChildId, PremadeId};

/// Instructional content seeded into a layout child by "Add Custom".
pub const CHILD_CUSTOM_PLACEHOLDER: &str =
    "<em>Click the ✎ in the top right corner to edit this panel.</em>";

/// Content type of a layout child
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChildKind {
    /// User-authored markup in `customContent`
    Custom,
    /// Embedded external page at `externalUrl`
    External,
    /// Registry content resolved into `content`
    Premade,
    /// Nothing chosen yet
    #[default]
    Empty,
}

/// A nested content slot inside a layout panel.
///
/// Existence of a `LayoutChild` does not make its slot visually occupied;
/// see [`LayoutChild::is_occupying`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutChild {
    pub id: ChildId,
    #[serde(default, deserialize_with = "string_or_null")]
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: ChildKind,
    /// Resolved premade body, or uploaded text
    #[serde(default, deserialize_with = "string_or_null")]
    pub content: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub custom_content: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub external_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premade_id: Option<PremadeId>,
    /// Content generation; a premade fetch only lands if this still matches
    #[serde(skip)]
    pub(crate) generation: u64,
}

impl LayoutChild {
    /// Create the blank custom child that lazily fills an empty slot.
    pub fn new_blank(id: ChildId, index: usize) -> Self {
        Self {
            id,
            title: format!("Area {}", index + 1),
            kind: ChildKind::Custom,
            content: String::new(),
            custom_content: String::new(),
            external_url: String::new(),
            premade_id: None,
            generation: 0,
        }
    }

    /// Whether the slot holding this child renders content instead of a "+".
    ///
    /// Occupancy is `kind ∈ {Custom, External}` or non-blank `content`. A
    /// custom child is occupying even with blank markup; a premade child is
    /// not until its body has arrived.
    pub fn is_occupying(&self) -> bool {
        matches!(self.kind, ChildKind::Custom | ChildKind::External) || !is_blank(&self.content)
    }

    /// An untyped child with no content; such children offer no "Remove".
    pub fn is_empty(&self) -> bool {
        self.kind == ChildKind::Empty && is_blank(&self.content)
    }

    /// Current content generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Text written out by "download custom".
    pub fn custom_text(&self) -> &str {
        if self.custom_content.is_empty() {
            &self.content
        } else {
            &self.custom_content
        }
    }
}
