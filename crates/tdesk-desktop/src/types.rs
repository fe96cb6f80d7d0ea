//! Core type definitions for the desktop
//!
//! Identifiers are plain strings because they round-trip through the
//! persisted JSON blob and through imported files written by other builds.

use serde::{Deserialize, Deserializer};
use uuid::Uuid;

/// Unique tab identifier (`tab-…`)
pub type TabId = String;

/// Unique top-level panel identifier (`panel-…`), unique within its tab
pub type PanelId = String;

/// Layout child identifier (`layout-child-…`), unique within its layout panel
pub type ChildId = String;

/// Premade registry entry identifier
pub type PremadeId = String;

/// Identifier of a pending premade content fetch
pub type RequestId = u64;

/// Number of random hex characters appended to an ID prefix.
const ID_SUFFIX_LEN: usize = 9;

/// Generate a fresh `<prefix>-<suffix>` identifier.
pub fn generate_id(prefix: &str) -> String {
    let raw = Uuid::new_v4().simple().to_string();
    format!("{}-{}", prefix, &raw[..ID_SUFFIX_LEN])
}

/// Generate an identifier for which `taken` returns false.
pub fn unique_id(prefix: &str, mut taken: impl FnMut(&str) -> bool) -> String {
    loop {
        let id = generate_id(prefix);
        if !taken(&id) {
            return id;
        }
    }
}

/// Deserialize a string field that older snapshots may store as `null`.
pub(crate) fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Whether a string contains anything other than whitespace.
pub(crate) fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_shape() {
        let id = generate_id("panel");
        assert!(id.starts_with("panel-"));
        assert_eq!(id.len(), "panel-".len() + ID_SUFFIX_LEN);
        assert!(id["panel-".len()..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_unique_id_skips_taken() {
        let mut calls = 0;
        let id = unique_id("tab", |_| {
            calls += 1;
            calls < 3
        });
        assert!(id.starts_with("tab-"));
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("  \n\t"));
        assert!(!is_blank(" x "));
    }
}
