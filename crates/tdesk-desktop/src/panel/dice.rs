//! Dice panel model and roll notation

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::DesktopResult;

/// A die type offered by the dice panel
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DieKind {
    D4,
    D6,
    D8,
    D10,
    D12,
    D20,
    D100,
}

impl DieKind {
    /// All die types in display order
    pub fn all() -> &'static [DieKind] {
        &[
            Self::D4,
            Self::D6,
            Self::D8,
            Self::D10,
            Self::D12,
            Self::D20,
            Self::D100,
        ]
    }

    /// Parse from string ID ("d4" … "d100")
    pub fn from_id(id: &str) -> Option<Self> {
        Self::all().iter().copied().find(|k| k.id() == id)
    }

    /// Get the string ID
    pub fn id(&self) -> &'static str {
        match self {
            Self::D4 => "d4",
            Self::D6 => "d6",
            Self::D8 => "d8",
            Self::D10 => "d10",
            Self::D12 => "d12",
            Self::D20 => "d20",
            Self::D100 => "d100",
        }
    }

    /// Number of faces
    pub fn sides(&self) -> u32 {
        match self {
            Self::D4 => 4,
            Self::D6 => 6,
            Self::D8 => 8,
            Self::D10 => 10,
            Self::D12 => 12,
            Self::D20 => 20,
            Self::D100 => 100,
        }
    }
}

/// Per-die counts of a dice panel.
///
/// Always holds an entry for every [`DieKind`]. Persisted as a
/// `{"d4": n, …}` object; unknown keys are dropped and invalid or negative
/// counts read as zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiceCounts(BTreeMap<DieKind, u32>);

impl Default for DiceCounts {
    fn default() -> Self {
        Self(DieKind::all().iter().map(|k| (*k, 0)).collect())
    }
}

impl DiceCounts {
    /// Count for a die type
    pub fn get(&self, kind: DieKind) -> u32 {
        self.0.get(&kind).copied().unwrap_or(0)
    }

    /// Set the count for a die type
    pub fn set(&mut self, kind: DieKind, count: u32) {
        self.0.insert(kind, count);
    }

    /// Add `delta` to a count, flooring at zero. Returns the new count.
    pub fn adjust(&mut self, kind: DieKind, delta: i64) -> u32 {
        let next = i64::from(self.get(kind))
            .saturating_add(delta)
            .clamp(0, i64::from(u32::MAX)) as u32;
        self.set(kind, next);
        next
    }

    /// Reset every count to zero
    pub fn reset(&mut self) {
        for count in self.0.values_mut() {
            *count = 0;
        }
    }

    /// Whether every count is zero
    pub fn is_empty(&self) -> bool {
        self.0.values().all(|c| *c == 0)
    }

    /// Iterate `(kind, count)` in die order
    pub fn iter(&self) -> impl Iterator<Item = (DieKind, u32)> + '_ {
        self.0.iter().map(|(k, c)| (*k, *c))
    }
}

impl Serialize for DiceCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let map: BTreeMap<&str, u32> = self.iter().map(|(k, c)| (k.id(), c)).collect();
        map.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DiceCounts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<BTreeMap<String, Value>>::deserialize(deserializer)?;
        let mut counts = DiceCounts::default();
        for (key, value) in raw.unwrap_or_default() {
            let Some(kind) = DieKind::from_id(&key) else {
                continue;
            };
            let count = value
                .as_f64()
                .filter(|n| n.is_finite() && *n > 0.0)
                .map(|n| n.floor().min(f64::from(u32::MAX)) as u32)
                .unwrap_or(0);
            counts.set(kind, count);
        }
        Ok(counts)
    }
}

/// Build a roll notation such as `"3d6 + 1d20"`, skipping zero counts.
///
/// Returns an empty string when no dice are selected.
pub fn build_notation(counts: &DiceCounts) -> String {
    counts
        .iter()
        .filter(|(_, count)| *count > 0)
        .map(|(kind, count)| format!("{}d{}", count, kind.sides()))
        .collect::<Vec<_>>()
        .join(" + ")
}

/// Body of a dice panel
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiceBody {
    #[serde(default)]
    pub dice_counts: DiceCounts,
}

/// The dice renderer collaborator.
///
/// Implementations own the physics and drawing; the desktop only hands them
/// a notation string.
pub trait DiceRoller {
    /// Prepare the renderer
    fn init(&mut self) -> DesktopResult<()>;

    /// Roll the dice described by `notation`
    fn roll(&mut self, notation: &str) -> DesktopResult<()>;

    /// Remove all dice from the surface
    fn clear(&mut self) -> DesktopResult<()>;
}
