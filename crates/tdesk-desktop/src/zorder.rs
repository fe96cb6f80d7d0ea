//! Z-order bookkeeping
//!
//! One counter per engine hands out ever-increasing z-indices for "bring to
//! front". "Send to back" goes one below the lowest sibling; when that would
//! cross the configured floor the whole tab is renumbered compactly.

use crate::panel::Panel;

/// Monotonic z-index source
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZOrder {
    counter: i64,
}

impl Default for ZOrder {
    fn default() -> Self {
        Self { counter: 1 }
    }
}

impl ZOrder {
    /// Seed the counter above every z-index in `existing`.
    pub fn seeded(existing: impl IntoIterator<Item = i64>) -> Self {
        let counter = existing
            .into_iter()
            .fold(1, |acc, z| acc.max(z.saturating_add(1)));
        Self { counter }
    }

    /// Last value handed out (or the seed)
    pub fn current(&self) -> i64 {
        self.counter
    }

    /// Next front-most z-index
    pub fn next(&mut self) -> i64 {
        self.counter += 1;
        self.counter
    }

    /// Raise `panels[index]` above everything handed out so far.
    pub fn bring_to_front(&mut self, panels: &mut [Panel], index: usize) -> Option<i64> {
        let z = self.next();
        let panel = panels.get_mut(index)?;
        panel.z_index = z;
        Some(z)
    }

    /// Lower `panels[index]` below every sibling.
    ///
    /// The new z-index is the tab minimum minus one. If that falls below
    /// `floor`, the tab is renumbered `1..=n` with the target first and the
    /// others in their existing stacking order.
    pub fn send_to_back(&mut self, panels: &mut [Panel], index: usize, floor: i64) -> Option<i64> {
        if index >= panels.len() {
            return None;
        }
        let min = panels.iter().map(|p| p.z_index).min().unwrap_or(0);
        let z = min.saturating_sub(1);
        if z >= floor {
            panels[index].z_index = z;
            return Some(z);
        }

        let mut order: Vec<usize> = (0..panels.len()).filter(|i| *i != index).collect();
        order.sort_by_key(|i| panels[*i].z_index);
        panels[index].z_index = 1;
        for (rank, i) in order.into_iter().enumerate() {
            panels[i].z_index = rank as i64 + 2;
        }
        self.counter = self.counter.max(panels.len() as i64);
        Some(1)
    }
}
