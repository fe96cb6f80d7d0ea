//! Dice panel operations

use tracing::{debug, warn};

use crate::engine::DesktopEngine;
use crate::error::DesktopResult;
use crate::panel::{build_notation, DiceRoller, DieKind, Panel};

impl DesktopEngine {
    /// Set how many dice of `kind` a dice panel rolls
    pub fn set_die_count(&mut self, panel_id: &str, kind: DieKind, count: u32) -> bool {
        let Some(body) = self.state.find_panel_mut(panel_id).and_then(Panel::as_dice_mut) else {
            return false;
        };
        body.dice_counts.set(kind, count);
        self.commit();
        true
    }

    /// Change a die count by `delta`, never going below zero. Returns the new
    /// count.
    pub fn adjust_die_count(&mut self, panel_id: &str, kind: DieKind, delta: i64) -> Option<u32> {
        let body = self.state.find_panel_mut(panel_id).and_then(Panel::as_dice_mut)?;
        let count = body.dice_counts.adjust(kind, delta);
        self.commit();
        Some(count)
    }

    /// Notation for a dice panel's current counts
    pub fn dice_notation(&self, panel_id: &str) -> Option<String> {
        let body = self.state.find_panel(panel_id)?.panel.as_dice()?;
        Some(build_notation(&body.dice_counts))
    }

    /// Roll a dice panel's dice.
    ///
    /// The roller is initialized on first use. Returns `Ok(false)` without
    /// touching the roller when no dice are selected or the panel is not a
    /// dice panel.
    pub fn roll_dice(&mut self, panel_id: &str, roller: &mut dyn DiceRoller) -> DesktopResult<bool> {
        let notation = match self.dice_notation(panel_id) {
            Some(n) if !n.is_empty() => n,
            _ => return Ok(false),
        };
        self.ensure_roller(roller)?;
        roller.clear()?;
        roller.roll(&notation).inspect_err(|e| {
            warn!(panel_id, notation = %notation, error = %e, "dice roll failed");
        })?;
        debug!(panel_id, notation = %notation, "rolled dice");
        Ok(true)
    }

    /// Remove all dice from the roller's surface
    pub fn clear_dice(&mut self, roller: &mut dyn DiceRoller) -> DesktopResult<()> {
        self.ensure_roller(roller)?;
        roller.clear()
    }

    fn ensure_roller(&mut self, roller: &mut dyn DiceRoller) -> DesktopResult<()> {
        if !self.dice_ready {
            roller.init()?;
            self.dice_ready = true;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DesktopError;
    use crate::premade::PremadeRegistry;
    use tdesk_store::MemoryStore;

    #[derive(Default)]
    struct RecordingRoller {
        calls: Vec<String>,
        fail_init: bool,
    }

    impl DiceRoller for RecordingRoller {
        fn init(&mut self) -> DesktopResult<()> {
            self.calls.push("init".into());
            if self.fail_init {
                return Err(DesktopError::FetchFailed("renderer unavailable".into()));
            }
            Ok(())
        }

        fn roll(&mut self, notation: &str) -> DesktopResult<()> {
            self.calls.push(format!("roll {}", notation));
            Ok(())
        }

        fn clear(&mut self) -> DesktopResult<()> {
            self.calls.push("clear".into());
            Ok(())
        }
    }

    fn engine() -> (DesktopEngine, String) {
        let e = DesktopEngine::with_store(Box::new(MemoryStore::new()), PremadeRegistry::default());
        let dice = e.active_tab().unwrap().panels[0].id.clone();
        (e, dice)
    }

    #[test]
    fn test_counts_and_notation() {
        let (mut e, dice) = engine();
        assert!(e.set_die_count(&dice, DieKind::D6, 3));
        assert_eq!(e.adjust_die_count(&dice, DieKind::D20, 1), Some(1));
        assert_eq!(e.adjust_die_count(&dice, DieKind::D4, -5), Some(0));
        assert_eq!(e.dice_notation(&dice).as_deref(), Some("3d6 + 1d20"));
    }

    #[test]
    fn test_counts_ignore_other_panels() {
        let (mut e, _) = engine();
        assert!(!e.set_die_count("missing", DieKind::D6, 1));
        assert_eq!(e.adjust_die_count("missing", DieKind::D6, 1), None);
    }

    #[test]
    fn test_roll_initializes_once() {
        let (mut e, dice) = engine();
        let mut roller = RecordingRoller::default();
        e.set_die_count(&dice, DieKind::D8, 2);

        assert_eq!(e.roll_dice(&dice, &mut roller), Ok(true));
        assert_eq!(e.roll_dice(&dice, &mut roller), Ok(true));
        assert_eq!(
            roller.calls,
            vec!["init", "clear", "roll 2d8", "clear", "roll 2d8"]
        );
    }

    #[test]
    fn test_roll_with_no_dice_is_skipped() {
        let (mut e, dice) = engine();
        let mut roller = RecordingRoller::default();
        assert_eq!(e.roll_dice(&dice, &mut roller), Ok(false));
        assert!(roller.calls.is_empty());
    }

    #[test]
    fn test_failed_init_is_retried() {
        let (mut e, dice) = engine();
        e.set_die_count(&dice, DieKind::D6, 1);
        let mut roller = RecordingRoller {
            fail_init: true,
            ..Default::default()
        };
        assert!(e.roll_dice(&dice, &mut roller).is_err());
        roller.fail_init = false;
        assert_eq!(e.roll_dice(&dice, &mut roller), Ok(true));
        assert_eq!(roller.calls, vec!["init", "init", "clear", "roll 1d6"]);
    }

    #[test]
    fn test_clear_dice() {
        let (mut e, _) = engine();
        let mut roller = RecordingRoller::default();
        e.clear_dice(&mut roller).unwrap();
        assert_eq!(roller.calls, vec!["init", "clear"]);
    }
}
