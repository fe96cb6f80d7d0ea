//! Tab and Z-Order Integration Tests
//!
//! Tests for tab lifecycle, panel lookup across tabs, and stacking order.

use tdesk_desktop::{
    DesktopConfig, DesktopEngine, DesktopError, MenuOutcome, NewPanel, PanelAction, PanelTarget,
    PremadeRegistry,
};
use tdesk_store::MemoryStore;

fn engine() -> DesktopEngine {
    DesktopEngine::with_store(Box::new(MemoryStore::new()), PremadeRegistry::default())
}

fn z_of(engine: &DesktopEngine, panel_id: &str) -> i64 {
    engine.find_panel(panel_id).unwrap().panel.z_index
}

fn siblings_z(engine: &DesktopEngine, panel_id: &str) -> Vec<i64> {
    let found = engine.find_panel(panel_id).unwrap();
    found
        .tab
        .panels
        .iter()
        .filter(|p| p.id != panel_id)
        .map(|p| p.z_index)
        .collect()
}

/// Test that sending the lowest panel to back keeps lowering it.
#[test]
fn test_send_to_back_twice_from_bottom() {
    let mut e = engine();
    let a = e.add_panel(NewPanel::Custom, None).unwrap();
    e.add_panel(NewPanel::Custom, None).unwrap();
    e.send_to_back(&a);

    let before = z_of(&e, &a);
    let first = e.send_to_back(&a).unwrap();
    let second = e.send_to_back(&a).unwrap();

    assert!(first < before);
    assert!(second < first);
    assert!(siblings_z(&e, &a).iter().all(|z| second < *z));
}

/// Test that bring to front outranks everything handed out so far.
#[test]
fn test_bring_to_front_via_menu() {
    let mut e = engine();
    let a = e.add_panel(NewPanel::Custom, None).unwrap();
    let b = e.add_panel(NewPanel::Custom, None).unwrap();

    let outcome = e.apply_panel_action(&PanelTarget::panel(&a), PanelAction::SendToFront);
    assert_eq!(outcome, MenuOutcome::Changed);
    assert!(z_of(&e, &a) > z_of(&e, &b));
    assert_eq!(e.z_counter(), z_of(&e, &a));
}

/// Test that send to back renumbers the tab once the floor is reached.
#[test]
fn test_send_to_back_renumbers_at_floor() {
    let config = DesktopConfig {
        z_floor: 0,
        ..DesktopConfig::default()
    };
    let mut e = DesktopEngine::new(Box::new(MemoryStore::new()), PremadeRegistry::default(), config);
    let a = e.add_panel(NewPanel::Custom, None).unwrap();
    let b = e.add_panel(NewPanel::Custom, None).unwrap();

    assert_eq!(e.send_to_back(&b), Some(0));
    assert_eq!(e.send_to_back(&a), Some(1));

    let mut all: Vec<i64> = e.active_tab().unwrap().panels.iter().map(|p| p.z_index).collect();
    all.sort_unstable();
    assert_eq!(all, vec![1, 2, 3]);
    assert_eq!(z_of(&e, &b), 2);
    assert!(siblings_z(&e, &a).iter().all(|z| *z > 1));

    let c = e.add_panel(NewPanel::Custom, None).unwrap();
    assert!(z_of(&e, &c) > 3);
}

/// Test that the last tab cannot be closed.
#[test]
fn test_closing_only_tab_is_rejected() {
    let mut e = engine();
    let result = e.close_tab("tab-1", |_| true);
    assert!(matches!(result, Err(DesktopError::InvalidOperation { .. })));
    assert_eq!(e.state().tabs.len(), 1);
    assert_eq!(e.active_tab_id(), "tab-1");
}

/// Test that closing the active tab hands activity to its predecessor.
#[test]
fn test_closing_active_tab_reassigns() {
    let mut e = engine();
    let second = e.add_tab();
    let third = e.add_tab();
    assert_eq!(e.active_tab_id(), third);

    assert_eq!(e.close_tab(&third, |_| true), Ok(true));
    assert_eq!(e.active_tab_id(), second);

    assert_eq!(e.close_tab("tab-1", |_| true), Ok(true));
    assert_eq!(e.active_tab_id(), second);
    assert!(e.close_tab(&second, |_| true).is_err());
}

/// Test that panels are found across tabs and new panels land on the
/// active tab.
#[test]
fn test_lookup_across_tabs() {
    let mut e = engine();
    let on_first = e.add_panel(NewPanel::Custom, None).unwrap();
    let second = e.add_tab();
    let on_second = e.add_panel(NewPanel::Custom, None).unwrap();

    assert_eq!(e.find_panel(&on_first).unwrap().tab.id, "tab-1");
    assert_eq!(e.find_panel(&on_second).unwrap().tab.id, second);
    assert!(e.find_panel("panel-missing").is_none());
    assert!(e.find_sub_panel(&on_first, "child").is_none());
}

/// Test that panels in a closed tab are gone.
#[test]
fn test_close_tab_drops_panels() {
    let mut e = engine();
    e.add_tab();
    let doomed = e.add_panel(NewPanel::Custom, None).unwrap();
    let tab = e.find_panel(&doomed).unwrap().tab.id.clone();

    let asked = std::cell::Cell::new(String::new());
    assert_eq!(
        e.close_tab(&tab, |t| {
            asked.set(t.title.clone());
            true
        }),
        Ok(true)
    );
    assert_eq!(asked.take(), "New Tab");
    assert!(e.find_panel(&doomed).is_none());
}

/// Test that a duplicated tab is independent of the original.
#[test]
fn test_duplicate_tab_is_independent() {
    let mut e = engine();
    let original = e.add_panel(NewPanel::Custom, None).unwrap();
    let copy_tab = e.duplicate_tab("tab-1").unwrap();
    let copy = e
        .state()
        .tab(&copy_tab)
        .unwrap()
        .panels
        .iter()
        .find(|p| p.title == "Custom Panel")
        .unwrap()
        .id
        .clone();

    e.set_custom_content(&PanelTarget::panel(&copy), "changed");
    let original_text = match &e.find_panel(&original).unwrap().panel.body {
        tdesk_desktop::PanelBody::Custom(body) => body.custom_content.clone(),
        other => panic!("unexpected body {:?}", other),
    };
    assert_ne!(original_text, "changed");
}
