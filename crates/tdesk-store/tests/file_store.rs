//! File Store Integration Tests
//!
//! Exercises `FileStore` against a real temporary directory.

use tdesk_store::{FileStore, StateStore, StoreError};
use tempfile::{tempdir, TempDir};

fn open_scratch() -> (TempDir, FileStore) {
    let dir = tempdir().expect("tempdir");
    let store = FileStore::open(dir.path()).expect("open store");
    (dir, store)
}

#[test]
fn test_missing_key_reads_none() {
    let (_dir, store) = open_scratch();
    assert_eq!(store.get("webDesktopStateV1").unwrap(), None);
}

#[test]
fn test_write_then_read_back() {
    let (dir, store) = open_scratch();

    let snapshot = serde_json::json!({ "tabs": [], "activeTabId": "tab-1" }).to_string();
    store.set("webDesktopStateV1", &snapshot).unwrap();

    // A second handle on the same directory sees the value
    let reopened = FileStore::open(dir.path()).unwrap();
    assert_eq!(
        reopened.get("webDesktopStateV1").unwrap().as_deref(),
        Some(snapshot.as_str())
    );
    assert!(dir.path().join("webDesktopStateV1.json").exists());
    assert!(!dir.path().join("webDesktopStateV1.json.tmp").exists());
}

#[test]
fn test_overwrite_replaces_whole_value() {
    let (_dir, store) = open_scratch();
    store.set("state", "a much longer first value").unwrap();
    store.set("state", "short").unwrap();
    assert_eq!(store.get("state").unwrap().as_deref(), Some("short"));
}

#[test]
fn test_remove_is_idempotent() {
    let (_dir, store) = open_scratch();
    store.set("state", "x").unwrap();
    store.remove("state").unwrap();
    store.remove("state").unwrap();
    assert_eq!(store.get("state").unwrap(), None);
}

#[test]
fn test_keys_cannot_escape_root() {
    let (_dir, store) = open_scratch();
    assert!(matches!(
        store.set("../outside", "x"),
        Err(StoreError::InvalidKey(_))
    ));
    assert!(matches!(store.get("a/b"), Err(StoreError::InvalidKey(_))));
}
