//! Tests for persisted picker settings
//!
//! Covers the values kept between runs: the chosen base folder, the
//! breadcrumb state and the one-shot folder-chooser explanation. A base
//! folder that disappeared (card removed, folder deleted) must be forgotten
//! together with the trail that pointed into it.

use filepick::settings::{SettingsDb, SettingsStore, KEY_BASE_PATH};
use filepick::storage::StdStorage;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_values_survive_reopen() {
    let tmp = TempDir::new().unwrap();
    let db_path = tmp.path().join("settings.db");
    let base = tmp.path().join("base");

    {
        let db = SettingsDb::open(&db_path).unwrap();
        db.set_base_path(&base).unwrap();
        db.set_last_folder_uri("file:///tmp/base").unwrap();
    }

    let db = SettingsDb::open(&db_path).unwrap();
    assert_eq!(db.base_path().unwrap(), Some(base));
    assert_eq!(db.last_folder_uri().unwrap().as_deref(), Some("file:///tmp/base"));
}

#[test]
fn test_set_overwrites_previous_value() {
    let db = SettingsDb::new_in_memory().unwrap();

    db.set(KEY_BASE_PATH, "/one").unwrap();
    db.set(KEY_BASE_PATH, "/two").unwrap();

    assert_eq!(db.get(KEY_BASE_PATH).unwrap().as_deref(), Some("/two"));
}

#[test]
fn test_rationale_shown_exactly_once() {
    let db = SettingsDb::new_in_memory().unwrap();

    assert!(db.show_rationale_once().unwrap());
    assert!(db.take_rationale_flag().unwrap());
    assert!(!db.take_rationale_flag().unwrap());
    assert!(!db.show_rationale_once().unwrap());
}

#[test]
fn test_breadcrumb_state_set_and_cleared() {
    let db = SettingsDb::new_in_memory().unwrap();

    db.set_breadcrumb_state(Some("{\"segments\":[]}")).unwrap();
    assert!(db.breadcrumb_state().unwrap().is_some());

    db.set_breadcrumb_state(None).unwrap();
    assert_eq!(db.breadcrumb_state().unwrap(), None);
}

#[test]
fn test_existing_base_dir_restored() {
    let tmp = TempDir::new().unwrap();
    let db = SettingsDb::new_in_memory().unwrap();
    db.set_base_path(tmp.path()).unwrap();
    db.set_breadcrumb_state(Some("{}")).unwrap();

    let restored = db.restore_base_dir(&StdStorage).unwrap();

    assert_eq!(restored.as_deref(), Some(tmp.path()));
    assert!(db.breadcrumb_state().unwrap().is_some());
}

#[test]
fn test_lost_base_dir_is_forgotten() {
    let tmp = TempDir::new().unwrap();
    let base = tmp.path().join("card");
    fs::create_dir(&base).unwrap();

    let db = SettingsDb::new_in_memory().unwrap();
    db.set_base_path(&base).unwrap();
    db.set_breadcrumb_state(Some("{}")).unwrap();
    fs::remove_dir(&base).unwrap();

    assert_eq!(db.restore_base_dir(&StdStorage).unwrap(), None);
    assert_eq!(db.base_path().unwrap(), None);
    assert_eq!(db.breadcrumb_state().unwrap(), None);
}

#[test]
fn test_no_base_dir_stored() {
    let db = SettingsDb::new_in_memory().unwrap();

    assert_eq!(db.restore_base_dir(&StdStorage).unwrap(), None);
}
