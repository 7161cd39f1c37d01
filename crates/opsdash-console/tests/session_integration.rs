//! End-to-end session tests against real file storage.

use std::path::PathBuf;

use opsdash_console::application::config_store::{ConfigStore, KeyValueStorage, STORAGE_KEY};
use opsdash_console::application::session::{DashboardSession, SessionError};
use opsdash_console::infrastructure::storage::{FileStorage, MemoryStorage};
use opsdash_core::{ColumnPreset, DashboardConfig, PanelId};

fn temp_dir() -> PathBuf {
    std::env::temp_dir().join(format!("opsdash_it_{}", uuid::Uuid::new_v4()))
}

fn open(dir: &PathBuf) -> DashboardSession<FileStorage> {
    DashboardSession::open(ConfigStore::new(FileStorage::new(dir)))
}

#[test]
fn test_committed_edit_survives_reopen() {
    // Arrange
    let dir = temp_dir();
    let mut session = open(&dir);
    let draft = session.begin_edit();
    draft.name = "Night Shift".to_string();
    draft.refresh_interval = "90".to_string();
    draft.set_panel(PanelId::LeftBottom, "https://cam.example/live");
    session.apply_preset(ColumnPreset::Weather).unwrap();
    let committed = session.commit_edit().unwrap().clone();

    // Act
    let reopened = open(&dir);

    // Assert
    assert_eq!(reopened.current(), &committed);
    assert_eq!(committed.columns_pct, [28.0, 50.0, 22.0]);
    assert_eq!(committed.refresh_interval_sec, 90.0);

    // Cleanup
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_corrupted_document_opens_with_defaults() {
    // Arrange
    let dir = temp_dir();
    let mut storage = FileStorage::new(&dir);
    storage.set_item(STORAGE_KEY, "{ this is not json").unwrap();

    // Act
    let session = open(&dir);

    // Assert
    assert_eq!(session.current(), &DashboardConfig::default());

    // Cleanup
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_stored_partial_document_is_merged_over_defaults() {
    // Arrange
    let dir = temp_dir();
    let mut storage = FileStorage::new(&dir);
    storage
        .set_item(STORAGE_KEY, r#"{"name": "Legacy", "columnsPct": [50, 50]}"#)
        .unwrap();

    // Act
    let session = open(&dir);

    // Assert
    let mut expected = DashboardConfig::default();
    expected.name = "Legacy".to_string();
    assert_eq!(session.current(), &expected);

    // Cleanup
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_import_persists_and_export_reproduces_it() {
    // Arrange
    let dir = temp_dir();
    let mut session = open(&dir);

    // Act
    session.import(r#"{"refreshIntervalSec": 45}"#).unwrap();
    let exported = session.export().unwrap();
    let reopened = open(&dir);

    // Assert
    assert_eq!(reopened.current().refresh_interval_sec, 45.0);
    assert!(exported.contains("\"refreshIntervalSec\": 45"));
    let mut other = DashboardSession::open(ConfigStore::new(MemoryStorage::new()));
    assert_eq!(other.import(&exported).unwrap(), reopened.current());

    // Cleanup
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_quota_failure_is_reported_and_nothing_changes() {
    // Arrange
    let mut session = DashboardSession::open(ConfigStore::new(MemoryStorage::with_quota(64)));

    // Act
    let result = session.import(r#"{"name": "Does not fit"}"#);

    // Assert
    assert!(matches!(result, Err(SessionError::Store(_))));
    assert_eq!(session.current(), &DashboardConfig::default());
    assert_eq!(session.store().storage().get_item(STORAGE_KEY).unwrap(), None);
}
