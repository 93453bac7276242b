//! Integration tests for the file-backed preference store.

use mnemo_core::{LocalSetting, LocalSettingPatch};
use mnemo_session::{JsonFilePrefs, PreferenceStore, SessionError};

fn prefs_in(dir: &tempfile::TempDir) -> JsonFilePrefs {
    JsonFilePrefs::new(dir.path().join("prefs.json"))
}

#[test]
fn missing_file_reads_as_nothing_stored() {
    let dir = tempfile::tempdir().unwrap();
    let prefs = prefs_in(&dir);
    assert!(prefs.local_setting().unwrap().is_none());
}

#[test]
fn write_then_read_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let prefs = prefs_in(&dir);

    let setting = LocalSetting {
        daily_review_time_offset: 7,
        enable_double_click_editing: false,
        ..LocalSetting::default()
    };
    prefs.set_local_setting(&setting).unwrap();

    let stored = prefs.local_setting().unwrap().unwrap();
    assert_eq!(stored.daily_review_time_offset, Some(7));
    assert_eq!(stored.enable_double_click_editing, Some(false));
    assert_eq!(stored.enable_auto_collapse, Some(true));
}

#[test]
fn writes_survive_reopening_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");

    let setting = LocalSetting {
        enable_auto_collapse: false,
        ..LocalSetting::default()
    };
    JsonFilePrefs::new(&path).set_local_setting(&setting).unwrap();

    let reopened = JsonFilePrefs::new(&path);
    let stored = reopened.local_setting().unwrap().unwrap();
    assert_eq!(stored.enable_auto_collapse, Some(false));
}

#[test]
fn partial_document_reads_as_partial_patch() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");
    std::fs::write(
        &path,
        r#"{ "localSetting": { "dailyReviewTimeOffset": 21 } }"#,
    )
    .unwrap();

    let stored = JsonFilePrefs::new(&path).local_setting().unwrap().unwrap();
    assert_eq!(
        stored,
        LocalSettingPatch {
            daily_review_time_offset: Some(21),
            ..LocalSettingPatch::default()
        }
    );
}

#[test]
fn malformed_file_is_a_storage_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");
    std::fs::write(&path, "{ not json").unwrap();

    match JsonFilePrefs::new(&path).local_setting().unwrap_err() {
        SessionError::Storage(msg) => assert!(msg.contains("prefs.json")),
        e => panic!("Expected Storage error, got: {:?}", e),
    }
}
