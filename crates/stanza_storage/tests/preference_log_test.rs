//! Tests for the JSON-lines preference log.

use stanza_core::PreferenceRecord;
use stanza_error::StorageErrorKind;
use stanza_storage::{PREFERENCES_FILE_NAME, PreferenceLog};
use std::sync::Arc;

fn record(chosen: &str) -> PreferenceRecord {
    PreferenceRecord::new(
        "The sun sets slow".to_string(),
        vec!["a".to_string(), "b".to_string(), chosen.to_string()],
        chosen.to_string(),
    )
}

#[tokio::test]
async fn test_append_writes_one_line_per_record() {
    let dir = tempfile::tempdir().expect("Temp dir");
    let log = PreferenceLog::new(dir.path());

    log.append(&record("first")).await.expect("Appended");
    log.append(&record("second")).await.expect("Appended");

    assert_eq!(log.path(), dir.path().join(PREFERENCES_FILE_NAME));
    let text = std::fs::read_to_string(log.path()).expect("Log exists");
    assert_eq!(text.lines().count(), 2);
    assert!(text.ends_with('\n'));

    let records = log.records().await.expect("Parsed");
    assert_eq!(records, vec![record("first"), record("second")]);
}

#[tokio::test]
async fn test_creates_missing_data_dir() {
    let dir = tempfile::tempdir().expect("Temp dir");
    let log = PreferenceLog::new(dir.path().join("data"));

    log.append(&record("x")).await.expect("Appended");
    assert!(log.path().exists());
}

#[tokio::test]
async fn test_contents_before_any_record_is_not_found() {
    let dir = tempfile::tempdir().expect("Temp dir");
    let log = PreferenceLog::new(dir.path());

    let err = log.contents().await.expect_err("No file yet");
    assert!(matches!(err.kind(), StorageErrorKind::NotFound(_)));
}

#[tokio::test]
async fn test_concurrent_appends_do_not_interleave() {
    let dir = tempfile::tempdir().expect("Temp dir");
    let log = Arc::new(PreferenceLog::new(dir.path()));

    let mut handles = Vec::new();
    for i in 0..20 {
        let log = log.clone();
        handles.push(tokio::spawn(async move {
            log.append(&record(&format!("choice-{}", i))).await
        }));
    }
    for handle in handles {
        handle.await.expect("Task finished").expect("Appended");
    }

    let records = log.records().await.expect("Every line parses");
    assert_eq!(records.len(), 20);
}
