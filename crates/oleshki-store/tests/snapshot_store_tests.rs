// Integration tests for the filesystem snapshot store

use oleshki_core::errors::ExErrorKind;
use oleshki_store::{read_snapshot, FsSnapshotStore, SnapshotFilter};
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_snapshot(dir: &Path, name: &str, timestamp: &str, status: &str) {
    let doc = json!({
        "timestamp": timestamp,
        "records": [
            { "id": "R1", "fields": { "status": status, "coords": [46.61, 32.71] } }
        ]
    });
    fs::write(dir.join(name), serde_json::to_vec(&doc).unwrap()).unwrap();
}

#[test]
fn test_store_yields_snapshots_in_file_name_order() {
    // Given: three snapshot files written out of order
    let dir = TempDir::new().unwrap();
    write_snapshot(dir.path(), "2026-10-01T10-00.json", "2026-10-01T10:00:00Z", "C");
    write_snapshot(dir.path(), "2026-10-01T08-00.json", "2026-10-01T08:00:00Z", "A");
    write_snapshot(dir.path(), "2026-10-01T09-00.json", "2026-10-01T09:00:00Z", "B");

    // When: the store is iterated
    let store = FsSnapshotStore::open(dir.path()).unwrap();
    let statuses: Vec<String> = store
        .iter()
        .map(|s| s.unwrap().records[0].fields["status"].as_str().unwrap().to_string())
        .collect();

    // Then: the order follows file names
    assert_eq!(statuses, vec!["A", "B", "C"]);
}

#[test]
fn test_empty_directory_yields_nothing() {
    let dir = TempDir::new().unwrap();
    let store = FsSnapshotStore::open(dir.path()).unwrap();
    assert!(store.is_empty());
    assert_eq!(store.iter().count(), 0);
}

#[test]
fn test_unreadable_snapshot_stops_with_named_error() {
    // Given: a valid snapshot followed by one with a bad timestamp
    let dir = TempDir::new().unwrap();
    write_snapshot(dir.path(), "1.json", "2026-10-01T08:00:00Z", "A");
    fs::write(dir.path().join("2.json"), r#"{"timestamp": "yesterday", "records": []}"#).unwrap();

    let store = FsSnapshotStore::open(dir.path()).unwrap();
    let mut iter = store.iter();

    // Then: the first parses and the second reports its own path
    assert!(iter.next().unwrap().is_ok());
    let err = iter.next().unwrap().unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::SnapshotParse);
    assert!(err.snapshot().unwrap().ends_with("2.json"));
    assert!(err.to_string().contains("2.json"));
}

#[test]
fn test_missing_timestamp_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("a.json");
    fs::write(&path, r#"{"records": []}"#).unwrap();

    let err = read_snapshot(&path).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::SnapshotParse);
}

#[test]
fn test_missing_file_is_read_error() {
    let dir = TempDir::new().unwrap();
    let err = read_snapshot(&dir.path().join("gone.json")).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::SnapshotRead);
    assert!(err.snapshot().unwrap().ends_with("gone.json"));
}

#[test]
fn test_lookback_filter_keeps_recent_snapshots() {
    let dir = TempDir::new().unwrap();
    write_snapshot(dir.path(), "1.json", "2026-09-28T08:00:00Z", "A");
    write_snapshot(dir.path(), "2.json", "2026-10-01T08:00:00Z", "B");
    write_snapshot(dir.path(), "3.json", "2026-10-01T09:00:00Z", "C");

    let store = FsSnapshotStore::open(dir.path())
        .unwrap()
        .with_filter(SnapshotFilter::since("2026-09-30T00:00:00Z".parse().unwrap()));

    let kept = store.iter().filter(|s| s.is_ok()).count();
    assert_eq!(kept, 2);
    // Filtering never hides files from the listing
    assert_eq!(store.len(), 3);
}

#[test]
fn test_corrupt_file_outside_lookback_still_fails() {
    // The window is only known after parsing, so an old broken file is not skipped
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("0.json"), "{ truncated").unwrap();
    write_snapshot(dir.path(), "1.json", "2026-10-01T08:00:00Z", "A");

    let store = FsSnapshotStore::open(dir.path())
        .unwrap()
        .with_filter(SnapshotFilter::since("2026-09-30T00:00:00Z".parse().unwrap()));

    let err = store.iter().next().unwrap().unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::SnapshotParse);
    assert!(err.snapshot().unwrap().ends_with("0.json"));
}
