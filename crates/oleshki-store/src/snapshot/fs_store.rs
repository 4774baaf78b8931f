//! Filesystem snapshot store

use crate::errors::{io_error, snapshot_dir_missing, snapshot_read_error, Result};
use chrono::{DateTime, Utc};
use oleshki_core::model::{parse_snapshot_bytes, Snapshot};
use std::fs;
use std::path::{Path, PathBuf};

const SNAPSHOT_EXTENSION: &str = "json";

/// Which snapshots an iteration yields
///
/// Filtering works on the timestamp declared inside each file, not on the
/// file name, so every listed file is still read and parsed. A file that
/// cannot be read or parsed aborts the iteration even when it would have
/// fallen outside the window; keep the directory to the files worth reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SnapshotFilter {
    /// Drop snapshots declared before this instant
    pub since: Option<DateTime<Utc>>,
}

impl SnapshotFilter {
    pub fn since(since: DateTime<Utc>) -> Self {
        Self { since: Some(since) }
    }

    fn accepts(&self, snapshot: &Snapshot) -> bool {
        self.since.map_or(true, |since| snapshot.timestamp >= since)
    }
}

/// Read and parse one snapshot file
///
/// # Errors
///
/// - `SnapshotRead`: the file cannot be read
/// - `SnapshotParse`: the content is not a valid snapshot
///
/// Both carry the file path.
pub fn read_snapshot(path: &Path) -> Result<Snapshot> {
    let bytes = fs::read(path).map_err(|e| snapshot_read_error(path, e))?;
    parse_snapshot_bytes(&bytes).map_err(|e| e.with_snapshot(path.display().to_string()))
}

/// Ordered list of snapshot files in one directory
#[derive(Debug, Clone)]
pub struct FsSnapshotStore {
    root: PathBuf,
    paths: Vec<PathBuf>,
    filter: SnapshotFilter,
}

impl FsSnapshotStore {
    /// List the `*.json` files of `dir`, sorted by file name
    ///
    /// # Errors
    ///
    /// - `NotFound`: `dir` is not a directory
    /// - `Io`: the directory cannot be listed
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let root = dir.into();
        if !root.is_dir() {
            return Err(snapshot_dir_missing(&root));
        }

        let mut paths = Vec::new();
        for entry in fs::read_dir(&root).map_err(|e| io_error("list_snapshots", e))? {
            let path = entry.map_err(|e| io_error("list_snapshots", e))?.path();
            let is_snapshot = path.is_file()
                && path.extension().and_then(|ext| ext.to_str()) == Some(SNAPSHOT_EXTENSION);
            if is_snapshot {
                paths.push(path);
            }
        }
        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        tracing::debug!(dir = %root.display(), snapshots = paths.len(), "opened snapshot store");

        Ok(Self {
            root,
            paths,
            filter: SnapshotFilter::default(),
        })
    }

    pub fn with_filter(mut self, filter: SnapshotFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Snapshot files in iteration order
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Lazily read the snapshots in file name order
    ///
    /// Files outside the filter are still read, since only the content
    /// declares the timestamp.
    pub fn iter(&self) -> SnapshotIter<'_> {
        SnapshotIter {
            paths: self.paths.iter(),
            filter: self.filter,
        }
    }
}

impl<'a> IntoIterator for &'a FsSnapshotStore {
    type Item = Result<Snapshot>;
    type IntoIter = SnapshotIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator returned by [`FsSnapshotStore::iter`]
#[derive(Debug)]
pub struct SnapshotIter<'a> {
    paths: std::slice::Iter<'a, PathBuf>,
    filter: SnapshotFilter,
}

impl Iterator for SnapshotIter<'_> {
    type Item = Result<Snapshot>;

    fn next(&mut self) -> Option<Self::Item> {
        for path in self.paths.by_ref() {
            let snapshot = match read_snapshot(path) {
                Ok(snapshot) => snapshot,
                Err(err) => return Some(Err(err)),
            };
            if self.filter.accepts(&snapshot) {
                tracing::trace!(snapshot = %path.display(), "read snapshot");
                return Some(Ok(snapshot));
            }
            tracing::trace!(snapshot = %path.display(), "snapshot outside lookback window");
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oleshki_core::errors::ExErrorKind;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_open_lists_only_json_sorted_by_name() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "2026-10-01T09.json", r#"{"timestamp":"2026-10-01T09:00:00Z"}"#);
        write(dir.path(), "2026-10-01T08.json", r#"{"timestamp":"2026-10-01T08:00:00Z"}"#);
        write(dir.path(), "notes.txt", "ignored");
        fs::create_dir(dir.path().join("nested.json")).unwrap();

        let store = FsSnapshotStore::open(dir.path()).unwrap();
        let names: Vec<_> = store
            .paths()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["2026-10-01T08.json", "2026-10-01T09.json"]);
    }

    #[test]
    fn test_open_missing_dir() {
        let dir = TempDir::new().unwrap();
        let err = FsSnapshotStore::open(dir.path().join("absent")).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::NotFound);
    }

    #[test]
    fn test_parse_error_names_file() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.json", "{ not json");

        let store = FsSnapshotStore::open(dir.path()).unwrap();
        let err = store.iter().next().unwrap().unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::SnapshotParse);
        assert!(err.snapshot().unwrap().ends_with("a.json"));
    }

    #[test]
    fn test_filter_drops_older_snapshots() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "1.json", r#"{"timestamp":"2026-10-01T08:00:00Z"}"#);
        write(dir.path(), "2.json", r#"{"timestamp":"2026-10-02T08:00:00Z"}"#);

        let since = "2026-10-02T00:00:00Z".parse().unwrap();
        let store = FsSnapshotStore::open(dir.path())
            .unwrap()
            .with_filter(SnapshotFilter::since(since));
        let snapshots: Vec<_> = store.iter().collect::<Result<_>>().unwrap();
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].timestamp, "2026-10-02T08:00:00Z".parse::<DateTime<Utc>>().unwrap());
    }
}
