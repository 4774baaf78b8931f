//! Snapshot source backed by a directory of JSON files.
//!
//! The scheduled exporter writes one file per snapshot, named with its
//! timestamp, so lexical file order is chronological order. The store only
//! lists files on open; each file is read and parsed when the iterator
//! reaches it.

mod fs_store;

pub use fs_store::{read_snapshot, FsSnapshotStore, SnapshotFilter, SnapshotIter};
