//! Oleshki Store - filesystem side of the change tracking pipeline
//!
//! Provides:
//! - A directory of timestamped snapshot files read lazily in order
//! - Atomic temp→rename writes of the change log

pub mod errors;
pub mod output;
pub mod snapshot;

// Re-export key types
pub use errors::Result;
pub use output::{read_change_log, write_change_log};
pub use snapshot::{read_snapshot, FsSnapshotStore, SnapshotFilter};
