//! Error handling for oleshki-store
//!
//! Wraps oleshki-core ExError with store-specific helpers

use oleshki_core::errors::{ExError, ExErrorKind};
use std::path::Path;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Create a snapshot read error naming the file
pub fn snapshot_read_error(path: &Path, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::SnapshotRead)
        .with_op("read_snapshot")
        .with_snapshot(path.display().to_string())
        .with_message(format!("cannot read snapshot: {}", err))
}

/// Create an error for a snapshot directory that does not exist
pub fn snapshot_dir_missing(path: &Path) -> ExError {
    ExError::new(ExErrorKind::NotFound)
        .with_op("open_snapshot_store")
        .with_message(format!("{} is not a directory", path.display()))
}
