//! Change log file I/O

use crate::errors::{io_error, Result};
use crate::output::atomic::atomic_write;
use oleshki_core::changelog::ChangeLog;
use std::fs;
use std::path::Path;

/// Write `log` to `path` as pretty JSON, atomically
///
/// Returns the SHA-256 digest of the written bytes.
///
/// # Errors
///
/// - `Serialization`: the log cannot be encoded
/// - `Io`: the file cannot be written
pub fn write_change_log(path: &Path, log: &ChangeLog) -> Result<String> {
    let bytes = log.to_json_bytes()?;
    atomic_write(path, &bytes)?;
    let digest = log.digest()?;
    tracing::debug!(path = %path.display(), entries = log.len(), digest = %digest, "change log written");
    Ok(digest)
}

/// Read a change log previously written by [`write_change_log`]
///
/// # Errors
///
/// - `Io`: the file cannot be read
/// - `Serialization`: the content is not a change log
pub fn read_change_log(path: &Path) -> Result<ChangeLog> {
    let bytes = fs::read(path).map_err(|e| {
        let message = format!("cannot read {}: {}", path.display(), e);
        io_error("read_change_log", e).with_message(message)
    })?;
    ChangeLog::from_json_slice(&bytes)
}
