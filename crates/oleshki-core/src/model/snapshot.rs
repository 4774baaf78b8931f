use crate::errors::{ChangeLogError, ExError, ExErrorKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One full capture of the record set at a declared instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub records: Vec<Record>,
}

/// A single request row, keyed by its stable id
///
/// Field values stay raw JSON here; the normalizer decides what they mean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
}

impl Record {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field setter, mostly for tests and fixtures
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }
}

impl Snapshot {
    pub fn new(timestamp: DateTime<Utc>, records: Vec<Record>) -> Self {
        Self { timestamp, records }
    }
}

/// Decode raw snapshot bytes
///
/// # Errors
///
/// `SnapshotParse` when the bytes are not UTF-8 JSON, the root is not an
/// object, `timestamp` is missing or not ISO-8601, `records` is not a list
/// of `{id, fields}` objects, or a record id is empty.
pub fn parse_snapshot_bytes(bytes: &[u8]) -> Result<Snapshot, ExError> {
    let parse_error = |message: String| {
        ExError::new(ExErrorKind::SnapshotParse)
            .with_op("parse_snapshot_bytes")
            .with_message(message)
    };

    let text = std::str::from_utf8(bytes)
        .map_err(|e| parse_error(format!("snapshot is not valid UTF-8: {}", e)))?;

    let raw: Value = serde_json::from_str(text)
        .map_err(|e| parse_error(format!("snapshot is not valid JSON: {}", e)))?;

    let obj = raw
        .as_object()
        .ok_or_else(|| parse_error("snapshot JSON root must be an object".to_string()))?;

    if !obj.contains_key("timestamp") {
        return Err(ExError::from(ChangeLogError::MalformedSnapshot {
            reason: "required field `timestamp` is absent".into(),
        }));
    }

    let snapshot: Snapshot = serde_json::from_value(raw)
        .map_err(|e| parse_error(format!("failed to deserialize snapshot: {}", e)))?;

    if let Some(position) = snapshot.records.iter().position(|r| r.id.trim().is_empty()) {
        return Err(ExError::from(ChangeLogError::EmptyRecordId { position }));
    }

    Ok(snapshot)
}
