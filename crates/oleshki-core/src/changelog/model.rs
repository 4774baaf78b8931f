//! Change log output types.
//!
//! Maps are `BTreeMap` so serialization order never depends on hashing.

use crate::errors::{ExError, ExErrorKind};
use crate::model::FieldValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};
use std::collections::BTreeMap;

/// One entity with at least one unreverted change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeLogEntry {
    /// Stable entity id from the source sheet
    pub id: String,
    /// Latest time in `changed`
    pub last_change: DateTime<Utc>,
    /// Current value of every significant field
    pub data: BTreeMap<String, FieldValue>,
    /// Time of the last genuine change, per changed field
    pub changed: BTreeMap<String, DateTime<Utc>>,
    /// Value just before that change, per changed field
    pub previous: BTreeMap<String, FieldValue>,
    /// Baseline value of every significant field
    pub first: BTreeMap<String, FieldValue>,
}

/// The emitted change log, most recently changed entity first
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeLog {
    pub entries: Vec<ChangeLogEntry>,
}

impl ChangeLog {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChangeLogEntry> {
        self.entries.iter()
    }

    pub fn get(&self, id: &str) -> Option<&ChangeLogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Canonical on-disk form: pretty JSON with a trailing newline
    ///
    /// # Errors
    ///
    /// `Serialization` if a value cannot be encoded (not expected for
    /// values produced by the engine).
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, ExError> {
        let mut bytes = serde_json::to_vec_pretty(self).map_err(|e| {
            ExError::new(ExErrorKind::Serialization)
                .with_op("encode_change_log")
                .with_message(e.to_string())
        })?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    /// Decode a change log previously written by [`ChangeLog::to_json_bytes`]
    ///
    /// # Errors
    ///
    /// `Serialization` if the bytes are not a change log document.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, ExError> {
        serde_json::from_slice(bytes).map_err(|e| {
            ExError::new(ExErrorKind::Serialization)
                .with_op("decode_change_log")
                .with_message(e.to_string())
        })
    }

    /// SHA-256 of the canonical encoding, hex encoded
    ///
    /// # Errors
    ///
    /// Same as [`ChangeLog::to_json_bytes`].
    pub fn digest(&self) -> Result<String, ExError> {
        let bytes = self.to_json_bytes()?;
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        Ok(hex::encode(hasher.finalize()))
    }
}

impl<'a> IntoIterator for &'a ChangeLog {
    type Item = &'a ChangeLogEntry;
    type IntoIter = std::slice::Iter<'a, ChangeLogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn sample_entry() -> ChangeLogEntry {
        let t1 = Utc.with_ymd_and_hms(2026, 10, 1, 11, 0, 0).unwrap();
        ChangeLogEntry {
            id: "R1".into(),
            last_change: t1,
            data: BTreeMap::from([("status".into(), FieldValue::from("B"))]),
            changed: BTreeMap::from([("status".into(), t1)]),
            previous: BTreeMap::from([("status".into(), FieldValue::from("A"))]),
            first: BTreeMap::from([("status".into(), FieldValue::from("A"))]),
        }
    }

    #[test]
    fn test_entry_wire_format() {
        let value = serde_json::to_value(sample_entry()).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "R1",
                "lastChange": "2026-10-01T11:00:00Z",
                "data": {"status": "B"},
                "changed": {"status": "2026-10-01T11:00:00Z"},
                "previous": {"status": "A"},
                "first": {"status": "A"}
            })
        );
    }

    #[test]
    fn test_change_log_is_a_bare_array() {
        let log = ChangeLog {
            entries: vec![sample_entry()],
        };
        let value = serde_json::to_value(&log).unwrap();
        assert!(value.is_array());
        assert_eq!(value.as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_json_bytes_decode_back() {
        let log = ChangeLog {
            entries: vec![sample_entry()],
        };
        let bytes = log.to_json_bytes().unwrap();
        assert_eq!(bytes.last(), Some(&b'\n'));
        assert_eq!(ChangeLog::from_json_slice(&bytes).unwrap(), log);
    }

    #[test]
    fn test_digest_is_stable_and_content_sensitive() {
        let log = ChangeLog {
            entries: vec![sample_entry()],
        };
        assert_eq!(log.digest().unwrap(), log.clone().digest().unwrap());
        assert_eq!(log.digest().unwrap().len(), 64);
        assert_ne!(log.digest().unwrap(), ChangeLog::default().digest().unwrap());
    }

    #[test]
    fn test_decode_garbage_is_serialization_error() {
        let err = ChangeLog::from_json_slice(b"{\"id\": 1}").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Serialization);
    }
}
