//! Field normalization
//!
//! Every comparison the tracker makes goes through [`normalize_value`], so
//! cosmetic differences (surrounding whitespace, integer vs float
//! coordinates) never register as edits.

use crate::model::{FieldValue, Record};
use serde_json::Value;
use std::collections::BTreeMap;

/// Canonical comparable form of one raw field value
pub fn normalize_value(raw: Option<&Value>) -> FieldValue {
    match raw {
        None | Some(Value::Null) => FieldValue::Absent,
        Some(Value::String(s)) => FieldValue::Text(s.trim().to_string()),
        Some(Value::Array(items)) => match items.as_slice() {
            [a, b] => match (a.as_f64(), b.as_f64()) {
                (Some(lat), Some(lon)) => FieldValue::Coords([lat, lon]),
                _ => FieldValue::Other(Value::Array(items.clone())),
            },
            _ => FieldValue::Other(Value::Array(items.clone())),
        },
        Some(other) => FieldValue::Other(other.clone()),
    }
}

/// Projects records onto the configured significant fields
#[derive(Debug, Clone)]
pub struct FieldNormalizer {
    fields: Vec<String>,
}

impl FieldNormalizer {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    /// Normalized value of every significant field; missing ones are `Absent`
    pub fn normalize_record(&self, record: &Record) -> BTreeMap<String, FieldValue> {
        self.fields
            .iter()
            .map(|field| (field.clone(), normalize_value(record.fields.get(field))))
            .collect()
    }
}
