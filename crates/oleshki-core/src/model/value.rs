use serde::{Deserialize, Serialize};
use std::fmt;

/// A significant field's value after normalization
///
/// Serialized untagged, so the change log carries plain JSON: `null`, a
/// string, a `[lat, lon]` pair, or whatever unexpected shape the source had.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Missing key or JSON `null`
    #[default]
    Absent,
    /// Trimmed string
    Text(String),
    /// Coordinate pair, compared component-wise
    Coords([f64; 2]),
    /// Any other shape, compared as an opaque JSON value
    Other(serde_json::Value),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Absent => Ok(()),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Coords([lat, lon]) => write!(f, "{}, {}", lat, lon),
            FieldValue::Other(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}
