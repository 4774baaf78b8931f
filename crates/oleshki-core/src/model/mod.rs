//! Snapshot input model
//!
//! - `snapshot`: snapshot documents and their records
//! - `value`: typed, comparable field values

pub mod snapshot;
pub mod value;

pub use snapshot::{parse_snapshot_bytes, Record, Snapshot};
pub use value::FieldValue;
