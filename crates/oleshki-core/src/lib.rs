//! Oleshki Core - temporal change tracking over full-state snapshots
//!
//! This crate turns an ordered sequence of snapshots of the evacuation
//! request sheet into a change log that lists only genuine, lasting edits:
//! - Field normalization (trimmed strings, structural coordinate equality)
//! - Per-entity, per-field change tracking with undo detection
//! - Snapshot admission with a coalescing window
//! - Deterministic change log assembly and Markdown rendering
//! - Status taxonomy and status count reports

pub mod changelog;
pub mod config;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod normalize;
pub mod render;
pub mod statuses;
pub mod tracker;

// Macros expand to `$crate::oleshki_core_types::schema::…`
pub use oleshki_core_types;

// Re-export commonly used types
pub use changelog::{ChangeLog, ChangeLogEntry};
pub use config::EngineConfig;
pub use diff::{compute_change_log, DiffEngine, RunOutcome, RunStats};
pub use errors::{ChangeLogError, ExError, ExErrorKind, Result};
pub use model::{FieldValue, Record, Snapshot};
pub use tracker::{ChangeTracker, TrackedEntity};
pub use render::render_change_log;
pub use statuses::{summarize_statuses, StatusCategory, StatusReport};
