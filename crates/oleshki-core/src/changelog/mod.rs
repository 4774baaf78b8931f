//! Change log assembly.
//!
//! Turns the tracker's final state into the emitted change log.
//!
//! ## Guarantees
//!
//! - **Only lasting edits**: entities without an unreverted change are dropped.
//! - **Fresh `lastChange`**: recomputed from `changed`, independent of the
//!   tracker's incremental value.
//! - **Determinism**: entries are ordered by `lastChange` descending, then by
//!   id ascending, and all maps serialize in key order, so identical input
//!   yields byte-identical output.

pub mod assembler;
pub mod model;

pub use assembler::assemble;
pub use model::{ChangeLog, ChangeLogEntry};
