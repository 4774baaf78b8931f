//! Snapshot diff engine.
//!
//! Folds an ordered sequence of full snapshots into tracker state and hands
//! the result to the change log assembler.
//!
//! ## Entry point
//!
//! ```ignore
//! use oleshki_core::diff::compute_change_log;
//!
//! let outcome = compute_change_log(store.iter(), &config)?;
//! write_change_log(&out_path, &outcome.change_log)?;
//! ```
//!
//! ## Guarantees
//!
//! - **Coalescing**: a snapshot declared less than the minimum interval after
//!   the last admitted one is skipped outright, never partially applied.
//! - **Strict order**: snapshots are applied one at a time in the order given.
//! - **All or nothing**: the first snapshot error aborts the run; no change
//!   log is produced.

pub mod engine;

pub use engine::{compute_change_log, Admission, DiffEngine, RunOutcome, RunStats};
