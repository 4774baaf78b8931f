//! Core types shared across Oleshki facilities
//!
//! This crate provides foundational types used by the error, logging and
//! change-tracking layers:
//!
//! - **Correlation types**: RunId
//! - **Redaction**: Redacted<T> marker for personal data in log output
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod redacted;
pub mod schema;

pub use correlation::RunId;
pub use redacted::Redacted;
