//! Change log output
//!
//! The change log is rewritten on every run; readers must see either the
//! previous file or the new one, never a partial write.

mod atomic;
mod changelog_file;

pub use atomic::atomic_write;
pub use changelog_file::{read_change_log, write_change_log};
