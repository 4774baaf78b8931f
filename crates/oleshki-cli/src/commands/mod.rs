//! CLI command implementations

pub mod diff;
pub mod render;
pub mod statuses;

use oleshki_core::EngineConfig;
use std::path::Path;

/// Config from `--config` when given, defaults otherwise
pub(crate) fn load_config(path: Option<&Path>) -> Result<EngineConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(EngineConfig::load(path)?),
        None => Ok(EngineConfig::default()),
    }
}
