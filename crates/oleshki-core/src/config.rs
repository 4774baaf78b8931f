//! Engine configuration
//!
//! The coalescing interval and the significant-field list are explicit
//! values handed to [`DiffEngine::new`](crate::diff::DiffEngine::new); there
//! is no process-wide configuration. A TOML file can supply them:
//!
//! ```toml
//! min_interval_minutes = 60
//! significant_fields = ["status", "coords", "address"]
//! lookback_hours = 72
//! ```

use crate::errors::{ChangeLogError, ExError, ExErrorKind, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Default minimum gap between two admitted snapshots
pub const DEFAULT_MIN_INTERVAL_MINUTES: i64 = 60;

/// Fields of an evacuation request that count as a meaningful edit
pub const DEFAULT_SIGNIFICANT_FIELDS: &[&str] = &[
    "status",
    "coords",
    "address",
    "city",
    "details",
    "people",
    "contact",
    "contactInfo",
    "animals",
    "urgent",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Snapshots closer than this to the last admitted one are skipped
    pub min_interval_minutes: i64,
    /// Fields compared between snapshots; everything else is ignored
    pub significant_fields: Vec<String>,
    /// Only snapshots declared within this many hours before now are read
    pub lookback_hours: Option<i64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_interval_minutes: DEFAULT_MIN_INTERVAL_MINUTES,
            significant_fields: DEFAULT_SIGNIFICANT_FIELDS
                .iter()
                .map(|f| f.to_string())
                .collect(),
            lookback_hours: None,
        }
    }
}

impl EngineConfig {
    /// Build a config for the given fields with the default interval
    pub fn with_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            significant_fields: fields.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Parse and validate a TOML document
    ///
    /// # Errors
    ///
    /// `ConfigSyntax` for unparsable TOML or unknown keys, otherwise any
    /// error from [`EngineConfig::validate`].
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: EngineConfig =
            toml::from_str(text).map_err(|e| ChangeLogError::ConfigSyntax {
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    ///
    /// # Errors
    ///
    /// - `Io`: the file cannot be read
    /// - `InvalidConfig`: the content is not a valid config
    pub fn load(path: &Path) -> std::result::Result<Self, ExError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            ExError::new(ExErrorKind::Io)
                .with_op("load_config")
                .with_message(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&text).map_err(|e| {
            let ex = ExError::from(e);
            let message = format!("{}: {}", path.display(), ex.message());
            ex.with_op("load_config").with_message(message)
        })
    }

    /// Check the invariants the engine relies on
    ///
    /// # Errors
    ///
    /// - `EmptyFieldSet` / `BlankField` / `DuplicateField` for a bad field list
    /// - `NegativeInterval` for `min_interval_minutes < 0`
    /// - `IntervalOutOfRange` for an interval no duration can hold
    /// - `InvalidLookback` for a non-positive lookback
    /// - `LookbackOutOfRange` for a lookback reaching past the earliest
    ///   representable time
    pub fn validate(&self) -> Result<()> {
        if self.significant_fields.is_empty() {
            return Err(ChangeLogError::EmptyFieldSet);
        }
        let mut seen = BTreeSet::new();
        for field in &self.significant_fields {
            if field.trim().is_empty() {
                return Err(ChangeLogError::BlankField);
            }
            if !seen.insert(field.as_str()) {
                return Err(ChangeLogError::DuplicateField {
                    field: field.clone(),
                });
            }
        }
        if self.min_interval_minutes < 0 {
            return Err(ChangeLogError::NegativeInterval {
                minutes: self.min_interval_minutes,
            });
        }
        if Duration::try_minutes(self.min_interval_minutes).is_none() {
            return Err(ChangeLogError::IntervalOutOfRange {
                minutes: self.min_interval_minutes,
            });
        }
        self.lookback_start(Utc::now())?;
        Ok(())
    }

    /// Coalescing interval; saturates for configs that skipped validation
    pub fn min_interval(&self) -> Duration {
        Duration::try_minutes(self.min_interval_minutes).unwrap_or(Duration::MAX)
    }

    /// Earliest snapshot time the lookback window admits, counted back from `now`
    ///
    /// # Errors
    ///
    /// - `InvalidLookback` for a non-positive lookback
    /// - `LookbackOutOfRange` if the window cannot be represented
    pub fn lookback_start(&self, now: DateTime<Utc>) -> Result<Option<DateTime<Utc>>> {
        let Some(hours) = self.lookback_hours else {
            return Ok(None);
        };
        if hours <= 0 {
            return Err(ChangeLogError::InvalidLookback { hours });
        }
        Duration::try_hours(hours)
            .and_then(|window| now.checked_sub_signed(window))
            .map(Some)
            .ok_or(ChangeLogError::LookbackOutOfRange { hours })
    }
}
