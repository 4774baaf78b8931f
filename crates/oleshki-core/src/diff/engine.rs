//! Snapshot admission and the run loop.

use crate::changelog::{assemble, ChangeLog};
use crate::config::EngineConfig;
use crate::errors::ExError;
use crate::model::Snapshot;
use crate::tracker::{last_row_per_id, ChangeTracker};
use crate::{log_op_end, log_op_error, log_op_start};
use chrono::{DateTime, Duration, Utc};
use oleshki_core_types::RunId;
use std::time::Instant;

/// Decision taken for one offered snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Records were folded into the tracker
    Admitted,
    /// Declared inside the coalescing window; ignored entirely
    Skipped,
}

/// Counters for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub snapshots_seen: usize,
    pub snapshots_admitted: usize,
    pub snapshots_skipped: usize,
    pub records_applied: usize,
    pub entities_created: usize,
    pub changes: usize,
    pub undos: usize,
}

/// Result of a completed run
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub run_id: RunId,
    pub change_log: ChangeLog,
    pub stats: RunStats,
}

/// Drives the change tracker across an ordered snapshot sequence
#[derive(Debug)]
pub struct DiffEngine {
    run_id: RunId,
    min_interval: Duration,
    tracker: ChangeTracker,
    last_processed: Option<DateTime<Utc>>,
    stats: RunStats,
}

impl DiffEngine {
    /// Create an engine for one run
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the config fails validation.
    pub fn new(config: &EngineConfig) -> Result<Self, ExError> {
        config.validate()?;
        Ok(Self {
            run_id: RunId::new(),
            min_interval: config.min_interval(),
            tracker: ChangeTracker::new(config.significant_fields.clone()),
            last_processed: None,
            stats: RunStats::default(),
        })
    }

    pub fn run_id(&self) -> &RunId {
        &self.run_id
    }

    pub fn tracker(&self) -> &ChangeTracker {
        &self.tracker
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    pub fn last_processed(&self) -> Option<DateTime<Utc>> {
        self.last_processed
    }

    fn admits(&self, timestamp: DateTime<Utc>) -> bool {
        match self.last_processed {
            None => true,
            Some(last) => timestamp - last >= self.min_interval,
        }
    }

    /// Offer the next snapshot in sequence
    ///
    /// The first snapshot is always admitted and seeds the window. Later
    /// ones are admitted only when declared at least the minimum interval
    /// after the last admitted snapshot. An id repeated within one snapshot
    /// is folded once, using its last row.
    pub fn offer(&mut self, snapshot: &Snapshot) -> Admission {
        self.stats.snapshots_seen += 1;

        if !self.admits(snapshot.timestamp) {
            self.stats.snapshots_skipped += 1;
            if let Some(last) = self.last_processed.filter(|last| snapshot.timestamp < *last) {
                tracing::warn!(
                    snapshot_ts = %snapshot.timestamp,
                    last_processed = %last,
                    "snapshot declared before the last admitted one; skipped"
                );
            } else {
                tracing::debug!(snapshot_ts = %snapshot.timestamp, "snapshot inside coalescing window; skipped");
            }
            return Admission::Skipped;
        }

        self.last_processed = Some(snapshot.timestamp);
        self.stats.snapshots_admitted += 1;

        let rows = last_row_per_id(&snapshot.records);
        if rows.len() < snapshot.records.len() {
            tracing::warn!(
                snapshot_ts = %snapshot.timestamp,
                duplicates = snapshot.records.len() - rows.len(),
                "repeated record ids; last row per id kept"
            );
        }

        let mut changes = 0;
        for record in rows {
            let outcome = self.tracker.apply_record(record, snapshot.timestamp);
            self.stats.records_applied += 1;
            self.stats.entities_created += usize::from(outcome.created);
            self.stats.changes += outcome.changes;
            self.stats.undos += outcome.undos;
            changes += outcome.changes;
        }

        tracing::debug!(
            snapshot_ts = %snapshot.timestamp,
            records = snapshot.records.len(),
            changes,
            "snapshot admitted"
        );
        Admission::Admitted
    }

    /// Assemble the change log from the accumulated state
    pub fn finish(self) -> RunOutcome {
        RunOutcome {
            run_id: self.run_id,
            change_log: assemble(self.tracker.into_entities()),
            stats: self.stats,
        }
    }

    /// Consume a snapshot sequence and produce the change log
    ///
    /// Each snapshot is dropped as soon as it has been offered.
    ///
    /// # Errors
    ///
    /// The first error yielded by `snapshots` is returned unchanged apart
    /// from the run id; nothing is assembled.
    pub fn run<I>(mut self, snapshots: I) -> Result<RunOutcome, ExError>
    where
        I: IntoIterator<Item = Result<Snapshot, ExError>>,
    {
        let started = Instant::now();
        let run_id = self.run_id.clone();
        log_op_start!("diff_run", run_id = %run_id);

        for next in snapshots {
            let snapshot = match next {
                Ok(snapshot) => snapshot,
                Err(err) => {
                    let err = err.with_run_id(run_id.clone());
                    log_op_error!(
                        "diff_run",
                        err.clone(),
                        duration_ms = started.elapsed().as_millis() as u64,
                        run_id = %run_id
                    );
                    return Err(err);
                }
            };
            self.offer(&snapshot);
        }

        let outcome = self.finish();
        log_op_end!(
            "diff_run",
            duration_ms = started.elapsed().as_millis() as u64,
            run_id = %run_id,
            admitted = outcome.stats.snapshots_admitted,
            skipped = outcome.stats.snapshots_skipped,
            entries = outcome.change_log.len()
        );
        Ok(outcome)
    }
}

/// Run the whole pipeline over `snapshots` with `config`
///
/// # Errors
///
/// - `InvalidConfig`: the config fails validation
/// - `SnapshotRead` / `SnapshotParse`: propagated from the snapshot source
pub fn compute_change_log<I>(snapshots: I, config: &EngineConfig) -> Result<RunOutcome, ExError>
where
    I: IntoIterator<Item = Result<Snapshot, ExError>>,
{
    DiffEngine::new(config)?.run(snapshots)
}
