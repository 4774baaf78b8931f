//! Shared builders for snapshot sequences

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use oleshki_core::{ExError, Record, Snapshot};

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 1, 8, 0, 0).unwrap()
}

pub fn at_minutes(minutes: i64) -> DateTime<Utc> {
    t0() + Duration::minutes(minutes)
}

/// Snapshot with one `status` value per `(id, status)` pair
pub fn status_snapshot(minutes: i64, rows: &[(&str, &str)]) -> Snapshot {
    Snapshot::new(
        at_minutes(minutes),
        rows.iter()
            .map(|(id, status)| Record::new(*id).with_field("status", *status))
            .collect(),
    )
}

/// Wrap in-memory snapshots as a fallible source
pub fn source(snapshots: Vec<Snapshot>) -> Vec<Result<Snapshot, ExError>> {
    snapshots.into_iter().map(Ok).collect()
}
