//! Final pass over tracker state.

use crate::changelog::model::{ChangeLog, ChangeLogEntry};
use crate::tracker::TrackedEntity;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Latest change time, recomputed from the per-field markers
fn recompute_last_change(changed: &BTreeMap<String, DateTime<Utc>>) -> Option<DateTime<Utc>> {
    changed.values().max().copied()
}

/// `lastChange` descending, then id ascending
fn entry_order(a: &ChangeLogEntry, b: &ChangeLogEntry) -> Ordering {
    b.last_change
        .cmp(&a.last_change)
        .then_with(|| a.id.cmp(&b.id))
}

/// Build the change log from final tracked entities
///
/// Entities with no unreverted change are excluded. The order of the input
/// does not matter.
pub fn assemble<I>(entities: I) -> ChangeLog
where
    I: IntoIterator<Item = TrackedEntity>,
{
    let mut entries: Vec<ChangeLogEntry> = entities
        .into_iter()
        .filter_map(|entity| {
            let incremental = entity.last_change();
            let (id, first, data, previous, changed) = entity.into_parts();
            let last_change = recompute_last_change(&changed)?;
            if incremental != Some(last_change) {
                tracing::warn!(
                    entity_id = %id,
                    incremental = ?incremental,
                    recomputed = %last_change,
                    "incremental lastChange disagreed with recomputed value"
                );
            }
            Some(ChangeLogEntry {
                id,
                last_change,
                data,
                changed,
                previous,
                first,
            })
        })
        .collect();

    entries.sort_by(entry_order);
    ChangeLog { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldValue;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 1, hour, 0, 0).unwrap()
    }

    fn entity(id: &str, changes: &[(&str, u32)]) -> TrackedEntity {
        let baseline: BTreeMap<String, FieldValue> = ["status", "city", "details"]
            .iter()
            .map(|f| (f.to_string(), FieldValue::from("base")))
            .collect();
        let mut e = TrackedEntity::new(id, baseline);
        for (field, hour) in changes {
            e.apply_field(field, FieldValue::Text(format!("v{}", hour)), at(*hour));
        }
        e
    }

    #[test]
    fn test_unchanged_entities_are_excluded() {
        let log = assemble(vec![entity("R1", &[]), entity("R2", &[("status", 1)])]);
        assert_eq!(log.len(), 1);
        assert_eq!(log.entries[0].id, "R2");
    }

    #[test]
    fn test_last_change_is_max_of_changed() {
        let log = assemble(vec![entity("R1", &[("status", 3), ("city", 5), ("details", 4)])]);
        let entry = &log.entries[0];
        assert_eq!(entry.last_change, at(5));
        assert_eq!(Some(&entry.last_change), entry.changed.values().max());
    }

    #[test]
    fn test_sorted_by_last_change_descending() {
        let log = assemble(vec![
            entity("A", &[("status", 1)]),
            entity("B", &[("status", 7)]),
            entity("C", &[("status", 4)]),
        ]);
        let ids: Vec<&str> = log.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["B", "C", "A"]);
    }

    #[test]
    fn test_ties_broken_by_id_ascending() {
        let log = assemble(vec![
            entity("R3", &[("status", 2)]),
            entity("R1", &[("city", 2)]),
            entity("R2", &[("details", 2)]),
        ]);
        let ids: Vec<&str> = log.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["R1", "R2", "R3"]);
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let forward = assemble(vec![
            entity("R1", &[("status", 2)]),
            entity("R2", &[("status", 2)]),
            entity("R3", &[("status", 1)]),
        ]);
        let backward = assemble(vec![
            entity("R3", &[("status", 1)]),
            entity("R2", &[("status", 2)]),
            entity("R1", &[("status", 2)]),
        ]);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_entry_carries_all_four_maps() {
        let log = assemble(vec![entity("R1", &[("status", 1)])]);
        let entry = &log.entries[0];
        assert_eq!(entry.data["status"], FieldValue::from("v1"));
        assert_eq!(entry.previous["status"], FieldValue::from("base"));
        assert_eq!(entry.first["status"], FieldValue::from("base"));
        assert_eq!(entry.changed["status"], at(1));
        assert!(!entry.changed.contains_key("city"));
        assert_eq!(entry.data["city"], FieldValue::from("base"));
    }
}
