//! Property tests over random field histories

use chrono::{DateTime, Duration, TimeZone, Utc};
use oleshki_core::diff::Admission;
use oleshki_core::normalize::normalize_value;
use oleshki_core::{DiffEngine, EngineConfig, FieldValue, Record, Snapshot};
use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap};

const IDS: &[&str] = &["R1", "R2", "R3"];
const FIELDS: &[&str] = &["status", "city"];

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap()
}

fn value_strategy() -> impl Strategy<Value = Option<&'static str>> {
    prop_oneof![
        Just(None),
        Just(Some("актуально")),
        Just(Some(" актуально ")),
        Just(Some("вывезли")),
        Just(Some("нет контакта")),
    ]
}

/// One snapshot: minutes since the previous one, then per id an optional row
fn step_strategy() -> impl Strategy<Value = (i64, Vec<Option<Vec<Option<&'static str>>>>)> {
    (
        0i64..150,
        proptest::collection::vec(
            proptest::option::weighted(0.8, proptest::collection::vec(value_strategy(), FIELDS.len())),
            IDS.len(),
        ),
    )
}

fn build(steps: &[(i64, Vec<Option<Vec<Option<&'static str>>>>)]) -> Vec<Snapshot> {
    let mut at = t0();
    let mut snapshots = Vec::new();
    for (gap, rows) in steps {
        at += Duration::minutes(*gap);
        let records = IDS
            .iter()
            .zip(rows)
            .filter_map(|(id, row)| {
                let values = row.as_ref()?;
                let mut record = Record::new(*id);
                for (field, value) in FIELDS.iter().zip(values) {
                    if let Some(value) = value {
                        record = record.with_field(*field, *value);
                    }
                }
                Some(record)
            })
            .collect();
        snapshots.push(Snapshot::new(at, records));
    }
    snapshots
}

fn normalized(record: &Record) -> BTreeMap<String, FieldValue> {
    FIELDS
        .iter()
        .map(|f| (f.to_string(), normalize_value(record.fields.get(*f))))
        .collect()
}

proptest! {
    #[test]
    fn tracked_state_invariants_hold_after_every_snapshot(
        steps in proptest::collection::vec(step_strategy(), 1..12)
    ) {
        let mut engine = DiffEngine::new(&EngineConfig::with_fields(FIELDS.iter().copied())).unwrap();
        let mut expected_first: HashMap<String, BTreeMap<String, FieldValue>> = HashMap::new();

        for snapshot in build(&steps) {
            if engine.offer(&snapshot) == Admission::Skipped {
                continue;
            }
            for record in &snapshot.records {
                expected_first
                    .entry(record.id.clone())
                    .or_insert_with(|| normalized(record));
            }

            for entity in engine.tracker().entities() {
                // Baseline is the earliest admitted observation
                prop_assert_eq!(entity.first(), &expected_first[entity.id()]);

                // changed and previous cover the same fields
                let changed: Vec<_> = entity.changed().keys().collect();
                let previous: Vec<_> = entity.previous().keys().collect();
                prop_assert_eq!(&changed, &previous);

                for field in FIELDS.iter().map(|f| f.to_string()) {
                    let differs = entity.data()[&field] != entity.first()[&field];
                    prop_assert_eq!(differs, entity.changed().contains_key(&field));
                }

                prop_assert_eq!(entity.last_change(), entity.changed().values().max().copied());
            }
        }

        let outcome = engine.finish();
        let entries: Vec<_> = outcome.change_log.iter().collect();
        for pair in entries.windows(2) {
            let ordered = pair[0].last_change > pair[1].last_change
                || (pair[0].last_change == pair[1].last_change && pair[0].id < pair[1].id);
            prop_assert!(ordered);
        }
        for entry in entries {
            prop_assert!(!entry.changed.is_empty());
            prop_assert_eq!(Some(entry.last_change), entry.changed.values().max().copied());
        }
    }
}
