//! Per-entity, per-field change tracking
//!
//! Each field of a tracked entity is either at its baseline (`first`) or
//! changed. Moving away from the baseline records a change; moving back to
//! it is an undo that erases the change marker entirely, so a value that
//! flickers and returns never shows up in the change log.
//!
//! ```text
//! Baseline --(v != first)-----------------> Changed   writes changed/previous
//! Changed  --(v == first)-----------------> Baseline  clears changed/previous
//! Changed  --(v != first, v != current)---> Changed   rewrites changed/previous
//! ```

use crate::model::{FieldValue, Record};
use crate::normalize::FieldNormalizer;
use chrono::{DateTime, Utc};
use oleshki_core_types::Redacted;
use std::collections::{BTreeMap, HashMap};

static ABSENT: FieldValue = FieldValue::Absent;

/// What applying one field value did to the entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTransition {
    /// Same as the current value
    Unchanged,
    /// Returned to the baseline; change marker dropped
    Undo,
    /// Differs from both current value and baseline
    Change,
}

/// Counters for one applied record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordOutcome {
    pub created: bool,
    pub changes: usize,
    pub undos: usize,
}

/// Rows of one snapshot with repeated ids collapsed to their last row
///
/// Order follows each kept row's position in the snapshot.
pub fn last_row_per_id(records: &[Record]) -> Vec<&Record> {
    let mut last: HashMap<&str, usize> = HashMap::with_capacity(records.len());
    for (position, record) in records.iter().enumerate() {
        last.insert(record.id.as_str(), position);
    }
    records
        .iter()
        .enumerate()
        .filter(|(position, record)| last.get(record.id.as_str()) == Some(position))
        .map(|(_, record)| record)
        .collect()
}

/// Tracked state of one entity across admitted snapshots
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedEntity {
    id: String,
    first: BTreeMap<String, FieldValue>,
    data: BTreeMap<String, FieldValue>,
    previous: BTreeMap<String, FieldValue>,
    changed: BTreeMap<String, DateTime<Utc>>,
    last_change: Option<DateTime<Utc>>,
}

impl TrackedEntity {
    /// Start tracking from a baseline observation
    pub fn new(id: impl Into<String>, baseline: BTreeMap<String, FieldValue>) -> Self {
        Self {
            id: id.into(),
            first: baseline.clone(),
            data: baseline,
            previous: BTreeMap::new(),
            changed: BTreeMap::new(),
            last_change: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn first(&self) -> &BTreeMap<String, FieldValue> {
        &self.first
    }

    pub fn data(&self) -> &BTreeMap<String, FieldValue> {
        &self.data
    }

    pub fn previous(&self) -> &BTreeMap<String, FieldValue> {
        &self.previous
    }

    pub fn changed(&self) -> &BTreeMap<String, DateTime<Utc>> {
        &self.changed
    }

    /// Incrementally maintained latest change time
    pub fn last_change(&self) -> Option<DateTime<Utc>> {
        self.last_change
    }

    pub fn has_changes(&self) -> bool {
        !self.changed.is_empty()
    }

    /// Apply one normalized field value observed at `at`
    pub fn apply_field(
        &mut self,
        field: &str,
        value: FieldValue,
        at: DateTime<Utc>,
    ) -> FieldTransition {
        let current = self.data.get(field).unwrap_or(&ABSENT);
        if *current == value {
            return FieldTransition::Unchanged;
        }

        let baseline = self.first.get(field).unwrap_or(&ABSENT);
        if *baseline == value {
            self.data.insert(field.to_string(), value);
            self.changed.remove(field);
            self.previous.remove(field);
            self.last_change = self.changed.values().max().copied();
            return FieldTransition::Undo;
        }

        let before = self
            .data
            .insert(field.to_string(), value)
            .unwrap_or(FieldValue::Absent);
        self.previous.insert(field.to_string(), before);
        self.changed.insert(field.to_string(), at);
        self.last_change = self.changed.values().max().copied();
        FieldTransition::Change
    }

    /// Consume into the raw maps `(id, first, data, previous, changed)`
    pub fn into_parts(
        self,
    ) -> (
        String,
        BTreeMap<String, FieldValue>,
        BTreeMap<String, FieldValue>,
        BTreeMap<String, FieldValue>,
        BTreeMap<String, DateTime<Utc>>,
    ) {
        (self.id, self.first, self.data, self.previous, self.changed)
    }
}

/// Owns the tracked state of every entity seen during a run
#[derive(Debug, Clone)]
pub struct ChangeTracker {
    normalizer: FieldNormalizer,
    entities: HashMap<String, TrackedEntity>,
}

impl ChangeTracker {
    pub fn new(significant_fields: Vec<String>) -> Self {
        Self {
            normalizer: FieldNormalizer::new(significant_fields),
            entities: HashMap::new(),
        }
    }

    /// Fold one record of an admitted snapshot taken at `at`
    ///
    /// An unseen id starts tracking with this record as its baseline.
    pub fn apply_record(&mut self, record: &Record, at: DateTime<Utc>) -> RecordOutcome {
        let values = self.normalizer.normalize_record(record);

        let Some(entity) = self.entities.get_mut(&record.id) else {
            tracing::trace!(entity_id = %record.id, "tracking new entity");
            self.entities
                .insert(record.id.clone(), TrackedEntity::new(record.id.clone(), values));
            return RecordOutcome {
                created: true,
                ..RecordOutcome::default()
            };
        };

        let mut outcome = RecordOutcome::default();
        for (field, value) in values {
            match entity.apply_field(&field, value, at) {
                FieldTransition::Unchanged => {}
                FieldTransition::Undo => {
                    outcome.undos += 1;
                    tracing::debug!(entity_id = %record.id, field = %field, "field returned to baseline");
                }
                FieldTransition::Change => {
                    outcome.changes += 1;
                    let value = entity.data().get(&field).map(ToString::to_string);
                    tracing::debug!(
                        entity_id = %record.id,
                        field = %field,
                        value = %Redacted::new(value.unwrap_or_default()),
                        "field changed"
                    );
                }
            }
        }
        outcome
    }

    pub fn entity(&self, id: &str) -> Option<&TrackedEntity> {
        self.entities.get(id)
    }

    pub fn entities(&self) -> impl Iterator<Item = &TrackedEntity> {
        self.entities.values()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn into_entities(self) -> impl Iterator<Item = TrackedEntity> {
        self.entities.into_values()
    }
}
