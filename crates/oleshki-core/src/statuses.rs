//! Status taxonomy and status count reports
//!
//! Volunteers type statuses into the sheet by hand; the vocabulary below is
//! the set the map understands. Anything else is reported as `Unknown`.

use crate::model::Snapshot;
use crate::normalize::normalize_value;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Someone needs help now
pub const URGENT_STATUSES: &[&str] = &[
    "нужна вода и еда",
    "требуется эвакуация",
    "медицина, требуются лекарства",
];

/// Open request, no special urgency
pub const BASE_STATUSES: &[&str] = &["актуально", "животные"];

/// Request without fresh information
pub const NO_DATA_STATUSES: &[&str] = &[
    "была эвакуация, нет актуальных данных",
    "нет данных об эвакуации",
    "частично в списках эвакуированных",
    "нет контакта",
];

pub const SUCCESS_STATUSES: &[&str] = &["вывезли"];

/// People decided to stay; nothing to do
pub const NO_OP_STATUSES: &[&str] = &["пока остаются, запроса нет"];

/// Never shown on the map (deceased, duplicates, filler rows)
pub const HIDDEN_STATUSES: &[&str] = &["погибли", "дубль", "приплюсовали", "пустая строка"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCategory {
    Urgent,
    Base,
    NoData,
    Success,
    NoOp,
    Hidden,
    Unknown,
}

impl StatusCategory {
    /// Classify a raw status (trimmed, case-insensitive)
    pub fn classify(status: &str) -> Self {
        let status = status.trim().to_lowercase();
        let table: [(&[&str], StatusCategory); 6] = [
            (URGENT_STATUSES, StatusCategory::Urgent),
            (BASE_STATUSES, StatusCategory::Base),
            (NO_DATA_STATUSES, StatusCategory::NoData),
            (SUCCESS_STATUSES, StatusCategory::Success),
            (NO_OP_STATUSES, StatusCategory::NoOp),
            (HIDDEN_STATUSES, StatusCategory::Hidden),
        ];
        table
            .iter()
            .find(|(names, _)| names.contains(&status.as_str()))
            .map(|(_, category)| *category)
            .unwrap_or(StatusCategory::Unknown)
    }
}

/// Status counts over one snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    pub timestamp: DateTime<Utc>,
    pub total: usize,
    /// Records whose status says they were evacuated
    pub done: usize,
    /// Count per raw status text (trimmed); records without status under `""`
    pub by_status: BTreeMap<String, usize>,
    pub by_category: BTreeMap<StatusCategory, usize>,
}

/// Count statuses in `snapshot`, reading them from `status_field`
pub fn summarize_statuses(snapshot: &Snapshot, status_field: &str) -> StatusReport {
    let mut by_status: BTreeMap<String, usize> = BTreeMap::new();
    let mut by_category: BTreeMap<StatusCategory, usize> = BTreeMap::new();

    for record in &snapshot.records {
        let value = normalize_value(record.fields.get(status_field));
        let status = value.as_text().unwrap_or_default().to_string();
        let category = StatusCategory::classify(&status);
        *by_status.entry(status).or_default() += 1;
        *by_category.entry(category).or_default() += 1;
    }

    StatusReport {
        timestamp: snapshot.timestamp,
        total: snapshot.records.len(),
        done: by_category
            .get(&StatusCategory::Success)
            .copied()
            .unwrap_or(0),
        by_status,
        by_category,
    }
}
