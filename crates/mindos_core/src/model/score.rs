//! Score aggregates and historical snapshots.
//!
//! # Invariants
//! - `DimensionScore::value` stays within `[0, 100]`.
//! - `ScoreBoard` entries follow the configured dimension order.
//! - `ScoreSnapshot::timestamp` has zero seconds and nanoseconds.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Persisted timestamp layout, minute precision.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Aggregated score for one dimension with its provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionScore {
    pub dimension: String,
    pub label: String,
    pub value: f64,
    /// Number of samples that contributed; zero means `value` is the baseline.
    pub sample_count: usize,
    /// Relative paths of the contributing documents, in scan order.
    pub sources: Vec<String>,
}

impl DimensionScore {
    /// Whether the value was measured rather than defaulted to the baseline.
    pub fn is_measured(&self) -> bool {
        self.sample_count > 0
    }
}

/// Current scores for every configured dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBoard {
    pub baseline: f64,
    pub entries: Vec<DimensionScore>,
}

impl ScoreBoard {
    pub fn get(&self, dimension: &str) -> Option<&DimensionScore> {
        self.entries
            .iter()
            .find(|entry| entry.dimension == dimension)
    }

    /// Score value by dimension name.
    pub fn value(&self, dimension: &str) -> Option<f64> {
        self.get(dimension).map(|entry| entry.value)
    }

    /// Dimension -> value map, the shape persisted in history.
    pub fn scores(&self) -> BTreeMap<String, f64> {
        self.entries
            .iter()
            .map(|entry| (entry.dimension.clone(), entry.value))
            .collect()
    }

    pub fn measured_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_measured()).count()
    }
}

/// One timestamped recording of all dimension scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSnapshot {
    #[serde(with = "minute_timestamp")]
    pub timestamp: NaiveDateTime,
    pub scores: BTreeMap<String, f64>,
}

impl ScoreSnapshot {
    /// Creates a snapshot, truncating `at` to minute precision.
    pub fn new(at: NaiveDateTime, scores: BTreeMap<String, f64>) -> Self {
        Self {
            timestamp: truncate_to_minute(at),
            scores,
        }
    }

    /// Calendar day of this snapshot.
    pub fn day(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Timestamp rendered in the persisted layout.
    pub fn timestamp_label(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

fn truncate_to_minute(at: NaiveDateTime) -> NaiveDateTime {
    at.with_second(0)
        .and_then(|value| value.with_nanosecond(0))
        .unwrap_or(at)
}

mod minute_timestamp {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT).map_err(|err| {
            serde::de::Error::custom(format!("invalid snapshot timestamp `{raw}`: {err}"))
        })
    }
}
