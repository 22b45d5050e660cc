//! Score history persistence and day grouping.
//!
//! # Responsibility
//! - Own the single durable record of score evolution.
//! - Reduce snapshots to the last entry per calendar day.
//!
//! # Invariants
//! - Per day only the chronologically last snapshot is kept.
//! - With a single day present, "previous" equals "current".

pub mod store;

use crate::model::score::ScoreSnapshot;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Latest snapshot of the two most recent distinct days.
#[derive(Debug, Clone, PartialEq)]
pub struct DayPair {
    pub current_day: NaiveDate,
    pub current: ScoreSnapshot,
    pub previous_day: NaiveDate,
    pub previous: ScoreSnapshot,
}

/// Groups snapshots by calendar day, keeping the last entry of each day.
pub fn daily_latest(entries: &[ScoreSnapshot]) -> BTreeMap<NaiveDate, &ScoreSnapshot> {
    let mut days = BTreeMap::new();
    for entry in entries {
        days.insert(entry.day(), entry);
    }
    days
}

/// Returns the current/previous day pair, or `None` for an empty history.
pub fn last_two_distinct_days(entries: &[ScoreSnapshot]) -> Option<DayPair> {
    let days = daily_latest(entries);
    let mut recent = days.iter().rev();
    let (current_day, current) = recent.next()?;
    let (previous_day, previous) = recent.next().unwrap_or((current_day, current));

    Some(DayPair {
        current_day: *current_day,
        current: (*current).clone(),
        previous_day: *previous_day,
        previous: (*previous).clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::{daily_latest, last_two_distinct_days};
    use crate::model::score::ScoreSnapshot;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn snapshot(day: u32, hour: u32, cognitive: f64) -> ScoreSnapshot {
        let at = NaiveDate::from_ymd_opt(2026, 5, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap();
        ScoreSnapshot::new(at, BTreeMap::from([("cognitive".to_string(), cognitive)]))
    }

    #[test]
    fn keeps_last_entry_per_day() {
        let entries = vec![snapshot(1, 8, 40.0), snapshot(1, 20, 45.0), snapshot(2, 9, 50.0)];
        let days = daily_latest(&entries);
        assert_eq!(days.len(), 2);
        let first_day = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
        assert_eq!(days[&first_day].scores["cognitive"], 45.0);
    }

    #[test]
    fn picks_two_most_recent_days() {
        let entries = vec![
            snapshot(1, 8, 40.0),
            snapshot(3, 8, 55.0),
            snapshot(4, 8, 60.0),
            snapshot(4, 22, 65.0),
        ];
        let pair = last_two_distinct_days(&entries).unwrap();
        assert_eq!(pair.current_day, NaiveDate::from_ymd_opt(2026, 5, 4).unwrap());
        assert_eq!(pair.current.scores["cognitive"], 65.0);
        assert_eq!(pair.previous_day, NaiveDate::from_ymd_opt(2026, 5, 3).unwrap());
        assert_eq!(pair.previous.scores["cognitive"], 55.0);
    }

    #[test]
    fn single_day_pairs_with_itself() {
        let entries = vec![snapshot(2, 8, 40.0), snapshot(2, 9, 42.0)];
        let pair = last_two_distinct_days(&entries).unwrap();
        assert_eq!(pair.current, pair.previous);
        assert_eq!(pair.current_day, pair.previous_day);
    }

    #[test]
    fn empty_history_has_no_pair() {
        assert!(last_two_distinct_days(&[]).is_none());
    }
}
