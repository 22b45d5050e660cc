use chrono::{NaiveDate, NaiveDateTime};
use mindos_core::{AppendOutcome, HistoryError, HistoryLog, HistoryState, ScoreSnapshot};
use std::collections::BTreeMap;
use std::fs;

fn at(day: u32, hour: u32, minute: u32, second: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 4, day)
        .unwrap()
        .and_hms_opt(hour, minute, second)
        .unwrap()
}

fn snapshot(moment: NaiveDateTime, cognitive: f64) -> ScoreSnapshot {
    ScoreSnapshot::new(
        moment,
        BTreeMap::from([
            ("cognitive".to_string(), cognitive),
            ("execution".to_string(), 50.0),
        ]),
    )
}

#[test]
fn missing_file_loads_as_empty_and_first_append_creates_it() {
    let dir = tempfile::tempdir().unwrap();
    let log = HistoryLog::new(dir.path().join("量化算法").join("history_log.json"));

    assert_eq!(log.read_state(), HistoryState::Missing);
    assert!(log.load_all().is_empty());

    let outcome = log.append(snapshot(at(1, 9, 0, 0), 60.0)).unwrap();
    assert_eq!(outcome, AppendOutcome::Appended);
    assert!(log.path().exists());
    assert_eq!(log.load_all().len(), 1);
}

#[test]
fn same_minute_append_replaces_last_entry() {
    let dir = tempfile::tempdir().unwrap();
    let log = HistoryLog::new(dir.path().join("history_log.json"));

    log.append(snapshot(at(1, 9, 0, 0), 60.0)).unwrap();
    log.append(snapshot(at(1, 10, 30, 5), 61.0)).unwrap();
    let outcome = log.append(snapshot(at(1, 10, 30, 48), 75.0)).unwrap();

    assert_eq!(outcome, AppendOutcome::Replaced);
    let entries = log.load_all();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1], snapshot(at(1, 10, 30, 48), 75.0));
}

#[test]
fn identical_timestamps_leave_one_entry_equal_to_second() {
    let dir = tempfile::tempdir().unwrap();
    let log = HistoryLog::new(dir.path().join("history_log.json"));

    log.append(snapshot(at(2, 8, 15, 0), 40.0)).unwrap();
    log.append(snapshot(at(2, 8, 15, 0), 45.0)).unwrap();

    assert_eq!(log.load_all(), vec![snapshot(at(2, 8, 15, 0), 45.0)]);
}

#[test]
fn older_snapshot_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let log = HistoryLog::new(dir.path().join("history_log.json"));

    log.append(snapshot(at(3, 12, 0, 0), 40.0)).unwrap();
    let err = log.append(snapshot(at(3, 11, 59, 0), 45.0)).unwrap_err();
    assert!(matches!(err, HistoryError::OutOfOrder { .. }));
    assert_eq!(log.load_all().len(), 1);
}

#[test]
fn persisted_shape_is_timestamp_and_scores_array() {
    let dir = tempfile::tempdir().unwrap();
    let log = HistoryLog::new(dir.path().join("history_log.json"));
    log.append(snapshot(at(4, 21, 5, 33), 72.5)).unwrap();

    let raw = fs::read_to_string(log.path()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {"timestamp": "2026-04-04 21:05", "scores": {"cognitive": 72.5, "execution": 50.0}}
        ])
    );
    assert!(!dir.path().join("history_log.json.tmp").exists());
}

#[test]
fn reads_history_written_by_other_tools() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history_log.json");
    fs::write(
        &path,
        r#"[
  {"timestamp": "2026-04-01 08:00", "scores": {"认知力": 60, "执行力": 55}},
  {"timestamp": "2026-04-02 08:00", "scores": {"认知力": 62, "执行力": 50}}
]"#,
    )
    .unwrap();

    let entries = HistoryLog::new(&path).load_all();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].scores["认知力"], 62.0);
}

#[test]
fn corrupt_file_degrades_to_empty_and_is_preserved_on_append() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history_log.json");
    fs::write(&path, "{ not json").unwrap();
    let log = HistoryLog::new(&path);

    assert!(matches!(log.read_state(), HistoryState::Corrupt { .. }));
    assert!(log.load_all().is_empty());
    assert!(log.last_two_distinct_days().is_none());

    log.append(snapshot(at(5, 9, 0, 0), 50.0)).unwrap();
    assert_eq!(log.load_all().len(), 1);
    assert_eq!(
        fs::read_to_string(dir.path().join("history_log.json.corrupt")).unwrap(),
        "{ not json"
    );
}

#[test]
fn invalid_timestamp_or_order_marks_history_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let bad_timestamp = dir.path().join("bad_timestamp.json");
    fs::write(&bad_timestamp, r#"[{"timestamp": "someday", "scores": {}}]"#).unwrap();
    assert!(HistoryLog::new(&bad_timestamp).load_all().is_empty());

    let out_of_order = dir.path().join("out_of_order.json");
    fs::write(
        &out_of_order,
        r#"[
  {"timestamp": "2026-04-02 08:00", "scores": {}},
  {"timestamp": "2026-04-01 08:00", "scores": {}}
]"#,
    )
    .unwrap();
    assert!(matches!(
        HistoryLog::new(&out_of_order).read_state(),
        HistoryState::Corrupt { .. }
    ));
}

#[test]
fn last_two_distinct_days_reads_persisted_log() {
    let dir = tempfile::tempdir().unwrap();
    let log = HistoryLog::new(dir.path().join("history_log.json"));
    log.append(snapshot(at(6, 8, 0, 0), 40.0)).unwrap();
    log.append(snapshot(at(6, 22, 0, 0), 44.0)).unwrap();
    log.append(snapshot(at(8, 7, 0, 0), 48.0)).unwrap();

    let pair = log.last_two_distinct_days().unwrap();
    assert_eq!(pair.previous_day, NaiveDate::from_ymd_opt(2026, 4, 6).unwrap());
    assert_eq!(pair.previous.scores["cognitive"], 44.0);
    assert_eq!(pair.current_day, NaiveDate::from_ymd_opt(2026, 4, 8).unwrap());
    assert_eq!(pair.current.scores["cognitive"], 48.0);
}
