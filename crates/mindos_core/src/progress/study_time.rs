//! Study time totals from the session log.
//!
//! # Responsibility
//! - Read the JSON array of study sessions and sum minutes per course.
//!
//! # Invariants
//! - Read-only: sessions are recorded by other tools, never by the engine.
//! - A missing or corrupt log reads as empty; corruption is logged, not returned.

use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Course assigned to sessions without a `course` field.
pub const UNCATEGORIZED_COURSE: &str = "Uncategorized";

/// One recorded study session; unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StudySession {
    #[serde(default)]
    pub course: Option<String>,
    #[serde(default)]
    pub duration_minutes: Option<f64>,
}

impl StudySession {
    pub fn course(&self) -> &str {
        self.course
            .as_deref()
            .map(str::trim)
            .filter(|course| !course.is_empty())
            .unwrap_or(UNCATEGORIZED_COURSE)
    }

    /// Session length in minutes; absent or non-finite values count as zero.
    pub fn minutes(&self) -> f64 {
        self.duration_minutes
            .filter(|minutes| minutes.is_finite())
            .unwrap_or(0.0)
    }
}

/// Accumulated study time for one course.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StudyTime {
    pub minutes: f64,
    pub sessions: usize,
}

/// Read-only view over the study-session log file.
#[derive(Debug, Clone)]
pub struct StudyLog {
    path: PathBuf,
}

impl StudyLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every session in file order; missing or corrupt logs yield an empty list.
    pub fn load_sessions(&self) -> Vec<StudySession> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                self.warn_corrupt(&format!("unreadable: {err}"));
                return Vec::new();
            }
        };
        if raw.trim().is_empty() {
            return Vec::new();
        }

        match serde_json::from_str(&raw) {
            Ok(sessions) => sessions,
            Err(err) => {
                self.warn_corrupt(&format!("invalid json: {err}"));
                Vec::new()
            }
        }
    }

    /// Total minutes and session count per course.
    pub fn time_by_course(&self) -> BTreeMap<String, StudyTime> {
        study_time_by_course(&self.load_sessions())
    }

    fn warn_corrupt(&self, detail: &str) {
        warn!(
            "event=study_log_load module=progress status=warn error_code=study_log_corrupt path={} detail={}",
            self.path.display(),
            detail
        );
    }
}

/// Sums session minutes per course.
pub fn study_time_by_course(sessions: &[StudySession]) -> BTreeMap<String, StudyTime> {
    let mut courses: BTreeMap<String, StudyTime> = BTreeMap::new();
    for session in sessions {
        let total = courses.entry(session.course().to_string()).or_default();
        total.minutes += session.minutes();
        total.sessions += 1;
    }
    courses
}
