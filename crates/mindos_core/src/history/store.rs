//! File-backed append-only score history.
//!
//! # Responsibility
//! - Persist score snapshots as a JSON array.
//! - Replace the last entry when a snapshot arrives within the same minute.
//! - Degrade to an empty history when persisted state is corrupt.
//!
//! # Invariants
//! - Persisted timestamps are non-decreasing.
//! - Writes go to a sibling temporary file which is then renamed over the target.
//! - A corrupt file is moved aside to `<file>.corrupt` before being overwritten.

use crate::history::{last_two_distinct_days, DayPair};
use crate::model::score::ScoreSnapshot;
use chrono::NaiveDateTime;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

pub type HistoryResult<T> = Result<T, HistoryError>;

/// Failure while writing score history.
#[derive(Debug)]
pub enum HistoryError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Encode(serde_json::Error),
    /// Incoming snapshot is older than the last persisted entry.
    OutOfOrder {
        last: NaiveDateTime,
        incoming: NaiveDateTime,
    },
}

impl Display for HistoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "history io failure at `{}`: {source}", path.display())
            }
            Self::Encode(err) => write!(f, "history encode failure: {err}"),
            Self::OutOfOrder { last, incoming } => write!(
                f,
                "snapshot at {incoming} is older than last history entry at {last}"
            ),
        }
    }
}

impl Error for HistoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Encode(err) => Some(err),
            Self::OutOfOrder { .. } => None,
        }
    }
}

impl From<serde_json::Error> for HistoryError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Persisted history as found on disk.
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryState {
    Missing,
    Loaded(Vec<ScoreSnapshot>),
    Corrupt { detail: String },
}

/// How an append changed the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    Appended,
    /// Same-minute entry replaced in place.
    Replaced,
}

/// History log stored at one JSON file path.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    path: PathBuf,
}

impl HistoryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and classifies the persisted state without side effects.
    pub fn read_state(&self) -> HistoryState {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return HistoryState::Missing,
            Err(err) => {
                return HistoryState::Corrupt {
                    detail: format!("unreadable: {err}"),
                }
            }
        };

        if raw.trim().is_empty() {
            return HistoryState::Loaded(Vec::new());
        }

        let entries: Vec<ScoreSnapshot> = match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(err) => {
                return HistoryState::Corrupt {
                    detail: format!("invalid json: {err}"),
                }
            }
        };

        if let Some(pair) = entries
            .windows(2)
            .find(|pair| pair[1].timestamp < pair[0].timestamp)
        {
            return HistoryState::Corrupt {
                detail: format!("entries out of order at {}", pair[1].timestamp_label()),
            };
        }

        HistoryState::Loaded(entries)
    }

    /// Loads every snapshot in order; corrupt or missing state yields an empty list.
    pub fn load_all(&self) -> Vec<ScoreSnapshot> {
        match self.read_state() {
            HistoryState::Missing => Vec::new(),
            HistoryState::Loaded(entries) => entries,
            HistoryState::Corrupt { detail } => {
                warn!(
                    "event=history_load module=history status=warn error_code=history_corrupt path={} detail={}",
                    self.path.display(),
                    detail
                );
                Vec::new()
            }
        }
    }

    /// Appends `snapshot`, or replaces the last entry when timestamps are equal.
    ///
    /// # Errors
    /// - `OutOfOrder` when `snapshot` is older than the last entry.
    /// - `Io` / `Encode` when persistence fails; the previous file stays intact.
    pub fn append(&self, snapshot: ScoreSnapshot) -> HistoryResult<AppendOutcome> {
        let mut entries = match self.read_state() {
            HistoryState::Missing => Vec::new(),
            HistoryState::Loaded(entries) => entries,
            HistoryState::Corrupt { detail } => {
                warn!(
                    "event=history_append module=history status=warn error_code=history_corrupt path={} detail={}",
                    self.path.display(),
                    detail
                );
                self.preserve_corrupt_file()?;
                Vec::new()
            }
        };

        let outcome = match entries.last() {
            Some(last) if last.timestamp == snapshot.timestamp => AppendOutcome::Replaced,
            Some(last) if last.timestamp > snapshot.timestamp => {
                return Err(HistoryError::OutOfOrder {
                    last: last.timestamp,
                    incoming: snapshot.timestamp,
                });
            }
            _ => AppendOutcome::Appended,
        };

        let timestamp = snapshot.timestamp_label();
        match outcome {
            AppendOutcome::Replaced => {
                if let Some(last) = entries.last_mut() {
                    *last = snapshot;
                }
            }
            AppendOutcome::Appended => entries.push(snapshot),
        }

        if let Err(err) = self.write_entries(&entries) {
            error!(
                "event=history_append module=history status=error path={} error={}",
                self.path.display(),
                err
            );
            return Err(err);
        }

        info!(
            "event=history_append module=history status=ok path={} timestamp={} outcome={:?} entries={}",
            self.path.display(),
            timestamp,
            outcome,
            entries.len()
        );
        Ok(outcome)
    }

    /// Current and previous day snapshots from the persisted log.
    pub fn last_two_distinct_days(&self) -> Option<DayPair> {
        last_two_distinct_days(&self.load_all())
    }

    fn write_entries(&self, entries: &[ScoreSnapshot]) -> HistoryResult<()> {
        let encoded = serde_json::to_vec_pretty(entries)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
            }
        }

        let temp_path = self.sibling_path("tmp");
        if let Err(source) = write_synced(&temp_path, &encoded) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(HistoryError::Io {
                path: temp_path,
                source,
            });
        }

        std::fs::rename(&temp_path, &self.path).map_err(|source| self.io_error(source))
    }

    fn preserve_corrupt_file(&self) -> HistoryResult<()> {
        if !self.path.exists() {
            return Ok(());
        }
        let backup = self.sibling_path("corrupt");
        std::fs::rename(&self.path, &backup).map_err(|source| HistoryError::Io {
            path: backup.clone(),
            source,
        })?;
        warn!(
            "event=history_preserve module=history status=warn path={} backup={}",
            self.path.display(),
            backup.display()
        );
        Ok(())
    }

    fn sibling_path(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".");
        name.push(suffix);
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: std::io::Error) -> HistoryError {
        HistoryError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}
