//! Growth engine use-case service.
//!
//! # Responsibility
//! - Wire walker, aggregator, history, growth and audit into corpus-level calls.
//! - Resolve every corpus-relative location against a caller-supplied root.
//!
//! # Invariants
//! - The engine holds only validated configuration and no other state.
//! - Scans never fail on a single bad document; only history writes return errors.

use crate::audit::auditor::{AuditReport, ConsistencyAuditor};
use crate::config::{ConfigError, ConfigResult, EngineConfig};
use crate::corpus::walker::{CorpusScan, DocumentWalker};
use crate::growth::delta::{focus_dimension, growth_report, FocusRecommendation, GrowthReport};
use crate::history::store::{AppendOutcome, HistoryError, HistoryLog};
use crate::model::score::{ScoreBoard, ScoreSnapshot};
use crate::progress::checklist::{checklist_progress, ChecklistProgress};
use crate::progress::study_time::{StudyLog, StudyTime};
use crate::scoring::aggregator::ScoreAggregator;
use chrono::NaiveDateTime;
use log::{info, warn};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::time::Instant;

pub type EngineResult<T> = Result<T, EngineError>;

/// Engine-level error for operations that can fail.
#[derive(Debug)]
pub enum EngineError {
    Config(ConfigError),
    History(HistoryError),
}

impl Display for EngineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::History(err) => write!(f, "{err}"),
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::History(err) => Some(err),
        }
    }
}

impl From<ConfigError> for EngineError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<HistoryError> for EngineError {
    fn from(value: HistoryError) -> Self {
        Self::History(value)
    }
}

/// Outcome of scoring the corpus and persisting a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedSnapshot {
    pub board: ScoreBoard,
    pub snapshot: ScoreSnapshot,
    pub outcome: AppendOutcome,
}

/// Facade over the scoring and consistency audit engine.
#[derive(Debug, Clone)]
pub struct GrowthEngine {
    config: EngineConfig,
    auditor: ConsistencyAuditor,
}

impl GrowthEngine {
    /// Creates an engine from configuration, validating it first.
    ///
    /// # Errors
    /// - `ConfigError::Invalid` when validation fails.
    pub fn new(config: EngineConfig) -> ConfigResult<Self> {
        config.validate()?;
        let auditor = ConsistencyAuditor::new(&config)?;
        Ok(Self { config, auditor })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Walker over all configured target directories of `root`.
    pub fn walker(&self, root: &Path) -> DocumentWalker {
        DocumentWalker::new(
            root,
            self.config.target_directories(),
            &self.config.document_extension,
        )
    }

    /// Full scan of the configured directories.
    pub fn scan(&self, root: &Path) -> CorpusScan {
        let scan = self.walker(root).scan();
        for warning in &scan.warnings {
            warn!("event=corpus_scan module=engine status=warn warning={}", warning);
        }
        scan
    }

    /// Current scores with per-dimension provenance.
    pub fn score(&self, root: &Path) -> ScoreBoard {
        let started_at = Instant::now();
        let scan = self.scan(root);
        let board = ScoreAggregator::from_config(&self.config.radar).aggregate(&scan.documents);
        info!(
            "event=score_corpus module=engine status=ok documents={} measured={} dimensions={} duration_ms={}",
            scan.documents.len(),
            board.measured_count(),
            board.entries.len(),
            started_at.elapsed().as_millis()
        );
        board
    }

    pub fn history(&self, root: &Path) -> HistoryLog {
        HistoryLog::new(self.config.history_path(root))
    }

    /// Scores the corpus and records the result at `at` (minute precision).
    ///
    /// # Errors
    /// - `HistoryError` when the snapshot cannot be persisted.
    pub fn record_snapshot(
        &self,
        root: &Path,
        at: NaiveDateTime,
    ) -> EngineResult<RecordedSnapshot> {
        let board = self.score(root);
        let snapshot = ScoreSnapshot::new(at, board.scores());
        let outcome = self.history(root).append(snapshot.clone())?;
        Ok(RecordedSnapshot {
            board,
            snapshot,
            outcome,
        })
    }

    /// Growth report from persisted history; `None` when no history exists.
    pub fn growth(&self, root: &Path) -> Option<GrowthReport> {
        growth_report(&self.history(root).load_all(), self.config.radar.baseline)
    }

    /// Recommended focus dimension based on recorded growth.
    pub fn focus(&self, root: &Path) -> Option<FocusRecommendation> {
        self.growth(root).as_ref().and_then(focus_dimension)
    }

    pub fn audit(&self, root: &Path) -> AuditReport {
        self.auditor.audit(root)
    }

    /// Checklist progress per course in the configured progress directory.
    pub fn checklist_progress(&self, root: &Path) -> BTreeMap<String, ChecklistProgress> {
        let walker = DocumentWalker::new(
            root,
            [self.config.progress.directory.as_str()],
            &self.config.document_extension,
        );
        let scan = walker.scan();
        checklist_progress(
            &scan.documents,
            &self.config.progress.course_fallback_exclusions,
        )
    }

    pub fn study_log(&self, root: &Path) -> StudyLog {
        StudyLog::new(self.config.study_log_path(root))
    }

    /// Recorded study minutes per course; empty when the log is missing or corrupt.
    pub fn study_time(&self, root: &Path) -> BTreeMap<String, StudyTime> {
        self.study_log(root).time_by_course()
    }
}
