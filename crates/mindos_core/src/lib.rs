//! Core scoring and consistency audit engine for Mind-OS.
//! This crate is the single source of truth for growth-profile invariants.

pub mod audit;
pub mod config;
pub mod corpus;
pub mod growth;
pub mod history;
pub mod logging;
pub mod model;
pub mod progress;
pub mod scoring;
pub mod service;

pub use audit::auditor::{AuditReport, AuditSummary, ConsistencyAuditor};
pub use audit::goal_table::GoalTableParser;
pub use audit::keywords::{keyword_candidates, EvidenceText};
pub use config::{
    load_config, AuditConfig, ConfigError, ConfigResult, ConfigValidationError, DimensionSpec,
    EngineConfig, ProgressConfig, RadarConfig, DEFAULT_BASELINE, DEFAULT_CONFIG_PATH,
    DEFAULT_STUDY_LOG,
};
pub use corpus::frontmatter::{extract, inspect, FrontMatter, FrontMatterStatus, MetaValue};
pub use corpus::walker::{CorpusScan, DocumentWalker, ScanItem, ScanWarning};
pub use growth::delta::{
    compute_deltas, focus_dimension, growth_report, percent_change, FocusRecommendation,
    GrowthReport, Trend,
};
pub use history::store::{AppendOutcome, HistoryError, HistoryLog, HistoryResult, HistoryState};
pub use history::{daily_latest, last_two_distinct_days, DayPair};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::document::Document;
pub use model::finding::AuditFinding;
pub use model::score::{DimensionScore, ScoreBoard, ScoreSnapshot, TIMESTAMP_FORMAT};
pub use progress::checklist::{checklist_progress, count_checkboxes, course_of, ChecklistProgress};
pub use progress::study_time::{
    study_time_by_course, StudyLog, StudySession, StudyTime, UNCATEGORIZED_COURSE,
};
pub use scoring::aggregator::ScoreAggregator;
pub use scoring::strategy::{DimensionValueStrategy, NamedKeyStrategy, Sample, SampleStrategy};
pub use service::growth_engine::{EngineError, EngineResult, GrowthEngine, RecordedSnapshot};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
