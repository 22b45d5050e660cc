//! Engine configuration model and loader.
//!
//! # Responsibility
//! - Describe corpus layout, radar dimensions and audit rules as one explicit value.
//! - Load configuration from YAML and validate it before any engine use.
//!
//! # Invariants
//! - Every component receives configuration by value or reference at construction;
//!   there is no process-wide configuration state.
//! - A configuration that fails validation is never handed to the engine.
//!
//! # See also
//! - config/mind_os_config.yaml

use log::{error, info};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Neutral score assigned to dimensions without samples.
pub const DEFAULT_BASELINE: f64 = 50.0;
/// File extension of scanned documents.
pub const DEFAULT_DOCUMENT_EXTENSION: &str = "md";
/// Relative location of the persisted score history.
pub const DEFAULT_HISTORY_FILE: &str = "量化算法/history_log.json";
/// Relative location of the study-session log.
pub const DEFAULT_STUDY_LOG: &str = "量化算法/learning_log.json";
/// Conventional config location relative to the corpus root.
pub const DEFAULT_CONFIG_PATH: &str = "config/mind_os_config.yaml";

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration is unavailable: unreadable, unparsable or invalid.
///
/// Always fatal for the engine operation that requested it.
#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: Option<PathBuf>,
        message: String,
    },
    Invalid(ConfigValidationError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "config unavailable: cannot read `{}`: {source}", path.display())
            }
            Self::Parse {
                path: Some(path),
                message,
            } => write!(
                f,
                "config unavailable: cannot parse `{}`: {message}",
                path.display()
            ),
            Self::Parse {
                path: None,
                message,
            } => write!(f, "config unavailable: cannot parse: {message}"),
            Self::Invalid(err) => write!(f, "config unavailable: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse { .. } => None,
            Self::Invalid(err) => Some(err),
        }
    }
}

impl From<ConfigValidationError> for ConfigError {
    fn from(value: ConfigValidationError) -> Self {
        Self::Invalid(value)
    }
}

/// Declaration-level configuration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    NoDirectories,
    EmptyDirectoryPath(String),
    NoDimensions,
    EmptyDimensionName,
    DuplicateDimension(String),
    BaselineOutOfRange(String),
    EmptyExtension,
    EmptyHistoryFile,
    EmptyGapDirectory,
    InvalidGapPattern(String),
    EmptyGoalHeading,
    EmptyActivityLog,
    EmptyProgressDirectory,
    EmptyStudyLog,
}

impl Display for ConfigValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoDirectories => write!(f, "directories must not be empty"),
            Self::EmptyDirectoryPath(role) => {
                write!(f, "directory path for role `{role}` must not be empty")
            }
            Self::NoDimensions => write!(f, "radar dimensions must not be empty"),
            Self::EmptyDimensionName => write!(f, "radar dimension name must not be empty"),
            Self::DuplicateDimension(name) => {
                write!(f, "radar dimension is duplicated: {name}")
            }
            Self::BaselineOutOfRange(value) => {
                write!(f, "radar baseline must be within [0, 100], got {value}")
            }
            Self::EmptyExtension => write!(f, "document extension must not be empty"),
            Self::EmptyHistoryFile => write!(f, "history file path must not be empty"),
            Self::EmptyGapDirectory => write!(f, "audit gap directory must not be empty"),
            Self::InvalidGapPattern(message) => {
                write!(f, "audit gap file pattern is invalid: {message}")
            }
            Self::EmptyGoalHeading => write!(f, "audit goal heading must not be empty"),
            Self::EmptyActivityLog => write!(f, "audit activity log path must not be empty"),
            Self::EmptyProgressDirectory => write!(f, "progress directory must not be empty"),
            Self::EmptyStudyLog => write!(f, "progress study log path must not be empty"),
        }
    }
}

impl Error for ConfigValidationError {}

/// One competence axis on the radar.
///
/// `name` is the stable identifier used in score maps and history; `key` is the
/// display label (e.g. `认知力`) and doubles as a front-matter alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionSpec {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl DimensionSpec {
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: Some(key.into()),
        }
    }

    /// Creates a dimension whose label equals its name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: None,
        }
    }

    /// Display label, falling back to `name`.
    pub fn label(&self) -> &str {
        match self.key.as_deref() {
            Some(key) if !key.trim().is_empty() => key,
            _ => self.name.as_str(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarConfig {
    pub dimensions: Vec<DimensionSpec>,
    pub baseline: f64,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            dimensions: vec![
                DimensionSpec::new("cognitive", "认知力"),
                DimensionSpec::new("execution", "执行力"),
                DimensionSpec::new("emotional", "情感力"),
                DimensionSpec::new("social", "社交力"),
                DimensionSpec::new("creativity", "创造力"),
            ],
            baseline: DEFAULT_BASELINE,
        }
    }
}

/// Rules for the metadata and goal/evidence audit passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Whether every scanned document must carry valid front matter.
    pub require_frontmatter: bool,
    /// Directory (relative to root) holding skill-gap plans.
    pub gap_directory: String,
    /// Regex matched against skill-gap file names.
    pub gap_file_pattern: String,
    /// Heading text that introduces the goal table.
    pub goal_heading: String,
    /// Zero-based table column holding the goal text.
    pub goal_column: usize,
    /// Activity-log document (relative to root) used as evidence.
    pub activity_log: String,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            require_frontmatter: true,
            gap_directory: "无知地图".to_string(),
            gap_file_pattern: r"(?i)技能差距|skill[-_ ]?gap".to_string(),
            goal_heading: "行动计划".to_string(),
            goal_column: 1,
            activity_log: "深度觉察/行动日志.md".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    /// Directory (relative to root) scanned for checklists.
    pub directory: String,
    /// Parent-directory name fragments that never name a course; documents
    /// under such directories fall back to the default course.
    pub course_fallback_exclusions: Vec<String>,
    /// Study-session log (relative to root), a JSON array of sessions.
    pub study_log: String,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            directory: "知识画像".to_string(),
            course_fallback_exclusions: vec!["AI_Fullstack".to_string()],
            study_log: DEFAULT_STUDY_LOG.to_string(),
        }
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Role -> directory relative to the corpus root.
    pub directories: BTreeMap<String, String>,
    pub radar: RadarConfig,
    pub audit: AuditConfig,
    pub progress: ProgressConfig,
    /// History file relative to the corpus root.
    pub history_file: String,
    pub document_extension: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let directories = [
            ("knowledge", "知识画像"),
            ("psychology", "心理画像"),
            ("algorithms", "量化算法"),
            ("awareness", "深度觉察"),
            ("gaps", "无知地图"),
        ]
        .into_iter()
        .map(|(role, path)| (role.to_string(), path.to_string()))
        .collect();

        Self {
            directories,
            radar: RadarConfig::default(),
            audit: AuditConfig::default(),
            progress: ProgressConfig::default(),
            history_file: DEFAULT_HISTORY_FILE.to_string(),
            document_extension: DEFAULT_DOCUMENT_EXTENSION.to_string(),
        }
    }
}

impl EngineConfig {
    /// Parses YAML text into a validated configuration.
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|err| ConfigError::Parse {
            path: None,
            message: err.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Target directories in deterministic role order, de-duplicated.
    pub fn target_directories(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        self.directories
            .values()
            .map(|path| path.trim().to_string())
            .filter(|path| seen.insert(path.clone()))
            .collect()
    }

    /// Absolute location of the history file for `root`.
    pub fn history_path(&self, root: &Path) -> PathBuf {
        root.join(self.history_file.trim())
    }

    /// Absolute location of the study-session log for `root`.
    pub fn study_log_path(&self, root: &Path) -> PathBuf {
        root.join(self.progress.study_log.trim())
    }

    /// Validates declaration-level invariants.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.directories.is_empty() {
            return Err(ConfigValidationError::NoDirectories);
        }
        for (role, path) in &self.directories {
            if path.trim().is_empty() {
                return Err(ConfigValidationError::EmptyDirectoryPath(role.clone()));
            }
        }

        if self.radar.dimensions.is_empty() {
            return Err(ConfigValidationError::NoDimensions);
        }
        let mut dedup = BTreeSet::<String>::new();
        for dimension in &self.radar.dimensions {
            let name = dimension.name.trim();
            if name.is_empty() {
                return Err(ConfigValidationError::EmptyDimensionName);
            }
            if !dedup.insert(name.to_string()) {
                return Err(ConfigValidationError::DuplicateDimension(name.to_string()));
            }
        }
        let baseline = self.radar.baseline;
        if !baseline.is_finite() || !(0.0..=100.0).contains(&baseline) {
            return Err(ConfigValidationError::BaselineOutOfRange(baseline.to_string()));
        }

        if self.document_extension.trim().trim_start_matches('.').is_empty() {
            return Err(ConfigValidationError::EmptyExtension);
        }
        if self.history_file.trim().is_empty() {
            return Err(ConfigValidationError::EmptyHistoryFile);
        }

        if self.audit.gap_directory.trim().is_empty() {
            return Err(ConfigValidationError::EmptyGapDirectory);
        }
        if let Err(err) = Regex::new(&self.audit.gap_file_pattern) {
            return Err(ConfigValidationError::InvalidGapPattern(err.to_string()));
        }
        if self.audit.goal_heading.trim().is_empty() {
            return Err(ConfigValidationError::EmptyGoalHeading);
        }
        if self.audit.activity_log.trim().is_empty() {
            return Err(ConfigValidationError::EmptyActivityLog);
        }

        if self.progress.directory.trim().is_empty() {
            return Err(ConfigValidationError::EmptyProgressDirectory);
        }
        if self.progress.study_log.trim().is_empty() {
            return Err(ConfigValidationError::EmptyStudyLog);
        }

        Ok(())
    }
}

/// Reads, parses and validates a YAML configuration file.
///
/// # Errors
/// - `ConfigError::Read` when the file cannot be read.
/// - `ConfigError::Parse` when the YAML does not match the schema.
/// - `ConfigError::Invalid` when validation fails.
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<EngineConfig> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| {
        error!(
            "event=config_load module=config status=error error_code=config_read_failed path={} error={}",
            path.display(),
            source
        );
        ConfigError::Read {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let config = EngineConfig::from_yaml_str(&raw).map_err(|err| {
        error!(
            "event=config_load module=config status=error error_code=config_invalid path={} error={}",
            path.display(),
            err
        );
        match err {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: Some(path.to_path_buf()),
                message,
            },
            other => other,
        }
    })?;

    info!(
        "event=config_load module=config status=ok path={} directories={} dimensions={}",
        path.display(),
        config.directories.len(),
        config.radar.dimensions.len()
    );
    Ok(config)
}
