//! Audit finding variants reported by the consistency auditor.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// One consistency problem detected in the corpus.
///
/// Serialized with a `kind` tag so dashboards can render findings without
/// matching on display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuditFinding {
    /// Front matter is required but the document has none.
    MissingMetadata { path: String },
    /// A front-matter block was opened but is unusable.
    MalformedMetadata { path: String, detail: String },
    /// A declared goal has no keyword evidence in the activity log.
    UnmatchedGoal { goal: String },
    /// Goals exist but the activity log document is absent.
    NoActivityLog,
}

impl AuditFinding {
    /// Stable machine-readable code, used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingMetadata { .. } => "missing_metadata",
            Self::MalformedMetadata { .. } => "malformed_metadata",
            Self::UnmatchedGoal { .. } => "unmatched_goal",
            Self::NoActivityLog => "no_activity_log",
        }
    }
}

impl Display for AuditFinding {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingMetadata { path } => write!(f, "{path}: missing front matter"),
            Self::MalformedMetadata { path, detail } => {
                write!(f, "{path}: malformed front matter ({detail})")
            }
            Self::UnmatchedGoal { goal } => {
                write!(f, "goal has no evidence in activity log: {goal}")
            }
            Self::NoActivityLog => write!(f, "goals declared but activity log is missing"),
        }
    }
}
