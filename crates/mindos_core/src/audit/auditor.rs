//! Metadata integrity and goal/evidence audit passes.

use crate::audit::goal_table::GoalTableParser;
use crate::audit::keywords::EvidenceText;
use crate::config::{AuditConfig, ConfigValidationError, EngineConfig};
use crate::corpus::frontmatter::{self, FrontMatterStatus};
use crate::corpus::walker::{DocumentWalker, ScanWarning};
use crate::model::finding::AuditFinding;
use log::{info, warn};
use regex::Regex;
use serde::Serialize;
use std::path::Path;

/// Result of one full audit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditReport {
    pub findings: Vec<AuditFinding>,
    pub warnings: Vec<ScanWarning>,
}

impl AuditReport {
    /// The audit passes when no findings were reported.
    pub fn passed(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Findings summary keyed by finding code, for dashboards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuditSummary {
    pub missing_metadata: usize,
    pub malformed_metadata: usize,
    pub unmatched_goals: usize,
    pub no_activity_log: bool,
}

impl AuditSummary {
    pub fn from_findings(findings: &[AuditFinding]) -> Self {
        let mut summary = Self::default();
        for finding in findings {
            match finding {
                AuditFinding::MissingMetadata { .. } => summary.missing_metadata += 1,
                AuditFinding::MalformedMetadata { .. } => summary.malformed_metadata += 1,
                AuditFinding::UnmatchedGoal { .. } => summary.unmatched_goals += 1,
                AuditFinding::NoActivityLog => summary.no_activity_log = true,
            }
        }
        summary
    }
}

/// Runs both audit passes against a corpus root.
#[derive(Debug, Clone)]
pub struct ConsistencyAuditor {
    targets: Vec<String>,
    extension: String,
    rules: AuditConfig,
    gap_file_pattern: Regex,
    goal_parser: GoalTableParser,
}

impl ConsistencyAuditor {
    /// Builds an auditor from engine configuration.
    ///
    /// # Errors
    /// - `InvalidGapPattern` when the skill-gap file pattern does not compile.
    pub fn new(config: &EngineConfig) -> Result<Self, ConfigValidationError> {
        let gap_file_pattern = Regex::new(&config.audit.gap_file_pattern)
            .map_err(|err| ConfigValidationError::InvalidGapPattern(err.to_string()))?;

        Ok(Self {
            targets: config.target_directories(),
            extension: config.document_extension.clone(),
            rules: config.audit.clone(),
            gap_file_pattern,
            goal_parser: GoalTableParser::from_config(&config.audit),
        })
    }

    /// Runs the metadata pass, then the goal/evidence pass.
    pub fn audit(&self, root: &Path) -> AuditReport {
        let mut report = AuditReport::default();

        let (findings, warnings) = self.check_metadata(root);
        report.findings.extend(findings);
        report.warnings.extend(warnings);

        let (findings, warnings) = self.check_goals(root);
        report.findings.extend(findings);
        report.warnings.extend(warnings);

        info!(
            "event=audit_run module=audit status=ok findings={} warnings={} passed={}",
            report.findings.len(),
            report.warnings.len(),
            report.passed()
        );
        report
    }

    /// Metadata integrity pass; a no-op unless front matter is required.
    pub fn check_metadata(&self, root: &Path) -> (Vec<AuditFinding>, Vec<ScanWarning>) {
        let mut findings = Vec::new();
        if !self.rules.require_frontmatter {
            return (findings, Vec::new());
        }

        let walker = DocumentWalker::new(root, self.targets.iter().cloned(), &self.extension);
        let scan = walker.scan();
        for document in &scan.documents {
            let finding = match frontmatter::inspect(&document.raw_content) {
                FrontMatterStatus::Present(_) => continue,
                FrontMatterStatus::NotPresent => AuditFinding::MissingMetadata {
                    path: document.path.clone(),
                },
                FrontMatterStatus::Unterminated => AuditFinding::MalformedMetadata {
                    path: document.path.clone(),
                    detail: "front matter block is not closed".to_string(),
                },
                FrontMatterStatus::Empty => AuditFinding::MalformedMetadata {
                    path: document.path.clone(),
                    detail: "front matter block is empty".to_string(),
                },
                FrontMatterStatus::Malformed { detail } => AuditFinding::MalformedMetadata {
                    path: document.path.clone(),
                    detail,
                },
            };
            findings.push(finding);
        }

        (findings, scan.warnings)
    }

    /// Collects de-duplicated goals from every skill-gap plan.
    pub fn collect_goals(&self, root: &Path) -> (Vec<String>, Vec<ScanWarning>) {
        let walker = DocumentWalker::new(
            root,
            [self.rules.gap_directory.as_str()],
            &self.extension,
        );
        let scan = walker.scan();

        let mut goals: Vec<String> = Vec::new();
        for document in scan
            .documents
            .iter()
            .filter(|document| self.gap_file_pattern.is_match(document.file_name()))
        {
            for goal in self.goal_parser.parse(&document.raw_content) {
                if !goals.contains(&goal) {
                    goals.push(goal);
                }
            }
        }

        (goals, scan.warnings)
    }

    /// Goal/evidence pass.
    ///
    /// No goals -> no findings. Goals without an activity log -> exactly one
    /// `NoActivityLog`. Otherwise one `UnmatchedGoal` per unevidenced goal.
    pub fn check_goals(&self, root: &Path) -> (Vec<AuditFinding>, Vec<ScanWarning>) {
        let (goals, mut warnings) = self.collect_goals(root);
        if goals.is_empty() {
            return (Vec::new(), warnings);
        }

        let log_path = self.rules.activity_log.trim();
        let evidence = match std::fs::read_to_string(root.join(log_path)) {
            Ok(text) => EvidenceText::new(&text),
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    warnings.push(ScanWarning::Unreadable {
                        path: log_path.to_string(),
                        detail: err.to_string(),
                    });
                }
                warn!(
                    "event=audit_goals module=audit status=warn error_code=no_activity_log path={} goals={}",
                    log_path,
                    goals.len()
                );
                return (vec![AuditFinding::NoActivityLog], warnings);
            }
        };

        let findings = goals
            .into_iter()
            .filter(|goal| !evidence.evidences(goal))
            .map(|goal| AuditFinding::UnmatchedGoal { goal })
            .collect();
        (findings, warnings)
    }
}
