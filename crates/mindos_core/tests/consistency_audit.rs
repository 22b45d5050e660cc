use mindos_core::{AuditFinding, ConsistencyAuditor, EngineConfig, ScanWarning};
use std::fs;
use std::path::Path;

const PLAN: &str = "\
---
type: gap_analysis
---
# 技能差距

## 行动计划
| 差距 | 行动 | 截止 |
| --- | --- | --- |
| 基础薄弱 | 学习 Python 基础 | 6月 |
";

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn goals_only() -> ConsistencyAuditor {
    let mut config = EngineConfig::default();
    config.audit.require_frontmatter = false;
    ConsistencyAuditor::new(&config).unwrap()
}

#[test]
fn goal_with_keyword_in_log_is_evidenced() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "无知地图/技能差距.md", PLAN);
    write(dir.path(), "深度觉察/行动日志.md", "今天学习了");

    let report = goals_only().audit(dir.path());
    assert!(report.passed());
    assert!(report.findings.is_empty());
}

#[test]
fn goal_without_evidence_yields_one_finding() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "无知地图/技能差距.md", PLAN);
    write(dir.path(), "深度觉察/行动日志.md", "跑步五公里，早睡");

    let report = goals_only().audit(dir.path());
    assert_eq!(
        report.findings,
        vec![AuditFinding::UnmatchedGoal {
            goal: "学习 Python 基础".to_string()
        }]
    );
    assert!(!report.passed());
}

#[test]
fn english_keywords_match_case_insensitively() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "无知地图/skill_gap.md",
        "## 行动计划\n| 差距 | 行动 |\n|---|---|\n| x | Read Rust book |\n",
    );
    write(dir.path(), "深度觉察/行动日志.md", "finished a RUST chapter");

    assert!(goals_only().audit(dir.path()).passed());
}

#[test]
fn goals_without_activity_log_yield_single_finding() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "无知地图/技能差距.md", PLAN);
    write(
        dir.path(),
        "无知地图/技能差距-2.md",
        "## 行动计划\n| 差距 | 行动 |\n|---|---|\n| x | 复习 Java 并发 |\n",
    );

    let report = goals_only().audit(dir.path());
    assert_eq!(report.findings, vec![AuditFinding::NoActivityLog]);
}

#[test]
fn no_goals_means_no_goal_findings() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "无知地图/其他笔记.md", PLAN);

    let report = goals_only().audit(dir.path());
    assert!(report.findings.is_empty());
    assert!(report
        .warnings
        .iter()
        .all(|warning| matches!(warning, ScanWarning::DirectoryMissing { .. })));
}

#[test]
fn duplicate_goals_are_reported_once() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "无知地图/技能差距-a.md", PLAN);
    write(dir.path(), "无知地图/技能差距-b.md", PLAN);
    write(dir.path(), "深度觉察/行动日志.md", "nothing relevant");

    let auditor = goals_only();
    let (goals, _) = auditor.collect_goals(dir.path());
    assert_eq!(goals, vec!["学习 Python 基础"]);
    assert_eq!(auditor.audit(dir.path()).findings.len(), 1);
}

#[test]
fn metadata_pass_reports_missing_and_malformed_front_matter() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "知识画像/a_ok.md", "---\ntype: note\n---\nbody");
    write(dir.path(), "知识画像/b_missing.md", "no front matter");
    write(dir.path(), "知识画像/c_empty.md", "---\n---\nbody");
    write(dir.path(), "知识画像/d_open.md", "---\ntype: note\nbody");

    let auditor = ConsistencyAuditor::new(&EngineConfig::default()).unwrap();
    let (findings, _) = auditor.check_metadata(dir.path());

    assert_eq!(
        findings,
        vec![
            AuditFinding::MissingMetadata {
                path: "知识画像/b_missing.md".to_string()
            },
            AuditFinding::MalformedMetadata {
                path: "知识画像/c_empty.md".to_string(),
                detail: "front matter block is empty".to_string()
            },
            AuditFinding::MalformedMetadata {
                path: "知识画像/d_open.md".to_string(),
                detail: "front matter block is not closed".to_string()
            },
        ]
    );
}

#[test]
fn metadata_pass_is_skipped_when_not_required() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "知识画像/missing.md", "no front matter");

    let (findings, warnings) = goals_only().check_metadata(dir.path());
    assert!(findings.is_empty());
    assert!(warnings.is_empty());
}
