//! CLI probe for the Mind-OS engine.
//!
//! # Responsibility
//! - Run score, record, growth, progress and audit once against a corpus root.
//! - Keep output deterministic for quick local sanity checks.

use mindos_core::{
    default_log_level, init_logging, load_config, AuditSummary, EngineConfig, GrowthEngine,
    DEFAULT_CONFIG_PATH,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn main() -> ExitCode {
    let root = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    if let Some(log_dir) = log_dir_for(&root) {
        if let Err(err) = init_logging(default_log_level(), &log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let config_path = root.join(DEFAULT_CONFIG_PATH);
    let config = if config_path.exists() {
        match load_config(&config_path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("{err}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        EngineConfig::default()
    };

    let engine = match GrowthEngine::new(config) {
        Ok(engine) => engine,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    println!("mindos_core version={}", mindos_core::core_version());
    println!("root={}", root.display());

    let now = chrono::Local::now().naive_local();
    match engine.record_snapshot(&root, now) {
        Ok(recorded) => {
            for entry in &recorded.board.entries {
                println!(
                    "score dimension={} label={} value={:.2} samples={}",
                    entry.dimension, entry.label, entry.value, entry.sample_count
                );
            }
            println!(
                "history timestamp={} outcome={:?}",
                recorded.snapshot.timestamp_label(),
                recorded.outcome
            );
        }
        Err(err) => eprintln!("history not updated: {err}"),
    }

    if let Some(report) = engine.growth(&root) {
        println!("growth dates={}..{}", report.dates.0, report.dates.1);
        for (dimension, delta) in &report.deltas {
            println!("delta dimension={dimension} percent={delta:.2}");
        }
    }
    if let Some(focus) = engine.focus(&root) {
        println!(
            "focus dimension={} trend={:?} delta={:.2}",
            focus.dimension, focus.trend, focus.delta
        );
    }

    for (course, progress) in engine.checklist_progress(&root) {
        println!(
            "checklist course={course} done={} total={} files={}",
            progress.done, progress.total, progress.files
        );
    }
    for (course, time) in engine.study_time(&root) {
        println!(
            "study course={course} minutes={:.1} sessions={}",
            time.minutes, time.sessions
        );
    }

    let report = engine.audit(&root);
    for warning in &report.warnings {
        println!("warning {warning}");
    }
    for finding in &report.findings {
        println!("finding {finding}");
    }
    let summary = AuditSummary::from_findings(&report.findings);
    println!(
        "audit passed={} missing={} malformed={} unmatched={} no_activity_log={}",
        report.passed(),
        summary.missing_metadata,
        summary.malformed_metadata,
        summary.unmatched_goals,
        summary.no_activity_log
    );

    if report.passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn log_dir_for(root: &Path) -> Option<PathBuf> {
    let absolute = if root.is_absolute() {
        root.to_path_buf()
    } else {
        std::env::current_dir().ok()?.join(root)
    };
    Some(absolute.join(".mind_os").join("logs"))
}
