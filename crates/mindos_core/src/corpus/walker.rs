//! Recursive document discovery under configured corpus directories.
//!
//! # Responsibility
//! - Lazily yield documents with one file extension under each target directory.
//! - Report missing directories and unreadable files as warnings.
//!
//! # Invariants
//! - Traversal is read-only and restartable: every `walk()` starts a fresh scan.
//! - Order is deterministic: configured directory order, then file name order.
//! - A missing directory or bad file never stops the remaining scan.
//! - Hidden entries (`.git`, `.mind_os`, ...) below a target are skipped.
//! - Symlinks are followed; broken links and link cycles surface as warnings.

use crate::model::document::Document;
use log::warn;
use std::error::Error;
use std::ffi::OsStr;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, FilterEntry, WalkDir};

type EntryFilter = fn(&DirEntry) -> bool;

/// Non-fatal condition met while scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanWarning {
    /// Configured target directory does not exist.
    DirectoryMissing { directory: String },
    /// File could not be read as UTF-8 text.
    Unreadable { path: String, detail: String },
}

impl Display for ScanWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DirectoryMissing { directory } => {
                write!(f, "directory `{directory}` not found; skipped")
            }
            Self::Unreadable { path, detail } => write!(f, "cannot read `{path}`: {detail}"),
        }
    }
}

impl Error for ScanWarning {}

/// Item produced by a walk: a document or a warning.
pub type ScanItem = Result<Document, ScanWarning>;

/// Eagerly collected scan result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorpusScan {
    pub documents: Vec<Document>,
    pub warnings: Vec<ScanWarning>,
}

/// Walks target directories below a corpus root.
#[derive(Debug, Clone)]
pub struct DocumentWalker {
    root: PathBuf,
    targets: Vec<String>,
    extension: String,
}

impl DocumentWalker {
    /// Creates a walker; duplicate and blank targets are dropped.
    pub fn new<I, S>(root: impl Into<PathBuf>, targets: I, extension: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for target in targets {
            let target = target.into().trim().trim_matches('/').to_string();
            if !target.is_empty() && !unique.contains(&target) {
                unique.push(target);
            }
        }

        Self {
            root: root.into(),
            targets: unique,
            extension: extension.trim().trim_start_matches('.').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    /// Starts a new lazy traversal.
    pub fn walk(&self) -> DocumentWalk<'_> {
        DocumentWalk {
            walker: self,
            pending: self.targets.iter(),
            current: None,
        }
    }

    /// Runs a full traversal and splits documents from warnings.
    pub fn scan(&self) -> CorpusScan {
        let mut scan = CorpusScan::default();
        for item in self.walk() {
            match item {
                Ok(document) => scan.documents.push(document),
                Err(warning) => scan.warnings.push(warning),
            }
        }
        scan
    }

    fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.extension))
    }

    fn relative_path(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        relative
            .components()
            .map(|component| component.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    fn read_document(&self, path: &Path) -> ScanItem {
        let relative = self.relative_path(path);
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Document::new(relative, content)),
            Err(err) => {
                warn!(
                    "event=document_read module=corpus status=warn path={} error={}",
                    relative, err
                );
                Err(ScanWarning::Unreadable {
                    path: relative,
                    detail: err.to_string(),
                })
            }
        }
    }
}

/// Lazy iterator returned by [`DocumentWalker::walk`].
pub struct DocumentWalk<'a> {
    walker: &'a DocumentWalker,
    pending: std::slice::Iter<'a, String>,
    current: Option<FilterEntry<walkdir::IntoIter, EntryFilter>>,
}

impl Iterator for DocumentWalk<'_> {
    type Item = ScanItem;

    fn next(&mut self) -> Option<Self::Item> {
        let walker = self.walker;
        loop {
            if let Some(entries) = self.current.as_mut() {
                match entries.next() {
                    Some(Ok(entry)) => {
                        if entry.file_type().is_file() && walker.matches_extension(entry.path()) {
                            return Some(walker.read_document(entry.path()));
                        }
                        continue;
                    }
                    Some(Err(err)) => {
                        let path = err
                            .path()
                            .map(|path| walker.relative_path(path))
                            .unwrap_or_default();
                        warn!(
                            "event=document_walk module=corpus status=warn path={} error={}",
                            path, err
                        );
                        return Some(Err(ScanWarning::Unreadable {
                            path,
                            detail: err.to_string(),
                        }));
                    }
                    None => self.current = None,
                }
            }

            let directory = self.pending.next()?;
            let full_path = walker.root.join(directory);
            if !full_path.is_dir() {
                warn!(
                    "event=directory_scan module=corpus status=warn error_code=directory_missing directory={}",
                    directory
                );
                return Some(Err(ScanWarning::DirectoryMissing {
                    directory: directory.clone(),
                }));
            }

            self.current = Some(
                WalkDir::new(full_path)
                    .follow_links(true)
                    .sort_by_file_name()
                    .into_iter()
                    .filter_entry(is_visible as EntryFilter),
            );
        }
    }
}

fn is_visible(entry: &DirEntry) -> bool {
    entry.depth() == 0
        || !entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}
