//! Checklist counting grouped by course.

use crate::corpus::frontmatter;
use crate::model::document::Document;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

/// Course assigned to top-level documents without a `course` field.
pub const DEFAULT_COURSE: &str = "General";
/// Front-matter key naming the course.
pub const COURSE_FIELD: &str = "course";

static CHECKBOX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*-\s*\[(\s?|[xX])\]").expect("valid checkbox regex"));

/// Checklist totals for one course.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChecklistProgress {
    pub total: usize,
    pub done: usize,
    pub files: usize,
}

impl ChecklistProgress {
    /// Completed fraction in `[0, 1]`; zero when there are no items.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.done as f64 / self.total as f64
    }
}

/// `(total, done)` checklist items in one text.
pub fn count_checkboxes(content: &str) -> (usize, usize) {
    CHECKBOX_RE
        .captures_iter(content)
        .fold((0, 0), |(total, done), captures| {
            let checked = captures
                .get(1)
                .is_some_and(|mark| mark.as_str().eq_ignore_ascii_case("x"));
            (total + 1, done + usize::from(checked))
        })
}

/// Course of a document: front-matter `course`, else parent directory name.
///
/// A parent directory whose name contains any of `excluded_parents` is a
/// collection folder, not a course, and yields [`DEFAULT_COURSE`].
pub fn course_of(document: &Document, excluded_parents: &[String]) -> String {
    if let Some(course) = frontmatter::extract(&document.raw_content)
        .and_then(|front_matter| front_matter.get_text(COURSE_FIELD).map(str::to_string))
    {
        return course;
    }

    document
        .parent_name()
        .filter(|parent| {
            !excluded_parents
                .iter()
                .any(|excluded| !excluded.is_empty() && parent.contains(excluded.as_str()))
        })
        .map(str::to_string)
        .unwrap_or_else(|| DEFAULT_COURSE.to_string())
}

/// Aggregates checklist progress per course.
pub fn checklist_progress<'d, I>(
    documents: I,
    excluded_parents: &[String],
) -> BTreeMap<String, ChecklistProgress>
where
    I: IntoIterator<Item = &'d Document>,
{
    let mut courses: BTreeMap<String, ChecklistProgress> = BTreeMap::new();
    for document in documents {
        let (total, done) = count_checkboxes(&document.raw_content);
        if total == 0 {
            continue;
        }
        let progress = courses
            .entry(course_of(document, excluded_parents))
            .or_default();
        progress.total += total;
        progress.done += done;
        progress.files += 1;
    }
    courses
}
