//! Keyword candidates for goal/evidence matching.

use once_cell::sync::Lazy;
use regex::Regex;

static KEYWORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\p{Han}{2,}|[A-Za-z]{2,}").expect("valid keyword regex"));

/// Runs of CJK ideographs or Latin letters of length >= 2, de-duplicated in order.
pub fn keyword_candidates(goal: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for found in KEYWORD_RE.find_iter(goal) {
        let keyword = found.as_str().to_string();
        if !keywords.contains(&keyword) {
            keywords.push(keyword);
        }
    }
    keywords
}

/// Activity-log text prepared for case-insensitive lookups.
#[derive(Debug, Clone)]
pub struct EvidenceText {
    folded: String,
}

impl EvidenceText {
    pub fn new(text: &str) -> Self {
        Self {
            folded: text.to_lowercase(),
        }
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.folded.contains(keyword.to_lowercase().as_str())
    }

    /// A goal is evidenced when any single candidate keyword occurs.
    pub fn evidences(&self, goal: &str) -> bool {
        keyword_candidates(goal)
            .iter()
            .any(|keyword| self.contains(keyword))
    }
}
