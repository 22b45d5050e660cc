//! Document record produced by the corpus walker.

use serde::{Deserialize, Serialize};

/// One text document read from the note corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Path relative to the corpus root, `/`-separated.
    pub path: String,
    /// Full UTF-8 file content.
    pub raw_content: String,
}

impl Document {
    pub fn new(path: impl Into<String>, raw_content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            raw_content: raw_content.into(),
        }
    }

    /// Final path segment.
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(self.path.as_str())
    }

    /// Name of the directory directly containing this document, if any.
    pub fn parent_name(&self) -> Option<&str> {
        let mut segments = self.path.rsplit('/');
        segments.next();
        segments.next().filter(|segment| !segment.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::Document;

    #[test]
    fn file_and_parent_names_follow_relative_path() {
        let doc = Document::new("知识画像/Python/基础.md", "");
        assert_eq!(doc.file_name(), "基础.md");
        assert_eq!(doc.parent_name(), Some("Python"));

        let top_level = Document::new("readme.md", "");
        assert_eq!(top_level.file_name(), "readme.md");
        assert_eq!(top_level.parent_name(), None);
    }
}
