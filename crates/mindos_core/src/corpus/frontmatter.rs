//! Leading front-matter block extraction.
//!
//! # Responsibility
//! - Detect a `---` delimited block at the start of a document.
//! - Parse the enclosed YAML into a flat key/value mapping.
//! - Classify why a document has no usable metadata.
//!
//! # Invariants
//! - Front matter is either fully parsed or treated as absent; partial
//!   mappings are never returned.
//! - An opened but unterminated block is absent for extraction and
//!   `Unterminated` for classification.

use serde_yaml::Value;
use std::collections::BTreeMap;

/// Opening and closing marker line.
pub const FRONT_MATTER_DELIMITER: &str = "---";

/// Scalar or nested value stored in front matter.
#[derive(Debug, Clone, PartialEq)]
pub enum MetaValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<MetaValue>),
    Table(BTreeMap<String, MetaValue>),
}

impl MetaValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Numeric view; numeric strings such as `"72.5"` are accepted.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(value) => value.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    fn from_yaml(value: Value) -> Result<Self, String> {
        Ok(match value {
            Value::Null => Self::Null,
            Value::Bool(flag) => Self::Bool(flag),
            Value::Number(number) => match number.as_f64() {
                Some(value) => Self::Number(value),
                None => Self::Text(number.to_string()),
            },
            Value::String(text) => Self::Text(text),
            Value::Sequence(items) => Self::List(
                items
                    .into_iter()
                    .map(Self::from_yaml)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            Value::Mapping(mapping) => Self::Table(convert_mapping(mapping)?),
            Value::Tagged(tagged) => Self::from_yaml(tagged.value)?,
        })
    }
}

/// Parsed front-matter mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    entries: BTreeMap<String, MetaValue>,
}

impl FrontMatter {
    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.entries.get(key)
    }

    /// Trimmed, non-empty text value for `key`.
    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(MetaValue::as_text)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    pub fn get_number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(MetaValue::as_number)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &MetaValue)> {
        self.entries.iter()
    }
}

impl FromIterator<(String, MetaValue)> for FrontMatter {
    fn from_iter<T: IntoIterator<Item = (String, MetaValue)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Detailed front-matter classification for one document.
#[derive(Debug, Clone, PartialEq)]
pub enum FrontMatterStatus {
    /// Valid, non-empty mapping.
    Present(FrontMatter),
    /// Block opens and closes but holds no keys.
    Empty,
    /// Document does not start with a delimiter line.
    NotPresent,
    /// Opening delimiter without a closing one.
    Unterminated,
    /// Block content is not a valid key/value mapping.
    Malformed { detail: String },
}

impl FrontMatterStatus {
    pub fn into_front_matter(self) -> Option<FrontMatter> {
        match self {
            Self::Present(front_matter) => Some(front_matter),
            _ => None,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }
}

/// Returns the parsed front matter, or `None` for every non-present status.
pub fn extract(content: &str) -> Option<FrontMatter> {
    inspect(content).into_front_matter()
}

/// Classifies the leading metadata block of `content`.
pub fn inspect(content: &str) -> FrontMatterStatus {
    let mut lines = content.trim_start().lines();
    match lines.next() {
        Some(first) if is_delimiter(first) => {}
        _ => return FrontMatterStatus::NotPresent,
    }

    let mut block = Vec::new();
    let mut closed = false;
    for line in lines {
        if is_delimiter(line) {
            closed = true;
            break;
        }
        block.push(line);
    }
    if !closed {
        return FrontMatterStatus::Unterminated;
    }

    let body = block.join("\n");
    if body.trim().is_empty() {
        return FrontMatterStatus::Empty;
    }

    let value = match serde_yaml::from_str::<Value>(&body) {
        Ok(value) => value,
        Err(err) => {
            return FrontMatterStatus::Malformed {
                detail: format!("yaml syntax error: {err}"),
            }
        }
    };

    match value {
        Value::Null => FrontMatterStatus::Empty,
        Value::Mapping(mapping) if mapping.is_empty() => FrontMatterStatus::Empty,
        Value::Mapping(mapping) => match convert_mapping(mapping) {
            Ok(entries) => FrontMatterStatus::Present(FrontMatter { entries }),
            Err(detail) => FrontMatterStatus::Malformed { detail },
        },
        _ => FrontMatterStatus::Malformed {
            detail: "front matter must be a key/value mapping".to_string(),
        },
    }
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == FRONT_MATTER_DELIMITER
}

fn convert_mapping(mapping: serde_yaml::Mapping) -> Result<BTreeMap<String, MetaValue>, String> {
    let mut entries = BTreeMap::new();
    for (key, value) in mapping {
        let key = match key {
            Value::String(text) => text,
            Value::Number(number) => number.to_string(),
            Value::Bool(flag) => flag.to_string(),
            other => return Err(format!("unsupported front matter key: {other:?}")),
        };
        entries.insert(key, MetaValue::from_yaml(value)?);
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::{extract, inspect, FrontMatterStatus, MetaValue};

    #[test]
    fn parses_list_and_number_values() {
        let content = "---\ntitle: 周复盘\ntags: [focus, java]\ncognitive_score: 72\n---\nbody";
        let front_matter = extract(content).unwrap();
        assert_eq!(front_matter.get_text("title"), Some("周复盘"));
        assert_eq!(front_matter.get_number("cognitive_score"), Some(72.0));
        assert_eq!(
            front_matter.get("tags"),
            Some(&MetaValue::List(vec![
                MetaValue::Text("focus".to_string()),
                MetaValue::Text("java".to_string()),
            ]))
        );
    }

    #[test]
    fn leading_whitespace_before_delimiter_is_ignored() {
        assert!(extract("\n\n  ---\nkey: value\n---\n").is_some());
    }

    #[test]
    fn delimiter_must_be_a_whole_line() {
        assert_eq!(inspect("----\nkey: value\n----\n"), FrontMatterStatus::NotPresent);
        assert_eq!(inspect("--- key: value\n---\n"), FrontMatterStatus::NotPresent);
    }

    #[test]
    fn crlf_line_endings_are_accepted() {
        let front_matter = extract("---\r\nkey: value\r\n---\r\nbody").unwrap();
        assert_eq!(front_matter.get_text("key"), Some("value"));
    }

    #[test]
    fn comment_only_block_is_empty() {
        assert_eq!(inspect("---\n# nothing yet\n---\n"), FrontMatterStatus::Empty);
    }

    #[test]
    fn numeric_strings_are_numbers() {
        assert_eq!(MetaValue::Text(" 64.5 ".to_string()).as_number(), Some(64.5));
        assert_eq!(MetaValue::Text("high".to_string()).as_number(), None);
    }
}
