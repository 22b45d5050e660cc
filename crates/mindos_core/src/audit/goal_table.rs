//! Goal extraction from markdown tables in skill-gap plans.
//!
//! The accepted shape is narrow on purpose:
//!
//! ```text
//! ## 行动计划
//! | 差距 | 行动 | 截止 |
//! | --- | --- | --- |
//! | 基础薄弱 | 学习 Python 基础 | 6月 |
//! ```
//!
//! Rows are read only below a heading whose text contains the configured
//! heading, including its deeper sub-headings, until the next heading of the
//! same or a higher level. The first row of each table is its header.

use crate::config::AuditConfig;
use once_cell::sync::Lazy;
use regex::Regex;

static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s{0,3}(#{1,6})\s+(.*?)\s*#*\s*$").expect("valid heading regex"));
static SEPARATOR_CELL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^:?-+:?$").expect("valid separator regex"));

/// Extracts goal strings from one table column under a named heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalTableParser {
    heading: String,
    column: usize,
}

impl GoalTableParser {
    pub fn new(heading: impl Into<String>, column: usize) -> Self {
        Self {
            heading: heading.into().trim().to_string(),
            column,
        }
    }

    pub fn from_config(audit: &AuditConfig) -> Self {
        Self::new(audit.goal_heading.as_str(), audit.goal_column)
    }

    /// Returns non-empty goal cells in document order.
    pub fn parse(&self, content: &str) -> Vec<String> {
        let mut goals = Vec::new();
        let mut section_level: Option<usize> = None;
        let mut rows_in_table = 0usize;

        for line in content.lines() {
            if let Some(captures) = HEADING_RE.captures(line) {
                let level = captures.get(1).map_or(0, |marks| marks.as_str().len());
                let title = captures.get(2).map_or("", |title| title.as_str());
                rows_in_table = 0;
                if section_level.is_some_and(|open| level > open) {
                    continue;
                }
                section_level = title.contains(self.heading.as_str()).then_some(level);
                continue;
            }
            if section_level.is_none() {
                continue;
            }

            let Some(cells) = split_row(line) else {
                rows_in_table = 0;
                continue;
            };
            if is_separator(&cells) {
                continue;
            }

            rows_in_table += 1;
            if rows_in_table == 1 {
                continue;
            }

            if let Some(goal) = cells.get(self.column).filter(|cell| !cell.is_empty()) {
                goals.push((*goal).to_string());
            }
        }

        goals
    }
}

fn split_row(line: &str) -> Option<Vec<&str>> {
    let trimmed = line.trim();
    let inner = trimmed.strip_prefix('|')?;
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    Some(inner.split('|').map(str::trim).collect())
}

fn is_separator(cells: &[&str]) -> bool {
    !cells.is_empty() && cells.iter().all(|cell| SEPARATOR_CELL_RE.is_match(cell))
}

#[cfg(test)]
mod tests {
    use super::GoalTableParser;

    const PLAN: &str = "\
---
type: gap_analysis
---
# 技能差距

## 现状
| 差距 | 行动 |
| --- | --- |
| 忽略 | 不在计划段落 |

## 行动计划
| 差距 | 行动 | 截止 |
|:---|:---:|---:|
| 基础薄弱 | 学习 Python 基础 | 6月 |
| 表达 |  | 7月 |
| 并发 | 复习 Java 并发 | 8月 |

## 备注
| 差距 | 行动 |
| --- | --- |
| 忽略 | 另一段落 |
";

    #[test]
    fn reads_only_rows_under_named_heading() {
        let goals = GoalTableParser::new("行动计划", 1).parse(PLAN);
        assert_eq!(goals, vec!["学习 Python 基础", "复习 Java 并发"]);
    }

    #[test]
    fn column_index_selects_cell() {
        let goals = GoalTableParser::new("行动计划", 0).parse(PLAN);
        assert_eq!(goals, vec!["基础薄弱", "表达", "并发"]);
    }

    #[test]
    fn out_of_range_column_yields_nothing() {
        assert!(GoalTableParser::new("行动计划", 7).parse(PLAN).is_empty());
    }

    #[test]
    fn each_table_block_has_its_own_header() {
        let content = "## 行动计划\n| h | goal |\n|---|---|\n| 1 | 早起 |\n\n| h | goal |\n| 2 | 跑步 |\n";
        let goals = GoalTableParser::new("行动计划", 1).parse(content);
        assert_eq!(goals, vec!["早起", "跑步"]);
    }

    #[test]
    fn sub_headings_stay_inside_the_section() {
        let content = "\
## 行动计划
### 本周
| 差距 | 行动 |
|---|---|
| x | 早起 |
### 本月
| 差距 | 行动 |
|---|---|
| y | 跑步 |
## 复盘
| 差距 | 行动 |
|---|---|
| z | 忽略 |
";
        let goals = GoalTableParser::new("行动计划", 1).parse(content);
        assert_eq!(goals, vec!["早起", "跑步"]);
    }

    #[test]
    fn higher_level_heading_closes_the_section() {
        let content = "### 行动计划\n| h | goal |\n|---|---|\n| 1 | 早起 |\n# 附录\n| h | goal |\n| 2 | 跑步 |\n";
        let goals = GoalTableParser::new("行动计划", 1).parse(content);
        assert_eq!(goals, vec!["早起"]);
    }

    #[test]
    fn missing_heading_yields_nothing() {
        assert!(GoalTableParser::new("行动计划", 1)
            .parse("| a | b |\n|---|---|\n| x | y |\n")
            .is_empty());
    }
}
