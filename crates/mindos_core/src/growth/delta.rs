//! Delta computation and focus selection.

use crate::history::last_two_distinct_days;
use crate::model::score::ScoreSnapshot;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Growth summary consumed by dashboards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthReport {
    pub current: BTreeMap<String, f64>,
    pub previous: BTreeMap<String, f64>,
    pub deltas: BTreeMap<String, f64>,
    /// `(previous_day, current_day)`.
    pub dates: (NaiveDate, NaiveDate),
}

/// Direction of the recommended focus dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Falling,
    Maintaining,
}

/// Dimension recommended for the next small improvement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FocusRecommendation {
    pub dimension: String,
    pub score: f64,
    pub delta: f64,
    pub trend: Trend,
}

/// `(current - previous) / max(previous, 1) * 100`, rounded to two decimals.
pub fn percent_change(current: f64, previous: f64) -> f64 {
    let denominator = previous.max(1.0);
    round2((current - previous) / denominator * 100.0)
}

/// Deltas for every dimension of `current`.
///
/// A dimension absent from `previous` is compared against `baseline`, the
/// value an unmeasured dimension would have scored that day.
pub fn compute_deltas(
    current: &BTreeMap<String, f64>,
    previous: &BTreeMap<String, f64>,
    baseline: f64,
) -> BTreeMap<String, f64> {
    current
        .iter()
        .map(|(dimension, score)| {
            let before = previous.get(dimension).copied().unwrap_or(baseline);
            (dimension.clone(), percent_change(*score, before))
        })
        .collect()
}

/// Builds the growth report from ordered history entries.
///
/// Returns `None` when the history is empty.
pub fn growth_report(entries: &[ScoreSnapshot], baseline: f64) -> Option<GrowthReport> {
    let pair = last_two_distinct_days(entries)?;
    let deltas = compute_deltas(&pair.current.scores, &pair.previous.scores, baseline);
    Some(GrowthReport {
        current: pair.current.scores,
        previous: pair.previous.scores,
        deltas,
        dates: (pair.previous_day, pair.current_day),
    })
}

/// Minimum negative delta if any dimension regressed, else minimum score.
///
/// Ties resolve to the first dimension in name order.
pub fn focus_dimension(report: &GrowthReport) -> Option<FocusRecommendation> {
    let regressing = min_by_value(report.deltas.iter().filter(|(_, delta)| **delta < 0.0));
    let (dimension, trend) = match regressing {
        Some(dimension) => (dimension, Trend::Falling),
        None => (min_by_value(report.current.iter())?, Trend::Maintaining),
    };

    Some(FocusRecommendation {
        dimension: dimension.to_string(),
        score: report.current.get(dimension).copied().unwrap_or_default(),
        delta: report.deltas.get(dimension).copied().unwrap_or_default(),
        trend,
    })
}

fn min_by_value<'a, I>(items: I) -> Option<&'a str>
where
    I: Iterator<Item = (&'a String, &'a f64)>,
{
    let mut best: Option<(&'a String, f64)> = None;
    for (dimension, value) in items {
        match best {
            Some((_, lowest)) if *value >= lowest => {}
            _ => best = Some((dimension, *value)),
        }
    }
    best.map(|(dimension, _)| dimension.as_str())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
