//! Corpus-wide score aggregation.
//!
//! # Responsibility
//! - Collect at most one sample per document via ordered strategies.
//! - Reduce samples to an arithmetic mean per dimension.
//!
//! # Invariants
//! - Documents without front matter contribute nothing and raise nothing.
//! - Aggregating an unchanged corpus twice yields identical boards.

use crate::config::{DimensionSpec, RadarConfig};
use crate::corpus::frontmatter;
use crate::model::document::Document;
use crate::model::score::{DimensionScore, ScoreBoard};
use crate::scoring::strategy::{default_strategies, Sample, SampleStrategy};
use log::debug;
use std::collections::BTreeMap;

/// Reduces documents into a [`ScoreBoard`].
pub struct ScoreAggregator {
    dimensions: Vec<DimensionSpec>,
    baseline: f64,
    strategies: Vec<Box<dyn SampleStrategy>>,
}

impl ScoreAggregator {
    /// Creates an aggregator with the default strategy order.
    pub fn new(dimensions: Vec<DimensionSpec>, baseline: f64) -> Self {
        Self {
            dimensions,
            baseline,
            strategies: default_strategies(),
        }
    }

    pub fn from_config(radar: &RadarConfig) -> Self {
        Self::new(radar.dimensions.clone(), radar.baseline)
    }

    /// Replaces the strategy list; earlier strategies take precedence.
    pub fn with_strategies(mut self, strategies: Vec<Box<dyn SampleStrategy>>) -> Self {
        self.strategies = strategies;
        self
    }

    pub fn baseline(&self) -> f64 {
        self.baseline
    }

    /// Samples one document: first strategy yielding a pair wins.
    pub fn sample_document(&self, document: &Document) -> Option<Sample> {
        let front_matter = frontmatter::extract(&document.raw_content)?;
        self.strategies.iter().find_map(|strategy| {
            let sample = strategy.sample(&front_matter, &self.dimensions)?;
            debug!(
                "event=score_sample module=scoring status=ok strategy={} dimension={} path={}",
                strategy.name(),
                sample.dimension,
                document.path
            );
            Some(sample)
        })
    }

    /// Aggregates every document into one score per configured dimension.
    pub fn aggregate<'d, I>(&self, documents: I) -> ScoreBoard
    where
        I: IntoIterator<Item = &'d Document>,
    {
        let mut collected: BTreeMap<String, (Vec<f64>, Vec<String>)> = BTreeMap::new();
        for document in documents {
            if let Some(sample) = self.sample_document(document) {
                let (values, sources) = collected.entry(sample.dimension).or_default();
                values.push(sample.value);
                sources.push(document.path.clone());
            }
        }

        let entries = self
            .dimensions
            .iter()
            .map(|dimension| {
                let name = dimension.name.trim();
                let (values, sources) = collected.remove(name).unwrap_or_default();
                DimensionScore {
                    dimension: name.to_string(),
                    label: dimension.label().to_string(),
                    value: mean(&values).unwrap_or(self.baseline),
                    sample_count: values.len(),
                    sources,
                }
            })
            .collect();

        ScoreBoard {
            baseline: self.baseline,
            entries,
        }
    }
}

impl Default for ScoreAggregator {
    fn default() -> Self {
        Self::from_config(&RadarConfig::default())
    }
}

impl std::fmt::Debug for ScoreAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreAggregator")
            .field("dimensions", &self.dimensions)
            .field("baseline", &self.baseline)
            .field(
                "strategies",
                &self
                    .strategies
                    .iter()
                    .map(|strategy| strategy.name())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::ScoreAggregator;
    use crate::config::DimensionSpec;
    use crate::model::document::Document;
    use crate::scoring::strategy::DimensionValueStrategy;

    fn aggregator() -> ScoreAggregator {
        ScoreAggregator::new(
            vec![
                DimensionSpec::new("cognitive", "认知力"),
                DimensionSpec::new("execution", "执行力"),
            ],
            50.0,
        )
    }

    #[test]
    fn named_key_wins_over_generic_pair_in_same_document() {
        let doc = Document::new(
            "a.md",
            "---\ncognitive_score: 90\ndimension: execution\nvalue: 10\n---\n",
        );
        let board = aggregator().aggregate([&doc]);
        assert_eq!(board.value("cognitive"), Some(90.0));
        assert_eq!(board.value("execution"), Some(50.0));
        assert_eq!(board.get("execution").unwrap().sample_count, 0);
    }

    #[test]
    fn both_schemas_contribute_to_the_same_dimension() {
        let named = Document::new("a.md", "---\nexecution_score: 80\n---\n");
        let generic = Document::new("b.md", "---\ndimension: 执行力\nvalue: 40\n---\n");
        let board = aggregator().aggregate([&named, &generic]);
        let execution = board.get("execution").unwrap();
        assert_eq!(execution.value, 60.0);
        assert_eq!(execution.sources, vec!["a.md", "b.md"]);
    }

    #[test]
    fn custom_strategy_list_is_respected() {
        let doc = Document::new("a.md", "---\ncognitive_score: 90\n---\n");
        let board = aggregator()
            .with_strategies(vec![Box::new(DimensionValueStrategy)])
            .aggregate([&doc]);
        assert_eq!(board.value("cognitive"), Some(50.0));
    }
}
