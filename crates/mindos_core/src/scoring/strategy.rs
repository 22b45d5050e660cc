//! Sample extraction strategies tried per document.

use crate::config::DimensionSpec;
use crate::corpus::frontmatter::FrontMatter;

/// Field naming the dimension in the generic schema.
pub const GENERIC_DIMENSION_FIELD: &str = "dimension";
/// Field holding the numeric value in the generic schema.
pub const GENERIC_VALUE_FIELD: &str = "value";

/// One numeric observation for a dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Dimension name (not label).
    pub dimension: String,
    pub value: f64,
}

/// Extracts at most one sample from a document's front matter.
pub trait SampleStrategy {
    fn name(&self) -> &'static str;
    fn sample(&self, front_matter: &FrontMatter, dimensions: &[DimensionSpec]) -> Option<Sample>;
}

/// Direct keys bound to a dimension: `<name>_score`, `<name>`, `<label>`.
///
/// Dimensions are checked in configured order; the first numeric alias wins.
#[derive(Debug, Default, Clone, Copy)]
pub struct NamedKeyStrategy;

impl SampleStrategy for NamedKeyStrategy {
    fn name(&self) -> &'static str {
        "named_key"
    }

    fn sample(&self, front_matter: &FrontMatter, dimensions: &[DimensionSpec]) -> Option<Sample> {
        dimensions.iter().find_map(|dimension| {
            let name = dimension.name.trim();
            let aliases = [
                format!("{name}_score"),
                name.to_string(),
                dimension.label().to_string(),
            ];
            aliases
                .iter()
                .find_map(|alias| front_matter.get_number(alias))
                .and_then(normalize_value)
                .map(|value| Sample {
                    dimension: name.to_string(),
                    value,
                })
        })
    }
}

/// Generic `dimension: <name|label>` + `value: <number>` pair.
#[derive(Debug, Default, Clone, Copy)]
pub struct DimensionValueStrategy;

impl SampleStrategy for DimensionValueStrategy {
    fn name(&self) -> &'static str {
        "dimension_value"
    }

    fn sample(&self, front_matter: &FrontMatter, dimensions: &[DimensionSpec]) -> Option<Sample> {
        let declared = front_matter.get_text(GENERIC_DIMENSION_FIELD)?;
        let dimension = dimensions.iter().find(|dimension| {
            dimension.name.trim().eq_ignore_ascii_case(declared) || dimension.label() == declared
        })?;
        let value = front_matter
            .get_number(GENERIC_VALUE_FIELD)
            .and_then(normalize_value)?;

        Some(Sample {
            dimension: dimension.name.trim().to_string(),
            value,
        })
    }
}

/// Strategies in precedence order: named keys first, then the generic pair.
pub fn default_strategies() -> Vec<Box<dyn SampleStrategy>> {
    vec![Box::new(NamedKeyStrategy), Box::new(DimensionValueStrategy)]
}

fn normalize_value(raw: f64) -> Option<f64> {
    if !raw.is_finite() {
        return None;
    }
    Some(raw.clamp(0.0, 100.0))
}
