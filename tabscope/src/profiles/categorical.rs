//! Categorical (and boolean) column profile.

use crate::config::ProfilerConfig;
use crate::histogram::HistogramBuilder;
use crate::models::{CategoricalProfile, CategoryCount};
use crate::stats::ranked_counts;

/// Profiles category labels. Booleans arrive as `"True"` / `"False"`.
///
/// `unique_count` is the column's distinct count with null counted as one
/// value. A column is high-cardinality when it exceeds
/// `config.cardinality_threshold`; only then are categories suppressed.
pub fn build(
    values: &[String],
    unique_count: usize,
    config: &ProfilerConfig,
    histograms: &HistogramBuilder,
) -> CategoricalProfile {
    let ranked = ranked_counts(values.iter().cloned());
    let is_high_cardinality = unique_count > config.cardinality_threshold;

    let top_categories: Vec<CategoryCount> = ranked
        .iter()
        .take(config.top_values_limit)
        .map(|(category, count)| CategoryCount {
            category: category.clone(),
            count: *count,
        })
        .collect();

    let suppressed_count = if is_high_cardinality {
        unique_count.saturating_sub(top_categories.len()) as u64
    } else {
        0
    };

    CategoricalProfile {
        histograms: histograms.build_categorical(&ranked, is_high_cardinality),
        top_categories,
        is_high_cardinality,
        suppressed_count,
    }
}
