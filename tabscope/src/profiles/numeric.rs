//! Numeric column profile: descriptive statistics, outlier rate, histograms
//! and value rankings.

use crate::config::ProfilerConfig;
use crate::histogram::HistogramBuilder;
use crate::models::{NumericProfile, NumericStats, NumericValueCount, QuantileValue};
use crate::stats::{
    mean, median_sorted, population_variance, quantile_lower, ranked_numeric_counts,
    sorted_value_counts,
};

/// Profiles `values`, which must not contain nulls.
pub fn build(
    values: &[f64],
    is_integer: bool,
    config: &ProfilerConfig,
    histograms: &HistogramBuilder,
) -> NumericProfile {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let stats = numeric_stats(&sorted);
    let outlier_rate = outlier_rate(&sorted, &stats);
    let distinct = sorted_value_counts(&sorted);

    let ranked = ranked_numeric_counts(&sorted);
    NumericProfile {
        is_integer,
        outlier_rate,
        histograms: histograms.build(&sorted, is_integer),
        top_values: value_counts(ranked.iter(), config.top_values_limit),
        min_values: value_counts(distinct.iter(), config.extremes_limit),
        max_values: value_counts(distinct.iter().rev(), config.extremes_limit),
        stats,
    }
}

fn value_counts<'a>(
    pairs: impl Iterator<Item = &'a (f64, u64)>,
    limit: usize,
) -> Vec<NumericValueCount> {
    pairs
        .take(limit)
        .map(|(value, count)| NumericValueCount {
            value: *value,
            count: *count,
        })
        .collect()
}

fn numeric_stats(sorted: &[f64]) -> NumericStats {
    if sorted.is_empty() {
        return NumericStats::default();
    }
    let mean = mean(sorted);
    let median = median_sorted(sorted);
    let variance = population_variance(sorted, mean);
    let q1 = quantile_lower(sorted, 0.25);
    let q3 = quantile_lower(sorted, 0.75);
    NumericStats {
        minimum: sorted[0],
        maximum: sorted[sorted.len() - 1],
        mean,
        median,
        std: variance.sqrt(),
        variance,
        quantiles: vec![
            QuantileValue {
                quantile: 0.25,
                value: q1,
            },
            QuantileValue {
                quantile: 0.5,
                value: median,
            },
            QuantileValue {
                quantile: 0.75,
                value: q3,
            },
        ],
        iqr: q3 - q1,
    }
}

/// Share of values outside `[Q1 - 1.5 IQR, Q3 + 1.5 IQR]`; 0 when IQR is 0.
fn outlier_rate(sorted: &[f64], stats: &NumericStats) -> f64 {
    if sorted.is_empty() || stats.iqr == 0.0 {
        return 0.0;
    }
    let (q1, q3) = match (stats.quantiles.first(), stats.quantiles.last()) {
        (Some(q1), Some(q3)) => (q1.value, q3.value),
        _ => return 0.0,
    };
    let lower = q1 - 1.5 * stats.iqr;
    let upper = q3 + 1.5 * stats.iqr;
    let outliers = sorted.iter().filter(|v| **v < lower || **v > upper).count();
    outliers as f64 / sorted.len() as f64
}
