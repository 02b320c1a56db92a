//! Small descriptive-statistics helpers shared by the profilers, the
//! histogram builder and the compare engine.

use std::collections::HashMap;
use std::hash::Hash;

use crate::models::LengthStats;

/// Distinct values with their counts, ascending by value.
pub(crate) fn sorted_value_counts(values: &[f64]) -> Vec<(f64, u64)> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mut counts: Vec<(f64, u64)> = Vec::new();
    for value in sorted {
        match counts.last_mut() {
            Some((last, count)) if *last == value => *count += 1,
            _ => counts.push((value, 1)),
        }
    }
    counts
}

/// Occurrences of each key, ordered by count descending then key ascending.
pub(crate) fn ranked_counts<K, I>(items: I) -> Vec<(K, u64)>
where
    K: Eq + Hash + Ord,
    I: IntoIterator<Item = K>,
{
    let mut counts: HashMap<K, u64> = HashMap::new();
    for item in items {
        *counts.entry(item).or_insert(0) += 1;
    }
    let mut ranked: Vec<(K, u64)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
}

/// Numeric counts ranked by count descending then value ascending.
pub(crate) fn ranked_numeric_counts(values: &[f64]) -> Vec<(f64, u64)> {
    let mut counts = sorted_value_counts(values);
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.total_cmp(&b.0)));
    counts
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median of an ascending slice; the mean of the middle pair for even lengths.
pub(crate) fn median_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    match n {
        0 => 0.0,
        _ if n % 2 == 1 => sorted[n / 2],
        _ => (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0,
    }
}

/// Quantile with lower interpolation: the element at `floor(q * (n - 1))`.
pub(crate) fn quantile_lower(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let position = (q * (sorted.len() - 1) as f64).floor() as usize;
    sorted[position.min(sorted.len() - 1)]
}

/// Population variance (ddof = 0).
pub(crate) fn population_variance(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64
}

pub(crate) fn length_stats(lengths: &[u64]) -> LengthStats {
    if lengths.is_empty() {
        return LengthStats::default();
    }
    let mut sorted: Vec<f64> = lengths.iter().map(|l| *l as f64).collect();
    sorted.sort_by(f64::total_cmp);
    LengthStats {
        mean: mean(&sorted),
        median: median_sorted(&sorted),
        minimum: lengths.iter().copied().min().unwrap_or(0),
        maximum: lengths.iter().copied().max().unwrap_or(0),
    }
}
