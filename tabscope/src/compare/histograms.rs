//! Paired histograms for a column present in both datasets.
//!
//! Numeric, text-length and datetime domains are computed over the union of
//! both sides so the two count vectors share one set of edges; each side is
//! then tallied independently. Categorical domains are the union of both
//! sides' labels ranked by combined frequency.

use std::collections::HashMap;

use arrow::array::ArrayRef;

use crate::error::Result;
use crate::formatters::{format_datetime_bin, format_number_label, format_numeric_bin_label};
use crate::histogram::{BinLayout, HistogramBuilder, OTHER_LABEL};
use crate::models::{ColumnType, CompareHistogram};
use crate::stats::{ranked_counts, sorted_value_counts};
use crate::values::{datetime_values, numeric_values, string_values};

/// Compare histograms for one matched column.
///
/// Returns nothing when the sides resolved to different types, for list and
/// struct columns, and for datetime columns whose sides use different
/// encodings (date vs time of day).
pub fn build_for_column(
    column_name: &str,
    left: &ArrayRef,
    right: &ArrayRef,
    left_type: ColumnType,
    right_type: ColumnType,
    histograms: &HistogramBuilder,
) -> Result<Vec<CompareHistogram>> {
    if left_type != right_type {
        return Ok(Vec::new());
    }
    match left_type {
        ColumnType::Numeric => {
            let left = numeric_values(column_name, left)?;
            let right = numeric_values(column_name, right)?;
            Ok(compare_numeric(
                &left.non_null(),
                &right.non_null(),
                left.is_integer && right.is_integer,
                histograms,
            ))
        }
        ColumnType::Text => Ok(compare_numeric(
            &text_lengths(left)?,
            &text_lengths(right)?,
            true,
            histograms,
        )),
        ColumnType::Datetime => {
            let left = datetime_values(column_name, left)?;
            let right = datetime_values(column_name, right)?;
            if left.is_time() != right.is_time() {
                return Ok(Vec::new());
            }
            Ok(compare_datetime(
                &left.non_null_numeric(),
                &right.non_null_numeric(),
                left.is_time(),
                histograms,
            ))
        }
        ColumnType::Categorical | ColumnType::Boolean => Ok(compare_categorical(
            &non_null_strings(left)?,
            &non_null_strings(right)?,
            histograms.top_values_limit(),
        )),
        ColumnType::List | ColumnType::Struct => Ok(Vec::new()),
    }
}

fn non_null_strings(array: &ArrayRef) -> Result<Vec<String>> {
    Ok(string_values(array)?.into_iter().flatten().collect())
}

fn text_lengths(array: &ArrayRef) -> Result<Vec<f64>> {
    Ok(non_null_strings(array)?
        .iter()
        .map(|value| value.chars().count() as f64)
        .collect())
}

/// Numeric comparison; both sides empty yields one empty histogram per
/// configured resolution.
pub fn compare_numeric(
    left: &[f64],
    right: &[f64],
    is_integer: bool,
    histograms: &HistogramBuilder,
) -> Vec<CompareHistogram> {
    if left.is_empty() && right.is_empty() {
        return histograms
            .bin_counts()
            .iter()
            .map(|b| CompareHistogram::empty(*b))
            .collect();
    }
    paired(left, right, is_integer, histograms, |lower, upper| {
        format_numeric_bin_label(lower, upper, is_integer)
    })
}

/// Datetime comparison in a shared encoding; both sides empty yields nothing.
pub fn compare_datetime(
    left: &[f64],
    right: &[f64],
    is_time: bool,
    histograms: &HistogramBuilder,
) -> Vec<CompareHistogram> {
    if left.is_empty() && right.is_empty() {
        return Vec::new();
    }
    // dates bin as whole days, times as continuous seconds
    paired(left, right, !is_time, histograms, |lower, upper| {
        format_datetime_bin(lower, upper, is_time)
    })
}

/// Union-domain histograms over non-empty input.
fn paired<F>(
    left: &[f64],
    right: &[f64],
    is_integer: bool,
    histograms: &HistogramBuilder,
    label: F,
) -> Vec<CompareHistogram>
where
    F: Fn(f64, f64) -> String,
{
    let union: Vec<f64> = left.iter().chain(right).copied().collect();
    let distinct: Vec<f64> = sorted_value_counts(&union)
        .into_iter()
        .map(|(value, _)| value)
        .collect();

    if histograms.is_exact(distinct.len()) {
        let tally = |values: &[f64]| {
            let mut counts = vec![0u64; distinct.len()];
            for value in values {
                counts[distinct.partition_point(|d| d < value)] += 1;
            }
            counts
        };
        return vec![CompareHistogram {
            bin_count: distinct.len(),
            labels: distinct.iter().map(|v| label(*v, *v)).collect(),
            left_counts: tally(left),
            right_counts: tally(right),
        }];
    }

    // distinct holds more than top_values_limit >= 1 values here
    let min = distinct[0];
    let max = distinct[distinct.len() - 1];

    histograms
        .bin_counts()
        .iter()
        .map(|&bin_count| {
            if max - min == 0.0 {
                return CompareHistogram {
                    bin_count,
                    labels: vec![label(min, min)],
                    left_counts: vec![left.len() as u64],
                    right_counts: vec![right.len() as u64],
                };
            }
            let layout = BinLayout::new(min, max, bin_count, is_integer);
            CompareHistogram {
                bin_count,
                labels: (0..layout.bin_count())
                    .map(|index| {
                        let (lower, upper) = layout.bounds(index);
                        label(lower, upper)
                    })
                    .collect(),
                left_counts: layout.tally(left),
                right_counts: layout.tally(right),
            }
        })
        .collect()
}

/// Categorical comparison over the union of both sides' labels.
///
/// The `top_values_limit` most frequent labels (by combined count, then
/// label) are kept; anything left over on either side goes into a shared
/// "Other" bucket.
pub fn compare_categorical(
    left: &[String],
    right: &[String],
    top_values_limit: usize,
) -> Vec<CompareHistogram> {
    if left.is_empty() && right.is_empty() {
        return Vec::new();
    }
    let ranked = ranked_counts(left.iter().chain(right).map(String::as_str));
    let left_counts = counts_by_label(left);
    let right_counts = counts_by_label(right);

    let keep = top_values_limit.min(ranked.len());
    let mut labels: Vec<String> = ranked[..keep].iter().map(|(l, _)| l.to_string()).collect();
    let mut left_kept: Vec<u64> = labels.iter().map(|l| count_of(&left_counts, l)).collect();
    let mut right_kept: Vec<u64> = labels.iter().map(|l| count_of(&right_counts, l)).collect();

    if ranked.len() > keep {
        let left_other = left.len() as u64 - left_kept.iter().sum::<u64>();
        let right_other = right.len() as u64 - right_kept.iter().sum::<u64>();
        if left_other > 0 || right_other > 0 {
            labels.push(OTHER_LABEL.to_string());
            left_kept.push(left_other);
            right_kept.push(right_other);
        }
    }

    vec![CompareHistogram {
        bin_count: labels.len(),
        labels,
        left_counts: left_kept,
        right_counts: right_kept,
    }]
}

fn counts_by_label(values: &[String]) -> HashMap<&str, u64> {
    let mut counts = HashMap::new();
    for value in values {
        *counts.entry(value.as_str()).or_insert(0) += 1;
    }
    counts
}

fn count_of(counts: &HashMap<&str, u64>, label: &str) -> u64 {
    counts.get(label).copied().unwrap_or(0)
}
