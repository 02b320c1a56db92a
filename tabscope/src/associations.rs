//! Pairwise association strengths between columns.
//!
//! Three families are computed, each over every pair of the relevant kinds:
//!
//! - numeric × numeric: absolute Pearson correlation
//! - categorical × categorical: Cramér's V
//! - numeric × categorical: correlation ratio η
//!
//! Booleans count as categorical. Only the first `association_row_limit` rows
//! take part, and each family keeps its `top_associations` strongest pairs.
//! Every value is in `[0, 1]`; degenerate inputs (too few rows, a constant
//! column, a single category) yield 0.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use arrow::array::{ArrayRef, Int64Array};
//! use tabscope::associations::compute_associations;
//! use tabscope::config::ProfilerConfig;
//! use tabscope::dataset::Dataset;
//!
//! let dataset = Dataset::try_from_columns(vec![
//!     ("x", Arc::new(Int64Array::from(vec![1, 2, 3, 4])) as ArrayRef),
//!     ("y", Arc::new(Int64Array::from(vec![2, 4, 6, 8])) as ArrayRef),
//! ])
//! .unwrap();
//!
//! let summary = compute_associations(&dataset, &ProfilerConfig::default()).unwrap();
//! assert!((summary.numeric_numeric[0].value - 1.0).abs() < 1e-12);
//! ```

use std::collections::HashMap;
use std::time::Instant;

use arrow::array::ArrayRef;
use tracing::instrument;

use crate::classify::classify;
use crate::config::ProfilerConfig;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::models::{Association, AssociationSummary, ColumnType};
use crate::values::{numeric_values, string_values};

/// A categorical column with each non-null label replaced by a dense code.
struct EncodedColumn {
    codes: Vec<Option<u32>>,
}

impl EncodedColumn {
    fn encode(array: &ArrayRef) -> Result<Self> {
        let mut dictionary: HashMap<String, u32> = HashMap::new();
        let codes = string_values(array)?
            .into_iter()
            .map(|value| {
                value.map(|label| {
                    let next = dictionary.len() as u32;
                    *dictionary.entry(label).or_insert(next)
                })
            })
            .collect();
        Ok(Self { codes })
    }
}

/// Computes all three association families for `dataset`.
#[instrument(skip_all, fields(rows = dataset.row_count(), columns = dataset.column_count()))]
pub fn compute_associations(dataset: &Dataset, config: &ProfilerConfig) -> Result<AssociationSummary> {
    let start = Instant::now();
    let capped = dataset.head(config.association_row_limit);

    let mut numeric: Vec<(&str, Vec<Option<f64>>)> = Vec::new();
    let mut categorical: Vec<(&str, EncodedColumn)> = Vec::new();

    for (name, column) in capped.columns() {
        let classification = classify(column, config.cardinality_threshold)?;
        if classification.basic_only {
            continue;
        }
        match classification.column_type {
            ColumnType::Numeric => numeric.push((name, numeric_values(name, column)?.values)),
            ColumnType::Categorical | ColumnType::Boolean => {
                categorical.push((name, EncodedColumn::encode(column)?))
            }
            _ => {}
        }
    }

    let mut numeric_numeric = Vec::new();
    for (i, (left, left_values)) in numeric.iter().enumerate() {
        for (right, right_values) in &numeric[i + 1..] {
            numeric_numeric.push(association(left, right, pearson(left_values, right_values)));
        }
    }

    let mut categorical_categorical = Vec::new();
    for (i, (left, left_codes)) in categorical.iter().enumerate() {
        for (right, right_codes) in &categorical[i + 1..] {
            categorical_categorical.push(association(
                left,
                right,
                cramers_v(&left_codes.codes, &right_codes.codes),
            ));
        }
    }

    let mut numeric_categorical = Vec::new();
    for (numeric_name, values) in &numeric {
        for (categorical_name, codes) in &categorical {
            numeric_categorical.push(association(
                numeric_name,
                categorical_name,
                correlation_ratio(values, &codes.codes),
            ));
        }
    }

    let summary = AssociationSummary {
        numeric_numeric: strongest(numeric_numeric, config.top_associations),
        categorical_categorical: strongest(categorical_categorical, config.top_associations),
        numeric_categorical: strongest(numeric_categorical, config.top_associations),
    };

    crate::log_data_op!(
        config.log,
        numeric_columns = numeric.len(),
        categorical_columns = categorical.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Computed associations"
    );
    Ok(summary)
}

fn association(left: &str, right: &str, value: f64) -> Association {
    Association {
        left: left.to_string(),
        right: right.to_string(),
        value,
    }
}

/// Stable sort, strongest first, then truncate.
fn strongest(mut entries: Vec<Association>, limit: usize) -> Vec<Association> {
    entries.sort_by(|a, b| b.value.total_cmp(&a.value));
    entries.truncate(limit);
    entries
}

/// Strength of the Pearson correlation over rows where both sides are present.
///
/// Returns `|r|` in `[0, 1]`: the sign of the coefficient is dropped, so a
/// perfectly inverse relationship scores 1 just like a direct one.
pub fn pearson(left: &[Option<f64>], right: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = left
        .iter()
        .zip(right)
        .filter_map(|(l, r)| Some(((*l)?, (*r)?)))
        .collect();
    if pairs.len() < 2 {
        return 0.0;
    }

    let n = pairs.len() as f64;
    let mean_left = pairs.iter().map(|(l, _)| l).sum::<f64>() / n;
    let mean_right = pairs.iter().map(|(_, r)| r).sum::<f64>() / n;

    let (mut covariance, mut var_left, mut var_right) = (0.0, 0.0, 0.0);
    for (l, r) in &pairs {
        let dl = l - mean_left;
        let dr = r - mean_right;
        covariance += dl * dr;
        var_left += dl * dl;
        var_right += dr * dr;
    }
    if var_left == 0.0 || var_right == 0.0 {
        return 0.0;
    }
    (covariance / (var_left * var_right).sqrt()).abs().min(1.0)
}

/// Cramér's V of the contingency table of two coded columns.
///
/// Unobserved combinations count as zero cells.
pub fn cramers_v(left: &[Option<u32>], right: &[Option<u32>]) -> f64 {
    let mut cells: HashMap<(u32, u32), u64> = HashMap::new();
    let mut row_totals: HashMap<u32, u64> = HashMap::new();
    let mut col_totals: HashMap<u32, u64> = HashMap::new();
    let mut n = 0u64;

    for (l, r) in left.iter().zip(right) {
        if let (Some(l), Some(r)) = (l, r) {
            *cells.entry((*l, *r)).or_insert(0) += 1;
            *row_totals.entry(*l).or_insert(0) += 1;
            *col_totals.entry(*r).or_insert(0) += 1;
            n += 1;
        }
    }

    let k = row_totals.len().min(col_totals.len());
    if n == 0 || k <= 1 {
        return 0.0;
    }

    // chi2 = n * (sum(o^2 / (row * col)) - 1); zero cells contribute nothing
    let n = n as f64;
    let ratio_sum: f64 = cells
        .iter()
        .map(|((l, r), observed)| {
            let observed = *observed as f64;
            observed * observed / (row_totals[l] as f64 * col_totals[r] as f64)
        })
        .sum();
    let chi2 = (n * (ratio_sum - 1.0)).max(0.0);
    if chi2 == 0.0 {
        return 0.0;
    }
    (chi2 / (n * (k - 1) as f64)).sqrt().min(1.0)
}

/// Correlation ratio η of a numeric column grouped by a coded column.
pub fn correlation_ratio(values: &[Option<f64>], groups: &[Option<u32>]) -> f64 {
    let pairs: Vec<(f64, u32)> = values
        .iter()
        .zip(groups)
        .filter_map(|(v, g)| Some(((*v)?, (*g)?)))
        .collect();
    if pairs.is_empty() {
        return 0.0;
    }

    let n = pairs.len() as f64;
    let grand_mean = pairs.iter().map(|(v, _)| v).sum::<f64>() / n;

    let mut group_sums: HashMap<u32, (f64, u64)> = HashMap::new();
    for (value, group) in &pairs {
        let entry = group_sums.entry(*group).or_insert((0.0, 0));
        entry.0 += value;
        entry.1 += 1;
    }

    let between: f64 = group_sums
        .values()
        .map(|(sum, count)| {
            let count = *count as f64;
            count * (sum / count - grand_mean).powi(2)
        })
        .sum();
    let total: f64 = pairs.iter().map(|(v, _)| (v - grand_mean).powi(2)).sum();
    if total == 0.0 {
        return 0.0;
    }
    (between / total).sqrt().min(1.0)
}
