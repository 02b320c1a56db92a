//! Whole-dataset summaries and the name-level comparison of two datasets.

use std::collections::BTreeSet;
use std::time::Instant;

use tracing::{info, instrument};

use crate::classify::classify;
use crate::config::ProfilerConfig;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::models::{ColumnMatchSummary, ComparisonSummary, DatasetSummary, TypeCounts, TypeMismatch};

/// Row, column, memory, missing-cell and duplicate counts plus a type tally.
#[instrument(skip(dataset, config), fields(rows = dataset.row_count(), columns = dataset.column_count()))]
pub fn summarize_dataset(
    dataset: &Dataset,
    dataset_id: &str,
    config: &ProfilerConfig,
) -> Result<DatasetSummary> {
    let rows = dataset.row_count();
    let columns = dataset.column_count();
    let cells = rows * columns;

    let missing_cells = dataset.missing_cells();
    let missing_rate = if cells == 0 {
        0.0
    } else {
        missing_cells as f64 / cells as f64
    };

    let duplicate_rows = if dataset.is_empty() {
        0
    } else {
        rows - dataset.distinct_row_count()?
    };
    crate::perf_debug!(config.log, missing_cells, duplicate_rows, "Counted missing and duplicate rows");

    let mut type_counts = TypeCounts::default();
    for (_, column) in dataset.columns() {
        type_counts.record(classify(column, config.cardinality_threshold)?.column_type);
    }

    Ok(DatasetSummary {
        dataset_id: dataset_id.to_string(),
        row_count: rows as u64,
        column_count: columns as u64,
        memory_bytes: dataset.memory_bytes() as u64,
        missing_cells: missing_cells as u64,
        missing_rate,
        duplicate_rows: duplicate_rows as u64,
        type_counts,
    })
}

/// Summaries of both sides, a name-only column diff and the inferred type
/// mismatches of shared columns.
///
/// Type mismatches come from raw inference only; caller overrides do not
/// participate. The one-sided profile lists are left empty for the compare
/// engine to fill.
#[instrument(skip(left, right, config))]
pub fn summarize_comparison(
    left: &Dataset,
    right: &Dataset,
    left_id: &str,
    right_id: &str,
    config: &ProfilerConfig,
) -> Result<ComparisonSummary> {
    let start = Instant::now();
    let left_dataset = summarize_dataset(left, left_id, config)?;
    let right_dataset = summarize_dataset(right, right_id, config)?;

    let left_names: BTreeSet<&str> = left.column_names().into_iter().collect();
    let right_names: BTreeSet<&str> = right.column_names().into_iter().collect();

    let left_only: Vec<String> = left_names
        .difference(&right_names)
        .map(|name| name.to_string())
        .collect();
    let right_only: Vec<String> = right_names
        .difference(&left_names)
        .map(|name| name.to_string())
        .collect();

    let mut type_mismatches = Vec::new();
    let mut matched = 0u64;
    for name in left_names.intersection(&right_names) {
        matched += 1;
        let left_type = classify(left.column(name)?, config.cardinality_threshold)?.column_type;
        let right_type = classify(right.column(name)?, config.cardinality_threshold)?.column_type;
        if left_type != right_type {
            type_mismatches.push(TypeMismatch {
                column_name: name.to_string(),
                left_type,
                right_type,
            });
        }
    }

    let column_matches = ColumnMatchSummary {
        matched,
        left_only: left_only.len() as u64,
        right_only: right_only.len() as u64,
        total_left: left_names.len() as u64,
        total_right: right_names.len() as u64,
        column_names_left_only: left_only,
        column_names_right_only: right_only,
    };

    info!(
        matched = column_matches.matched,
        mismatches = type_mismatches.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Compared dataset structure"
    );

    Ok(ComparisonSummary {
        row_count_delta: left_dataset.row_count as i64 - right_dataset.row_count as i64,
        left_dataset,
        right_dataset,
        column_matches,
        type_mismatches,
        column_profiles_left_only: Vec::new(),
        column_profiles_right_only: Vec::new(),
    })
}
