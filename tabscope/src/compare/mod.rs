//! Side-by-side comparison of two datasets.
//!
//! Column names are partitioned into left-only, right-only and matched sets
//! (optionally restricted to target columns). One-sided columns are profiled
//! as usual; matched columns are profiled on both sides and paired, with
//! shared-edge histograms when both sides resolve to the same type.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use arrow::array::{ArrayRef, Int64Array};
//! use tabscope::columns::ProfileOptions;
//! use tabscope::compare::compare_datasets;
//! use tabscope::config::ProfilerConfig;
//! use tabscope::dataset::Dataset;
//!
//! let left = Dataset::try_from_columns(vec![
//!     ("id", Arc::new(Int64Array::from(vec![1, 2, 3])) as ArrayRef),
//! ])
//! .unwrap();
//! let right = Dataset::try_from_columns(vec![
//!     ("id", Arc::new(Int64Array::from(vec![2, 3])) as ArrayRef),
//!     ("extra", Arc::new(Int64Array::from(vec![0, 0])) as ArrayRef),
//! ])
//! .unwrap();
//!
//! let report = compare_datasets(
//!     &left,
//!     &right,
//!     &ProfileOptions::default(),
//!     "before",
//!     "after",
//!     &ProfilerConfig::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(report.summary.row_count_delta, 1);
//! assert_eq!(report.summary.column_profiles_right_only[0].column_name, "extra");
//! assert_eq!(report.compare_profiles[0].histograms[0].labels, vec!["1", "2", "3"]);
//! ```

pub mod histograms;

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use tracing::{info, instrument};

use crate::columns::{profile_columns, ProfileOptions};
use crate::config::ProfilerConfig;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::histogram::HistogramBuilder;
use crate::models::{ColumnProfile, CompareColumnProfile, ComparisonReport};
use crate::summary::summarize_comparison;

/// Column names of two datasets partitioned by presence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSplit {
    /// In left declaration order
    pub left_only: Vec<String>,
    /// In right declaration order
    pub right_only: Vec<String>,
    /// In left declaration order
    pub matched: Vec<String>,
}

/// Partitions column names; an empty `target_columns` considers every column.
pub fn split_columns(left: &Dataset, right: &Dataset, target_columns: &[String]) -> ColumnSplit {
    let targets: HashSet<&str> = target_columns.iter().map(String::as_str).collect();
    let selected = |dataset: &Dataset| -> Vec<String> {
        dataset
            .column_names()
            .into_iter()
            .filter(|name| targets.is_empty() || targets.contains(name))
            .map(str::to_string)
            .collect()
    };
    let left_names = selected(left);
    let right_names = selected(right);
    let right_set: HashSet<&str> = right_names.iter().map(String::as_str).collect();
    let left_set: HashSet<&str> = left_names.iter().map(String::as_str).collect();

    ColumnSplit {
        left_only: left_names
            .iter()
            .filter(|name| !right_set.contains(name.as_str()))
            .cloned()
            .collect(),
        right_only: right_names
            .iter()
            .filter(|name| !left_set.contains(name.as_str()))
            .cloned()
            .collect(),
        matched: left_names
            .iter()
            .filter(|name| right_set.contains(name.as_str()))
            .cloned()
            .collect(),
    }
}

/// Profiles `names` of `dataset` with every column detailed.
fn profile_subset(
    dataset: &Dataset,
    names: &[String],
    options: &ProfileOptions,
    config: &ProfilerConfig,
) -> Result<Vec<ColumnProfile>> {
    if names.is_empty() {
        return Ok(Vec::new());
    }
    let untargeted = ProfileOptions::new().with_explicit_types(options.explicit_types.clone());
    profile_columns(&dataset.select(names)?, &untargeted, config)
}

/// Full profiles of the columns only one side has.
#[instrument(skip_all)]
pub fn compare_one_sided_profiles(
    left: &Dataset,
    right: &Dataset,
    options: &ProfileOptions,
    config: &ProfilerConfig,
) -> Result<(Vec<ColumnProfile>, Vec<ColumnProfile>)> {
    let split = split_columns(left, right, &options.target_columns);
    Ok((
        profile_subset(left, &split.left_only, options, config)?,
        profile_subset(right, &split.right_only, options, config)?,
    ))
}

/// Paired profiles of the columns both sides have.
///
/// Histograms are only built when both sides resolved to the same type and
/// both carry a sub-profile.
#[instrument(skip_all)]
pub fn compare_common_profiles(
    left: &Dataset,
    right: &Dataset,
    options: &ProfileOptions,
    config: &ProfilerConfig,
) -> Result<Vec<CompareColumnProfile>> {
    let split = split_columns(left, right, &options.target_columns);
    if split.matched.is_empty() {
        return Ok(Vec::new());
    }
    let builder = HistogramBuilder::from_config(config)?;

    let left_profiles = profile_subset(left, &split.matched, options, config)?;
    let mut right_by_name: HashMap<String, ColumnProfile> =
        profile_subset(right, &split.matched, options, config)?
            .into_iter()
            .map(|profile| (profile.column_name.clone(), profile))
            .collect();

    let mut paired = Vec::with_capacity(left_profiles.len());
    for left_profile in left_profiles {
        let Some(right_profile) = right_by_name.remove(&left_profile.column_name) else {
            continue;
        };
        let name = left_profile.column_name.as_str();
        let comparable = left_profile.data_type == right_profile.data_type
            && left_profile.details.is_some()
            && right_profile.details.is_some();
        let histograms = if comparable {
            histograms::build_for_column(
                name,
                left.column(name)?,
                right.column(name)?,
                left_profile.data_type,
                right_profile.data_type,
                &builder,
            )?
        } else {
            Vec::new()
        };
        paired.push(CompareColumnProfile {
            column_name: left_profile.column_name.clone(),
            left_profile,
            right_profile,
            histograms,
        });
    }
    Ok(paired)
}

/// Structural summary plus one-sided and paired profiles.
#[instrument(skip(left, right, options, config))]
pub fn compare_datasets(
    left: &Dataset,
    right: &Dataset,
    options: &ProfileOptions,
    left_id: &str,
    right_id: &str,
    config: &ProfilerConfig,
) -> Result<ComparisonReport> {
    let start = Instant::now();
    let mut summary = summarize_comparison(left, right, left_id, right_id, config)?;
    let (left_only, right_only) = compare_one_sided_profiles(left, right, options, config)?;
    summary.column_profiles_left_only = left_only;
    summary.column_profiles_right_only = right_only;
    let compare_profiles = compare_common_profiles(left, right, options, config)?;

    info!(
        left = left_id,
        right = right_id,
        paired = compare_profiles.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Compared datasets"
    );
    Ok(ComparisonReport {
        summary,
        compare_profiles,
    })
}
