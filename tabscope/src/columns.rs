//! Column profiling orchestrator.
//!
//! Walks a dataset's columns in declaration order, resolves each column's
//! type (inference, then caller override), computes the common counts and
//! dispatches to the matching single-column profiler.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use arrow::array::{ArrayRef, Int64Array, StringArray};
//! use tabscope::columns::{profile_columns, ProfileOptions};
//! use tabscope::config::ProfilerConfig;
//! use tabscope::dataset::Dataset;
//!
//! let dataset = Dataset::try_from_columns(vec![
//!     ("id", Arc::new(Int64Array::from(vec![1, 2, 3])) as ArrayRef),
//!     ("city", Arc::new(StringArray::from(vec!["Oslo", "Lima", "Oslo"])) as ArrayRef),
//! ])
//! .unwrap();
//!
//! let options = ProfileOptions::new().with_target_columns(vec!["city".to_string()]);
//! let profiles = profile_columns(&dataset, &options, &ProfilerConfig::default()).unwrap();
//!
//! assert!(profiles[0].details.is_none());
//! assert_eq!(profiles[1].categorical().unwrap().top_categories[0].category, "Oslo");
//! ```

use std::collections::HashSet;
use std::time::Instant;

use arrow::array::{Array, ArrayRef};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::classify::{is_numeric, resolve_type};
use crate::config::ProfilerConfig;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::histogram::HistogramBuilder;
use crate::logging::truncate_field;
use crate::models::{ColumnDetails, ColumnProfile, ColumnType, ExplicitType};
use crate::profiles::{categorical, datetime, list, numeric, text};
use crate::values::{datetime_values, distinct_count, list_values, numeric_values, string_values, NumericValues};

/// Which columns get detailed sub-profiles, and which types are forced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileOptions {
    /// Columns that receive a sub-profile; empty means all of them
    pub target_columns: Vec<String>,
    /// Type overrides, applied by exact column name
    pub explicit_types: Vec<ExplicitType>,
}

impl ProfileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target_columns(mut self, columns: Vec<String>) -> Self {
        self.target_columns = columns;
        self
    }

    pub fn with_explicit_types(mut self, explicit_types: Vec<ExplicitType>) -> Self {
        self.explicit_types = explicit_types;
        self
    }
}

/// Profiles every column of `dataset`.
#[instrument(skip_all, fields(rows = dataset.row_count(), columns = dataset.column_count()))]
pub fn profile_columns(
    dataset: &Dataset,
    options: &ProfileOptions,
    config: &ProfilerConfig,
) -> Result<Vec<ColumnProfile>> {
    let start = Instant::now();
    let histograms = HistogramBuilder::from_config(config)?;
    let targets: HashSet<&str> = options.target_columns.iter().map(String::as_str).collect();
    let row_count = dataset.row_count();

    let profiles = dataset
        .columns()
        .map(|(name, column)| {
            let include_details = targets.is_empty() || targets.contains(name);
            profile_column(
                name,
                column,
                row_count,
                include_details,
                options,
                config,
                &histograms,
            )
        })
        .collect::<Result<Vec<_>>>()?;

    crate::log_data_op!(
        config.log,
        columns = profiles.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Completed column profiling"
    );
    Ok(profiles)
}

fn profile_column(
    name: &str,
    column: &ArrayRef,
    row_count: usize,
    include_details: bool,
    options: &ProfileOptions,
    config: &ProfilerConfig,
    histograms: &HistogramBuilder,
) -> Result<ColumnProfile> {
    let resolved = resolve_type(
        name,
        column,
        &options.explicit_types,
        config.cardinality_threshold,
    )?;
    let build_details = include_details
        && !resolved.basic_only
        && resolved.column_type != ColumnType::Struct;

    let unique_count = distinct_count(std::slice::from_ref(column), row_count)?;

    // Shared by the zero count, the null count and the numeric profile.
    let physically_numeric = is_numeric(column.data_type());
    let numeric = if physically_numeric
        || (build_details && resolved.column_type == ColumnType::Numeric)
    {
        Some(numeric_values(name, column)?)
    } else {
        None
    };

    // NaN and infinities never reach a numeric profile, so they count as missing.
    let null_count = match &numeric {
        Some(values) if resolved.column_type == ColumnType::Numeric => {
            values.values.iter().filter(|v| v.is_none()).count()
        }
        _ => column.logical_null_count(),
    };
    let null_rate = if row_count == 0 {
        0.0
    } else {
        null_count as f64 / row_count as f64
    };

    let zero_count = match (&numeric, physically_numeric) {
        (Some(values), true) => values.values.iter().flatten().filter(|v| **v == 0.0).count(),
        _ => 0,
    };

    let details = if build_details {
        build_column_details(
            name,
            column,
            resolved.column_type,
            numeric,
            unique_count,
            config,
            histograms,
        )?
    } else {
        None
    };

    crate::log_column!(
        config.log,
        column = %truncate_field(name, config.log.max_field_length),
        data_type = %resolved.column_type,
        null_count,
        unique_count,
        detailed = details.is_some(),
        "Profiled column"
    );

    Ok(ColumnProfile {
        column_name: name.to_string(),
        data_type: resolved.column_type,
        non_null_count: (row_count - null_count) as u64,
        null_count: null_count as u64,
        null_rate,
        unique_count: unique_count as u64,
        zero_count: zero_count as u64,
        details,
    })
}

fn non_null_strings(column: &ArrayRef) -> Result<Vec<String>> {
    Ok(string_values(column)?.into_iter().flatten().collect())
}

fn build_column_details(
    name: &str,
    column: &ArrayRef,
    column_type: ColumnType,
    numeric: Option<NumericValues>,
    unique_count: usize,
    config: &ProfilerConfig,
    histograms: &HistogramBuilder,
) -> Result<Option<ColumnDetails>> {
    let details = match column_type {
        ColumnType::Numeric => {
            let values = match numeric {
                Some(values) => values,
                None => numeric_values(name, column)?,
            };
            ColumnDetails::Numeric(numeric::build(
                &values.non_null(),
                values.is_integer,
                config,
                histograms,
            ))
        }
        ColumnType::Categorical | ColumnType::Boolean => ColumnDetails::Categorical(
            categorical::build(&non_null_strings(column)?, unique_count, config, histograms),
        ),
        ColumnType::Text => {
            ColumnDetails::Text(text::build(&non_null_strings(column)?, config, histograms))
        }
        ColumnType::Datetime => ColumnDetails::Datetime(datetime::build(
            &datetime_values(name, column)?,
            config,
            histograms,
        )),
        ColumnType::List => ColumnDetails::List(list::build(
            &list_values(name, column, config.list_sample_limit)?,
            histograms,
        )),
        ColumnType::Struct => return Ok(None),
    };
    Ok(Some(details))
}
