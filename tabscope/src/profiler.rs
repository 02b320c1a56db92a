//! [`Profiler`]: one configuration, every engine.
//!
//! The profiler holds no state besides its configuration, so one instance can
//! serve any number of datasets, sequentially or from several threads.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use arrow::array::{ArrayRef, Float64Array};
//! use tabscope::prelude::*;
//!
//! # fn main() -> tabscope::error::Result<()> {
//! let profiler = Profiler::with_config(
//!     ProfilerConfig::builder().histogram_bins(vec![5, 20]).build()?,
//! )?;
//!
//! let dataset = Dataset::try_from_columns(vec![(
//!     "price",
//!     Arc::new(Float64Array::from(vec![1.0, 2.5, 4.0])) as ArrayRef,
//! )])?;
//!
//! let summary = profiler.summarize(&dataset, "prices")?;
//! assert_eq!(summary.type_counts.numeric, 1);
//! # Ok(())
//! # }
//! ```

use arrow::array::ArrayRef;

use crate::associations::compute_associations;
use crate::classify::resolve_type;
use crate::columns::{profile_columns, ProfileOptions};
use crate::compare::compare_datasets;
use crate::config::ProfilerConfig;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::models::{
    AssociationSummary, ColumnProfile, ComparisonReport, ComparisonSummary, DatasetSummary,
    ExplicitType, TypeClassification,
};
use crate::summary::{summarize_comparison, summarize_dataset};

/// Stateless entry point to the profiling engines.
#[derive(Debug, Clone, Default)]
pub struct Profiler {
    config: ProfilerConfig,
}

impl Profiler {
    /// A profiler with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// A profiler with a custom configuration, validated up front.
    pub fn with_config(config: ProfilerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ProfilerConfig {
        &self.config
    }

    /// Resolves the type of one column, honouring `explicit_types`.
    pub fn classify(
        &self,
        column_name: &str,
        column: &ArrayRef,
        explicit_types: &[ExplicitType],
    ) -> Result<TypeClassification> {
        resolve_type(
            column_name,
            column,
            explicit_types,
            self.config.cardinality_threshold,
        )
    }

    pub fn profile_columns(
        &self,
        dataset: &Dataset,
        options: &ProfileOptions,
    ) -> Result<Vec<ColumnProfile>> {
        profile_columns(dataset, options, &self.config)
    }

    pub fn summarize(&self, dataset: &Dataset, dataset_id: &str) -> Result<DatasetSummary> {
        summarize_dataset(dataset, dataset_id, &self.config)
    }

    pub fn summarize_comparison(
        &self,
        left: &Dataset,
        right: &Dataset,
        left_id: &str,
        right_id: &str,
    ) -> Result<ComparisonSummary> {
        summarize_comparison(left, right, left_id, right_id, &self.config)
    }

    pub fn associations(&self, dataset: &Dataset) -> Result<AssociationSummary> {
        compute_associations(dataset, &self.config)
    }

    pub fn compare(
        &self,
        left: &Dataset,
        right: &Dataset,
        options: &ProfileOptions,
        left_id: &str,
        right_id: &str,
    ) -> Result<ComparisonReport> {
        compare_datasets(left, right, options, left_id, right_id, &self.config)
    }
}
