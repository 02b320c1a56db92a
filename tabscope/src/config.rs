//! Profiler configuration.
//!
//! A [`ProfilerConfig`] carries every tunable used by the engines: histogram
//! resolutions, top-N limits, the text/categorical cardinality threshold and the
//! association row cap. Build one with [`ProfilerConfig::builder`]; the builder
//! validates on [`ProfilerConfigBuilder::build`].
//!
//! # Example
//!
//! ```rust
//! use tabscope::config::ProfilerConfig;
//!
//! let config = ProfilerConfig::builder()
//!     .histogram_bins(vec![5, 20])
//!     .association_row_limit(10_000)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.histogram_bins, vec![5, 20]);
//! ```

use crate::error::{ProfileError, Result};
use crate::logging::LogConfig;

/// Default histogram resolutions.
pub const DEFAULT_HISTOGRAM_BINS: [usize; 4] = [10, 15, 30, 50];
/// Number of entries kept in every top-N list.
pub const TOP_VALUES_LIMIT: usize = 10;
/// Number of smallest / largest distinct values reported for numeric columns.
pub const EXTREMES_LIMIT: usize = 5;
/// Distinct-count above which strings are text and categoricals are high-cardinality.
pub const CARDINALITY_THRESHOLD: usize = 100;
/// Row cap applied before computing associations.
pub const ASSOCIATION_ROW_LIMIT: usize = 50_000;
/// Number of associations kept per family.
pub const TOP_ASSOCIATIONS: usize = 20;
/// Number of stringified samples kept for list columns.
pub const LIST_SAMPLE_LIMIT: usize = 5;

/// Configuration shared by every profiling engine.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfilerConfig {
    /// Bin counts each numeric histogram is computed at
    pub histogram_bins: Vec<usize>,
    /// Length of top-value, top-category and top-token lists; also the
    /// distinct-count at or below which histograms switch to exact mode
    pub top_values_limit: usize,
    /// Number of smallest / largest distinct numeric values reported
    pub extremes_limit: usize,
    /// Cardinality threshold for text classification and high-cardinality flags
    pub cardinality_threshold: usize,
    /// Maximum number of rows fed to the association engine
    pub association_row_limit: usize,
    /// Maximum associations kept per family
    pub top_associations: usize,
    /// Number of sample values kept for list columns
    pub list_sample_limit: usize,
    /// Logging behaviour of the engines
    pub log: LogConfig,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            histogram_bins: DEFAULT_HISTOGRAM_BINS.to_vec(),
            top_values_limit: TOP_VALUES_LIMIT,
            extremes_limit: EXTREMES_LIMIT,
            cardinality_threshold: CARDINALITY_THRESHOLD,
            association_row_limit: ASSOCIATION_ROW_LIMIT,
            top_associations: TOP_ASSOCIATIONS,
            list_sample_limit: LIST_SAMPLE_LIMIT,
            log: LogConfig::default(),
        }
    }
}

impl ProfilerConfig {
    /// Create a new builder starting from the defaults.
    pub fn builder() -> ProfilerConfigBuilder {
        ProfilerConfigBuilder {
            config: ProfilerConfig::default(),
        }
    }

    /// Checks that the configuration can produce meaningful output.
    pub fn validate(&self) -> Result<()> {
        if self.histogram_bins.is_empty() {
            return Err(ProfileError::invalid_configuration(
                "histogram_bins must contain at least one bin count",
            ));
        }
        if self.histogram_bins.contains(&0) {
            return Err(ProfileError::invalid_configuration(
                "histogram_bins must not contain a zero bin count",
            ));
        }
        if self.top_values_limit == 0 {
            return Err(ProfileError::invalid_configuration(
                "top_values_limit must be at least 1",
            ));
        }
        if self.association_row_limit == 0 {
            return Err(ProfileError::invalid_configuration(
                "association_row_limit must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Builder for [`ProfilerConfig`].
#[derive(Debug, Clone)]
pub struct ProfilerConfigBuilder {
    config: ProfilerConfig,
}

impl ProfilerConfigBuilder {
    /// Set the histogram resolutions
    pub fn histogram_bins(mut self, bins: Vec<usize>) -> Self {
        self.config.histogram_bins = bins;
        self
    }

    /// Set the top-N limit
    pub fn top_values_limit(mut self, limit: usize) -> Self {
        self.config.top_values_limit = limit;
        self
    }

    /// Set the number of numeric extremes reported
    pub fn extremes_limit(mut self, limit: usize) -> Self {
        self.config.extremes_limit = limit;
        self
    }

    /// Set the text/categorical cardinality threshold
    pub fn cardinality_threshold(mut self, threshold: usize) -> Self {
        self.config.cardinality_threshold = threshold;
        self
    }

    /// Set the association row cap
    pub fn association_row_limit(mut self, rows: usize) -> Self {
        self.config.association_row_limit = rows;
        self
    }

    /// Set how many associations each family keeps
    pub fn top_associations(mut self, limit: usize) -> Self {
        self.config.top_associations = limit;
        self
    }

    /// Set how many list samples are kept
    pub fn list_sample_limit(mut self, limit: usize) -> Self {
        self.config.list_sample_limit = limit;
        self
    }

    /// Set the logging configuration
    pub fn log_config(mut self, log: LogConfig) -> Self {
        self.config.log = log;
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<ProfilerConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
