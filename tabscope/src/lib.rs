//! # tabscope - Statistical profiling for Arrow datasets
//!
//! tabscope takes an in-memory Arrow [`RecordBatch`](arrow::record_batch::RecordBatch)
//! and describes it: what kind of data every column holds, how the values are
//! distributed, how columns relate to each other and how two versions of a
//! dataset differ. Every result is a plain serde-serializable value, ready to
//! hand to a renderer.
//!
//! ## Overview
//!
//! - **Type classification**: each column is classified as numeric,
//!   categorical, text, datetime, boolean, list or struct from its Arrow type
//!   (and, for strings, its cardinality). Callers can override the result per
//!   column.
//! - **Column profiles**: null/unique/zero counts for every column, plus a
//!   typed sub-profile with summary statistics, top values and histograms at
//!   several resolutions.
//! - **Dataset summary**: size, memory footprint, missing cells, duplicate
//!   rows and a type tally.
//! - **Associations**: Pearson, Cramér's V and correlation ratio between
//!   column pairs.
//! - **Comparison**: column-set diff, type mismatches and paired histograms
//!   with shared bin edges for columns present on both sides.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use arrow::array::{ArrayRef, Float64Array, StringArray};
//! use tabscope::prelude::*;
//!
//! # fn main() -> tabscope::error::Result<()> {
//! let dataset = Dataset::try_from_columns(vec![
//!     (
//!         "price",
//!         Arc::new(Float64Array::from(vec![Some(9.5), Some(12.0), None, Some(9.5)])) as ArrayRef,
//!     ),
//!     (
//!         "category",
//!         Arc::new(StringArray::from(vec!["book", "game", "book", "book"])) as ArrayRef,
//!     ),
//! ])?;
//!
//! let profiler = Profiler::new();
//! let profiles = profiler.profile_columns(&dataset, &ProfileOptions::default())?;
//!
//! let price = profiles[0].numeric().expect("numeric profile");
//! assert_eq!(profiles[0].null_count, 1);
//! assert_eq!(price.stats.minimum, 9.5);
//!
//! let category = profiles[1].categorical().expect("categorical profile");
//! assert_eq!(category.top_categories[0].category, "book");
//! # Ok(())
//! # }
//! ```
//!
//! ## Reports
//!
//! [`report::ReportPipeline`] validates a request once and bundles the
//! summary, column profiles and associations (or the comparison) into a
//! [`report::ReportPayload`]:
//!
//! ```rust
//! use std::sync::Arc;
//! use arrow::array::{ArrayRef, Int64Array};
//! use tabscope::prelude::*;
//!
//! # fn main() -> tabscope::error::Result<()> {
//! let before = Dataset::try_from_columns(vec![
//!     ("id", Arc::new(Int64Array::from(vec![1, 2, 3])) as ArrayRef),
//! ])?;
//! let after = Dataset::try_from_columns(vec![
//!     ("id", Arc::new(Int64Array::from(vec![1, 2, 3, 4])) as ArrayRef),
//! ])?;
//!
//! let request = CompareReportRequest::new(
//!     before,
//!     after,
//!     vec![],
//!     vec![],
//!     Some("before"),
//!     Some("after"),
//! )?;
//! let payload = ReportPipeline::default().generate_compare(&request)?;
//! assert!(payload.to_json()?.contains("\"row_count_delta\":-1"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Logging
//!
//! The engines emit `tracing` spans and events. Install a subscriber with
//! [`logging::setup::init_logging`], and tune per-column chatter through
//! [`logging::LogConfig`] inside [`config::ProfilerConfig`].

pub mod associations;
pub mod classify;
pub mod columns;
pub mod compare;
pub mod config;
pub mod dataset;
pub mod error;
pub mod formatters;
pub mod histogram;
pub mod logging;
pub mod models;
pub mod prelude;
pub mod profiler;
pub mod profiles;
pub mod report;
mod stats;
pub mod summary;
pub mod values;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_fixtures;
