//! Prelude for commonly used types in tabscope.

pub use crate::columns::ProfileOptions;
pub use crate::config::ProfilerConfig;
pub use crate::dataset::Dataset;
pub use crate::error::{ErrorContext, ProfileError, Result};
pub use crate::logging::LogConfig;
pub use crate::models::{
    AssociationSummary, ColumnDetails, ColumnProfile, ColumnType, ComparisonReport,
    DatasetSummary, ExplicitType,
};
pub use crate::profiler::Profiler;
pub use crate::report::{CompareReportRequest, ReportPayload, ReportPipeline, SingleReportRequest};
