//! Report requests and payload assembly.
//!
//! A request validates user input against the dataset(s) once; the
//! [`ReportPipeline`] then runs the engines and bundles their output into a
//! serializable [`ReportPayload`] for whatever renders it.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use arrow::array::{ArrayRef, StringArray};
//! use tabscope::dataset::Dataset;
//! use tabscope::report::{ReportPayload, ReportPipeline, SingleReportRequest};
//!
//! let dataset = Dataset::try_from_columns(vec![(
//!     "city",
//!     Arc::new(StringArray::from(vec!["Oslo", "Lima"])) as ArrayRef,
//! )])
//! .unwrap();
//!
//! let request = SingleReportRequest::new(dataset, vec![], vec![]).unwrap();
//! let payload = ReportPipeline::default().generate_single(&request).unwrap();
//!
//! let json = payload.to_json().unwrap();
//! assert!(json.starts_with(r#"{"mode":"single""#));
//! ```

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::columns::ProfileOptions;
use crate::dataset::Dataset;
use crate::error::{ProfileError, Result};
use crate::models::{
    AssociationSummary, ColumnProfile, CompareColumnProfile, ComparisonSummary, DatasetSummary,
    ExplicitType,
};
use crate::profiler::Profiler;

/// Warning attached to reports built from a dataset without rows or columns.
pub const EMPTY_INPUT_WARNING: &str = "Input dataset is empty; report will contain no data.";

const SINGLE_DATASET_ID: &str = "single";
const DEFAULT_LEFT_NAME: &str = "left";
const DEFAULT_RIGHT_NAME: &str = "right";

fn validate_target_columns(dataset: &Dataset, target_columns: &[String]) -> Result<()> {
    let missing: Vec<&str> = target_columns
        .iter()
        .map(String::as_str)
        .filter(|name| !dataset.has_column(name))
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ProfileError::column_not_found(missing.join(", ")))
    }
}

fn validate_explicit_types(dataset: &Dataset, explicit_types: &[ExplicitType]) -> Result<()> {
    if explicit_types
        .iter()
        .any(|explicit| !dataset.has_column(&explicit.column_name))
    {
        return Err(ProfileError::invalid_configuration(
            "explicit_types contains unknown columns or types",
        ));
    }
    Ok(())
}

fn normalize_label(label: Option<&str>, default: &str) -> String {
    match label.map(str::trim) {
        Some(cleaned) if !cleaned.is_empty() => cleaned.to_string(),
        _ => default.to_string(),
    }
}

fn input_warnings(dataset: &Dataset) -> Vec<String> {
    if dataset.is_empty() {
        vec![EMPTY_INPUT_WARNING.to_string()]
    } else {
        Vec::new()
    }
}

/// A validated single-dataset report request.
#[derive(Debug, Clone)]
pub struct SingleReportRequest {
    pub dataset: Dataset,
    pub options: ProfileOptions,
}

impl SingleReportRequest {
    /// Fails when a target or override names a column the dataset lacks.
    pub fn new(
        dataset: Dataset,
        target_columns: Vec<String>,
        explicit_types: Vec<ExplicitType>,
    ) -> Result<Self> {
        validate_target_columns(&dataset, &target_columns)?;
        validate_explicit_types(&dataset, &explicit_types)?;
        Ok(Self {
            dataset,
            options: ProfileOptions {
                target_columns,
                explicit_types,
            },
        })
    }
}

/// A validated two-dataset report request.
#[derive(Debug, Clone)]
pub struct CompareReportRequest {
    pub left: Dataset,
    pub right: Dataset,
    pub options: ProfileOptions,
    pub left_name: String,
    pub right_name: String,
}

impl CompareReportRequest {
    /// Targets and overrides must exist on both sides. Blank names fall back
    /// to `"left"` and `"right"`.
    pub fn new(
        left: Dataset,
        right: Dataset,
        target_columns: Vec<String>,
        explicit_types: Vec<ExplicitType>,
        left_name: Option<&str>,
        right_name: Option<&str>,
    ) -> Result<Self> {
        validate_target_columns(&left, &target_columns)?;
        validate_target_columns(&right, &target_columns)?;
        validate_explicit_types(&left, &explicit_types)?;
        validate_explicit_types(&right, &explicit_types)?;
        Ok(Self {
            left,
            right,
            options: ProfileOptions {
                target_columns,
                explicit_types,
            },
            left_name: normalize_label(left_name, DEFAULT_LEFT_NAME),
            right_name: normalize_label(right_name, DEFAULT_RIGHT_NAME),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleReport {
    pub warnings: Vec<String>,
    pub dataset_summary: DatasetSummary,
    pub column_profiles: Vec<ColumnProfile>,
    pub associations: AssociationSummary,
    pub histogram_bins: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareReport {
    pub warnings: Vec<String>,
    pub comparison_summary: ComparisonSummary,
    pub compare_column_profiles: Vec<CompareColumnProfile>,
    pub histogram_bins: Vec<usize>,
}

/// Everything a renderer needs for one report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ReportPayload {
    Single(SingleReport),
    Compare(CompareReport),
}

impl ReportPayload {
    pub fn warnings(&self) -> &[String] {
        match self {
            ReportPayload::Single(report) => &report.warnings,
            ReportPayload::Compare(report) => &report.warnings,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Runs the engines for a request and assembles the payload.
#[derive(Debug, Clone, Default)]
pub struct ReportPipeline {
    profiler: Profiler,
}

impl ReportPipeline {
    pub fn new(profiler: Profiler) -> Self {
        Self { profiler }
    }

    pub fn profiler(&self) -> &Profiler {
        &self.profiler
    }

    #[instrument(skip_all)]
    pub fn generate_single(&self, request: &SingleReportRequest) -> Result<ReportPayload> {
        let start = Instant::now();
        info!("Generating single-dataset report");
        debug!(
            rows = request.dataset.row_count(),
            columns = request.dataset.column_count(),
            "Input dataset"
        );

        let warnings = input_warnings(&request.dataset);
        for warning in &warnings {
            warn!(warning = %warning, "Input warning");
        }

        let dataset_summary = self.profiler.summarize(&request.dataset, SINGLE_DATASET_ID)?;
        let column_profiles = self
            .profiler
            .profile_columns(&request.dataset, &request.options)?;
        let associations = self.profiler.associations(&request.dataset)?;

        info!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Generated single-dataset report"
        );
        Ok(ReportPayload::Single(SingleReport {
            warnings,
            dataset_summary,
            column_profiles,
            associations,
            histogram_bins: self.profiler.config().histogram_bins.clone(),
        }))
    }

    #[instrument(skip_all, fields(left = %request.left_name, right = %request.right_name))]
    pub fn generate_compare(&self, request: &CompareReportRequest) -> Result<ReportPayload> {
        let start = Instant::now();
        info!("Generating compare report");
        debug!(
            left_rows = request.left.row_count(),
            left_columns = request.left.column_count(),
            right_rows = request.right.row_count(),
            right_columns = request.right.column_count(),
            "Input datasets"
        );

        let mut warnings = input_warnings(&request.left);
        warnings.extend(input_warnings(&request.right));
        for warning in &warnings {
            warn!(warning = %warning, "Input warning");
        }

        let report = self.profiler.compare(
            &request.left,
            &request.right,
            &request.options,
            &request.left_name,
            &request.right_name,
        )?;

        info!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Generated compare report"
        );
        Ok(ReportPayload::Compare(CompareReport {
            warnings,
            comparison_summary: report.summary,
            compare_column_profiles: report.compare_profiles,
            histogram_bins: self.profiler.config().histogram_bins.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use arrow::array::{ArrayRef, Int64Array, StringArray};

    use crate::models::ColumnType;

    fn dataset() -> Dataset {
        Dataset::try_from_columns(vec![
            ("id", Arc::new(Int64Array::from(vec![1, 2, 3])) as ArrayRef),
            ("city", Arc::new(StringArray::from(vec!["a", "b", "a"])) as ArrayRef),
        ])
        .unwrap()
    }

    #[test]
    fn test_missing_target_columns() {
        let err = SingleReportRequest::new(
            dataset(),
            vec!["id".to_string(), "nope".to_string(), "gone".to_string()],
            vec![],
        )
        .unwrap_err();
        match err {
            ProfileError::ColumnNotFound { column } => assert_eq!(column, "nope, gone"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_override_column() {
        let err = SingleReportRequest::new(
            dataset(),
            vec![],
            vec![ExplicitType::new("nope", ColumnType::Text)],
        )
        .unwrap_err();
        assert!(matches!(err, ProfileError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_compare_labels() {
        let request = CompareReportRequest::new(
            dataset(),
            dataset(),
            vec![],
            vec![],
            Some("  "),
            Some(" after "),
        )
        .unwrap();
        assert_eq!(request.left_name, "left");
        assert_eq!(request.right_name, "after");

        let request =
            CompareReportRequest::new(dataset(), dataset(), vec![], vec![], None, None).unwrap();
        assert_eq!(request.right_name, "right");
    }

    #[test]
    fn test_compare_targets_must_exist_on_both_sides() {
        let right = Dataset::try_from_columns(vec![(
            "city",
            Arc::new(StringArray::from(vec!["a"])) as ArrayRef,
        )])
        .unwrap();
        let err = CompareReportRequest::new(
            dataset(),
            right,
            vec!["id".to_string()],
            vec![],
            None,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, ProfileError::ColumnNotFound { .. }));
    }

    #[test]
    fn test_single_payload() {
        let request = SingleReportRequest::new(dataset(), vec![], vec![]).unwrap();
        let payload = ReportPipeline::default().generate_single(&request).unwrap();
        let ReportPayload::Single(report) = &payload else {
            panic!("expected a single report");
        };
        assert!(report.warnings.is_empty());
        assert_eq!(report.dataset_summary.dataset_id, "single");
        assert_eq!(report.column_profiles.len(), 2);
        assert_eq!(report.histogram_bins, vec![10, 15, 30, 50]);
        assert_eq!(report.associations.numeric_categorical.len(), 1);

        let json: serde_json::Value = serde_json::from_str(&payload.to_json().unwrap()).unwrap();
        assert_eq!(json["mode"], "single");
        assert_eq!(json["column_profiles"][0]["details"]["kind"], "numeric");
    }

    #[test]
    fn test_empty_input_warning() {
        let request = CompareReportRequest::new(
            Dataset::empty(),
            dataset(),
            vec![],
            vec![],
            Some("old"),
            Some("new"),
        )
        .unwrap();
        let payload = ReportPipeline::default().generate_compare(&request).unwrap();
        assert_eq!(payload.warnings().to_vec(), vec![EMPTY_INPUT_WARNING.to_string()]);

        let ReportPayload::Compare(report) = payload else {
            panic!("expected a compare report");
        };
        assert_eq!(report.comparison_summary.left_dataset.dataset_id, "old");
        assert_eq!(report.comparison_summary.column_matches.right_only, 2);
        assert_eq!(report.comparison_summary.column_profiles_right_only.len(), 2);
        assert!(report.compare_column_profiles.is_empty());
    }

    #[test]
    fn test_compare_payload_json_shape() {
        let request =
            CompareReportRequest::new(dataset(), dataset(), vec![], vec![], None, None).unwrap();
        let payload = ReportPipeline::default().generate_compare(&request).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&payload.to_json_pretty().unwrap()).unwrap();
        assert_eq!(json["mode"], "compare");
        assert_eq!(json["comparison_summary"]["row_count_delta"], 0);
        assert_eq!(json["compare_column_profiles"][1]["column_name"], "city");
        assert_eq!(json["histogram_bins"][3], 50);
    }
}
