//! End-to-end tests of dataset comparison.

use std::sync::Arc;

use arrow::array::{ArrayRef, Int64Array, StringArray};
use tabscope::histogram::OTHER_LABEL;
use tabscope::prelude::*;
use tabscope::test_fixtures::create_compare_pair;

fn compare(left: &Dataset, right: &Dataset, options: &ProfileOptions) -> ComparisonReport {
    Profiler::new()
        .compare(left, right, options, "left", "right")
        .unwrap()
}

#[test]
fn test_column_partition_and_summary() {
    let (left, right) = create_compare_pair().unwrap();
    let report = compare(&left, &right, &ProfileOptions::default());
    let summary = &report.summary;

    assert_eq!(summary.row_count_delta, 2);
    assert_eq!(summary.column_matches.matched, 3);
    assert_eq!(summary.column_matches.column_names_left_only, vec!["discount"]);
    assert_eq!(summary.column_matches.column_names_right_only, vec!["channel"]);
    assert_eq!(summary.column_profiles_left_only[0].column_name, "discount");
    assert_eq!(summary.column_profiles_left_only[0].null_count, 3);
    assert_eq!(summary.column_profiles_right_only[0].column_name, "channel");

    let paired: Vec<&str> = report
        .compare_profiles
        .iter()
        .map(|p| p.column_name.as_str())
        .collect();
    assert_eq!(paired, vec!["order_id", "amount", "status"]);
}

#[test]
fn test_shared_edges_for_matched_numeric_column() {
    let (left, right) = create_compare_pair().unwrap();
    let report = compare(&left, &right, &ProfileOptions::default());

    let order_id = &report.compare_profiles[0];
    let histogram = &order_id.histograms[0];
    let expected_labels: Vec<String> = (1..=10).map(|i| i.to_string()).collect();
    assert_eq!(histogram.labels, expected_labels);
    assert_eq!(histogram.left_counts, vec![1, 1, 1, 1, 1, 1, 1, 1, 0, 0]);
    assert_eq!(histogram.right_counts, vec![0, 0, 0, 0, 1, 1, 1, 1, 1, 1]);

    let amount = &report.compare_profiles[1];
    assert_eq!(amount.histograms.len(), 1);
    assert_eq!(amount.histograms[0].bin_count, 10);
    assert_eq!(amount.histograms[0].left_counts.iter().sum::<u64>(), 8);
    assert_eq!(amount.histograms[0].right_counts.iter().sum::<u64>(), 6);
}

#[test]
fn test_type_mismatch_suppresses_histograms() {
    let (left, right) = create_compare_pair().unwrap();
    let report = compare(&left, &right, &ProfileOptions::default());

    let status = &report.compare_profiles[2];
    assert_eq!(status.left_profile.data_type, ColumnType::Categorical);
    assert_eq!(status.right_profile.data_type, ColumnType::Numeric);
    assert!(status.histograms.is_empty());
    assert_eq!(report.summary.type_mismatches.len(), 1);
    assert_eq!(report.summary.type_mismatches[0].column_name, "status");
}

#[test]
fn test_type_mismatches_ignore_explicit_types() {
    // Overrides reach the paired profiles but never the structural summary,
    // which compares raw inference only.
    let (left, right) = create_compare_pair().unwrap();
    let options = ProfileOptions::default()
        .with_explicit_types(vec![ExplicitType::new("status", ColumnType::Categorical)]);
    let report = compare(&left, &right, &options);

    let status = &report.compare_profiles[2];
    assert_eq!(status.left_profile.data_type, ColumnType::Categorical);
    assert_eq!(status.right_profile.data_type, ColumnType::Categorical);
    assert!(!status.histograms.is_empty());

    assert_eq!(report.summary.type_mismatches.len(), 1);
    assert_eq!(report.summary.type_mismatches[0].left_type, ColumnType::Categorical);
    assert_eq!(report.summary.type_mismatches[0].right_type, ColumnType::Numeric);
}

#[test]
fn test_no_shared_columns() {
    let left = Dataset::try_from_columns(vec![
        ("a", Arc::new(Int64Array::from(vec![1, 2])) as ArrayRef),
        ("b", Arc::new(StringArray::from(vec!["x", "y"])) as ArrayRef),
    ])
    .unwrap();
    let right = Dataset::try_from_columns(vec![(
        "c",
        Arc::new(Int64Array::from(vec![3])) as ArrayRef,
    )])
    .unwrap();

    let report = compare(&left, &right, &ProfileOptions::default());
    assert_eq!(report.summary.column_matches.matched, 0);
    assert_eq!(report.summary.column_profiles_left_only.len(), 2);
    assert_eq!(report.summary.column_profiles_right_only.len(), 1);
    assert!(report
        .summary
        .column_profiles_left_only
        .iter()
        .all(|p| p.details.is_some()));
    assert!(report.compare_profiles.is_empty());
}

#[test]
fn test_target_columns_restrict_profiles() {
    let (left, right) = create_compare_pair().unwrap();
    let options = ProfileOptions::default().with_target_columns(vec!["amount".to_string()]);
    let report = compare(&left, &right, &options);

    assert!(report.summary.column_profiles_left_only.is_empty());
    assert!(report.summary.column_profiles_right_only.is_empty());
    assert_eq!(report.compare_profiles.len(), 1);
    assert_eq!(report.compare_profiles[0].column_name, "amount");
    // the structural diff still covers every column
    assert_eq!(report.summary.column_matches.matched, 3);
}

#[test]
fn test_categorical_shared_other_bucket() {
    let left_labels: Vec<String> = (0..40).map(|i| format!("l{:02}", i % 14)).collect();
    let right_labels: Vec<String> = (0..20).map(|i| format!("l{:02}", i % 3)).collect();
    let left = Dataset::try_from_columns(vec![(
        "label",
        Arc::new(StringArray::from(left_labels)) as ArrayRef,
    )])
    .unwrap();
    let right = Dataset::try_from_columns(vec![(
        "label",
        Arc::new(StringArray::from(right_labels)) as ArrayRef,
    )])
    .unwrap();

    let report = compare(&left, &right, &ProfileOptions::default());
    let histogram = &report.compare_profiles[0].histograms[0];
    assert_eq!(histogram.bin_count, 11);
    assert_eq!(histogram.labels[10], OTHER_LABEL);
    assert_eq!(histogram.left_counts.iter().sum::<u64>(), 40);
    assert_eq!(histogram.right_counts.iter().sum::<u64>(), 20);
    assert_eq!(histogram.right_counts[10], 0);
}

#[test]
fn test_compare_report_pipeline() {
    let (left, right) = create_compare_pair().unwrap();
    let request = CompareReportRequest::new(
        left,
        right,
        vec!["order_id".to_string()],
        vec![],
        Some("january"),
        None,
    )
    .unwrap();
    let payload = ReportPipeline::default().generate_compare(&request).unwrap();
    let json: serde_json::Value = serde_json::from_str(&payload.to_json().unwrap()).unwrap();

    assert_eq!(json["mode"], "compare");
    assert_eq!(json["comparison_summary"]["left_dataset"]["dataset_id"], "january");
    assert_eq!(json["comparison_summary"]["right_dataset"]["dataset_id"], "right");
    assert_eq!(json["compare_column_profiles"].as_array().map(Vec::len), Some(1));
}
