//! End-to-end tests of single-dataset profiling: classification, column
//! profiles, dataset summaries and associations.

use std::sync::Arc;

use arrow::array::{
    ArrayRef, BooleanArray, DictionaryArray, Float64Array, Int64Array, LargeStringArray,
    StringArray, StructArray, TimestampSecondArray,
};
use arrow::datatypes::{DataType, Field, Int32Type};
use tabscope::histogram::OTHER_LABEL;
use tabscope::prelude::*;

fn column(name: &str, array: ArrayRef) -> Dataset {
    Dataset::try_from_columns(vec![(name, array)]).unwrap()
}

fn profile_one(dataset: &Dataset) -> ColumnProfile {
    Profiler::new()
        .profile_columns(dataset, &ProfileOptions::default())
        .unwrap()
        .remove(0)
}

#[test]
fn test_small_domain_gets_exact_histogram() {
    let dataset = column("n", Arc::new(Int64Array::from(vec![1, 2, 2, 3])));
    let profile = profile_one(&dataset);
    let numeric = profile.numeric().unwrap();

    assert_eq!(numeric.histograms.len(), 1);
    let bins: Vec<(f64, f64, u64)> = numeric.histograms[0]
        .bins
        .iter()
        .map(|b| (b.lower, b.upper, b.count))
        .collect();
    assert_eq!(bins, vec![(1.0, 1.0, 1), (2.0, 2.0, 2), (3.0, 3.0, 1)]);
}

#[test]
fn test_constant_column_has_no_outliers() {
    let dataset = column("n", Arc::new(Float64Array::from(vec![5.0, 5.0, 5.0])));
    let numeric = profile_one(&dataset).numeric().cloned().unwrap();
    assert_eq!(numeric.stats.iqr, 0.0);
    assert_eq!(numeric.outlier_rate, 0.0);
    assert_eq!(numeric.stats.std, 0.0);
}

#[test]
fn test_wide_domain_gets_every_resolution() {
    let values: Vec<Option<i64>> = (0..1_000)
        .map(|i| if i % 10 == 0 { None } else { Some(i * 7 % 503) })
        .collect();
    let dataset = column("n", Arc::new(Int64Array::from(values)));
    let profile = profile_one(&dataset);
    let numeric = profile.numeric().unwrap();

    let resolutions: Vec<usize> = numeric.histograms.iter().map(|h| h.bin_count).collect();
    assert_eq!(resolutions, vec![10, 15, 30, 50]);
    for histogram in &numeric.histograms {
        assert_eq!(histogram.total_count(), profile.non_null_count);
    }
    assert_eq!(numeric.min_values.len(), 5);
    assert!(numeric.min_values.windows(2).all(|w| w[0].value < w[1].value));
    assert!(numeric.max_values.windows(2).all(|w| w[0].value > w[1].value));
}

#[test]
fn test_high_cardinality_categorical() {
    // strings with 150 distinct labels infer as text; the override makes them categorical
    let labels: Vec<String> = (0..300).map(|i| format!("c{:03}", i % 150)).collect();
    let dataset = column("label", Arc::new(StringArray::from(labels)));

    let inferred = profile_one(&dataset);
    assert_eq!(inferred.data_type, ColumnType::Text);

    let options = ProfileOptions::default()
        .with_explicit_types(vec![ExplicitType::new("label", ColumnType::Categorical)]);
    let profile = Profiler::new()
        .profile_columns(&dataset, &options)
        .unwrap()
        .remove(0);
    let categorical = profile.categorical().unwrap();

    assert!(categorical.is_high_cardinality);
    assert_eq!(categorical.top_categories.len(), 10);
    assert_eq!(categorical.suppressed_count, 150 - 10);
    let histogram = &categorical.histograms[0];
    assert_eq!(histogram.labels.last().map(String::as_str), Some(OTHER_LABEL));
    assert_eq!(histogram.total_count(), 300);
}

#[test]
fn test_dictionary_column_is_categorical() {
    let dict: DictionaryArray<Int32Type> =
        vec!["red", "green", "red", "blue", "red"].into_iter().collect();
    let profile = profile_one(&column("color", Arc::new(dict)));
    assert_eq!(profile.data_type, ColumnType::Categorical);
    let categorical = profile.categorical().unwrap();
    assert_eq!(categorical.top_categories[0].category, "red");
    assert_eq!(categorical.top_categories[0].count, 3);
    assert!(!categorical.is_high_cardinality);
}

#[test]
fn test_text_profile() {
    let values: Vec<Option<String>> = (0..150)
        .map(|i| if i == 0 { None } else { Some("x".repeat(i % 12 + 1) + &i.to_string()) })
        .collect();
    let profile = profile_one(&column("notes", Arc::new(LargeStringArray::from(values))));
    assert_eq!(profile.data_type, ColumnType::Text);
    let text = profile.text().unwrap();
    assert!(text.length_stats.minimum >= 2);
    for histogram in &text.length_histograms {
        assert_eq!(histogram.total_count(), 149);
    }
}

#[test]
fn test_timestamps_truncate_to_dates() {
    // 2024-03-01T23:59:59Z and 2024-03-02T00:00:01Z
    let dataset = column(
        "at",
        Arc::new(TimestampSecondArray::from(vec![
            Some(1_709_337_599),
            Some(1_709_337_601),
            None,
        ])),
    );
    let profile = profile_one(&dataset);
    let datetime = profile.datetime().unwrap();
    assert_eq!(datetime.min_datetime, "2024-03-01");
    assert_eq!(datetime.max_datetime, "2024-03-02");
    assert_eq!(datetime.histograms[0].labels, vec!["2024-03-01", "2024-03-02"]);
}

#[test]
fn test_zoned_timestamps_use_local_calendar_dates() {
    // 2024-01-01T22:00 in New York is 2024-01-02T03:00Z
    let dataset = column(
        "at",
        Arc::new(
            TimestampSecondArray::from(vec![Some(1_704_164_400), Some(1_704_067_200)])
                .with_timezone("America/New_York"),
        ),
    );
    let datetime = profile_one(&dataset).datetime().cloned().unwrap();
    assert_eq!(datetime.min_datetime, "2023-12-31");
    assert_eq!(datetime.max_datetime, "2024-01-01");
}

#[test]
fn test_struct_unique_count_with_nested_nulls() {
    let inner: ArrayRef = Arc::new(Int64Array::from(vec![Some(1), None, Some(1), None, Some(2)]));
    let structs = StructArray::from(vec![(Arc::new(Field::new("v", DataType::Int64, true)), inner)]);
    let profile = profile_one(&column("s", Arc::new(structs)));
    assert_eq!(profile.data_type, ColumnType::Struct);
    assert_eq!(profile.unique_count, 3);
    assert!(profile.details.is_none());
}

#[test]
fn test_dataset_summary() {
    let dataset = Dataset::try_from_columns(vec![
        ("a", Arc::new(Int64Array::from(vec![Some(1), Some(1), None])) as ArrayRef),
        (
            "b",
            Arc::new(BooleanArray::from(vec![Some(true), Some(true), Some(false)])) as ArrayRef,
        ),
    ])
    .unwrap();
    let summary = Profiler::new().summarize(&dataset, "toy").unwrap();
    assert_eq!(summary.row_count, 3);
    assert_eq!(summary.missing_cells, 1);
    assert!((summary.missing_rate - 1.0 / 6.0).abs() < 1e-12);
    assert_eq!(summary.duplicate_rows, 1);
    assert_eq!(summary.type_counts.numeric, 1);
    assert_eq!(summary.type_counts.boolean, 1);
}

#[test]
fn test_associations_on_linear_columns() {
    let dataset = Dataset::try_from_columns(vec![
        ("x", Arc::new(Int64Array::from(vec![1, 2, 3, 4])) as ArrayRef),
        ("y", Arc::new(Int64Array::from(vec![2, 4, 6, 8])) as ArrayRef),
        ("k", Arc::new(StringArray::from(vec!["a", "a", "a", "a"])) as ArrayRef),
        ("j", Arc::new(StringArray::from(vec!["p", "q", "p", "q"])) as ArrayRef),
    ])
    .unwrap();
    let associations = Profiler::new().associations(&dataset).unwrap();

    assert!((associations.numeric_numeric[0].value - 1.0).abs() < 1e-9);
    // a single-category column has no association
    assert_eq!(associations.categorical_categorical[0].value, 0.0);
    assert_eq!(associations.numeric_categorical.len(), 4);
}

#[test]
fn test_report_payload_for_empty_dataset() {
    let request = SingleReportRequest::new(Dataset::empty(), vec![], vec![]).unwrap();
    let payload = ReportPipeline::default().generate_single(&request).unwrap();
    assert_eq!(payload.warnings().len(), 1);

    let ReportPayload::Single(report) = payload else {
        panic!("expected a single report");
    };
    assert!(report.column_profiles.is_empty());
    assert_eq!(report.dataset_summary.duplicate_rows, 0);
    assert_eq!(report.associations, AssociationSummary::default());
}
