//! Datetime column profile.
//!
//! Values are profiled in one of two encodings: calendar dates (days since
//! the epoch, datetimes truncated to their date) or clock times (seconds
//! since midnight). Labels and min/max use ISO 8601 forms.

use crate::config::ProfilerConfig;
use crate::formatters::{format_date_label, format_time_label};
use crate::histogram::HistogramBuilder;
use crate::models::{DatetimeProfile, DatetimeValueCount};
use crate::stats::ranked_counts;
use crate::values::DatetimeValues;

pub fn build(
    values: &DatetimeValues,
    config: &ProfilerConfig,
    histograms: &HistogramBuilder,
) -> DatetimeProfile {
    let numeric = values.non_null_numeric();
    if numeric.is_empty() {
        return DatetimeProfile {
            min_datetime: String::new(),
            max_datetime: String::new(),
            histograms: Vec::new(),
            top_values: Vec::new(),
        };
    }

    let is_time = values.is_time();
    let label = |v: f64| {
        if is_time {
            format_time_label(v)
        } else {
            format_date_label(v)
        }
    };

    let min = numeric.iter().copied().fold(f64::INFINITY, f64::min);
    let max = numeric.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let top_values = ranked_counts(numeric.iter().map(|v| label(*v)))
        .into_iter()
        .take(config.top_values_limit)
        .map(|(value, count)| DatetimeValueCount { value, count })
        .collect();

    DatetimeProfile {
        min_datetime: label(min),
        max_datetime: label(max),
        histograms: histograms.build_labeled_datetime(&numeric, is_time),
        top_values,
    }
}
