//! List column profile over per-row element counts.

use crate::histogram::HistogramBuilder;
use crate::models::ListProfile;
use crate::stats::length_stats;
use crate::values::ListValues;

pub fn build(values: &ListValues, histograms: &HistogramBuilder) -> ListProfile {
    let lengths: Vec<u64> = values.lengths.iter().flatten().copied().collect();
    let as_floats: Vec<f64> = lengths.iter().map(|l| *l as f64).collect();
    ListProfile {
        length_stats: length_stats(&lengths),
        length_histograms: histograms.build(&as_floats, true),
        value_samples: values.samples.clone(),
    }
}
