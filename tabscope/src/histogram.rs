//! Multi-resolution histogram construction.
//!
//! A [`HistogramBuilder`] turns a sequence of numbers into one histogram per
//! configured bin count. Small domains (at most `top_values_limit` distinct
//! values) collapse into a single exact histogram with one bin per value,
//! since binning them further would only lose detail.
//!
//! Two binning policies exist:
//!
//! - **integer**: whole-number bin widths of `ceil((max - min + 1) / bins)`,
//!   upper edges clamped to the data maximum;
//! - **float**: `(max - min) / bins` wide bins, with the maximum forced into
//!   the last bin.
//!
//! The same [`BinLayout`] drives the compare engine so both sides of a
//! comparison share identical edges.
//!
//! # Example
//!
//! ```rust
//! use tabscope::histogram::HistogramBuilder;
//!
//! let builder = HistogramBuilder::new(vec![10, 30], 10).unwrap();
//! let histograms = builder.build(&[1.0, 2.0, 2.0, 3.0], true);
//!
//! // three distinct values: one exact histogram
//! assert_eq!(histograms.len(), 1);
//! assert_eq!(histograms[0].bins[1].count, 2);
//! ```

use crate::config::ProfilerConfig;
use crate::error::{ProfileError, Result};
use crate::formatters::format_datetime_bin;
use crate::models::{Histogram, HistogramBin, LabeledHistogram};
use crate::stats::sorted_value_counts;

/// Label of the bucket collecting suppressed categories.
pub const OTHER_LABEL: &str = "Other";

/// Bin edges for one resolution over a fixed `[min, max]` domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct BinLayout {
    start: f64,
    end: f64,
    width: f64,
    bin_count: usize,
    is_integer: bool,
}

impl BinLayout {
    /// `min < max` and `bin_count > 0` are expected.
    pub(crate) fn new(min: f64, max: f64, bin_count: usize, is_integer: bool) -> Self {
        let bins = bin_count.max(1) as f64;
        if is_integer {
            let start = min.trunc();
            let end = max.trunc();
            let width = ((end - start + 1.0) / bins).ceil().max(1.0);
            Self {
                start,
                end,
                width,
                bin_count: bin_count.max(1),
                is_integer,
            }
        } else {
            Self {
                start: min,
                end: max,
                width: (max - min) / bins,
                bin_count: bin_count.max(1),
                is_integer,
            }
        }
    }

    pub(crate) fn bin_count(&self) -> usize {
        self.bin_count
    }

    pub(crate) fn index_of(&self, value: f64) -> usize {
        let last = self.bin_count - 1;
        if !self.is_integer && value == self.end {
            return last;
        }
        let position = if self.is_integer {
            ((value.trunc() - self.start) / self.width).floor()
        } else {
            ((value - self.start) / self.width).floor()
        };
        if position <= 0.0 {
            0
        } else {
            (position as usize).min(last)
        }
    }

    pub(crate) fn bounds(&self, index: usize) -> (f64, f64) {
        let lower = self.start + self.width * index as f64;
        if self.is_integer {
            let next = self.start + self.width * (index + 1) as f64;
            (lower, lower.max((next - 1.0).min(self.end)))
        } else {
            (lower, self.start + self.width * (index + 1) as f64)
        }
    }

    /// Per-bin counts of `values`.
    pub(crate) fn tally(&self, values: &[f64]) -> Vec<u64> {
        let mut counts = vec![0u64; self.bin_count];
        for value in values {
            counts[self.index_of(*value)] += 1;
        }
        counts
    }
}

/// Builds numeric, datetime and categorical histograms.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBuilder {
    bin_counts: Vec<usize>,
    top_values_limit: usize,
}

impl HistogramBuilder {
    /// Rejects an empty resolution list and zero bin counts.
    pub fn new(bin_counts: Vec<usize>, top_values_limit: usize) -> Result<Self> {
        if bin_counts.is_empty() {
            return Err(ProfileError::invalid_configuration(
                "histogram_bins must contain at least one bin count",
            ));
        }
        if bin_counts.contains(&0) {
            return Err(ProfileError::invalid_configuration(
                "histogram_bins must not contain a zero bin count",
            ));
        }
        Ok(Self {
            bin_counts,
            top_values_limit,
        })
    }

    pub fn from_config(config: &ProfilerConfig) -> Result<Self> {
        Self::new(config.histogram_bins.clone(), config.top_values_limit)
    }

    pub fn bin_counts(&self) -> &[usize] {
        &self.bin_counts
    }

    pub fn top_values_limit(&self) -> usize {
        self.top_values_limit
    }

    /// Whether `distinct` values are few enough for an exact histogram.
    pub(crate) fn is_exact(&self, distinct: usize) -> bool {
        distinct <= self.top_values_limit
    }

    /// Numeric histograms over `values` (nulls already removed).
    pub fn build(&self, values: &[f64], is_integer: bool) -> Vec<Histogram> {
        if values.is_empty() {
            return self.bin_counts.iter().map(|b| Histogram::empty(*b)).collect();
        }

        let counts = sorted_value_counts(values);
        if self.is_exact(counts.len()) {
            let bins = counts
                .iter()
                .map(|(value, count)| HistogramBin {
                    lower: *value,
                    upper: *value,
                    count: *count,
                })
                .collect::<Vec<_>>();
            return vec![Histogram {
                bin_count: bins.len(),
                bins,
            }];
        }

        // counts is sorted and non-empty here
        let min = counts[0].0;
        let max = counts[counts.len() - 1].0;
        let total = values.len() as u64;

        self.bin_counts
            .iter()
            .map(|&bin_count| {
                if max - min == 0.0 {
                    return Histogram {
                        bin_count,
                        bins: vec![HistogramBin {
                            lower: min,
                            upper: min,
                            count: total,
                        }],
                    };
                }
                let layout = BinLayout::new(min, max, bin_count, is_integer);
                let tallies = layout.tally(values);
                let bins = tallies
                    .into_iter()
                    .enumerate()
                    .map(|(index, count)| {
                        let (lower, upper) = layout.bounds(index);
                        HistogramBin {
                            lower,
                            upper,
                            count,
                        }
                    })
                    .collect();
                Histogram { bin_count, bins }
            })
            .collect()
    }

    /// Datetime histograms over encoded values, labeled as dates or times.
    ///
    /// Dates bin as integers (days), times as floats (seconds).
    pub fn build_labeled_datetime(&self, values: &[f64], is_time: bool) -> Vec<LabeledHistogram> {
        if values.is_empty() {
            return Vec::new();
        }
        self.build(values, !is_time)
            .into_iter()
            .map(|histogram| LabeledHistogram {
                bin_count: histogram.bin_count,
                labels: histogram
                    .bins
                    .iter()
                    .map(|bin| format_datetime_bin(bin.lower, bin.upper, is_time))
                    .collect(),
                counts: histogram.bins.iter().map(|bin| bin.count).collect(),
            })
            .collect()
    }

    /// Category histogram from counts already ranked by count then label.
    ///
    /// High-cardinality columns keep the top entries and fold the rest into an
    /// [`OTHER_LABEL`] bucket (omitted when nothing is left over).
    pub fn build_categorical(
        &self,
        ranked: &[(String, u64)],
        high_cardinality: bool,
    ) -> Vec<LabeledHistogram> {
        if ranked.is_empty() {
            return Vec::new();
        }
        let keep = if high_cardinality {
            self.top_values_limit.min(ranked.len())
        } else {
            ranked.len()
        };
        let (top, rest) = ranked.split_at(keep);
        let mut labels: Vec<String> = top.iter().map(|(label, _)| label.clone()).collect();
        let mut counts: Vec<u64> = top.iter().map(|(_, count)| *count).collect();
        let suppressed: u64 = rest.iter().map(|(_, count)| count).sum();
        if suppressed > 0 {
            labels.push(OTHER_LABEL.to_string());
            counts.push(suppressed);
        }
        vec![LabeledHistogram {
            bin_count: labels.len(),
            labels,
            counts,
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> HistogramBuilder {
        HistogramBuilder::new(vec![10, 15, 30, 50], 10).unwrap()
    }

    #[test]
    fn test_invalid_bin_counts() {
        assert!(HistogramBuilder::new(vec![], 10).is_err());
        assert!(HistogramBuilder::new(vec![5, 0], 10).is_err());
    }

    #[test]
    fn test_empty_input() {
        let histograms = builder().build(&[], true);
        assert_eq!(histograms.len(), 4);
        assert!(histograms.iter().all(|h| h.bins.is_empty()));
        assert_eq!(histograms[2].bin_count, 30);
    }

    #[test]
    fn test_exact_mode() {
        let histograms = builder().build(&[1.0, 2.0, 2.0, 3.0], true);
        assert_eq!(histograms.len(), 1);
        assert_eq!(histograms[0].bin_count, 3);
        assert_eq!(
            histograms[0].bins,
            vec![
                HistogramBin { lower: 1.0, upper: 1.0, count: 1 },
                HistogramBin { lower: 2.0, upper: 2.0, count: 2 },
                HistogramBin { lower: 3.0, upper: 3.0, count: 1 },
            ]
        );
    }

    #[test]
    fn test_integer_bins() {
        let values: Vec<f64> = (0..100).map(f64::from).collect();
        let builder = HistogramBuilder::new(vec![10, 30], 10).unwrap();
        let histograms = builder.build(&values, true);
        assert_eq!(histograms.len(), 2);

        let ten = &histograms[0];
        assert_eq!(ten.bins.len(), 10);
        assert!(ten.bins.iter().all(|b| b.count == 10));
        assert_eq!((ten.bins[0].lower, ten.bins[0].upper), (0.0, 9.0));
        assert_eq!((ten.bins[9].lower, ten.bins[9].upper), (90.0, 99.0));

        // width ceil(100 / 30) = 4, so only 25 bins hold data
        let thirty = &histograms[1];
        assert_eq!(thirty.bins.len(), 30);
        assert_eq!(thirty.total_count(), 100);
        assert_eq!(thirty.bins[24].upper, 99.0);
        assert_eq!(thirty.bins[29].count, 0);
        assert_eq!((thirty.bins[29].lower, thirty.bins[29].upper), (116.0, 116.0));
    }

    #[test]
    fn test_float_bins_put_max_in_last_bin() {
        let values: Vec<f64> = (0..=20).map(|v| f64::from(v) * 0.1).collect();
        let builder = HistogramBuilder::new(vec![10], 10).unwrap();
        let histogram = &builder.build(&values, false)[0];
        assert_eq!(histogram.bins.len(), 10);
        assert_eq!(histogram.total_count(), 21);
        assert!(histogram.bins[9].count >= 1);
        assert!((histogram.bins[9].upper - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_datetime_labels() {
        let days: Vec<f64> = (0..20).map(f64::from).collect();
        let builder = HistogramBuilder::new(vec![10], 10).unwrap();
        let histograms = builder.build_labeled_datetime(&days, false);
        assert_eq!(histograms[0].labels[0], "1970-01-01 - 1970-01-02");
        assert_eq!(histograms[0].total_count(), 20);

        let exact = builder.build_labeled_datetime(&[0.0, 0.0, 86_399.0], true);
        assert_eq!(exact[0].labels, vec!["00:00:00", "23:59:59"]);
        assert_eq!(exact[0].counts, vec![2, 1]);

        assert!(builder.build_labeled_datetime(&[], true).is_empty());
    }

    #[test]
    fn test_categorical_suppression() {
        let ranked: Vec<(String, u64)> = (0..12).map(|i| (format!("c{i:02}"), 12 - i)).collect();
        let builder = builder();

        let full = builder.build_categorical(&ranked, false);
        assert_eq!(full[0].bin_count, 12);

        let folded = builder.build_categorical(&ranked, true);
        assert_eq!(folded[0].bin_count, 11);
        assert_eq!(folded[0].labels[10], OTHER_LABEL);
        assert_eq!(folded[0].counts[10], 2 + 1);
        assert_eq!(folded[0].total_count(), full[0].total_count());

        assert!(builder.build_categorical(&[], true).is_empty());
    }
}
