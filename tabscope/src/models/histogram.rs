use serde::{Deserialize, Serialize};

/// One bin of a numeric histogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: u64,
}

/// A numeric histogram at one resolution.
///
/// In exact mode `bin_count` is the number of distinct values rather than a
/// requested resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub bin_count: usize,
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    pub fn empty(bin_count: usize) -> Self {
        Self {
            bin_count,
            bins: Vec::new(),
        }
    }

    /// Sum of all bin counts.
    pub fn total_count(&self) -> u64 {
        self.bins.iter().map(|bin| bin.count).sum()
    }
}

/// A histogram whose bins are identified by display labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledHistogram {
    pub bin_count: usize,
    pub labels: Vec<String>,
    pub counts: Vec<u64>,
}

impl LabeledHistogram {
    pub fn total_count(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// A labeled histogram with independent counts for two datasets sharing the
/// same bins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareHistogram {
    pub bin_count: usize,
    pub labels: Vec<String>,
    pub left_counts: Vec<u64>,
    pub right_counts: Vec<u64>,
}

impl CompareHistogram {
    pub fn empty(bin_count: usize) -> Self {
        Self {
            bin_count,
            labels: Vec::new(),
            left_counts: Vec::new(),
            right_counts: Vec::new(),
        }
    }
}
