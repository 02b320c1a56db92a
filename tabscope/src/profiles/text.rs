//! Text column profile over character lengths and whole-string tokens.

use crate::config::ProfilerConfig;
use crate::histogram::HistogramBuilder;
use crate::models::{TextProfile, TokenCount};
use crate::stats::{length_stats, ranked_counts};

pub fn build(values: &[String], config: &ProfilerConfig, histograms: &HistogramBuilder) -> TextProfile {
    let lengths: Vec<u64> = values.iter().map(|v| v.chars().count() as u64).collect();
    let as_floats: Vec<f64> = lengths.iter().map(|l| *l as f64).collect();

    let top_tokens = ranked_counts(values.iter().map(String::as_str))
        .into_iter()
        .take(config.top_values_limit)
        .map(|(token, count)| TokenCount {
            token: token.to_string(),
            count,
        })
        .collect();

    TextProfile {
        length_stats: length_stats(&lengths),
        top_tokens,
        length_histograms: histograms.build(&as_floats, true),
    }
}
