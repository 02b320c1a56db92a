use serde::{Deserialize, Serialize};

use super::histogram::{Histogram, LabeledHistogram};
use super::ColumnType;

/// A quantile and its value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantileValue {
    pub quantile: f64,
    pub value: f64,
}

/// Descriptive statistics of a numeric column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NumericStats {
    pub minimum: f64,
    pub maximum: f64,
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub variance: f64,
    /// Q1, median and Q3; empty when the column has no values
    pub quantiles: Vec<QuantileValue>,
    pub iqr: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericValueCount {
    pub value: f64,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericProfile {
    pub is_integer: bool,
    pub stats: NumericStats,
    pub outlier_rate: f64,
    pub histograms: Vec<Histogram>,
    pub top_values: Vec<NumericValueCount>,
    pub min_values: Vec<NumericValueCount>,
    pub max_values: Vec<NumericValueCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalProfile {
    pub top_categories: Vec<CategoryCount>,
    pub is_high_cardinality: bool,
    /// Categories left out of `top_categories` on high-cardinality columns
    pub suppressed_count: u64,
    pub histograms: Vec<LabeledHistogram>,
}

/// Length statistics shared by text (characters) and list (elements) columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LengthStats {
    pub mean: f64,
    pub median: f64,
    pub minimum: u64,
    pub maximum: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCount {
    pub token: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextProfile {
    pub length_stats: LengthStats,
    pub top_tokens: Vec<TokenCount>,
    pub length_histograms: Vec<Histogram>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListProfile {
    pub length_stats: LengthStats,
    pub length_histograms: Vec<Histogram>,
    pub value_samples: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatetimeValueCount {
    pub value: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatetimeProfile {
    /// Smallest normalized value (`YYYY-MM-DD` or `HH:MM:SS[.ffffff]`)
    pub min_datetime: String,
    pub max_datetime: String,
    pub histograms: Vec<LabeledHistogram>,
    pub top_values: Vec<DatetimeValueCount>,
}

/// The type-specific part of a column profile.
///
/// At most one is attached to a [`ColumnProfile`]; boolean columns carry a
/// `Categorical` detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "profile", rename_all = "lowercase")]
pub enum ColumnDetails {
    Numeric(NumericProfile),
    Categorical(CategoricalProfile),
    Text(TextProfile),
    Datetime(DatetimeProfile),
    List(ListProfile),
}

/// The full description of one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub column_name: String,
    pub data_type: ColumnType,
    pub non_null_count: u64,
    pub null_count: u64,
    pub null_rate: f64,
    /// Distinct values, with null counted once when present
    pub unique_count: u64,
    /// Zeros among non-null values; only computed for physically numeric columns
    pub zero_count: u64,
    pub details: Option<ColumnDetails>,
}

impl ColumnProfile {
    pub fn row_count(&self) -> u64 {
        self.non_null_count + self.null_count
    }

    pub fn numeric(&self) -> Option<&NumericProfile> {
        match &self.details {
            Some(ColumnDetails::Numeric(profile)) => Some(profile),
            _ => None,
        }
    }

    pub fn categorical(&self) -> Option<&CategoricalProfile> {
        match &self.details {
            Some(ColumnDetails::Categorical(profile)) => Some(profile),
            _ => None,
        }
    }

    pub fn text(&self) -> Option<&TextProfile> {
        match &self.details {
            Some(ColumnDetails::Text(profile)) => Some(profile),
            _ => None,
        }
    }

    pub fn datetime(&self) -> Option<&DatetimeProfile> {
        match &self.details {
            Some(ColumnDetails::Datetime(profile)) => Some(profile),
            _ => None,
        }
    }

    pub fn list(&self) -> Option<&ListProfile> {
        match &self.details {
            Some(ColumnDetails::List(profile)) => Some(profile),
            _ => None,
        }
    }
}
