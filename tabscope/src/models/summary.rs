use serde::{Deserialize, Serialize};

use super::histogram::CompareHistogram;
use super::profile::ColumnProfile;
use super::ColumnType;

/// Number of columns per classified type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCounts {
    pub numeric: u64,
    pub categorical: u64,
    pub text: u64,
    pub datetime: u64,
    pub boolean: u64,
    pub list: u64,
    #[serde(rename = "struct")]
    pub struct_: u64,
}

impl TypeCounts {
    pub fn record(&mut self, column_type: ColumnType) {
        let slot = match column_type {
            ColumnType::Numeric => &mut self.numeric,
            ColumnType::Categorical => &mut self.categorical,
            ColumnType::Text => &mut self.text,
            ColumnType::Datetime => &mut self.datetime,
            ColumnType::Boolean => &mut self.boolean,
            ColumnType::List => &mut self.list,
            ColumnType::Struct => &mut self.struct_,
        };
        *slot += 1;
    }

    pub fn total(&self) -> u64 {
        self.numeric
            + self.categorical
            + self.text
            + self.datetime
            + self.boolean
            + self.list
            + self.struct_
    }
}

/// Whole-dataset aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub dataset_id: String,
    pub row_count: u64,
    pub column_count: u64,
    pub memory_bytes: u64,
    pub missing_cells: u64,
    pub missing_rate: f64,
    pub duplicate_rows: u64,
    pub type_counts: TypeCounts,
}

/// Association strength between two columns, in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Association {
    pub left: String,
    pub right: String,
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssociationSummary {
    pub numeric_numeric: Vec<Association>,
    pub categorical_categorical: Vec<Association>,
    pub numeric_categorical: Vec<Association>,
}

/// Name-level diff of two column sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMatchSummary {
    pub matched: u64,
    pub left_only: u64,
    pub right_only: u64,
    pub total_left: u64,
    pub total_right: u64,
    pub column_names_left_only: Vec<String>,
    pub column_names_right_only: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeMismatch {
    pub column_name: String,
    pub left_type: ColumnType,
    pub right_type: ColumnType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub left_dataset: DatasetSummary,
    pub right_dataset: DatasetSummary,
    /// Left row count minus right row count
    pub row_count_delta: i64,
    pub column_matches: ColumnMatchSummary,
    pub type_mismatches: Vec<TypeMismatch>,
    pub column_profiles_left_only: Vec<ColumnProfile>,
    pub column_profiles_right_only: Vec<ColumnProfile>,
}

/// Side-by-side profiles of a column present in both datasets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareColumnProfile {
    pub column_name: String,
    pub left_profile: ColumnProfile,
    pub right_profile: ColumnProfile,
    /// Empty when the two sides resolved to different types
    pub histograms: Vec<CompareHistogram>,
}

/// Everything the compare engine produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub summary: ComparisonSummary,
    pub compare_profiles: Vec<CompareColumnProfile>,
}
