//! Output value types produced by the profiling engines.
//!
//! Everything here is plain data: created once per run, serializable with
//! serde and never mutated afterwards.

mod histogram;
mod profile;
mod summary;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ProfileError, Result};

pub use histogram::{CompareHistogram, Histogram, HistogramBin, LabeledHistogram};
pub use profile::{
    CategoricalProfile, CategoryCount, ColumnDetails, ColumnProfile, DatetimeProfile,
    DatetimeValueCount, LengthStats, ListProfile, NumericProfile, NumericStats,
    NumericValueCount, QuantileValue, TextProfile, TokenCount,
};
pub use summary::{
    Association, AssociationSummary, ColumnMatchSummary, CompareColumnProfile,
    ComparisonReport, ComparisonSummary, DatasetSummary, TypeCounts, TypeMismatch,
};

/// Semantic kind of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Numeric,
    Categorical,
    Text,
    Datetime,
    Boolean,
    List,
    Struct,
}

impl ColumnType {
    /// All variants in declaration order.
    pub const ALL: [ColumnType; 7] = [
        ColumnType::Numeric,
        ColumnType::Categorical,
        ColumnType::Text,
        ColumnType::Datetime,
        ColumnType::Boolean,
        ColumnType::List,
        ColumnType::Struct,
    ];

    /// Lowercase name, as used in serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Numeric => "numeric",
            ColumnType::Categorical => "categorical",
            ColumnType::Text => "text",
            ColumnType::Datetime => "datetime",
            ColumnType::Boolean => "boolean",
            ColumnType::List => "list",
            ColumnType::Struct => "struct",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self> {
        ColumnType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ProfileError::invalid_configuration(format!("unknown column type '{s}'")))
    }
}

/// A caller-supplied type override for one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplicitType {
    pub column_name: String,
    pub data_type: ColumnType,
}

impl ExplicitType {
    pub fn new(column_name: impl Into<String>, data_type: ColumnType) -> Self {
        Self {
            column_name: column_name.into(),
            data_type,
        }
    }

    /// Builds an override from a raw type name such as `"numeric"`.
    pub fn parse(column_name: impl Into<String>, raw_type: &str) -> Result<Self> {
        Ok(Self::new(column_name, raw_type.parse()?))
    }
}

/// Result of classifying one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeClassification {
    pub column_type: ColumnType,
    /// Set for physical types the engine does not understand; such columns
    /// only receive the common counts.
    pub basic_only: bool,
}

impl TypeClassification {
    pub fn new(column_type: ColumnType) -> Self {
        Self {
            column_type,
            basic_only: false,
        }
    }

    pub fn basic_only(column_type: ColumnType) -> Self {
        Self {
            column_type,
            basic_only: true,
        }
    }
}
