//! Column type classification.
//!
//! Physical Arrow types map to a semantic [`ColumnType`] through one ordered
//! table of capability predicates; the first matching rule wins. Strings are
//! the only case that inspects data: they are text when their distinct count
//! (null counted once) exceeds the cardinality threshold, categorical
//! otherwise. Unknown physical types fall through to categorical but are
//! flagged `basic_only`.

use arrow::array::{Array, ArrayRef};
use arrow::datatypes::DataType;

use crate::error::Result;
use crate::models::{ColumnType, ExplicitType, TypeClassification};
use crate::values::distinct_count;

struct Rule {
    matches: fn(&DataType) -> bool,
    column_type: ColumnType,
}

fn is_boolean(data_type: &DataType) -> bool {
    matches!(data_type, DataType::Boolean)
}

fn is_temporal(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::Date32
            | DataType::Date64
            | DataType::Timestamp(_, _)
            | DataType::Time32(_)
            | DataType::Time64(_)
    )
}

fn is_list(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::List(_) | DataType::LargeList(_) | DataType::FixedSizeList(_, _)
    )
}

fn is_struct(data_type: &DataType) -> bool {
    matches!(data_type, DataType::Struct(_))
}

/// Numbers, byte strings (profiled by length) and durations (profiled in seconds).
pub fn is_numeric(data_type: &DataType) -> bool {
    data_type.is_numeric()
        || matches!(
            data_type,
            DataType::Binary
                | DataType::LargeBinary
                | DataType::BinaryView
                | DataType::FixedSizeBinary(_)
                | DataType::Duration(_)
        )
}

fn is_categorical(data_type: &DataType) -> bool {
    matches!(data_type, DataType::Dictionary(_, _))
}

fn is_string(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View
    )
}

const RULES: &[Rule] = &[
    Rule {
        matches: is_boolean,
        column_type: ColumnType::Boolean,
    },
    Rule {
        matches: is_temporal,
        column_type: ColumnType::Datetime,
    },
    Rule {
        matches: is_list,
        column_type: ColumnType::List,
    },
    Rule {
        matches: is_struct,
        column_type: ColumnType::Struct,
    },
    Rule {
        matches: is_numeric,
        column_type: ColumnType::Numeric,
    },
    Rule {
        matches: is_categorical,
        column_type: ColumnType::Categorical,
    },
];

/// Classifies `column` from its physical type.
pub fn classify(column: &ArrayRef, cardinality_threshold: usize) -> Result<TypeClassification> {
    let data_type = column.data_type();
    if let Some(rule) = RULES.iter().find(|rule| (rule.matches)(data_type)) {
        return Ok(TypeClassification::new(rule.column_type));
    }
    if is_string(data_type) {
        let distinct = distinct_count(std::slice::from_ref(column), column.len())?;
        let column_type = if distinct > cardinality_threshold {
            ColumnType::Text
        } else {
            ColumnType::Categorical
        };
        return Ok(TypeClassification::new(column_type));
    }
    Ok(TypeClassification::basic_only(ColumnType::Categorical))
}

/// The explicit override for `column_name`, if one was supplied.
pub fn explicit_override(column_name: &str, explicit_types: &[ExplicitType]) -> Option<ColumnType> {
    explicit_types
        .iter()
        .find(|explicit| explicit.column_name == column_name)
        .map(|explicit| explicit.data_type)
}

/// Classification with caller overrides applied.
///
/// An override replaces inference outright; inference is skipped entirely for
/// overridden columns.
pub fn resolve_type(
    column_name: &str,
    column: &ArrayRef,
    explicit_types: &[ExplicitType],
    cardinality_threshold: usize,
) -> Result<TypeClassification> {
    match explicit_override(column_name, explicit_types) {
        Some(column_type) => Ok(TypeClassification::new(column_type)),
        None => classify(column, cardinality_threshold),
    }
}
