//! Conversion of Arrow columns into the canonical value sequences the
//! profilers consume.
//!
//! Every extractor returns one entry per row (`None` for nulls) so callers
//! can either drop nulls or keep rows aligned across columns. Extraction under
//! a semantic type the physical column cannot satisfy is an error, never a
//! silent coercion.

use std::collections::HashSet;
use std::fmt::Write as _;

use arrow::array::timezone::Tz;
use arrow::array::{Array, ArrayRef, AsArray, GenericListArray, OffsetSizeTrait};
use arrow::compute::{can_cast_types, cast, cast_with_options, CastOptions};
use arrow::datatypes::{
    ArrowNativeType, DataType, Date32Type, Date64Type, Float64Type, Int64Type,
    Time32MillisecondType, Time32SecondType, Time64MicrosecondType, Time64NanosecondType,
    TimeUnit,
};
use arrow::row::{RowConverter, SortField};
use arrow::util::display::{ArrayFormatter, FormatOptions};
use chrono::{DateTime, Offset, TimeZone};

use crate::error::{ProfileError, Result};

const MILLIS_PER_DAY: i64 = 86_400_000;
const SECONDS_PER_DAY: i64 = 86_400;

/// Row-aligned numeric values of a column.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericValues {
    /// `None` for nulls and for non-finite floats
    pub values: Vec<Option<f64>>,
    pub is_integer: bool,
}

impl NumericValues {
    pub fn non_null(&self) -> Vec<f64> {
        self.values.iter().flatten().copied().collect()
    }
}

/// Row-aligned temporal values in one of the two numeric encodings.
#[derive(Debug, Clone, PartialEq)]
pub enum DatetimeValues {
    /// Days since 1970-01-01; datetimes are truncated to their date in the
    /// column's timezone (UTC when it has none)
    Dates(Vec<Option<i64>>),
    /// Seconds since midnight
    Times(Vec<Option<f64>>),
}

impl DatetimeValues {
    pub fn is_time(&self) -> bool {
        matches!(self, DatetimeValues::Times(_))
    }

    /// Non-null values as floats, in row order.
    pub fn non_null_numeric(&self) -> Vec<f64> {
        match self {
            DatetimeValues::Dates(days) => days.iter().flatten().map(|d| *d as f64).collect(),
            DatetimeValues::Times(seconds) => seconds.iter().flatten().copied().collect(),
        }
    }
}

/// Per-row element counts of a list column plus a few display samples.
#[derive(Debug, Clone, PartialEq)]
pub struct ListValues {
    pub lengths: Vec<Option<u64>>,
    pub samples: Vec<String>,
}

fn strict_cast() -> CastOptions<'static> {
    CastOptions {
        safe: false,
        ..Default::default()
    }
}

fn is_string_type(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View
    )
}

fn is_binary_type(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::Binary
            | DataType::LargeBinary
            | DataType::BinaryView
            | DataType::FixedSizeBinary(_)
    )
}

fn is_temporal_type(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::Date32
            | DataType::Date64
            | DataType::Timestamp(_, _)
            | DataType::Time32(_)
            | DataType::Time64(_)
    )
}

fn mismatch(column: &str, expected: &str, array: &dyn Array) -> ProfileError {
    ProfileError::type_mismatch(column, expected, array.data_type().to_string())
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Reads `array` as numbers.
///
/// Integers, floats and decimals map directly; binary values become their
/// byte length, durations become seconds, booleans become 0/1 and temporal
/// values their raw integer encoding. Strings must parse as numbers.
pub fn numeric_values(column: &str, array: &ArrayRef) -> Result<NumericValues> {
    let data_type = array.data_type();
    match data_type {
        dt if dt.is_numeric() => {
            let floats = cast(array, &DataType::Float64)?;
            Ok(NumericValues {
                values: floats
                    .as_primitive::<Float64Type>()
                    .iter()
                    .map(finite)
                    .collect(),
                is_integer: dt.is_integer(),
            })
        }
        DataType::Boolean => Ok(NumericValues {
            values: array
                .as_boolean()
                .iter()
                .map(|v| v.map(|b| if b { 1.0 } else { 0.0 }))
                .collect(),
            is_integer: true,
        }),
        dt if is_binary_type(dt) => Ok(NumericValues {
            values: binary_lengths(array)
                .into_iter()
                .map(|len| len.map(|l| l as f64))
                .collect(),
            is_integer: true,
        }),
        DataType::Duration(unit) => {
            let scale = seconds_scale(unit);
            let raw = cast(array, &DataType::Int64)?;
            Ok(NumericValues {
                values: raw
                    .as_primitive::<Int64Type>()
                    .iter()
                    .map(|v| v.map(|ticks| ticks as f64 / scale))
                    .collect(),
                is_integer: false,
            })
        }
        dt if is_temporal_type(dt) && can_cast_types(dt, &DataType::Int64) => {
            let raw = cast(array, &DataType::Int64)?;
            Ok(NumericValues {
                values: int64_as_f64(&raw),
                is_integer: true,
            })
        }
        dt if is_string_type(dt) => {
            if let Ok(raw) = cast_with_options(array, &DataType::Int64, &strict_cast()) {
                return Ok(NumericValues {
                    values: int64_as_f64(&raw),
                    is_integer: true,
                });
            }
            let floats = cast_with_options(array, &DataType::Float64, &strict_cast())?;
            Ok(NumericValues {
                values: floats
                    .as_primitive::<Float64Type>()
                    .iter()
                    .map(finite)
                    .collect(),
                is_integer: false,
            })
        }
        DataType::Dictionary(_, value_type) => {
            let unpacked = cast(array, value_type)?;
            numeric_values(column, &unpacked)
        }
        _ => Err(mismatch(column, "numeric", array.as_ref())),
    }
}

fn int64_as_f64(array: &ArrayRef) -> Vec<Option<f64>> {
    array
        .as_primitive::<Int64Type>()
        .iter()
        .map(|v| v.map(|n| n as f64))
        .collect()
}

fn seconds_scale(unit: &TimeUnit) -> f64 {
    match unit {
        TimeUnit::Second => 1.0,
        TimeUnit::Millisecond => 1e3,
        TimeUnit::Microsecond => 1e6,
        TimeUnit::Nanosecond => 1e9,
    }
}

/// Calendar day (since epoch) of a UTC instant as seen in `tz`.
fn local_day(column: &str, ticks: i64, unit: &TimeUnit, tz: &Tz) -> Result<i64> {
    let per_second = ticks_per_day(unit) / SECONDS_PER_DAY;
    let seconds = ticks.div_euclid(per_second);
    let utc = DateTime::from_timestamp(seconds, 0).ok_or_else(|| {
        ProfileError::invalid_data(format!(
            "timestamp {ticks} in column '{column}' is out of range"
        ))
    })?;
    let offset = tz.offset_from_utc_datetime(&utc.naive_utc()).fix();
    Ok((seconds + i64::from(offset.local_minus_utc())).div_euclid(SECONDS_PER_DAY))
}

fn ticks_per_day(unit: &TimeUnit) -> i64 {
    match unit {
        TimeUnit::Second => SECONDS_PER_DAY,
        TimeUnit::Millisecond => SECONDS_PER_DAY * 1_000,
        TimeUnit::Microsecond => SECONDS_PER_DAY * 1_000_000,
        TimeUnit::Nanosecond => SECONDS_PER_DAY * 1_000_000_000,
    }
}

/// Byte length of every value of a binary column.
pub fn binary_lengths(array: &ArrayRef) -> Vec<Option<u64>> {
    match array.data_type() {
        DataType::Binary => array
            .as_binary::<i32>()
            .iter()
            .map(|v| v.map(|b| b.len() as u64))
            .collect(),
        DataType::LargeBinary => array
            .as_binary::<i64>()
            .iter()
            .map(|v| v.map(|b| b.len() as u64))
            .collect(),
        DataType::BinaryView => array
            .as_binary_view()
            .iter()
            .map(|v| v.map(|b| b.len() as u64))
            .collect(),
        DataType::FixedSizeBinary(width) => {
            let width = u64::try_from(*width).unwrap_or(0);
            (0..array.len())
                .map(|i| array.is_valid(i).then_some(width))
                .collect()
        }
        _ => vec![None; array.len()],
    }
}

fn utf8_strings(array: &dyn Array) -> Option<Vec<Option<String>>> {
    let strings = match array.data_type() {
        DataType::Utf8 => array
            .as_string::<i32>()
            .iter()
            .map(|v| v.map(str::to_string))
            .collect(),
        DataType::LargeUtf8 => array
            .as_string::<i64>()
            .iter()
            .map(|v| v.map(str::to_string))
            .collect(),
        DataType::Utf8View => array
            .as_string_view()
            .iter()
            .map(|v| v.map(str::to_string))
            .collect(),
        _ => return None,
    };
    Some(strings)
}

/// Reads `array` as display strings.
///
/// Booleans become `"True"` / `"False"`; strings pass through; anything Arrow
/// can cast to Utf8 is cast; everything else uses Arrow's display formatting.
pub fn string_values(array: &ArrayRef) -> Result<Vec<Option<String>>> {
    if let DataType::Boolean = array.data_type() {
        return Ok(array
            .as_boolean()
            .iter()
            .map(|v| v.map(|b| if b { "True" } else { "False" }.to_string()))
            .collect());
    }
    if let Some(strings) = utf8_strings(array.as_ref()) {
        return Ok(strings);
    }
    if can_cast_types(array.data_type(), &DataType::Utf8) {
        let casted = cast(array, &DataType::Utf8)?;
        if let Some(strings) = utf8_strings(casted.as_ref()) {
            return Ok(strings);
        }
    }
    formatted_values(array.as_ref())
}

fn formatted_values(array: &dyn Array) -> Result<Vec<Option<String>>> {
    let options = FormatOptions::default();
    let formatter = ArrayFormatter::try_new(array, &options)?;
    Ok((0..array.len())
        .map(|i| array.is_valid(i).then(|| formatter.value(i).to_string()))
        .collect())
}

/// Reads `array` as dates (days since epoch) or times of day (seconds).
///
/// Strings are parsed as timestamps.
pub fn datetime_values(column: &str, array: &ArrayRef) -> Result<DatetimeValues> {
    match array.data_type() {
        DataType::Date32 => Ok(DatetimeValues::Dates(
            array
                .as_primitive::<Date32Type>()
                .iter()
                .map(|v| v.map(i64::from))
                .collect(),
        )),
        DataType::Date64 => Ok(DatetimeValues::Dates(
            array
                .as_primitive::<Date64Type>()
                .iter()
                .map(|v| v.map(|ms| ms.div_euclid(MILLIS_PER_DAY)))
                .collect(),
        )),
        DataType::Timestamp(unit, tz) => {
            let per_day = ticks_per_day(unit);
            let raw = cast(array, &DataType::Int64)?;
            let ticks = raw.as_primitive::<Int64Type>();
            let days = match tz {
                None => ticks
                    .iter()
                    .map(|v| v.map(|ticks| ticks.div_euclid(per_day)))
                    .collect(),
                Some(tz) => {
                    let tz: Tz = tz.parse()?;
                    ticks
                        .iter()
                        .map(|v| v.map(|ticks| local_day(column, ticks, unit, &tz)).transpose())
                        .collect::<Result<Vec<_>>>()?
                }
            };
            Ok(DatetimeValues::Dates(days))
        }
        DataType::Time32(TimeUnit::Second) => Ok(DatetimeValues::Times(
            array
                .as_primitive::<Time32SecondType>()
                .iter()
                .map(|v| v.map(f64::from))
                .collect(),
        )),
        DataType::Time32(TimeUnit::Millisecond) => Ok(DatetimeValues::Times(
            array
                .as_primitive::<Time32MillisecondType>()
                .iter()
                .map(|v| v.map(|ms| f64::from(ms) / 1e3))
                .collect(),
        )),
        DataType::Time64(TimeUnit::Microsecond) => Ok(DatetimeValues::Times(
            array
                .as_primitive::<Time64MicrosecondType>()
                .iter()
                .map(|v| v.map(|us| us as f64 / 1e6))
                .collect(),
        )),
        DataType::Time64(TimeUnit::Nanosecond) => Ok(DatetimeValues::Times(
            array
                .as_primitive::<Time64NanosecondType>()
                .iter()
                .map(|v| v.map(|ns| ns as f64 / 1e9))
                .collect(),
        )),
        dt if is_string_type(dt) => {
            let parsed = cast_with_options(
                array,
                &DataType::Timestamp(TimeUnit::Nanosecond, None),
                &strict_cast(),
            )?;
            datetime_values(column, &parsed)
        }
        DataType::Dictionary(_, value_type) => {
            let unpacked = cast(array, value_type)?;
            datetime_values(column, &unpacked)
        }
        _ => Err(mismatch(column, "datetime", array.as_ref())),
    }
}

fn generic_list_lengths<O: OffsetSizeTrait>(list: &GenericListArray<O>) -> Vec<Option<u64>> {
    (0..list.len())
        .map(|i| {
            list.is_valid(i)
                .then(|| list.value_length(i).as_usize() as u64)
        })
        .collect()
}

/// Reads `array` as list lengths and collects up to `sample_limit` display
/// samples from the first non-null rows.
pub fn list_values(column: &str, array: &ArrayRef, sample_limit: usize) -> Result<ListValues> {
    let lengths = match array.data_type() {
        DataType::List(_) => generic_list_lengths(array.as_list::<i32>()),
        DataType::LargeList(_) => generic_list_lengths(array.as_list::<i64>()),
        DataType::FixedSizeList(_, size) => {
            let size = u64::try_from(*size).unwrap_or(0);
            (0..array.len())
                .map(|i| array.is_valid(i).then_some(size))
                .collect()
        }
        _ => return Err(mismatch(column, "list", array.as_ref())),
    };

    let samples = if sample_limit == 0 {
        Vec::new()
    } else {
        let options = FormatOptions::default();
        let formatter = ArrayFormatter::try_new(array.as_ref(), &options)?;
        (0..array.len())
            .filter(|i| array.is_valid(*i))
            .take(sample_limit)
            .map(|i| formatter.value(i).to_string())
            .collect()
    };

    Ok(ListValues { lengths, samples })
}

/// Counts distinct rows over `columns`, treating nulls as equal to each other.
///
/// Uses Arrow's row format, which handles nested lists and structs with null
/// children; types it cannot encode fall back to their display form.
pub fn distinct_count(columns: &[ArrayRef], num_rows: usize) -> Result<usize> {
    if num_rows == 0 {
        return Ok(0);
    }
    if columns.is_empty() {
        return Ok(1);
    }

    let fields: Vec<SortField> = columns
        .iter()
        .map(|column| SortField::new(column.data_type().clone()))
        .collect();

    if RowConverter::supports_fields(&fields) {
        let converter = RowConverter::new(fields)?;
        let rows = converter.convert_columns(columns)?;
        let distinct: HashSet<_> = rows.iter().collect();
        return Ok(distinct.len());
    }

    let options = FormatOptions::default();
    let formatters = columns
        .iter()
        .map(|column| ArrayFormatter::try_new(column.as_ref(), &options))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut distinct = HashSet::with_capacity(num_rows);
    for row in 0..num_rows {
        let mut key = String::new();
        for (column, formatter) in columns.iter().zip(&formatters) {
            if column.is_null(row) {
                key.push('\u{0}');
            } else {
                // Writing into a String cannot fail.
                let _ = write!(key, "{}", formatter.value(row));
            }
            key.push('\u{1f}');
        }
        distinct.insert(key);
    }
    Ok(distinct.len())
}
