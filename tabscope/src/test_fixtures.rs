//! Common test fixtures for profiling scenarios.
//!
//! Small, hand-built Arrow datasets covering every column kind, plus a pair of
//! related datasets for comparison tests.

use std::sync::Arc;

use arrow::array::{
    ArrayRef, BooleanArray, Date32Array, Float64Array, Int64Array, ListArray, StringArray,
    StructArray, Time64MicrosecondArray,
};
use arrow::datatypes::{DataType, Field, Int32Type};

use crate::dataset::Dataset;
use crate::error::Result;

/// Ten customers with one column of every kind and scattered nulls.
///
/// Columns: `id` (int), `score` (float), `segment` (categorical), `active`
/// (boolean), `signup` (date), `login_time` (time of day), `tags` (list),
/// `address` (struct).
pub fn create_mixed_dataset() -> Result<Dataset> {
    let city: ArrayRef = Arc::new(StringArray::from(vec![
        Some("Oslo"),
        Some("Lima"),
        None,
        Some("Oslo"),
        Some("Pune"),
        Some("Lima"),
        Some("Oslo"),
        None,
        Some("Pune"),
        Some("Oslo"),
    ]));
    let address = StructArray::from(vec![(Arc::new(Field::new("city", DataType::Utf8, true)), city)]);

    let tags = ListArray::from_iter_primitive::<Int32Type, _, _>(vec![
        Some(vec![Some(1), Some(2)]),
        Some(vec![]),
        None,
        Some(vec![Some(3)]),
        Some(vec![Some(1), None, Some(4)]),
        Some(vec![Some(5)]),
        None,
        Some(vec![Some(6), Some(7)]),
        Some(vec![Some(8)]),
        Some(vec![Some(9), Some(9)]),
    ]);

    Dataset::try_from_columns(vec![
        (
            "id",
            Arc::new(Int64Array::from((1..=10).collect::<Vec<i64>>())) as ArrayRef,
        ),
        (
            "score",
            Arc::new(Float64Array::from(vec![
                Some(0.0),
                Some(12.5),
                None,
                Some(7.25),
                Some(0.0),
                Some(99.0),
                Some(41.5),
                None,
                Some(3.0),
                Some(18.75),
            ])) as ArrayRef,
        ),
        (
            "segment",
            Arc::new(StringArray::from(vec![
                Some("retail"),
                Some("retail"),
                Some("wholesale"),
                None,
                Some("retail"),
                Some("online"),
                Some("online"),
                Some("retail"),
                None,
                Some("wholesale"),
            ])) as ArrayRef,
        ),
        (
            "active",
            Arc::new(BooleanArray::from(vec![
                Some(true),
                Some(false),
                Some(true),
                Some(true),
                None,
                Some(false),
                Some(true),
                Some(true),
                Some(false),
                None,
            ])) as ArrayRef,
        ),
        (
            "signup",
            // 2024-01-01 onwards
            Arc::new(Date32Array::from(vec![
                Some(19_723),
                Some(19_724),
                Some(19_724),
                Some(19_730),
                None,
                Some(19_750),
                Some(19_761),
                Some(19_790),
                Some(19_801),
                Some(19_840),
            ])) as ArrayRef,
        ),
        (
            "login_time",
            Arc::new(Time64MicrosecondArray::from(vec![
                Some(8 * 3_600_000_000),
                Some(9 * 3_600_000_000),
                None,
                Some(12 * 3_600_000_000 + 30 * 60_000_000),
                Some(23 * 3_600_000_000),
                Some(8 * 3_600_000_000),
                Some(17 * 3_600_000_000),
                None,
                Some(6 * 3_600_000_000),
                Some(20 * 3_600_000_000),
            ])) as ArrayRef,
        ),
        ("tags", Arc::new(tags) as ArrayRef),
        ("address", Arc::new(address) as ArrayRef),
    ])
}

/// A single string column with `distinct` unique values over `rows` rows.
pub fn create_high_cardinality_dataset(rows: usize, distinct: usize) -> Result<Dataset> {
    let values: Vec<String> = (0..rows)
        .map(|i| format!("value_{:05}", i % distinct.max(1)))
        .collect();
    Dataset::try_from_columns(vec![(
        "label",
        Arc::new(StringArray::from(values)) as ArrayRef,
    )])
}

/// Two snapshots of an order table.
///
/// `order_id` and `amount` are on both sides, `status` changes from
/// categorical strings to integer codes, `discount` exists only on the left
/// and `channel` only on the right.
pub fn create_compare_pair() -> Result<(Dataset, Dataset)> {
    let left = Dataset::try_from_columns(vec![
        (
            "order_id",
            Arc::new(Int64Array::from((1..=8).collect::<Vec<i64>>())) as ArrayRef,
        ),
        (
            "amount",
            Arc::new(Float64Array::from(vec![
                10.0, 25.5, 8.0, 42.0, 17.25, 99.9, 5.0, 61.0,
            ])) as ArrayRef,
        ),
        (
            "status",
            Arc::new(StringArray::from(vec![
                "open", "closed", "open", "open", "closed", "void", "open", "closed",
            ])) as ArrayRef,
        ),
        (
            "discount",
            Arc::new(Float64Array::from(vec![
                Some(0.0),
                None,
                Some(0.1),
                Some(0.0),
                None,
                Some(0.25),
                Some(0.0),
                None,
            ])) as ArrayRef,
        ),
    ])?;

    let right = Dataset::try_from_columns(vec![
        (
            "channel",
            Arc::new(StringArray::from(vec!["web", "store", "web", "web", "app", "web"]))
                as ArrayRef,
        ),
        (
            "order_id",
            Arc::new(Int64Array::from((5..=10).collect::<Vec<i64>>())) as ArrayRef,
        ),
        (
            "amount",
            Arc::new(Float64Array::from(vec![17.25, 120.0, 5.0, 61.0, 33.3, 8.0])) as ArrayRef,
        ),
        (
            "status",
            Arc::new(Int64Array::from(vec![1, 2, 1, 1, 3, 2])) as ArrayRef,
        ),
    ])?;

    Ok((left, right))
}
