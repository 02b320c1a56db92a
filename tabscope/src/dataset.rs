//! Read-only tabular dataset backed by an Arrow [`RecordBatch`].
//!
//! The engines never mutate a [`Dataset`]; selection and row capping produce
//! new zero-copy views over the same buffers.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef};
use arrow::compute::concat_batches;
use arrow::datatypes::{Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;

use crate::error::{ProfileError, Result};
use crate::values::distinct_count;

/// An in-memory table with a stable column order.
#[derive(Debug, Clone)]
pub struct Dataset {
    batch: RecordBatch,
}

impl Dataset {
    pub fn new(batch: RecordBatch) -> Self {
        Self { batch }
    }

    /// A dataset with no rows and no columns.
    pub fn empty() -> Self {
        Self::new(RecordBatch::new_empty(Arc::new(Schema::empty())))
    }

    /// Builds a dataset from named arrays; every field is nullable.
    ///
    /// All arrays must have the same length.
    pub fn try_from_columns<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, ArrayRef)>,
        S: Into<String>,
    {
        let (fields, arrays): (Vec<Field>, Vec<ArrayRef>) = columns
            .into_iter()
            .map(|(name, array)| {
                let field = Field::new(name.into(), array.data_type().clone(), true);
                (field, array)
            })
            .unzip();

        if arrays.is_empty() {
            return Ok(Self::empty());
        }
        let batch = RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)?;
        Ok(Self::new(batch))
    }

    /// Concatenates batches sharing `schema` into one dataset.
    pub fn from_batches(schema: SchemaRef, batches: &[RecordBatch]) -> Result<Self> {
        let batch = concat_batches(&schema, batches)?;
        Ok(Self::new(batch))
    }

    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    pub fn schema(&self) -> SchemaRef {
        self.batch.schema()
    }

    pub fn row_count(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn column_count(&self) -> usize {
        self.batch.num_columns()
    }

    /// True when there are no rows or no columns.
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0 || self.column_count() == 0
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.batch
            .schema_ref()
            .fields()
            .iter()
            .map(|field| field.name().as_str())
            .collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.batch.schema_ref().index_of(name).is_ok()
    }

    /// Looks up a column by exact name.
    pub fn column(&self, name: &str) -> Result<&ArrayRef> {
        let index = self
            .batch
            .schema_ref()
            .index_of(name)
            .map_err(|_| ProfileError::column_not_found(name))?;
        Ok(self.batch.column(index))
    }

    /// Columns with their names, in declaration order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &ArrayRef)> + '_ {
        self.batch
            .schema_ref()
            .fields()
            .iter()
            .zip(self.batch.columns())
            .map(|(field, array)| (field.name().as_str(), array))
    }

    /// A dataset restricted to `names`, in the order given.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Dataset> {
        let schema = self.batch.schema_ref();
        let indices = names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                schema
                    .index_of(name)
                    .map_err(|_| ProfileError::column_not_found(name))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(self.batch.project(&indices)?))
    }

    /// The first `rows` rows, or the whole dataset when it is smaller.
    pub fn head(&self, rows: usize) -> Dataset {
        if rows >= self.row_count() {
            return self.clone();
        }
        Self::new(self.batch.slice(0, rows))
    }

    /// Memory held by the underlying Arrow buffers.
    pub fn memory_bytes(&self) -> usize {
        self.batch.get_array_memory_size()
    }

    /// Null cells across all columns.
    pub fn missing_cells(&self) -> usize {
        self.batch
            .columns()
            .iter()
            .map(|column| column.logical_null_count())
            .sum()
    }

    /// Number of distinct rows; rows with nulls in the same positions and equal
    /// remaining values are equal.
    pub fn distinct_row_count(&self) -> Result<usize> {
        distinct_count(self.batch.columns(), self.row_count())
    }
}

impl From<RecordBatch> for Dataset {
    fn from(batch: RecordBatch) -> Self {
        Self::new(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Int64Array, StringArray};

    fn sample() -> Dataset {
        Dataset::try_from_columns(vec![
            (
                "id",
                Arc::new(Int64Array::from(vec![1, 2, 2, 3])) as ArrayRef,
            ),
            (
                "name",
                Arc::new(StringArray::from(vec![Some("a"), Some("b"), Some("b"), None])) as ArrayRef,
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_basic_shape() {
        let dataset = sample();
        assert_eq!(dataset.row_count(), 4);
        assert_eq!(dataset.column_count(), 2);
        assert_eq!(dataset.column_names(), vec!["id", "name"]);
        assert_eq!(dataset.missing_cells(), 1);
        assert!(dataset.memory_bytes() > 0);
        assert!(!dataset.is_empty());
    }

    #[test]
    fn test_column_lookup() {
        let dataset = sample();
        assert!(dataset.has_column("id"));
        assert_eq!(dataset.column("name").unwrap().len(), 4);
        assert!(matches!(
            dataset.column("missing"),
            Err(ProfileError::ColumnNotFound { .. })
        ));
    }

    #[test]
    fn test_select_keeps_order_and_rows() {
        let dataset = sample();
        let selected = dataset.select(&["name", "id"]).unwrap();
        assert_eq!(selected.column_names(), vec!["name", "id"]);

        let none = dataset.select::<&str>(&[]).unwrap();
        assert_eq!(none.column_count(), 0);
        assert_eq!(none.row_count(), 4);
    }

    #[test]
    fn test_head() {
        let dataset = sample();
        assert_eq!(dataset.head(2).row_count(), 2);
        assert_eq!(dataset.head(100).row_count(), 4);
    }

    #[test]
    fn test_distinct_rows() {
        assert_eq!(sample().distinct_row_count().unwrap(), 3);
    }

    #[test]
    fn test_empty_dataset() {
        let dataset = Dataset::empty();
        assert!(dataset.is_empty());
        assert_eq!(dataset.distinct_row_count().unwrap(), 0);
        let built = Dataset::try_from_columns(Vec::<(&str, ArrayRef)>::new()).unwrap();
        assert_eq!(built.column_count(), 0);
    }
}
