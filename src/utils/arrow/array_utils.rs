//! Utilities for working with Arrow string arrays.
//!
//! Every table column is `Utf8`. Nulls stand for absent values (short TSV
//! rows, unmatched join rows) and never compare equal to anything.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, BooleanArray, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use rustc_hash::FxHashSet;

use crate::error::Result;

/// A zero-row, zero-column batch
#[must_use]
pub fn empty_batch() -> RecordBatch {
    RecordBatch::new_empty(Arc::new(Schema::empty()))
}

/// Get a string column by name
///
/// # Returns
/// * `Ok(Some(array))` - The column exists and is `Utf8`
/// * `Ok(None)` - The column does not exist
/// * `Err` - The column exists with another type
pub fn string_column<'a>(batch: &'a RecordBatch, column_name: &str) -> Result<Option<&'a StringArray>> {
    let Ok(idx) = batch.schema().index_of(column_name) else {
        return Ok(None);
    };

    batch
        .column(idx)
        .as_any()
        .downcast_ref::<StringArray>()
        .map(Some)
        .ok_or_else(|| {
            ArrowError::SchemaError(format!("Column '{column_name}' is not a string array")).into()
        })
}

/// Boolean mask marking rows whose value is a member of `values`
#[must_use]
pub fn membership_mask(array: &StringArray, values: &FxHashSet<String>) -> BooleanArray {
    array
        .iter()
        .map(|value| Some(value.is_some_and(|v| values.contains(v))))
        .collect()
}

/// Distinct non-null values of a string array
#[must_use]
pub fn distinct_values(array: &StringArray) -> FxHashSet<String> {
    array.iter().flatten().map(str::to_string).collect()
}

/// Append a nullable `Utf8` column to a batch
pub fn append_column(batch: &RecordBatch, column_name: &str, array: ArrayRef) -> Result<RecordBatch> {
    let schema = batch.schema();
    let mut fields: Vec<Field> = schema.fields().iter().map(|f| f.as_ref().clone()).collect();
    fields.push(Field::new(column_name, DataType::Utf8, true));

    let mut columns = batch.columns().to_vec();
    columns.push(array);

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?)
}
