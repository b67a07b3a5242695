//! Left join of auxiliary attributes onto a participant table by `pid`.

use std::sync::Arc;

use arrow::array::{ArrayRef, UInt32Builder};
use arrow::compute::take;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use rustc_hash::FxHashMap;

use crate::error::Result;
use crate::filter::error::column_not_found;
use crate::schema::PID_COLUMN;
use crate::utils::string_column;

/// Left-join `columns` of `right` onto `left` where `pid` values are equal
///
/// Left row order is preserved. A left row matching several right rows is
/// repeated once per match; a left row with no match is kept with nulls in
/// the joined columns. Null `pid`s never match.
pub fn left_join_by_pid(left: &RecordBatch, right: &RecordBatch, columns: &[&str]) -> Result<RecordBatch> {
    let Some(left_pid) = string_column(left, PID_COLUMN)? else {
        return column_not_found(PID_COLUMN);
    };
    let Some(right_pid) = string_column(right, PID_COLUMN)? else {
        return column_not_found(PID_COLUMN);
    };

    let mut right_rows: FxHashMap<&str, Vec<u32>> = FxHashMap::default();
    for (idx, pid) in right_pid.iter().enumerate() {
        if let Some(pid) = pid {
            right_rows.entry(pid).or_default().push(idx as u32);
        }
    }

    let mut left_indices = UInt32Builder::with_capacity(left.num_rows());
    let mut right_indices = UInt32Builder::with_capacity(left.num_rows());
    for (idx, pid) in left_pid.iter().enumerate() {
        match pid.and_then(|p| right_rows.get(p)) {
            Some(matches) => {
                for row in matches {
                    left_indices.append_value(idx as u32);
                    right_indices.append_value(*row);
                }
            }
            None => {
                left_indices.append_value(idx as u32);
                right_indices.append_null();
            }
        }
    }
    let left_indices = left_indices.finish();
    let right_indices = right_indices.finish();

    let left_schema = left.schema();
    let mut fields: Vec<Field> = left_schema.fields().iter().map(|f| f.as_ref().clone()).collect();
    let mut arrays: Vec<ArrayRef> = left
        .columns()
        .iter()
        .map(|col| take(col.as_ref(), &left_indices, None))
        .collect::<arrow::error::Result<_>>()?;

    for name in columns {
        let Some(source) = string_column(right, name)? else {
            return column_not_found(name);
        };
        fields.push(Field::new(*name, DataType::Utf8, true));
        arrays.push(take(source, &right_indices, None)?);
    }

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)?)
}
