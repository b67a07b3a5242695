//! Tab-delimited text decoding.
//!
//! Every field is kept verbatim as a string; the empty string is a value,
//! not a missing-value sentinel. Rows shorter than the header are padded with
//! nulls.

use std::sync::Arc;

use arrow::array::{ArrayRef, StringBuilder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::error::ArrowError;
use arrow::record_batch::{RecordBatch, RecordBatchOptions};

use crate::error::Result;

/// Decode tab-delimited bytes with a header row into an all-`Utf8` batch
pub fn parse_tsv(bytes: &[u8]) -> Result<RecordBatch> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut builders: Vec<StringBuilder> = headers.iter().map(|_| StringBuilder::new()).collect();
    let mut row_count = 0usize;

    for (line, record) in reader.records().enumerate() {
        let record = record?;

        // blank line
        if record.len() == 1 && record.get(0) == Some("") {
            continue;
        }
        if record.len() > headers.len() {
            return Err(ArrowError::CsvError(format!(
                "Expected {} fields in data row {}, saw {}",
                headers.len(),
                line + 1,
                record.len()
            ))
            .into());
        }

        for (idx, builder) in builders.iter_mut().enumerate() {
            match record.get(idx) {
                Some(value) => builder.append_value(value),
                None => builder.append_null(),
            }
        }
        row_count += 1;
    }

    let fields: Vec<Field> = headers
        .iter()
        .map(|name| Field::new(name, DataType::Utf8, true))
        .collect();
    let columns: Vec<ArrayRef> = builders
        .iter_mut()
        .map(|builder| Arc::new(builder.finish()) as ArrayRef)
        .collect();

    let options = RecordBatchOptions::new().with_row_count(Some(row_count));
    Ok(RecordBatch::try_new_with_options(
        Arc::new(Schema::new(fields)),
        columns,
        &options,
    )?)
}
