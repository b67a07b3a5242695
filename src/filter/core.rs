//! Core filtering functionality for participant tables
//!
//! Filters narrow a record batch with a boolean mask. Each filter declares the
//! columns it needs; a chain skips filters whose columns are missing instead
//! of failing.

use std::collections::HashSet;
use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanArray};
use arrow::compute::filter as arrow_filter;
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use rustc_hash::FxHashSet;

use crate::error::Result;
use crate::filter::error::{column_not_found, filter_err};
use crate::schema::{PID_COLUMN, has_column};
use crate::utils::{membership_mask, string_column};

/// Filter a record batch based on a boolean mask
///
/// # Arguments
/// * `batch` - The record batch to filter
/// * `mask` - The boolean mask indicating which rows to keep
///
/// # Returns
/// A new record batch with only rows where mask is true
pub fn filter_record_batch(batch: &RecordBatch, mask: &BooleanArray) -> Result<RecordBatch> {
    if batch.num_rows() != mask.len() {
        return filter_err(format!(
            "Mask length ({}) doesn't match batch row count ({})",
            mask.len(),
            batch.num_rows()
        ));
    }

    let filtered_columns: Vec<ArrayRef> = batch
        .columns()
        .iter()
        .map(|col| arrow_filter(col, mask))
        .collect::<arrow::error::Result<_>>()?;

    let options = RecordBatchOptions::new().with_row_count(Some(mask.true_count()));
    Ok(RecordBatch::try_new_with_options(
        batch.schema(),
        filtered_columns,
        &options,
    )?)
}

/// Trait for objects that can filter record batches
pub trait BatchFilter: std::fmt::Debug {
    /// Filter a record batch
    fn filter(&self, batch: &RecordBatch) -> Result<RecordBatch>;

    /// Returns the set of column names required by this filter
    fn required_columns(&self) -> HashSet<String>;
}

/// Keep rows whose value in `column` is one of `values`
#[derive(Debug, Clone)]
pub struct ValueSetFilter {
    column: String,
    values: FxHashSet<String>,
}

impl ValueSetFilter {
    #[must_use]
    pub fn new(column: impl Into<String>, values: FxHashSet<String>) -> Self {
        Self {
            column: column.into(),
            values,
        }
    }
}

impl BatchFilter for ValueSetFilter {
    fn filter(&self, batch: &RecordBatch) -> Result<RecordBatch> {
        let Some(array) = string_column(batch, &self.column)? else {
            return column_not_found(&self.column);
        };
        let mask = membership_mask(array, &self.values);
        filter_record_batch(batch, &mask)
    }

    fn required_columns(&self) -> HashSet<String> {
        HashSet::from([self.column.clone()])
    }
}

/// Keep rows whose `pid` belongs to a set computed from another table
///
/// This is a semi-join: a row survives if any row of the other table matched.
#[derive(Debug, Clone)]
pub struct PidSemiJoinFilter {
    keep_pids: FxHashSet<String>,
}

impl PidSemiJoinFilter {
    #[must_use]
    pub const fn new(keep_pids: FxHashSet<String>) -> Self {
        Self { keep_pids }
    }
}

impl BatchFilter for PidSemiJoinFilter {
    fn filter(&self, batch: &RecordBatch) -> Result<RecordBatch> {
        ValueSetFilter::new(PID_COLUMN, self.keep_pids.clone()).filter(batch)
    }

    fn required_columns(&self) -> HashSet<String> {
        HashSet::from([PID_COLUMN.to_string()])
    }
}

/// Apply filters one after another, each narrowing the previous result
#[derive(Debug, Clone, Default)]
pub struct AndFilter {
    filters: Vec<Arc<dyn BatchFilter + Send + Sync>>,
}

impl AndFilter {
    /// Create a new AND filter
    #[must_use]
    pub fn new(filters: Vec<Arc<dyn BatchFilter + Send + Sync>>) -> Self {
        Self { filters }
    }

    /// Number of filters in the chain
    #[must_use]
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl BatchFilter for AndFilter {
    fn filter(&self, batch: &RecordBatch) -> Result<RecordBatch> {
        let mut result_batch = batch.clone();

        for filter in &self.filters {
            let missing: Vec<String> = filter
                .required_columns()
                .into_iter()
                .filter(|c| !has_column(&result_batch, c))
                .collect();
            if !missing.is_empty() {
                log::debug!("Skipping {filter:?}: missing columns {missing:?}");
                continue;
            }

            let before = result_batch.num_rows();
            result_batch = filter.filter(&result_batch)?;
            log::debug!("{filter:?} kept {} of {before} rows", result_batch.num_rows());
        }

        Ok(result_batch)
    }

    fn required_columns(&self) -> HashSet<String> {
        let mut columns = HashSet::new();
        for filter in &self.filters {
            columns.extend(filter.required_columns());
        }
        columns
    }
}
