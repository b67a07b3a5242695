//! Participant, sample and file statistics for a filtered participant table
//!
//! Samples belong to a participant through their `pid`; files belong to a
//! sample through a foreign-key column naming the sample identifier.

pub mod files;

use arrow::record_batch::RecordBatch;
use itertools::Itertools;
use rustc_hash::FxHashSet;

use crate::error::Result;
use crate::filter::filter_record_batch;
use crate::models::{ExpectedPayload, StatBar, Stats};
use crate::schema::{DISPLAY_ID_CANDIDATES, ID_LIST_CAP, PID_COLUMN, SAMPLE_ID_CANDIDATES, resolve_column};
use crate::table::{Table, TableSet};
use crate::utils::{distinct_values, membership_mask, string_column};

pub use files::{FileSplit, split_files};

/// Count distinct non-null values of the first resolvable candidate column
///
/// Zero when the batch is empty or no candidate exists.
pub fn distinct_count(batch: &RecordBatch, candidates: &[&str]) -> Result<usize> {
    let Some(column) = resolve_column(batch, candidates) else {
        return Ok(0);
    };
    Ok(string_column(batch, column)?.map_or(0, |array| distinct_values(array).len()))
}

/// Distinct values of the first resolvable candidate column, sorted and capped
pub fn sorted_distinct(batch: &RecordBatch, candidates: &[&str], limit: usize) -> Result<Vec<String>> {
    let Some(column) = resolve_column(batch, candidates) else {
        return Ok(Vec::new());
    };
    let Some(array) = string_column(batch, column)? else {
        return Ok(Vec::new());
    };
    Ok(array
        .iter()
        .flatten()
        .unique()
        .sorted()
        .take(limit)
        .map(str::to_string)
        .collect())
}

/// Distinct `pid`s of a participant table
pub fn participant_ids(filtered: &RecordBatch) -> Result<FxHashSet<String>> {
    if filtered.num_rows() == 0 {
        return Ok(FxHashSet::default());
    }
    Ok(string_column(filtered, PID_COLUMN)?.map(distinct_values).unwrap_or_default())
}

/// Rows of `batch` whose `pid` is in `keep_pids`
///
/// `None` when the batch has no `pid` column.
pub fn rows_for_participants(batch: &RecordBatch, keep_pids: &FxHashSet<String>) -> Result<Option<RecordBatch>> {
    let Some(pid) = string_column(batch, PID_COLUMN)? else {
        return Ok(None);
    };
    let mask = membership_mask(pid, keep_pids);
    filter_record_batch(batch, &mask).map(Some)
}

/// Distinct samples belonging to the kept participants
pub fn filtered_sample_count(samples: &Table, keep_pids: &FxHashSet<String>) -> Result<usize> {
    if samples.is_empty() || keep_pids.is_empty() {
        return Ok(0);
    }
    match rows_for_participants(samples.batch(), keep_pids)? {
        Some(kept) => distinct_count(&kept, SAMPLE_ID_CANDIDATES),
        None => Ok(0),
    }
}

/// Build the `expected` payload for a filtered participant table
pub fn build_expected_payload(tables: &TableSet, filtered: &RecordBatch) -> Result<ExpectedPayload> {
    let keep_pids = participant_ids(filtered)?;
    let participants = keep_pids.len();
    let ids = sorted_distinct(filtered, DISPLAY_ID_CANDIDATES, ID_LIST_CAP)?;

    let samples = filtered_sample_count(&tables.sample, &keep_pids)?;
    let FileSplit {
        case_files,
        study_files,
    } = split_files(&tables.file, &tables.sample, &keep_pids)?;

    log::info!(
        "Aggregated {participants} participants, {samples} samples, {case_files} case files, {study_files} study files"
    );

    Ok(ExpectedPayload {
        count: participants,
        ids,
        stats: Stats {
            participants,
            samples,
            files: case_files,
            case_files,
            study_files,
        },
        stat_bar: StatBar {
            participants,
            samples,
            studies: 1,
        },
    })
}
