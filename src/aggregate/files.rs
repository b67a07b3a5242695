//! Split of file rows into case files and study files.

use rustc_hash::FxHashSet;

use arrow::array::BooleanArray;

use crate::aggregate::{distinct_count, rows_for_participants};
use crate::error::Result;
use crate::filter::filter_record_batch;
use crate::schema::{FILE_ID_CANDIDATES, FILE_SAMPLE_FK_CANDIDATES, SAMPLE_ID_CANDIDATES, resolve_column};
use crate::table::Table;
use crate::utils::{distinct_values, membership_mask, string_column};

/// Distinct file counts on each side of the split
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileSplit {
    /// Files linked to a sample of a kept participant
    pub case_files: usize,
    /// Files with no sample link at all
    pub study_files: usize,
}

/// Sample identifiers of samples belonging to the kept participants
///
/// The identifier column is resolved on the full sample table.
pub fn kept_sample_ids(samples: &Table, keep_pids: &FxHashSet<String>) -> Result<FxHashSet<String>> {
    if samples.is_empty() || keep_pids.is_empty() {
        return Ok(FxHashSet::default());
    }
    let Some(id_column) = resolve_column(samples.batch(), SAMPLE_ID_CANDIDATES) else {
        return Ok(FxHashSet::default());
    };
    let Some(kept) = rows_for_participants(samples.batch(), keep_pids)? else {
        return Ok(FxHashSet::default());
    };
    Ok(string_column(&kept, id_column)?
        .map(distinct_values)
        .unwrap_or_default())
}

/// Count case files and study files
///
/// A file row with a foreign key that matches no kept sample counts toward
/// neither side. Without a resolvable foreign-key column both counts are 0,
/// since linked and unlinked files cannot be told apart.
pub fn split_files(files: &Table, samples: &Table, keep_pids: &FxHashSet<String>) -> Result<FileSplit> {
    if files.is_empty() {
        return Ok(FileSplit::default());
    }

    let sample_ids = kept_sample_ids(samples, keep_pids)?;
    let batch = files.batch();
    let Some(fk_column) = resolve_column(batch, FILE_SAMPLE_FK_CANDIDATES) else {
        log::debug!("No file-to-sample column; file split is empty");
        return Ok(FileSplit::default());
    };
    let Some(fk) = string_column(batch, fk_column)? else {
        return Ok(FileSplit::default());
    };

    let case_files = if sample_ids.is_empty() {
        0
    } else {
        let linked = filter_record_batch(batch, &membership_mask(fk, &sample_ids))?;
        distinct_count(&linked, FILE_ID_CANDIDATES)?
    };

    let unlinked_mask: BooleanArray = fk
        .iter()
        .map(|value| Some(value.is_none_or(str::is_empty)))
        .collect();
    let unlinked = filter_record_batch(batch, &unlinked_mask)?;
    let study_files = distinct_count(&unlinked, FILE_ID_CANDIDATES)?;

    Ok(FileSplit {
        case_files,
        study_files,
    })
}
