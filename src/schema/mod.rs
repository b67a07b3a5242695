//! Table kinds and tolerant column resolution.
//!
//! Studies name the same semantic field differently, so every column lookup
//! goes through an ordered candidate list and takes the first name present.

pub mod candidates;

use std::fmt;

use arrow::record_batch::RecordBatch;

pub use candidates::*;

/// Name of the unified participant identity column
pub const PID_COLUMN: &str = "pid";

/// The fixed set of per-study tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TableKind {
    Case,
    Demographic,
    Diagnosis,
    Sample,
    File,
}

impl TableKind {
    /// All table kinds in load order
    pub const ALL: [Self; 5] = [
        Self::Case,
        Self::Demographic,
        Self::Diagnosis,
        Self::Sample,
        Self::File,
    ];

    /// Name used in object keys
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Case => "case",
            Self::Demographic => "demographic",
            Self::Diagnosis => "diagnosis",
            Self::Sample => "sample",
            Self::File => "file",
        }
    }

    /// Candidates used to derive `pid` for this table
    ///
    /// Sample and file tables also accept case-submitter style names so they
    /// can carry a direct participant reference.
    #[must_use]
    pub const fn pid_candidates(self) -> &'static [&'static str] {
        match self {
            Self::Case | Self::Demographic | Self::Diagnosis => PID_CANDIDATES,
            Self::Sample => SAMPLE_PID_CANDIDATES,
            Self::File => FILE_PID_CANDIDATES,
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Return the first candidate present in the batch's columns
///
/// A zero-row batch resolves nothing, even when the column exists.
#[must_use]
pub fn resolve_column<'a>(batch: &RecordBatch, candidates: &[&'a str]) -> Option<&'a str> {
    if batch.num_rows() == 0 {
        return None;
    }
    let schema = batch.schema();
    candidates
        .iter()
        .copied()
        .find(|name| schema.column_with_name(name).is_some())
}

/// Whether the batch has a column with this exact name
#[must_use]
pub fn has_column(batch: &RecordBatch, name: &str) -> bool {
    batch.schema().column_with_name(name).is_some()
}
