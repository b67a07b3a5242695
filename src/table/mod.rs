//! Per-study tables.
//!
//! A table that could not be fetched is represented as a zero-row batch with
//! no columns, so downstream code only ever sees present-but-possibly-empty
//! tables.

use arrow::record_batch::RecordBatch;

use crate::schema::{PID_COLUMN, TableKind, has_column};
use crate::utils::empty_batch;

/// One normalized table of a study
#[derive(Debug, Clone)]
pub struct Table {
    kind: TableKind,
    batch: RecordBatch,
    present: bool,
}

impl Table {
    /// Wrap a loaded batch
    #[must_use]
    pub fn new(kind: TableKind, batch: RecordBatch) -> Self {
        Self {
            kind,
            batch,
            present: true,
        }
    }

    /// A table whose resource could not be fetched or parsed
    #[must_use]
    pub fn absent(kind: TableKind) -> Self {
        Self {
            kind,
            batch: empty_batch(),
            present: false,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> TableKind {
        self.kind
    }

    #[must_use]
    pub const fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    /// Whether the underlying resource was loaded
    #[must_use]
    pub const fn is_present(&self) -> bool {
        self.present
    }

    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.batch.num_rows() == 0
    }

    /// Whether the identity column has been attached
    #[must_use]
    pub fn has_pid(&self) -> bool {
        has_column(&self.batch, PID_COLUMN)
    }

    /// Replace the batch, keeping kind and presence
    #[must_use]
    pub fn with_batch(self, batch: RecordBatch) -> Self {
        Self { batch, ..self }
    }
}

/// The five tables of one study
#[derive(Debug, Clone)]
pub struct TableSet {
    pub case: Table,
    pub demographic: Table,
    pub diagnosis: Table,
    pub sample: Table,
    pub file: Table,
}

impl Default for TableSet {
    fn default() -> Self {
        Self {
            case: Table::absent(TableKind::Case),
            demographic: Table::absent(TableKind::Demographic),
            diagnosis: Table::absent(TableKind::Diagnosis),
            sample: Table::absent(TableKind::Sample),
            file: Table::absent(TableKind::File),
        }
    }
}

impl TableSet {
    /// Get the table of a given kind
    #[must_use]
    pub const fn get(&self, kind: TableKind) -> &Table {
        match kind {
            TableKind::Case => &self.case,
            TableKind::Demographic => &self.demographic,
            TableKind::Diagnosis => &self.diagnosis,
            TableKind::Sample => &self.sample,
            TableKind::File => &self.file,
        }
    }

    /// Store a table in the slot matching its kind
    #[must_use]
    pub fn with_table(mut self, table: Table) -> Self {
        match table.kind() {
            TableKind::Case => self.case = table,
            TableKind::Demographic => self.demographic = table,
            TableKind::Diagnosis => self.diagnosis = table,
            TableKind::Sample => self.sample = table,
            TableKind::File => self.file = table,
        }
        self
    }

    /// Number of tables that were actually loaded
    #[must_use]
    pub fn present_count(&self) -> usize {
        TableKind::ALL
            .iter()
            .filter(|kind| self.get(**kind).is_present())
            .count()
    }
}
