//! Table loading from object storage
//!
//! Each study has one TSV object per table kind, addressed as
//! `<prefix><study>-<kind>.tsv`. A table that cannot be fetched or decoded is
//! recorded as absent; one bad table never fails the whole load.

pub mod tsv;

use std::fmt::Display;
use std::sync::Arc;
use std::time::Instant;

use arrow::record_batch::RecordBatch;
use object_store::ObjectStore;
use object_store::path::Path as ObjectPath;

use crate::config::StorageConfig;
use crate::error::{ExpectedError, Result};
use crate::schema::{PID_COLUMN, TableKind, resolve_column};
use crate::table::{Table, TableSet};
use crate::utils::append_column;
use crate::utils::logging::{log_operation_complete, log_operation_start, log_warning};

pub use tsv::parse_tsv;

/// Loads and normalizes the tables of a study
#[derive(Debug, Clone)]
pub struct TableLoader {
    store: Arc<dyn ObjectStore>,
    prefix: String,
}

impl TableLoader {
    /// Create a loader over an object store and key prefix
    #[must_use]
    pub fn new(store: Arc<dyn ObjectStore>, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
        }
    }

    /// Create a loader from storage configuration
    pub fn from_config(config: &StorageConfig) -> Result<Self> {
        Ok(Self::new(config.build_store()?, config.prefix.clone()))
    }

    /// Object key of a study table
    #[must_use]
    pub fn object_key(&self, study: &str, kind: TableKind) -> String {
        format!("{}{study}-{}.tsv", self.prefix, kind.name())
    }

    /// Fetch all five tables of a study and attach `pid` to each
    ///
    /// Tables are fetched one after another with a single attempt each.
    pub async fn load_tables(&self, study: &str) -> Result<TableSet> {
        if study.is_empty() {
            return Err(ExpectedError::invalid_request("study must not be empty"));
        }

        let mut tables = TableSet::default();
        for kind in TableKind::ALL {
            let table = self.fetch_table(study, kind).await;
            tables = tables.with_table(attach_pid(table)?);
        }

        log::debug!(
            "Loaded {} of {} tables for study {study}",
            tables.present_count(),
            TableKind::ALL.len()
        );
        Ok(tables)
    }

    async fn fetch_table(&self, study: &str, kind: TableKind) -> Table {
        let key = self.object_key(study, kind);
        log_operation_start("Fetching", &key);
        let start = Instant::now();

        match self.read_tsv(&key).await {
            Ok(batch) => {
                log_operation_complete("loaded", &key, batch.num_rows(), Some(start.elapsed()));
                Table::new(kind, batch)
            }
            Err(e) => {
                log_warning(
                    "Table unavailable, treating as empty",
                    Some(&key),
                    Some(&e as &dyn Display),
                );
                Table::absent(kind)
            }
        }
    }

    async fn read_tsv(&self, key: &str) -> Result<RecordBatch> {
        let path = ObjectPath::from(key);
        let bytes = self.store.get(&path).await?.bytes().await?;
        parse_tsv(&bytes)
    }
}

/// Attach the unified `pid` column to a table
///
/// `pid` copies the first column of the kind's candidate list that exists.
/// Empty tables, tables with no candidate column and tables that already
/// carry `pid` are returned unchanged.
pub fn attach_pid(table: Table) -> Result<Table> {
    if table.is_empty() || table.has_pid() {
        return Ok(table);
    }

    let Some(source) = resolve_column(table.batch(), table.kind().pid_candidates()) else {
        log::debug!("No participant identity column in {} table", table.kind());
        return Ok(table);
    };

    log::debug!("Deriving pid for {} table from '{source}'", table.kind());
    let batch = table.batch();
    let idx = batch.schema().index_of(source)?;
    let enriched = append_column(batch, PID_COLUMN, Arc::clone(batch.column(idx)))?;
    Ok(table.with_batch(enriched))
}
