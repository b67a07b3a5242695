use std::sync::Arc;

use arrow::record_batch::RecordBatch;
use expected_counts::loader::{attach_pid, parse_tsv};
use expected_counts::schema::PID_COLUMN;
use expected_counts::utils::string_column;
use expected_counts::{Result, Table, TableKind, TableLoader, TableSet};
use object_store::memory::InMemory;
use object_store::path::Path as ObjectPath;
use object_store::{ObjectStore, PutPayload};

/// Key prefix used by test stores
pub const TEST_PREFIX: &str = "tsv/";

/// Store raw bytes under the key the loader will ask for
pub async fn put_object(store: &InMemory, key: &str, bytes: &[u8]) {
    store
        .put(&ObjectPath::from(key), PutPayload::from(bytes.to_vec()))
        .await
        .unwrap();
}

/// Create a loader over an in-memory store seeded with the given tables
pub async fn seeded_loader(study: &str, tables: &[(TableKind, &str)]) -> TableLoader {
    let store = Arc::new(InMemory::new());
    for (kind, tsv) in tables {
        let key = format!("{TEST_PREFIX}{study}-{}.tsv", kind.name());
        put_object(&store, &key, tsv.as_bytes()).await;
    }
    TableLoader::new(store, TEST_PREFIX)
}

/// A normalized table built from TSV text
pub fn table(kind: TableKind, tsv: &str) -> Result<Table> {
    attach_pid(Table::new(kind, parse_tsv(tsv.as_bytes())?))
}

/// A normalized table set; kinds not listed are absent
pub fn table_set(tables: &[(TableKind, &str)]) -> Result<TableSet> {
    let mut set = TableSet::default();
    for (kind, tsv) in tables {
        set = set.with_table(table(*kind, tsv)?);
    }
    Ok(set)
}

/// `pid` values of a batch in row order
pub fn pids(batch: &RecordBatch) -> Vec<String> {
    if batch.num_rows() == 0 {
        return Vec::new();
    }
    string_column(batch, PID_COLUMN)
        .unwrap()
        .map(|array| array.iter().flatten().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Values of any column of a batch in row order; nulls become `None`
pub fn column(batch: &RecordBatch, name: &str) -> Vec<Option<String>> {
    string_column(batch, name)
        .unwrap()
        .map(|array| array.iter().map(|v| v.map(str::to_string)).collect())
        .unwrap_or_default()
}
