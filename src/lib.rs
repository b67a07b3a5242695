//! Filter-aware participant, sample and file counts over per-study TSV tables.
//!
//! Tables are loaded from object storage, normalized with a unified `pid`
//! column, narrowed by declarative filters and aggregated into counts.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod filter;
pub mod loader;
pub mod models;
pub mod schema;
pub mod server;
pub mod service;
pub mod table;
pub mod utils;

// Re-export the most common types for easier use
pub use config::{ServerConfig, StorageConfig, StorageLocation};
pub use error::{ExpectedError, Result};
pub use filter::{FilterName, FilterSet, apply_filters};
pub use loader::TableLoader;
pub use models::{ExpectedPayload, QueryRequest, QueryResponse};
pub use schema::TableKind;
pub use table::{Table, TableSet};

// Arrow types
pub use arrow::record_batch::RecordBatch;

pub use aggregate::build_expected_payload;
pub use service::{HandlerResponse, handle_event, run_query};
