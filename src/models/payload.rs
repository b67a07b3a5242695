//! Serialized result payloads.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Filter-aware counts for one study
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub participants: usize,
    pub samples: usize,
    /// Same as `case_files`; kept for older clients
    pub files: usize,
    pub case_files: usize,
    pub study_files: usize,
}

/// Condensed summary shown above result tables
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBar {
    pub participants: usize,
    pub samples: usize,
    /// Always 1: aggregation is scoped to a single study
    pub studies: usize,
}

/// The `expected` block of a response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectedPayload {
    pub count: usize,
    pub ids: Vec<String>,
    pub stats: Stats,
    pub stat_bar: StatBar,
}

/// Provenance of a response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    pub source: String,
    /// RFC 3339 UTC time the response was produced
    pub timestamp: String,
}

/// Successful response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub study: String,
    /// The request's filters, echoed verbatim
    pub filters: Map<String, Value>,
    pub expected: ExpectedPayload,
    pub meta: Meta,
}

/// Failure response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl ToString) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}
