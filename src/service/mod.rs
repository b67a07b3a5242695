//! Request pipeline and its JSON boundary.
//!
//! `run_query` is load → filter → aggregate for one request. `handle_event`
//! wraps it so that every outcome, including failures, becomes a JSON body
//! with a status code.

use std::collections::BTreeMap;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::aggregate::build_expected_payload;
use crate::error::Result;
use crate::filter::apply_filters;
use crate::loader::TableLoader;
use crate::models::{ErrorBody, ExpectedPayload, Meta, QueryRequest, QueryResponse};

/// Value of `meta.source` in responses
pub const SOURCE: &str = "tsv";

pub const STATUS_OK: u16 = 200;
pub const STATUS_FAILURE: u16 = 500;

/// Status, headers and serialized body of a handled request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl HandlerResponse {
    fn json(status_code: u16, body: String) -> Self {
        Self {
            status_code,
            headers: BTreeMap::from([("Content-Type".to_string(), "application/json".to_string())]),
            body,
        }
    }

    fn failure(error: impl ToString) -> Self {
        let body = serde_json::to_string(&ErrorBody::new(error))
            .unwrap_or_else(|_| r#"{"error":"failed to encode error"}"#.to_string());
        Self::json(STATUS_FAILURE, body)
    }

    /// Whether the request succeeded
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status_code == STATUS_OK
    }
}

/// Compute the `expected` payload for a study and its raw filters
pub async fn compute_expected(loader: &TableLoader, request: &QueryRequest) -> Result<ExpectedPayload> {
    let filters = request.filter_set()?;
    let tables = loader.load_tables(&request.study).await?;
    let filtered = apply_filters(&tables, &filters)?;
    build_expected_payload(&tables, &filtered)
}

/// Run one query end to end
pub async fn run_query(loader: &TableLoader, request: &QueryRequest) -> Result<QueryResponse> {
    log::info!("Handling query for study {}", request.study);
    let expected = compute_expected(loader, request).await?;

    Ok(QueryResponse {
        study: request.study.clone(),
        filters: request.filters.clone(),
        expected,
        meta: Meta {
            source: SOURCE.to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        },
    })
}

/// Locate the request object inside an invocation event
///
/// A string `body` is parsed as JSON, an object `body` is used as-is, and an
/// absent or empty `body` means the event itself is the request.
pub fn extract_request(event: &Value) -> Result<QueryRequest> {
    match event.get("body") {
        Some(Value::String(raw)) if !raw.is_empty() => {
            let body: Value = serde_json::from_str(raw)?;
            QueryRequest::from_json(&body)
        }
        Some(body) if !is_empty_body(body) => QueryRequest::from_json(body),
        _ => QueryRequest::from_json(event),
    }
}

fn is_empty_body(body: &Value) -> bool {
    match body {
        Value::Null | Value::Bool(false) => true,
        Value::String(s) => s.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Bool(true) => false,
    }
}

/// Handle an invocation event; never fails
pub async fn handle_event(loader: &TableLoader, event: &Value) -> HandlerResponse {
    let outcome = match extract_request(event) {
        Ok(request) => run_query(loader, &request).await,
        Err(e) => Err(e),
    };

    match outcome.and_then(|response| Ok(serde_json::to_string(&response)?)) {
        Ok(body) => HandlerResponse::json(STATUS_OK, body),
        Err(e) => {
            log::warn!("Request failed: {e}");
            HandlerResponse::failure(e)
        }
    }
}
