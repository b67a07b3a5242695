//! Incoming query requests.

use serde_json::{Map, Value};

use crate::error::{ExpectedError, Result};
use crate::filter::FilterSet;

/// A count query against one study
#[derive(Debug, Clone, PartialEq)]
pub struct QueryRequest {
    pub study: String,
    /// Raw `filters` object as sent by the caller
    pub filters: Map<String, Value>,
}

impl QueryRequest {
    #[must_use]
    pub fn new(study: impl Into<String>, filters: Map<String, Value>) -> Self {
        Self {
            study: study.into(),
            filters,
        }
    }

    /// Read a request object; `filters` defaults to `{}`
    pub fn from_json(body: &Value) -> Result<Self> {
        let Some(object) = body.as_object() else {
            return Err(ExpectedError::invalid_request("request body must be a JSON object"));
        };

        let study = match object.get("study") {
            Some(Value::String(study)) => study.clone(),
            Some(other) => {
                return Err(ExpectedError::invalid_request(format!(
                    "study must be a string, got {other}"
                )));
            }
            None => return Err(ExpectedError::invalid_request("missing required field: study")),
        };

        let filters = match object.get("filters") {
            None => Map::new(),
            Some(Value::Object(filters)) => filters.clone(),
            Some(other) => {
                return Err(ExpectedError::invalid_request(format!(
                    "filters must be an object, got {other}"
                )));
            }
        };

        Ok(Self { study, filters })
    }

    /// Parsed filter values
    pub fn filter_set(&self) -> Result<FilterSet> {
        FilterSet::from_json(&self.filters)
    }
}
