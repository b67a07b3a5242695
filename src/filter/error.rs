//! Error handling utilities for the filter module
//!
//! This module provides consistent error constructors for the filter module.

use crate::error::{ExpectedError, Result};

/// Create a filter error
pub fn filter_err<T>(message: impl AsRef<str>) -> Result<T> {
    Err(ExpectedError::filter(message.as_ref()))
}

/// Create a column not found error
///
/// # Arguments
/// * `column_name` - The name of the column that was not found
pub fn column_not_found<T>(column_name: &str) -> Result<T> {
    filter_err(format!("Column '{column_name}' not found"))
}

/// Create an invalid filter value error
///
/// # Arguments
/// * `filter_name` - The request key of the filter
/// * `value` - The offending JSON value
pub fn invalid_filter_value<T>(filter_name: &str, value: &serde_json::Value) -> Result<T> {
    Err(ExpectedError::invalid_request(format!(
        "filter '{filter_name}' must be a list of values, got {value}"
    )))
}
