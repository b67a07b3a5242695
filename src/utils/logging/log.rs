//! Logging utilities
//!
//! This module provides standardized logging functions for operations on
//! stored objects.

use std::fmt::Display;
use std::time::Duration;

/// Log an operation start with consistent format
///
/// # Arguments
/// * `operation` - Description of the operation
/// * `key` - Object key being operated on
pub fn log_operation_start(operation: &str, key: &str) {
    log::debug!("{operation} {key}");
}

/// Log an operation completion with consistent format
///
/// # Arguments
/// * `operation` - Description of the operation
/// * `key` - Object key that was operated on
/// * `items` - Number of items processed
/// * `elapsed` - Optional elapsed time
pub fn log_operation_complete(operation: &str, key: &str, items: usize, elapsed: Option<Duration>) {
    if let Some(duration) = elapsed {
        log::debug!("Successfully {operation} {items} rows from {key} in {duration:?}");
    } else {
        log::debug!("Successfully {operation} {items} rows from {key}");
    }
}

/// Log an operation warning with consistent format
///
/// # Arguments
/// * `message` - Warning message
/// * `key` - Optional object key related to the warning
/// * `cause` - Optional underlying error
pub fn log_warning(message: &str, key: Option<&str>, cause: Option<&dyn Display>) {
    match (key, cause) {
        (Some(key), Some(cause)) => log::warn!("{message}: {key} ({cause})"),
        (Some(key), None) => log::warn!("{message}: {key}"),
        (None, Some(cause)) => log::warn!("{message} ({cause})"),
        (None, None) => log::warn!("{message}"),
    }
}
