//! Logging utilities
//!
//! Standardized log lines for table loading operations.

pub mod log;

pub use self::log::{log_operation_complete, log_operation_start, log_warning};
