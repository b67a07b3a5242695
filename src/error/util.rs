//! Utility functions for error handling
//!
//! Wrappers around file access that attach the path and purpose to failures.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{ExpectedError, Result};

/// Safely read a file to string with rich error information
///
/// # Arguments
/// * `path` - The path to the file to read
/// * `purpose` - Why the file is being read (for error context)
pub fn safe_read_to_string(path: &Path, purpose: &str) -> Result<String> {
    if !path.exists() {
        return Err(ExpectedError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("File not found: {} (needed for: {purpose})", path.display()),
        )));
    }

    if !path.is_file() {
        return Err(ExpectedError::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Path is not a file: {} (expected a file for: {purpose})", path.display()),
        )));
    }

    fs::read_to_string(path).map_err(|e| {
        let context = match e.kind() {
            io::ErrorKind::PermissionDenied => "Permission denied - check file permissions".to_string(),
            io::ErrorKind::InvalidData => {
                "File contains invalid UTF-8 data - cannot read as text".to_string()
            }
            _ => format!("Failed to read file content for: {purpose}"),
        };
        ExpectedError::Io(io::Error::new(
            e.kind(),
            format!("{context}: {} ({e})", path.display()),
        ))
    })
}
