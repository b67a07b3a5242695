//! Arrow utilities for all-string tables.

pub mod array_utils;

pub use self::array_utils::{
    append_column, distinct_values, empty_batch, membership_mask, string_column,
};
