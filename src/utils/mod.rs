//! Shared helpers for Arrow string tables and logging.

pub mod arrow;
pub mod logging;

pub use self::arrow::{
    append_column, distinct_values, empty_batch, membership_mask, string_column,
};
