//! Shared parsing utilities for all dialects.
//!
//! This module contains the pieces every dialect parser needs:
//! timestamp normalization, text cleaning, and the per-invocation
//! [`ParseContext`] carrying the default timestamp.

pub mod text;
pub mod timestamp;

use chrono::{Local, NaiveDateTime};

pub use text::{
    clean_sender, collapse_blank_lines, deep_clean_sender, find_separator, flatten_content,
};
pub use timestamp::{CANONICAL_TIME_FORMAT, normalize_timestamp, parse_timestamp, try_normalize_timestamp};

/// State shared by all records of one `parse()` invocation.
///
/// The default timestamp is computed once, when the context is created, so
/// every record of the invocation that lacks a usable timestamp gets the
/// same value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseContext {
    default_timestamp: String,
}

impl ParseContext {
    /// Creates a context whose default timestamp is `now`.
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            default_timestamp: now.format(CANONICAL_TIME_FORMAT).to_string(),
        }
    }

    /// Creates a context stamped with the current local time.
    pub fn now() -> Self {
        Self::new(Local::now().naive_local())
    }

    /// Returns the default timestamp of this invocation.
    pub fn default_timestamp(&self) -> &str {
        &self.default_timestamp
    }

    /// Normalizes a raw timestamp, falling back to the default timestamp.
    pub fn normalize_timestamp(&self, raw: &str) -> String {
        normalize_timestamp(raw, &self.default_timestamp)
    }
}
