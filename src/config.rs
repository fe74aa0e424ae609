//! Configuration for the parse pipeline.
//!
//! [`ParserConfig`] is a plain serde struct with builder methods, usable from
//! library code without any CLI dependency.
//!
//! # Example
//!
//! ```rust
//! use chatsift::config::ParserConfig;
//! use chatsift::pipeline::ParsePipeline;
//!
//! let config = ParserConfig::new()
//!     .with_cache_capacity(16)
//!     .with_extra_system_keyword("pinned a message");
//!
//! let pipeline = ParsePipeline::with_config(config);
//! assert_eq!(pipeline.cache_stats().capacity, 16);
//! ```

use serde::{Deserialize, Serialize};

/// Default number of parse results kept in the content cache.
pub const DEFAULT_CACHE_CAPACITY: usize = 100;

/// Default length (in characters) of internal fault messages.
pub const DEFAULT_ERROR_MESSAGE_LIMIT: usize = 50;

/// Pipeline configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Maximum number of cached parse results (default: 100).
    ///
    /// A capacity of `0` disables storage.
    pub cache_capacity: usize,

    /// Extra literal substrings that mark a system message, on top of the
    /// built-in platform notices (default: empty).
    pub extra_system_keywords: Vec<String>,

    /// Maximum length of an internal fault message in results and logs
    /// (default: 50).
    pub error_message_limit: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            extra_system_keywords: Vec::new(),
            error_message_limit: DEFAULT_ERROR_MESSAGE_LIMIT,
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the cache capacity.
    #[must_use]
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Adds a literal system-message keyword.
    #[must_use]
    pub fn with_extra_system_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.extra_system_keywords.push(keyword.into());
        self
    }

    /// Sets the fault message length limit.
    #[must_use]
    pub fn with_error_message_limit(mut self, limit: usize) -> Self {
        self.error_message_limit = limit;
        self
    }
}
