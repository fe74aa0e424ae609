//! # Chatsift
//!
//! A Rust library for turning raw exported chat logs into clean, deduplicated
//! message records with parsing-quality statistics.
//!
//! ## Overview
//!
//! Chatsift understands three export dialects:
//! - **Timestamped text**: `【2024-01-15 10:30:00】Alice：Hello`
//! - **Plain text**: `Alice: Hello`, no timestamps
//! - **XML**: `<msg>` / `<Message>` / `<ChatRecord>` / `<record>` elements
//!   with several field naming schemes
//!
//! Every parse runs the same fixed cleaning stages (system-notice filter,
//! junk filter, deduplication) and reports how many raw records survived.
//! Results are cached by content fingerprint in a bounded LRU cache.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatsift::prelude::*;
//!
//! let pipeline = ParsePipeline::new();
//! let result = pipeline.parse(
//!     "【2024-01-15 10:30:00】Alice：Hello\n【2024-01-15 10:31:00】Bob：[图片]",
//!     "txt",
//!     true,
//! );
//!
//! assert_eq!(result.status(), ParseStatus::Success);
//! assert_eq!(result.records().len(), 1);
//! assert_eq!(result.stats().detected_format, Some(DetectedFormat::TxtWithTime));
//! assert_eq!(result.stats().accuracy_pct, 50.0);
//! ```
//!
//! ## Module Structure
//!
//! - [`pipeline`]: [`ParsePipeline`](pipeline::ParsePipeline), the single entry point
//! - [`parser`]: [`DialectParser`](parser::DialectParser) trait and per-record outcomes
//! - [`parsers`]: The three dialect parsers and plaintext dialect detection
//! - [`parsing`]: Timestamp normalization and text cleaning helpers
//! - [`core`]: Content filters, deduplication, the cleaning pipeline, result types
//! - [`cache`]: [`ContentCache`](cache::ContentCache) and content fingerprinting
//! - [`config`]: [`ParserConfig`](config::ParserConfig)
//! - [`format`]: Format selectors and labels
//! - [`error`]: Unified error types ([`ChatsiftError`], [`Result`])
//! - [`prelude`]: Convenient re-exports

pub mod cache;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
#[cfg(feature = "cli")]
pub mod logging;
pub mod message;
pub mod parser;
pub mod parsers;
pub mod parsing;
pub mod pipeline;

// Re-export the main types at the crate root for convenience
pub use error::{ChatsiftError, Result};
pub use message::Message;

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use chatsift::prelude::*;
/// ```
pub mod prelude {
    // Core message type
    pub use crate::Message;

    // Error types
    pub use crate::error::{ChatsiftError, Result};

    // Entry point and configuration
    pub use crate::config::ParserConfig;
    pub use crate::pipeline::ParsePipeline;

    // Formats
    pub use crate::format::{DetectedFormat, InputFormat, SourceFormat};

    // Results
    pub use crate::core::{FilterBreakdown, ParseResult, ParseStats, ParseStatus};

    // Cache
    pub use crate::cache::{CacheStats, ContentCache, Fingerprinter, Sha256Fingerprinter};

    // Dialect parsers
    pub use crate::parser::{DialectParser, RecordOutcome, SkipReason, create_parser};
    pub use crate::parsers::{PlainTextParser, TimestampedTextParser, XmlParser, detect_text_dialect};
}
