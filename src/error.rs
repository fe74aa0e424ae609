//! Unified error types for chatsift.
//!
//! This module provides a single [`ChatsiftError`] enum that covers every
//! error the library can produce. Only a handful of them ever reach a caller
//! of [`ParsePipeline::parse`](crate::pipeline::ParsePipeline::parse): the
//! pipeline turns every error into a [`ParseResult`](crate::core::ParseResult)
//! and the variant only decides whether that result is a client error or a
//! server error.
//!
//! # Error Handling Philosophy
//!
//! - **Client input errors** ([`UnsupportedFormat`](ChatsiftError::UnsupportedFormat),
//!   [`EmptyContent`](ChatsiftError::EmptyContent),
//!   [`UnrecognizedTextDialect`](ChatsiftError::UnrecognizedTextDialect))
//!   short-circuit before any parsing work
//! - **Malformed records** are not errors at all, see
//!   [`RecordOutcome`](crate::parser::RecordOutcome)
//! - **Malformed XML documents** are absorbed by the XML parser
//! - **Everything else** is an internal fault and surfaces as a server error

use std::io;

use thiserror::Error;

/// A specialized [`Result`] type for chatsift operations.
///
/// # Example
///
/// ```rust
/// use chatsift::error::Result;
/// use chatsift::Message;
///
/// fn my_function() -> Result<Vec<Message>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatsiftError>;

/// The error type for all chatsift operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatsiftError {
    /// The format selector is not one of the supported values.
    #[error("Unsupported format '{input}'. Expected one of: {expected}")]
    UnsupportedFormat {
        /// The selector that was provided
        input: String,
        /// Supported selectors, comma separated
        expected: &'static str,
    },

    /// The content is empty or whitespace-only.
    #[error("Content is empty, nothing to parse")]
    EmptyContent,

    /// Plaintext content matches neither the timestamped nor the plain dialect.
    #[error("Unrecognized text format: no timestamped records and no 'sender: message' lines found")]
    UnrecognizedTextDialect,

    /// The XML document could not be parsed.
    ///
    /// The XML parser recovers from this locally; it never reaches a caller
    /// of the pipeline.
    #[error("Malformed XML document: {0}")]
    Xml(#[from] roxmltree::Error),

    /// An I/O error occurred (CLI input reading).
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An unexpected fault inside the pipeline.
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the fault
        message: String,
    },
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatsiftError {
    /// Creates an unsupported format error.
    pub fn unsupported_format(input: impl Into<String>) -> Self {
        ChatsiftError::UnsupportedFormat {
            input: input.into(),
            expected: "txt, xml",
        }
    }

    /// Creates an internal fault error.
    pub fn internal(message: impl Into<String>) -> Self {
        ChatsiftError::Internal {
            message: message.into(),
        }
    }

    /// Returns `true` if this error was caused by the caller's input.
    ///
    /// Client errors stop the call before any records are produced and are
    /// never cached.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ChatsiftError::UnsupportedFormat { .. }
                | ChatsiftError::EmptyContent
                | ChatsiftError::UnrecognizedTextDialect
        )
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatsiftError::Io(_))
    }

    /// Returns `true` if this is a malformed XML document error.
    pub fn is_xml(&self) -> bool {
        matches!(self, ChatsiftError::Xml(_))
    }
}

// ============================================================================
// Tests
// ============================================================================
