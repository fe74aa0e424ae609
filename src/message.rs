//! Normalized message record.
//!
//! Every dialect parser converts its native records into [`Message`]. By the
//! time a message leaves the cleaning stage:
//!
//! - `timestamp` is in the canonical `YYYY-MM-DD HH:MM:SS` format
//! - `sender` is trimmed, non-empty and has no line breaks
//! - `content` is trimmed, non-empty and has its line breaks flattened
//! - `valid` is `true` (invalid records are dropped, never flagged)
//!
//! # Example
//!
//! ```
//! use chatsift::Message;
//! use chatsift::format::SourceFormat;
//!
//! let msg = Message::new("2024-01-15 10:30:00", "Alice", "Hello!", SourceFormat::Txt);
//! assert_eq!(msg.sender(), "Alice");
//! assert!(msg.is_valid());
//! ```

use serde::{Deserialize, Serialize};

use crate::format::SourceFormat;

/// Deduplication key: trimmed timestamp, sender and content.
pub type DedupKey<'a> = (&'a str, &'a str, &'a str);

/// A normalized chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Canonical timestamp (`YYYY-MM-DD HH:MM:SS`).
    pub timestamp: String,

    /// Display name of the message author.
    pub sender: String,

    /// Text content, single line.
    pub content: String,

    /// Export format the record was read from.
    pub source_format: SourceFormat,

    /// Always `true` for records that left the cleaning stage.
    pub valid: bool,
}

impl Message {
    /// Creates a new valid message.
    pub fn new(
        timestamp: impl Into<String>,
        sender: impl Into<String>,
        content: impl Into<String>,
        source_format: SourceFormat,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            sender: sender.into(),
            content: content.into(),
            source_format,
            valid: true,
        }
    }

    /// Returns the timestamp.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Returns the sender name.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Returns the message content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the source format tag.
    pub fn source_format(&self) -> SourceFormat {
        self.source_format
    }

    /// Returns the validity flag.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Returns `true` if sender and content are both non-blank and the
    /// record is flagged valid.
    pub fn is_complete(&self) -> bool {
        self.valid && !self.sender.trim().is_empty() && !self.content.trim().is_empty()
    }

    /// Builds the deduplication key from trimmed timestamp, sender and content.
    pub fn dedup_key(&self) -> DedupKey<'_> {
        (self.timestamp.trim(), self.sender.trim(), self.content.trim())
    }
}
