//! Dialect parser trait and per-record outcomes.
//!
//! Each export dialect implements [`DialectParser`]. A parser never fails as
//! a whole: it turns the document into a sequence of [`RecordOutcome`]s, one
//! per candidate record, where a broken record is simply
//! [`RecordOutcome::Skipped`] with a [`SkipReason`]. A single corrupt record
//! therefore can never abort the batch.
//!
//! # Example
//!
//! ```rust
//! use chatsift::format::DetectedFormat;
//! use chatsift::parser::{create_parser, collect_records};
//! use chatsift::parsing::ParseContext;
//!
//! let parser = create_parser(DetectedFormat::TxtNoTime);
//! let ctx = ParseContext::now();
//! let outcomes = parser.parse_records("Alice: hello\nBob:", &ctx);
//!
//! let records = collect_records(parser.name(), outcomes);
//! assert_eq!(records.len(), 1);
//! ```

use std::fmt;

use tracing::{debug, warn};

use crate::Message;
use crate::format::DetectedFormat;
use crate::parsing::ParseContext;

/// Why a candidate record was not emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Sender is empty after cleaning.
    EmptySender,
    /// Content is empty after cleaning.
    EmptyContent,
    /// The record does not fit the dialect's grammar.
    Malformed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::EmptySender => f.write_str("empty sender"),
            SkipReason::EmptyContent => f.write_str("empty content"),
            SkipReason::Malformed(reason) => write!(f, "malformed record: {reason}"),
        }
    }
}

/// Result of constructing one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    /// A well-formed record.
    Parsed(Message),
    /// A candidate that was dropped.
    Skipped(SkipReason),
}

impl RecordOutcome {
    /// Builds an outcome from cleaned fields, applying the
    /// empty-sender/empty-content discard rule.
    pub fn from_fields(
        timestamp: String,
        sender: String,
        content: String,
        format: DetectedFormat,
    ) -> Self {
        if sender.trim().is_empty() {
            return RecordOutcome::Skipped(SkipReason::EmptySender);
        }
        if content.trim().is_empty() {
            return RecordOutcome::Skipped(SkipReason::EmptyContent);
        }
        RecordOutcome::Parsed(Message::new(
            timestamp,
            sender,
            content,
            format.source_format(),
        ))
    }

    /// Creates a malformed-record outcome.
    pub fn malformed(reason: impl Into<String>) -> Self {
        RecordOutcome::Skipped(SkipReason::Malformed(reason.into()))
    }

    /// Returns `true` if the record was parsed.
    pub fn is_parsed(&self) -> bool {
        matches!(self, RecordOutcome::Parsed(_))
    }
}

/// A parser for one export dialect.
pub trait DialectParser: Send + Sync {
    /// Returns the human-readable name of this parser.
    fn name(&self) -> &'static str;

    /// Returns the dialect this parser handles.
    fn format(&self) -> DetectedFormat;

    /// Splits the document into candidate records.
    ///
    /// Document-level problems are absorbed here; the result may be empty.
    fn parse_records(&self, content: &str, ctx: &ParseContext) -> Vec<RecordOutcome>;
}

/// Creates the parser for a dialect.
pub fn create_parser(format: DetectedFormat) -> Box<dyn DialectParser> {
    match format {
        DetectedFormat::TxtWithTime => Box::new(crate::parsers::TimestampedTextParser::new()),
        DetectedFormat::TxtNoTime => Box::new(crate::parsers::PlainTextParser::new()),
        DetectedFormat::Xml => Box::new(crate::parsers::XmlParser::new()),
    }
}

/// Keeps the parsed records and logs every skipped candidate.
///
/// Malformed records are logged at `warn`, empty ones at `debug`.
pub fn collect_records(parser: &str, outcomes: Vec<RecordOutcome>) -> Vec<Message> {
    let mut records = Vec::with_capacity(outcomes.len());

    for (index, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            RecordOutcome::Parsed(message) => records.push(message),
            RecordOutcome::Skipped(reason @ SkipReason::Malformed(_)) => {
                warn!(parser, index, %reason, "Skipping record");
            }
            RecordOutcome::Skipped(reason) => {
                debug!(parser, index, %reason, "Skipping record");
            }
        }
    }

    records
}
