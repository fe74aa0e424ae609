//! Plain (timestamp-less) plaintext dialect.
//!
//! ```text
//! Carlotta:
//! 拿到手有点跃跃欲试的感觉
//!
//! 根号3。1: 崭新出厂哦
//! ```
//!
//! A header line is `sender` + `:`/`：` + optional text; every following
//! non-header line belongs to the same record. The source carries no
//! timestamps, so every record gets the invocation's default timestamp.

use tracing::debug;

use crate::format::DetectedFormat;
use crate::parser::{DialectParser, RecordOutcome};
use crate::parsing::text::{starts_with_marker_like, truncate_chars};
use crate::parsing::{
    ParseContext, collapse_blank_lines, deep_clean_sender, find_separator, flatten_content,
};

/// Parser for `sender: content` exports.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextParser;

/// The record currently being accumulated.
enum Pending<'a> {
    None,
    Record { sender: &'a str, lines: Vec<&'a str> },
    /// A broken marker line; swallows its continuation lines.
    Malformed { line: &'a str },
}

impl Pending<'_> {
    fn finish(self, ctx: &ParseContext, out: &mut Vec<RecordOutcome>) {
        match self {
            Pending::None => {}
            Pending::Record { sender, lines } => {
                let content = lines.join("\n").replace('\u{3000}', " ");
                out.push(RecordOutcome::from_fields(
                    ctx.default_timestamp().to_string(),
                    deep_clean_sender(sender),
                    flatten_content(&content),
                    DetectedFormat::TxtNoTime,
                ));
            }
            Pending::Malformed { line } => {
                out.push(RecordOutcome::malformed(format!(
                    "unparsable header line {:?}",
                    truncate_chars(line.trim(), 40)
                )));
            }
        }
    }
}

impl PlainTextParser {
    /// Creates a new parser.
    pub fn new() -> Self {
        Self
    }

    /// Normalizes line endings and blank-line runs before scanning.
    fn prepare(content: &str) -> String {
        let unified = content.replace("\r\n", "\n");
        collapse_blank_lines(&unified).trim().to_string()
    }
}

impl DialectParser for PlainTextParser {
    fn name(&self) -> &'static str {
        "TXT (plain)"
    }

    fn format(&self) -> DetectedFormat {
        DetectedFormat::TxtNoTime
    }

    fn parse_records(&self, content: &str, ctx: &ParseContext) -> Vec<RecordOutcome> {
        let text = Self::prepare(content);
        let mut outcomes = Vec::new();
        let mut pending = Pending::None;

        for line in text.split('\n') {
            if starts_with_marker_like(line) {
                std::mem::replace(&mut pending, Pending::Malformed { line })
                    .finish(ctx, &mut outcomes);
                continue;
            }

            if let Some((start, end)) = find_separator(line) {
                let next = Pending::Record {
                    sender: &line[..start],
                    lines: vec![&line[end..]],
                };
                std::mem::replace(&mut pending, next).finish(ctx, &mut outcomes);
                continue;
            }

            match &mut pending {
                Pending::Record { lines, .. } => lines.push(line),
                Pending::Malformed { .. } => {}
                Pending::None => {
                    if !line.trim().is_empty() {
                        debug!(line, "Ignoring text before the first sender line");
                    }
                }
            }
        }

        pending.finish(ctx, &mut outcomes);
        outcomes
    }
}
