//! Plaintext dialect detection.
//!
//! XML is always selected explicitly by the caller; this module only decides
//! between the two plaintext dialects.

use crate::error::{ChatsiftError, Result};
use crate::format::DetectedFormat;
use crate::parsing::find_separator;
use crate::parsing::text::TIMESTAMP_MARKER;

/// Chooses the plaintext dialect of `text`.
///
/// 1. Any bracketed date-time marker → [`DetectedFormat::TxtWithTime`]
/// 2. Any `name` + `:`/`：` with non-blank text after it → [`DetectedFormat::TxtNoTime`]
/// 3. Otherwise [`ChatsiftError::UnrecognizedTextDialect`]
///
/// ```
/// use chatsift::format::DetectedFormat;
/// use chatsift::parsers::detect_text_dialect;
///
/// assert_eq!(
///     detect_text_dialect("【2024-01-15 10:30】Alice：hi").unwrap(),
///     DetectedFormat::TxtWithTime
/// );
/// assert_eq!(detect_text_dialect("Alice: hi").unwrap(), DetectedFormat::TxtNoTime);
/// assert!(detect_text_dialect("just some words").is_err());
/// ```
pub fn detect_text_dialect(text: &str) -> Result<DetectedFormat> {
    if TIMESTAMP_MARKER.is_match(text) {
        return Ok(DetectedFormat::TxtWithTime);
    }

    if has_sender_line(text) {
        return Ok(DetectedFormat::TxtNoTime);
    }

    Err(ChatsiftError::UnrecognizedTextDialect)
}

/// A line with a non-empty name, a separator, and non-blank text after the
/// separator (on the same line or further down).
fn has_sender_line(text: &str) -> bool {
    let mut offset = 0;

    for line in text.split('\n') {
        if let Some((start, end)) = find_separator(line) {
            let has_name = !line[..start].trim().is_empty();
            let rest = &text[offset + end..];
            if has_name && !rest.trim().is_empty() {
                return true;
            }
        }
        offset += line.len() + 1;
    }

    false
}
