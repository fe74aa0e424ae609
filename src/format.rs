//! Format selectors and format labels.
//!
//! Three small enums describe formats at different points of the pipeline:
//!
//! - [`InputFormat`]: what the caller asks for (`"txt"` or `"xml"`)
//! - [`DetectedFormat`]: which dialect actually parsed the input
//!   (`txt_with_time`, `txt_no_time`, `xml`), reported in the stats
//! - [`SourceFormat`]: the format tag carried by every output record
//!
//! # Example
//!
//! ```rust
//! use chatsift::format::{InputFormat, DetectedFormat};
//! use std::str::FromStr;
//!
//! let format = InputFormat::from_str("TXT").unwrap();
//! assert_eq!(format, InputFormat::Txt);
//! assert_eq!(DetectedFormat::TxtNoTime.to_string(), "txt_no_time");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ChatsiftError;

/// Format selector supplied by the caller.
///
/// Plaintext dialects are auto-detected; XML has to be selected explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// Plaintext export, timestamped or plain dialect
    Txt,
    /// XML export
    Xml,
}

impl InputFormat {
    /// Returns all supported selector names.
    pub fn all_names() -> &'static [&'static str] {
        &["txt", "xml"]
    }

    /// Returns the selector string for this format.
    pub fn as_str(&self) -> &'static str {
        match self {
            InputFormat::Txt => "txt",
            InputFormat::Xml => "xml",
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputFormat {
    type Err = ChatsiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "txt" => Ok(InputFormat::Txt),
            "xml" => Ok(InputFormat::Xml),
            _ => Err(ChatsiftError::unsupported_format(s)),
        }
    }
}

/// The dialect that produced the raw records of a parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectedFormat {
    /// `【2024-01-15 10:30:00】Alice：Hello`
    TxtWithTime,
    /// `Alice: Hello`
    TxtNoTime,
    /// `<msg><sender>…</sender><content>…</content></msg>`
    Xml,
}

impl DetectedFormat {
    /// Returns the stats label for this dialect.
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectedFormat::TxtWithTime => "txt_with_time",
            DetectedFormat::TxtNoTime => "txt_no_time",
            DetectedFormat::Xml => "xml",
        }
    }

    /// Returns the format tag carried by records of this dialect.
    pub fn source_format(&self) -> SourceFormat {
        match self {
            DetectedFormat::TxtWithTime | DetectedFormat::TxtNoTime => SourceFormat::Txt,
            DetectedFormat::Xml => SourceFormat::Xml,
        }
    }
}

impl fmt::Display for DetectedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Format tag of an output record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Txt,
    Xml,
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFormat::Txt => f.write_str("txt"),
            SourceFormat::Xml => f.write_str("xml"),
        }
    }
}
