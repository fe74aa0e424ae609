//! Chat export dialect parsers.
//!
//! Each parser implements [`DialectParser`](crate::parser::DialectParser).
//!
//! # Available Parsers
//!
//! - [`TimestampedTextParser`] - `【2024-01-15 10:30:00】Alice：Hello` plaintext
//! - [`PlainTextParser`] - `Alice: Hello` plaintext without timestamps
//! - [`XmlParser`] - XML exports with several element naming schemes
//!
//! Plaintext input is routed by [`detect_text_dialect`].
//!
//! # Example
//!
//! ```rust
//! use chatsift::parser::DialectParser;
//! use chatsift::parsers::{PlainTextParser, detect_text_dialect};
//! use chatsift::parsing::ParseContext;
//!
//! let text = "Alice: hello\nBob: hi";
//! let format = detect_text_dialect(text).unwrap();
//!
//! let parser = PlainTextParser::new();
//! assert_eq!(parser.format(), format);
//! assert_eq!(parser.parse_records(text, &ParseContext::now()).len(), 2);
//! ```

mod detector;
mod plain;
mod timestamped;
mod xml;

pub use detector::detect_text_dialect;
pub use plain::PlainTextParser;
pub use timestamped::TimestampedTextParser;
pub use xml::XmlParser;
