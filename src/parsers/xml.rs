//! XML export dialect.
//!
//! Exporters disagree on element names, so the parser accepts several
//! alternatives for the message collection and for each field:
//!
//! ```xml
//! <chat>
//!   <msg>
//!     <time>2024-01-15 10:30:00</time>
//!     <sender>Alice</sender>
//!     <content>Hello</content>
//!   </msg>
//!   <Message datetime="1705314600" from="Bob"><text>Hi</text></Message>
//! </chat>
//! ```
//!
//! A document that fails to parse yields zero records instead of an error.

use roxmltree::{Document, Node, ParsingOptions};
use tracing::error;

use crate::error::Result;
use crate::format::DetectedFormat;
use crate::parser::{DialectParser, RecordOutcome};
use crate::parsing::{ParseContext, clean_sender, flatten_content};

/// Message element names, in priority order. The first name with at least
/// one match below the root wins.
const MESSAGE_TAGS: &[&str] = &["msg", "Message", "ChatRecord", "record"];

const TIME_FIELDS: &[&str] = &["time", "datetime"];
const SENDER_FIELDS: &[&str] = &["sender", "from", "username"];
const CONTENT_FIELDS: &[&str] = &["content", "text"];

/// Tolerant multi-schema XML parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlParser;

impl XmlParser {
    /// Creates a new parser.
    pub fn new() -> Self {
        Self
    }

    fn try_parse(content: &str, ctx: &ParseContext) -> Result<Vec<RecordOutcome>> {
        let mut options = ParsingOptions::default();
        options.allow_dtd = true;
        let doc = Document::parse_with_options(content.trim(), options)?;

        Ok(message_nodes(&doc)
            .into_iter()
            .map(|node| build_record(node, ctx))
            .collect())
    }
}

/// Message elements strictly below the root, using the first tag that has
/// any.
fn message_nodes<'a, 'input>(doc: &'a Document<'input>) -> Vec<Node<'a, 'input>> {
    let root = doc.root_element();

    for tag in MESSAGE_TAGS {
        let nodes: Vec<_> = root
            .descendants()
            .skip(1)
            .filter(|n| n.is_element() && n.tag_name().name() == *tag)
            .collect();
        if !nodes.is_empty() {
            return nodes;
        }
    }

    Vec::new()
}

/// First non-blank value among the candidate names. A child element's text
/// is preferred over an attribute of the same name.
fn field<'a>(node: Node<'a, '_>, names: &[&str]) -> &'a str {
    for name in names {
        let child_text = node
            .children()
            .find(|c| c.is_element() && c.tag_name().name() == *name)
            .and_then(|c| c.text());
        if let Some(text) = child_text.filter(|t| !t.trim().is_empty()) {
            return text;
        }
        if let Some(attr) = node.attribute(*name).filter(|a| !a.trim().is_empty()) {
            return attr;
        }
    }
    ""
}

fn build_record(node: Node<'_, '_>, ctx: &ParseContext) -> RecordOutcome {
    let sender = field(node, SENDER_FIELDS).trim();
    if sender.contains('\n') {
        return RecordOutcome::malformed(format!(
            "multi-line sender in <{}>",
            node.tag_name().name()
        ));
    }

    RecordOutcome::from_fields(
        ctx.normalize_timestamp(field(node, TIME_FIELDS)),
        clean_sender(sender),
        flatten_content(field(node, CONTENT_FIELDS)),
        DetectedFormat::Xml,
    )
}

impl DialectParser for XmlParser {
    fn name(&self) -> &'static str {
        "XML"
    }

    fn format(&self) -> DetectedFormat {
        DetectedFormat::Xml
    }

    fn parse_records(&self, content: &str, ctx: &ParseContext) -> Vec<RecordOutcome> {
        match Self::try_parse(content, ctx) {
            Ok(outcomes) => outcomes,
            Err(err) => {
                error!(error = %err, "Malformed XML document, no records extracted");
                Vec::new()
            }
        }
    }
}
