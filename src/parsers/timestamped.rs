//! Timestamped plaintext dialect.
//!
//! ```text
//! 【2025-02-03 18:00:00】张三：你好
//! 【2025-02-03 18:01:00】李四：好久不见，
//! 最近怎么样？
//! ----------
//! 【2025-02-03 18:02:00】张三：还不错
//! ```
//!
//! A record starts at a bracketed date-time marker. The sender follows the
//! marker and ends at the first `:`/`：`. The content runs up to the next
//! marker, a run of five or more dashes, or the end of the input, and is
//! flattened onto one line.

use std::ops::Range;

use crate::format::DetectedFormat;
use crate::parser::{DialectParser, RecordOutcome};
use crate::parsing::text::{DASH_RUN, TIMESTAMP_MARKER};
use crate::parsing::{ParseContext, clean_sender, find_separator, flatten_content};

/// Parser for `【timestamp】sender：content` exports.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampedTextParser;

/// One marker and the body text that belongs to it.
struct Segment<'a> {
    raw_time: &'a str,
    body: &'a str,
}

impl TimestampedTextParser {
    /// Creates a new parser.
    pub fn new() -> Self {
        Self
    }

    /// Splits the document into marker-delimited segments.
    fn segments(content: &str) -> Vec<Segment<'_>> {
        let markers: Vec<(Range<usize>, Range<usize>)> = TIMESTAMP_MARKER
            .captures_iter(content)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let time = caps.get(1)?;
                Some((whole.range(), time.range()))
            })
            .collect();

        markers
            .iter()
            .enumerate()
            .map(|(i, (whole, time))| {
                let body_end = markers
                    .get(i + 1)
                    .map_or(content.len(), |(next, _)| next.start);
                let mut body = &content[whole.end..body_end];
                if let Some(divider) = DASH_RUN.find(body) {
                    body = &body[..divider.start()];
                }
                Segment {
                    raw_time: &content[time.clone()],
                    body,
                }
            })
            .collect()
    }

    fn build_record(segment: &Segment<'_>, ctx: &ParseContext) -> RecordOutcome {
        let Some((sep_start, sep_end)) = find_separator(segment.body) else {
            return RecordOutcome::malformed(format!(
                "no sender separator after [{}]",
                segment.raw_time
            ));
        };

        let sender_raw = segment.body[..sep_start].trim();
        if sender_raw.contains('\n') {
            return RecordOutcome::malformed(format!(
                "sender after [{}] spans several lines",
                segment.raw_time
            ));
        }

        RecordOutcome::from_fields(
            ctx.normalize_timestamp(segment.raw_time),
            clean_sender(sender_raw),
            flatten_content(&segment.body[sep_end..]),
            DetectedFormat::TxtWithTime,
        )
    }
}

impl DialectParser for TimestampedTextParser {
    fn name(&self) -> &'static str {
        "TXT (timestamped)"
    }

    fn format(&self) -> DetectedFormat {
        DetectedFormat::TxtWithTime
    }

    fn parse_records(&self, content: &str, ctx: &ParseContext) -> Vec<RecordOutcome> {
        Self::segments(content)
            .iter()
            .map(|segment| Self::build_record(segment, ctx))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Message;
    use crate::parser::{SkipReason, collect_records};
    use chrono::NaiveDate;

    fn ctx() -> ParseContext {
        ParseContext::new(
            NaiveDate::from_ymd_opt(2025, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        )
    }

    fn parse(content: &str) -> Vec<Message> {
        let parser = TimestampedTextParser::new();
        collect_records(parser.name(), parser.parse_records(content, &ctx()))
    }

    #[test]
    fn test_parser_name_and_format() {
        let parser = TimestampedTextParser::new();
        assert_eq!(parser.name(), "TXT (timestamped)");
        assert_eq!(parser.format(), DetectedFormat::TxtWithTime);
    }

    #[test]
    fn test_basic_records() {
        let records = parse("【2025-02-03 18:00:00】张三：你好\n【2025-02-03 18:01】李四：在吗");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].timestamp(), "2025-02-03 18:00:00");
        assert_eq!(records[0].sender(), "张三");
        assert_eq!(records[0].content(), "你好");
        assert_eq!(records[1].timestamp(), "2025-02-03 18:01:00");
        assert_eq!(records[1].sender(), "李四");
    }

    #[test]
    fn test_multiline_content_is_flattened() {
        let records = parse("【2025-02-03 18:00:00】张三：第一行\r\n第二行\n\n第三行\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].content(), "第一行 第二行 第三行");
    }

    #[test]
    fn test_ascii_brackets_and_colon() {
        let records = parse("[2024/1/5 9:05] Alice: hello\n[2024.01.05 09:06:30] Bob: hi");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].timestamp(), "2024-01-05 09:05:00");
        assert_eq!(records[0].sender(), "Alice");
        assert_eq!(records[1].timestamp(), "2024-01-05 09:06:30");
    }

    #[test]
    fn test_dash_divider_ends_content() {
        let records =
            parse("【2025-02-03 18:00:00】张三：你好\n----------\n2025-02-04\n【2025-02-04 08:00:00】李四：早");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].content(), "你好");
        assert_eq!(records[1].content(), "早");
    }

    #[test]
    fn test_empty_sender_and_content_are_skipped() {
        let parser = TimestampedTextParser::new();
        let outcomes = parser.parse_records(
            "【2025-02-03 18:00:00】：no sender\n【2025-02-03 18:01:00】Bob：\n【2025-02-03 18:02:00】Eve：ok",
            &ctx(),
        );
        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0], RecordOutcome::Skipped(SkipReason::EmptySender));
        assert_eq!(outcomes[1], RecordOutcome::Skipped(SkipReason::EmptyContent));
        assert!(outcomes[2].is_parsed());
    }

    #[test]
    fn test_malformed_record_does_not_abort_batch() {
        let parser = TimestampedTextParser::new();
        let outcomes = parser.parse_records(
            "【2025-02-03 18:00:00】Alice：one\n【2025-02-03 18:01:00】no separator here\n【2025-02-03 18:02:00】Bob：two",
            &ctx(),
        );
        assert_eq!(outcomes.len(), 3);
        assert!(matches!(outcomes[1], RecordOutcome::Skipped(SkipReason::Malformed(_))));

        let records = collect_records(parser.name(), outcomes);
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_sender_spanning_lines_is_malformed() {
        let parser = TimestampedTextParser::new();
        let outcomes =
            parser.parse_records("【2025-02-03 18:00:00】stray text\nAlice：hello", &ctx());
        assert!(matches!(outcomes[0], RecordOutcome::Skipped(SkipReason::Malformed(_))));
    }

    #[test]
    fn test_invalid_date_falls_back_to_default() {
        let records = parse("【2025-13-45 18:00】Alice：hello");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].timestamp(), "2025-01-01 00:00:00");
    }

    #[test]
    fn test_text_before_first_marker_is_ignored() {
        let records = parse("微信聊天记录导出\n\n【2025-02-03 18:00:00】张三：你好");
        assert_eq!(records.len(), 1);
    }
}
