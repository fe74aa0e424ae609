//! Edge case tests for chatsift.
//!
//! Covers line endings, unicode, separators, dividers, malformed markup and
//! unusual input that a real export can contain.

use chatsift::prelude::*;
use chrono::{NaiveDate, NaiveDateTime};

fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn parse_txt(content: &str) -> ParseResult {
    ParsePipeline::new().parse_at(content, InputFormat::Txt, false, fixed_now())
}

fn parse_xml(content: &str) -> ParseResult {
    ParsePipeline::new().parse_at(content, InputFormat::Xml, false, fixed_now())
}

fn contents(result: &ParseResult) -> Vec<&str> {
    result.records().iter().map(Message::content).collect()
}

// =========================================================================
// Empty and whitespace input
// =========================================================================

#[test]
fn test_empty_input_is_client_error() {
    let result = parse_txt("");
    assert_eq!(result.status(), ParseStatus::ClientError);
    assert!(!result.message().is_empty());
}

#[test]
fn test_whitespace_only_is_client_error() {
    for content in [" ", "\n\n\n", "\t \r\n", "\u{3000}"] {
        assert_eq!(
            parse_xml(content).status(),
            ParseStatus::ClientError,
            "{content:?}"
        );
    }
}

#[test]
fn test_only_filtered_records_is_success_with_zero_accuracy() {
    let result = parse_txt("A: [图片]\nB: [微笑]");
    assert!(result.is_success());
    assert!(result.records().is_empty());
    assert_eq!(result.stats().total_raw, 2);
    assert_eq!(result.stats().accuracy_pct, 0.0);
    assert_eq!(result.stats().filter_breakdown.junk, 2);
}

// =========================================================================
// Line endings
// =========================================================================

#[test]
fn test_crlf_timestamped() {
    let content = "【2024-01-15 10:30:00】Alice：first\r\nline two\r\n【2024-01-15 10:31:00】Bob：ok\r\n";
    let result = parse_txt(content);
    assert_eq!(contents(&result), vec!["first line two", "ok"]);
}

#[test]
fn test_crlf_plain() {
    let result = parse_txt("Alice: hi\r\nBob: hello\r\n");
    assert_eq!(contents(&result), vec!["hi", "hello"]);
    assert_eq!(result.records()[1].sender(), "Bob");
}

// =========================================================================
// Separators and brackets
// =========================================================================

#[test]
fn test_full_width_and_ascii_separators_mix() {
    let result = parse_txt("张三：你好\nBob: hi");
    let senders: Vec<_> = result.records().iter().map(Message::sender).collect();
    assert_eq!(senders, vec!["张三", "Bob"]);
}

#[test]
fn test_ascii_bracket_marker() {
    let result = parse_txt("[2024/1/15 9:05] Alice: morning");
    assert_eq!(result.stats().detected_format, Some(DetectedFormat::TxtWithTime));
    assert_eq!(result.records()[0].timestamp(), "2024-01-15 09:05:00");
    assert_eq!(result.records()[0].content(), "morning");
}

#[test]
fn test_clock_time_in_content_is_not_a_separator() {
    let result = parse_txt("Alice: meet at 10:30 tomorrow");
    assert_eq!(result.records()[0].sender(), "Alice");
    assert_eq!(result.records()[0].content(), "meet at 10:30 tomorrow");
}

#[test]
fn test_url_in_content_is_preserved() {
    let result = parse_txt("【2024-01-15 10:30:00】Alice：see https://example.com/a?b=1");
    assert_eq!(result.records()[0].content(), "see https://example.com/a?b=1");
}

#[test]
fn test_marker_without_separator_is_dropped() {
    let result = parse_txt("【2024-01-15 10:30:00】no separator here\n【2024-01-15 10:31:00】Bob：ok");
    assert_eq!(result.stats().total_raw, 1);
    assert_eq!(result.records()[0].sender(), "Bob");
}

// =========================================================================
// Dividers and continuation lines
// =========================================================================

#[test]
fn test_dash_divider_ends_record() {
    let content = "【2024-01-15 10:30:00】Alice：last words\n----------\nfooter text";
    let result = parse_txt(content);
    assert_eq!(contents(&result), vec!["last words"]);
}

#[test]
fn test_short_dash_run_is_content() {
    let result = parse_txt("【2024-01-15 10:30:00】Alice：a -- b");
    assert_eq!(contents(&result), vec!["a -- b"]);
}

#[test]
fn test_plain_blank_line_runs() {
    let result = parse_txt("Alice:\n\n\n\n\nhello\n\n\n\nBob:\nbye");
    assert_eq!(contents(&result), vec!["hello", "bye"]);
}

#[test]
fn test_plain_broken_time_marker_swallows_continuation() {
    let result = parse_txt("Alice: hi\n【invalid time】 junk:\nmore junk\nBob: ok");
    assert_eq!(contents(&result), vec!["hi", "ok"]);
    assert_eq!(result.stats().total_raw, 2);
}

#[test]
fn test_plain_bracketed_lines_are_kept() {
    let result = parse_txt(
        "Alice:\n[1] first point\n[2024] was a good year\n【通知】请大家准时参加\nBob: ok",
    );
    assert_eq!(
        contents(&result),
        vec!["[1] first point [2024] was a good year 【通知】请大家准时参加", "ok"]
    );
    assert_eq!(result.stats().total_raw, 2);
}

#[test]
fn test_plain_tagged_sender_is_kept() {
    let result = parse_txt("【公告】群主: 明天下午三点开会\nBob: 收到");
    let senders: Vec<_> = result.records().iter().map(Message::sender).collect();
    assert_eq!(senders, vec!["【公告】群主", "Bob"]);
}

// =========================================================================
// Unicode
// =========================================================================

#[test]
fn test_emoji_content_is_kept() {
    let result = parse_txt("Alice: 🎉🎉 party");
    assert_eq!(result.records()[0].content(), "🎉🎉 party");
}

#[test]
fn test_ideographic_space_in_plain_sender() {
    let result = parse_txt("张\u{3000}三:\n你好\u{3000}世界");
    assert_eq!(result.records()[0].sender(), "张三");
    assert_eq!(result.records()[0].content(), "你好 世界");
}

#[test]
fn test_rtl_text() {
    let result = parse_txt("Omar: مرحبا بالعالم");
    assert_eq!(result.records()[0].content(), "مرحبا بالعالم");
}

// =========================================================================
// Timestamps
// =========================================================================

#[test]
fn test_invalid_calendar_date_falls_back_to_now() {
    let result = parse_txt("【2024-13-45 10:30】Alice：hi");
    assert!(result.is_success());
    assert_eq!(result.records()[0].timestamp(), "2024-06-01 12:00:00");
}

#[test]
fn test_xml_unreadable_time_falls_back_to_now() {
    let xml = "<chat><msg><time>yesterday</time><sender>A</sender><content>hi</content></msg></chat>";
    let result = parse_xml(xml);
    assert_eq!(result.records()[0].timestamp(), "2024-06-01 12:00:00");
}

#[test]
fn test_xml_epoch_millis() {
    let xml = "<chat><msg><time>1705314600000</time><sender>A</sender><content>hi</content></msg></chat>";
    assert_eq!(parse_xml(xml).records()[0].timestamp(), "2024-01-15 10:30:00");
}

// =========================================================================
// XML
// =========================================================================

#[test]
fn test_truncated_xml_is_empty_success() {
    let result = parse_xml("<chat><msg><sender>A");
    assert!(result.is_success());
    assert_eq!(result.stats().total_raw, 0);
    assert_eq!(result.stats().detected_format, Some(DetectedFormat::Xml));
}

#[test]
fn test_xml_without_known_tags() {
    let result = parse_xml("<root><item>hello</item></root>");
    assert!(result.is_success());
    assert!(result.records().is_empty());
}

#[test]
fn test_xml_entities_and_cdata() {
    let xml = "<chat><record><username>A&amp;B</username><text><![CDATA[x < y]]></text></record></chat>";
    let result = parse_xml(xml);
    assert_eq!(result.records()[0].sender(), "A&B");
    assert_eq!(result.records()[0].content(), "x < y");
}

#[test]
fn test_xml_attribute_fields() {
    let xml = r#"<chat><ChatRecord time="2024-01-15 10:30" sender="Eve" content="attr based"/></chat>"#;
    let result = parse_xml(xml);
    assert_eq!(result.records()[0].sender(), "Eve");
    assert_eq!(result.records()[0].timestamp(), "2024-01-15 10:30:00");
}

#[test]
fn test_xml_missing_sender_is_skipped() {
    let xml = "<chat><msg><content>orphan</content></msg><msg><sender>A</sender><content>ok</content></msg></chat>";
    let result = parse_xml(xml);
    assert_eq!(result.stats().total_raw, 1);
    assert_eq!(contents(&result), vec!["ok"]);
}

// =========================================================================
// Selectors
// =========================================================================

#[test]
fn test_unsupported_format_selector() {
    let pipeline = ParsePipeline::new();
    for format in ["json", "csv", "", "text"] {
        let result = pipeline.parse("Alice: hi", format, false);
        assert_eq!(result.status(), ParseStatus::ClientError, "{format:?}");
    }
}

#[test]
fn test_unrecognized_plain_text() {
    let result = parse_txt("just a diary entry\nwith no speakers");
    assert_eq!(result.status(), ParseStatus::ClientError);
    assert_eq!(result.stats().detected_format, None);
}
