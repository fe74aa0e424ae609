//! Text cleaning helpers and the lexical markers shared by the detector and
//! the plaintext dialects.

use std::sync::LazyLock;

use regex::Regex;

/// Bracketed date-time marker: `【2024-01-15 10:30:00】` or `[2024/1/15 10:30]`.
///
/// Capture group 1 holds the raw date-time text.
pub(crate) static TIMESTAMP_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"[【\[][ \t]*(\d{4}[-/.]\d{1,2}[-/.]\d{1,2}[ \t]+\d{1,2}:\d{1,2}(?::\d{1,2})?)[ \t]*[】\]]",
    )
    .expect("timestamp marker regex is valid")
});

/// A run of five or more dashes, used by exports as a section divider.
pub(crate) static DASH_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-{5,}").expect("dash run regex is valid"));

/// A line opening with a broken timestamp marker: a bracket token holding a
/// date fragment (`[2024-99]`) or a time keyword (`【无效时间】`).
///
/// Tags such as `【通知】`, list items such as `[1]` and bare years such as
/// `[2024]` do not match.
static MARKER_LIKE_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[【\[][^】\]\n]*?(?:\d{4}[-/.]\d|时间|(?i:\btime\b))[^】\]\n]*[】\]]")
        .expect("marker prefix regex is valid")
});

static BLANK_LINE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("blank line regex is valid"));

/// Full-width (ideographic) space.
const IDEOGRAPHIC_SPACE: char = '\u{3000}';

/// Flattens multi-line content into a single line.
///
/// Carriage returns are stripped, every line is trimmed, blank lines are
/// dropped and the remaining lines are joined with a single space.
///
/// ```
/// use chatsift::parsing::flatten_content;
///
/// assert_eq!(flatten_content("  first line\r\n\n  second line  "), "first line second line");
/// ```
pub fn flatten_content(raw: &str) -> String {
    raw.replace('\r', "")
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Trims a sender name.
pub fn clean_sender(raw: &str) -> String {
    raw.trim().to_string()
}

/// Removes every line break, ASCII space and full-width space from a sender
/// name, then trims what is left.
pub fn deep_clean_sender(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(*c, '\n' | '\r' | ' ' | IDEOGRAPHIC_SPACE))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Collapses runs of three or more newlines into exactly two.
pub fn collapse_blank_lines(text: &str) -> String {
    BLANK_LINE_RUN.replace_all(text, "\n\n").into_owned()
}

/// Finds the sender separator (`:` or `：`) in `text`.
///
/// Returns the byte range of the separator. An ASCII colon is not a
/// separator when it sits between two ASCII digits (`10:30`) or opens a URL
/// authority (`https://`).
///
/// ```
/// use chatsift::parsing::find_separator;
///
/// assert_eq!(find_separator("Alice: hi"), Some((5, 6)));
/// assert_eq!(find_separator("张三：你好"), Some((6, 9)));
/// assert_eq!(find_separator("meet at 10:30"), None);
/// ```
pub fn find_separator(text: &str) -> Option<(usize, usize)> {
    let bytes = text.as_bytes();

    for (idx, ch) in text.char_indices() {
        match ch {
            '：' => return Some((idx, idx + ch.len_utf8())),
            ':' => {
                let before_digit = idx > 0 && bytes[idx - 1].is_ascii_digit();
                let after_digit = bytes.get(idx + 1).is_some_and(u8::is_ascii_digit);
                if before_digit && after_digit {
                    continue;
                }
                if text[idx + 1..].starts_with("//") {
                    continue;
                }
                return Some((idx, idx + 1));
            }
            _ => {}
        }
    }

    None
}

/// Returns at most the first `max_chars` characters of `s`.
pub(crate) fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Returns `true` if the line opens with a timestamp-looking bracket token.
pub(crate) fn starts_with_marker_like(line: &str) -> bool {
    MARKER_LIKE_PREFIX.is_match(line)
}
