//! Content filters: system-notice suppression and junk suppression.
//!
//! Two independent predicates over a record's content:
//!
//! | Filter | Drops |
//! |--------|-------|
//! | [`SystemMessageFilter`] | Platform notices: recalls, join/leave/rename, calls, transfers, red envelopes, location sharing |
//! | [`JunkContentFilter`] | Empty content, a lone media placeholder (`[图片]`, `[image]`) or a lone bracketed emoji (`[微笑]`) |
//!
//! [`ContentFilter`] applies them in that order.
//!
//! # Examples
//!
//! ```
//! use chatsift::core::filter::{ContentFilter, Verdict, JunkKind};
//!
//! let filter = ContentFilter::new();
//!
//! assert_eq!(filter.verdict("撤回了一条消息"), Verdict::System);
//! assert_eq!(filter.verdict("[图片]"), Verdict::Junk(JunkKind::MediaPlaceholder));
//! assert_eq!(filter.verdict("[图片] look at this"), Verdict::Keep);
//! ```
//!
//! # Behavior Notes
//!
//! - System patterns are searched anywhere in the content
//! - Junk checks look at the whole trimmed content only; markers mixed with
//!   other text are kept

use std::sync::LazyLock;

use regex::{Regex, RegexSet};

/// Built-in platform notice patterns.
const SYSTEM_PATTERNS: &[&str] = &[
    r"撤回了一条消息",
    r"发起了群聊",
    r"加入了群聊",
    r"退出了群聊",
    r"修改了群聊名称",
    r"发送了(?:文件|图片|视频|语音|小程序|红包|转账)",
    r"(?:语音|视频)通话",
    r"位置共享",
    r"已领取红包",
    r"已转账",
    r"邀请.*加入群聊",
    r"移出了群聊",
    r"(?i)\brecalled a message\b",
    r"(?i)\b(?:joined|left) the group chat\b",
    r"(?i)\bchanged the group name\b",
    r"(?i)\bremoved .+ from the group\b",
    r"(?i)\b(?:voice|video) call (?:started|ended)\b",
];

static SYSTEM_SET: LazyLock<RegexSet> =
    LazyLock::new(|| RegexSet::new(SYSTEM_PATTERNS).expect("system patterns are valid"));

static MEDIA_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\[(?:图片|视频|语音|文件|小程序|红包|转账|表情|动画表情|image|photo|video|voice|audio|file|sticker|gif)\]$",
    )
    .expect("media placeholder regex is valid")
});

static EMOJI_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[[^\[\]\n]+\]$").expect("emoji token regex is valid"));

/// Detects platform-generated operational notices.
#[derive(Debug, Clone, Default)]
pub struct SystemMessageFilter {
    /// Extra literal substrings.
    keywords: Vec<String>,
}

impl SystemMessageFilter {
    /// Creates a filter with the built-in patterns only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds literal keywords on top of the built-in patterns. Blank keywords
    /// are ignored.
    #[must_use]
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords.extend(
            keywords
                .into_iter()
                .map(Into::into)
                .filter(|k| !k.trim().is_empty()),
        );
        self
    }

    /// Returns `true` if `content` is a system notice.
    pub fn is_system(&self, content: &str) -> bool {
        SYSTEM_SET.is_match(content) || self.keywords.iter().any(|k| content.contains(k.as_str()))
    }
}

/// Why a record's content counts as junk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JunkKind {
    /// Nothing left after trimming.
    Empty,
    /// The whole content is one media placeholder such as `[图片]`.
    MediaPlaceholder,
    /// The whole content is one bracketed emoji token such as `[微笑]`.
    EmojiToken,
}

/// Detects content with no dialogue value.
#[derive(Debug, Clone, Copy, Default)]
pub struct JunkContentFilter;

impl JunkContentFilter {
    /// Creates the filter.
    pub fn new() -> Self {
        Self
    }

    /// Classifies `content`, or returns `None` if it carries real text.
    pub fn classify(&self, content: &str) -> Option<JunkKind> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            Some(JunkKind::Empty)
        } else if MEDIA_PLACEHOLDER.is_match(trimmed) {
            Some(JunkKind::MediaPlaceholder)
        } else if EMOJI_TOKEN.is_match(trimmed) {
            Some(JunkKind::EmojiToken)
        } else {
            None
        }
    }

    /// Returns `true` if `content` is junk.
    pub fn is_junk(&self, content: &str) -> bool {
        self.classify(content).is_some()
    }
}

/// Outcome of running both content predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Keep,
    System,
    Junk(JunkKind),
}

/// Both content predicates, system check first.
#[derive(Debug, Clone, Default)]
pub struct ContentFilter {
    system: SystemMessageFilter,
    junk: JunkContentFilter,
}

impl ContentFilter {
    /// Creates a filter with the built-in system patterns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a filter with extra system keywords.
    pub fn with_system_keywords(keywords: &[String]) -> Self {
        Self {
            system: SystemMessageFilter::new().with_keywords(keywords.iter().cloned()),
            junk: JunkContentFilter::new(),
        }
    }

    pub fn system(&self) -> &SystemMessageFilter {
        &self.system
    }

    pub fn junk(&self) -> &JunkContentFilter {
        &self.junk
    }

    /// Runs the system check, then the junk check.
    pub fn verdict(&self, content: &str) -> Verdict {
        if self.system.is_system(content) {
            return Verdict::System;
        }
        match self.junk.classify(content) {
            Some(kind) => Verdict::Junk(kind),
            None => Verdict::Keep,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_system_notices() {
        let filter = SystemMessageFilter::new();
        for notice in [
            "撤回了一条消息",
            "\"张三\" 撤回了一条消息",
            "李四 发起了群聊",
            "王五加入了群聊",
            "王五退出了群聊",
            "你修改了群聊名称为“周末”",
            "对方发送了红包",
            "视频通话 时长 00:12",
            "语音通话已取消",
            "发起了位置共享",
            "你已领取红包",
            "已转账 ¥20",
            "张三邀请李四加入群聊",
            "你将王五移出了群聊",
            "Alice recalled a message",
            "Bob joined the group chat",
            "Carol changed the group name to Weekend",
            "Video call ended",
        ] {
            assert!(filter.is_system(notice), "not detected: {notice}");
        }
    }

    #[test]
    fn test_ordinary_text_is_not_system() {
        let filter = SystemMessageFilter::new();
        for text in [
            "你好",
            "[微笑]",
            "！！！",
            "我们明天通话吧？",
            "let's call later",
            "I recalled the meeting time",
            "发送",
        ] {
            assert!(!filter.is_system(text), "wrongly detected: {text}");
        }
    }

    #[test]
    fn test_extra_keywords() {
        let filter = SystemMessageFilter::new().with_keywords(["pinned a message", "  "]);
        assert!(filter.is_system("Alice pinned a message"));
        assert!(!filter.is_system("hello"));
    }

    #[test]
    fn test_junk_classification() {
        let junk = JunkContentFilter::new();
        assert_eq!(junk.classify(""), Some(JunkKind::Empty));
        assert_eq!(junk.classify("  \t "), Some(JunkKind::Empty));
        assert_eq!(junk.classify("[图片]"), Some(JunkKind::MediaPlaceholder));
        assert_eq!(junk.classify(" [Image] "), Some(JunkKind::MediaPlaceholder));
        assert_eq!(junk.classify("[微笑]"), Some(JunkKind::EmojiToken));
        assert_eq!(junk.classify("[Smile]"), Some(JunkKind::EmojiToken));
    }

    #[test]
    fn test_markers_with_text_are_kept() {
        let junk = JunkContentFilter::new();
        assert!(!junk.is_junk("[图片] 看这个"));
        assert!(!junk.is_junk("哈哈[微笑]"));
        assert!(!junk.is_junk("[微笑][微笑]"));
        assert!(!junk.is_junk("[]"));
        assert!(!junk.is_junk("ok"));
    }

    #[test]
    fn test_verdict_checks_system_first() {
        let filter = ContentFilter::new();
        // Bracketed recall notice is both a system notice and an emoji-shaped token
        assert_eq!(filter.verdict("[recalled a message]"), Verdict::System);
        assert_eq!(filter.verdict("[微笑]"), Verdict::Junk(JunkKind::EmojiToken));
        assert_eq!(filter.verdict("hello"), Verdict::Keep);
    }

    #[test]
    fn test_content_filter_with_keywords() {
        let filter = ContentFilter::with_system_keywords(&["拍了拍".to_string()]);
        assert_eq!(filter.verdict("张三 拍了拍 李四"), Verdict::System);
        assert!(filter.system().is_system("拍了拍"));
        assert!(filter.junk().is_junk(""));
    }
}
