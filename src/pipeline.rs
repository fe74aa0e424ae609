//! Top-level parse orchestration.
//!
//! ```text
//! START ─► VALIDATE ─┬─► CACHE_LOOKUP ─┬─► PARSE_DISPATCH ─► CLEAN ─► CACHE_STORE ─► RESULT
//!                    │                 └─► RESULT (hit)
//!                    └─► FAIL (client error)
//! ```
//!
//! [`ParsePipeline::parse`] never fails: every outcome, including internal
//! faults, comes back as a [`ParseResult`].
//!
//! # Example
//!
//! ```rust
//! use chatsift::core::ParseStatus;
//! use chatsift::pipeline::ParsePipeline;
//!
//! let pipeline = ParsePipeline::new();
//! let result = pipeline.parse("Alice: hello\nBob: hi\nBob: 撤回了一条消息", "txt", true);
//!
//! assert_eq!(result.status(), ParseStatus::Success);
//! assert_eq!(result.records().len(), 2);
//! assert_eq!(result.stats().total_raw, 3);
//!
//! // Same content again is served from the cache
//! let again = pipeline.parse("Alice: hello\nBob: hi\nBob: 撤回了一条消息", "txt", true);
//! assert_eq!(again.records(), result.records());
//! assert_eq!(pipeline.cache_stats().hits, 1);
//! ```

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::str::FromStr;
use std::sync::{Arc, OnceLock};
use std::time::Instant;

use chrono::{Local, NaiveDateTime};
use tracing::{error, info, info_span, warn};

use crate::Message;
use crate::cache::{CacheStats, ContentCache, Fingerprinter, Sha256Fingerprinter};
use crate::config::ParserConfig;
use crate::core::filter::ContentFilter;
use crate::core::{CleaningPipeline, ParseResult, ParseStats};
use crate::error::{ChatsiftError, Result};
use crate::format::{DetectedFormat, InputFormat};
use crate::parser::{collect_records, create_parser};
use crate::parsers::detect_text_dialect;
use crate::parsing::ParseContext;
use crate::parsing::text::truncate_chars;

/// Parses chat exports into cleaned records, with a shared result cache.
pub struct ParsePipeline {
    config: ParserConfig,
    cache: Arc<ContentCache>,
    fingerprinter: Arc<dyn Fingerprinter>,
    cleaner: CleaningPipeline,
}

impl std::fmt::Debug for ParsePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParsePipeline")
            .field("config", &self.config)
            .field("cache", &self.cache.stats())
            .finish_non_exhaustive()
    }
}

impl Default for ParsePipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl ParsePipeline {
    /// Creates a pipeline with default configuration.
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    /// Creates a pipeline with its own cache sized by `config`.
    pub fn with_config(config: ParserConfig) -> Self {
        let cache = Arc::new(ContentCache::new(config.cache_capacity));
        let cleaner = CleaningPipeline::with_filter(ContentFilter::with_system_keywords(
            &config.extra_system_keywords,
        ));
        Self {
            config,
            cache,
            fingerprinter: Arc::new(Sha256Fingerprinter),
            cleaner,
        }
    }

    /// Replaces the cache, e.g. to share one cache between pipelines.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<ContentCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Replaces the content fingerprint function.
    #[must_use]
    pub fn with_fingerprinter(mut self, fingerprinter: impl Fingerprinter + 'static) -> Self {
        self.fingerprinter = Arc::new(fingerprinter);
        self
    }

    /// Process-wide pipeline with default configuration.
    pub fn global() -> &'static ParsePipeline {
        static GLOBAL: OnceLock<ParsePipeline> = OnceLock::new();
        GLOBAL.get_or_init(ParsePipeline::new)
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn cache(&self) -> &Arc<ContentCache> {
        &self.cache
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Parses `content` with a string format selector (`"txt"` or `"xml"`,
    /// case-insensitive).
    ///
    /// An unsupported selector yields a client-error result.
    pub fn parse(&self, content: &str, format: &str, use_cache: bool) -> ParseResult {
        let started = Instant::now();
        match InputFormat::from_str(format) {
            Ok(format) => self.parse_timed(content, format, use_cache, now(), started),
            Err(err) => {
                warn!(format, error = %err, "Rejecting parse request");
                ParseResult::client_error(err.to_string()).with_duration(elapsed(started))
            }
        }
    }

    /// Parses `content` with a typed format selector.
    pub fn parse_with(&self, content: &str, format: InputFormat, use_cache: bool) -> ParseResult {
        self.parse_timed(content, format, use_cache, now(), Instant::now())
    }

    /// Like [`parse_with`](Self::parse_with), with an explicit "now" for the
    /// default timestamp of records that carry none.
    pub fn parse_at(
        &self,
        content: &str,
        format: InputFormat,
        use_cache: bool,
        now: NaiveDateTime,
    ) -> ParseResult {
        self.parse_timed(content, format, use_cache, now, Instant::now())
    }

    fn parse_timed(
        &self,
        content: &str,
        format: InputFormat,
        use_cache: bool,
        now: NaiveDateTime,
        started: Instant,
    ) -> ParseResult {
        let span = info_span!("parse", format = %format, use_cache);
        let _enter = span.enter();

        self.run(content, format, use_cache, now)
            .with_duration(elapsed(started))
    }

    fn run(
        &self,
        content: &str,
        format: InputFormat,
        use_cache: bool,
        now: NaiveDateTime,
    ) -> ParseResult {
        if content.trim().is_empty() {
            let err = ChatsiftError::EmptyContent;
            warn!(error = %err, "Rejecting parse request");
            return ParseResult::client_error(err.to_string());
        }

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.run_cached(content, format, use_cache, now)
        }));

        match outcome {
            Ok(Ok(result)) => result,
            Ok(Err(err)) if err.is_client_error() => {
                warn!(error = %err, "Rejecting parse request");
                ParseResult::client_error(err.to_string())
            }
            Ok(Err(err)) => self.server_error(&err.to_string()),
            Err(payload) => self.server_error(&panic_message(payload.as_ref())),
        }
    }

    /// Cache lookup, parse on a miss, cache store.
    fn run_cached(
        &self,
        content: &str,
        format: InputFormat,
        use_cache: bool,
        now: NaiveDateTime,
    ) -> Result<ParseResult> {
        let key = use_cache.then(|| self.fingerprinter.fingerprint(content));

        if let Some(cached) = key.as_deref().and_then(|key| self.cache.get(key)) {
            info!(records = cached.records().len(), "Served from cache");
            return Ok(ParseResult::clone(&cached));
        }

        let (records, stats) = self.execute(content, format, now)?;
        let result = ParseResult::success(records, stats);

        if let Some(key) = key {
            self.cache.set(key, Arc::new(result.clone()));
        }
        Ok(result)
    }

    /// Detects the dialect, parses and cleans.
    fn execute(
        &self,
        content: &str,
        format: InputFormat,
        now: NaiveDateTime,
    ) -> Result<(Vec<Message>, ParseStats)> {
        let detected = match format {
            InputFormat::Xml => DetectedFormat::Xml,
            InputFormat::Txt => detect_text_dialect(content)?,
        };

        let parser = create_parser(detected);
        let ctx = ParseContext::new(now);
        let raw = collect_records(parser.name(), parser.parse_records(content, &ctx));
        let (records, stats) = self.cleaner.clean_with_stats(raw, detected);
        if stats.filter_breakdown.total() != stats.filtered_count {
            return Err(ChatsiftError::internal("cleaning stage counts do not add up"));
        }

        info!(
            detected_format = %detected,
            total_raw = stats.total_raw,
            total_clean = stats.total_clean,
            accuracy_pct = stats.accuracy_pct,
            "Parse complete"
        );
        Ok((records, stats))
    }

    fn server_error(&self, detail: &str) -> ParseResult {
        let detail = truncate_chars(detail, self.config.error_message_limit);
        error!(error = detail, "Parse failed");
        ParseResult::server_error(format!("parse failed: {detail}"), ParseStats::default())
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn elapsed(started: Instant) -> f64 {
    started.elapsed().as_secs_f64()
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "internal panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ParseStatus;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn fixed_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 2, 3)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap()
    }

    const SCENARIO: &str = "A: hello\nB: hi\n【invalid time】 broken line\nB: [recalled a message]\nC:";

    #[test]
    fn test_scenario() {
        let pipeline = ParsePipeline::new();
        let result = pipeline.parse_at(SCENARIO, InputFormat::Txt, false, fixed_now());

        assert_eq!(result.status(), ParseStatus::Success);
        let pairs: Vec<_> = result
            .records()
            .iter()
            .map(|m| (m.sender(), m.content()))
            .collect();
        assert_eq!(pairs, vec![("A", "hello"), ("B", "hi")]);
        assert_eq!(result.stats().total_raw, 3);
        assert_eq!(result.stats().accuracy_pct, 66.67);
        assert_eq!(result.stats().detected_format, Some(DetectedFormat::TxtNoTime));
        assert!(result.records().iter().all(|m| m.timestamp() == "2025-02-03 18:00:00"));
    }

    #[test]
    fn test_client_errors() {
        let pipeline = ParsePipeline::new();

        let unsupported = pipeline.parse("A: hi", "json", true);
        assert_eq!(unsupported.status(), ParseStatus::ClientError);
        assert!(unsupported.message().contains("json"));

        let empty = pipeline.parse("  \n ", "txt", true);
        assert_eq!(empty.status(), ParseStatus::ClientError);
        assert!(empty.records().is_empty());

        let unknown = pipeline.parse("just words", "txt", true);
        assert_eq!(unknown.status(), ParseStatus::ClientError);

        // Client errors are never cached
        assert_eq!(pipeline.cache_stats().len, 0);
    }

    #[test]
    fn test_duration_is_set_on_failure() {
        let result = ParsePipeline::new().parse("", "txt", true);
        assert!(result.stats().parse_duration_seconds >= 0.0);
    }

    #[test]
    fn test_cache_hit_returns_identical_result() {
        let pipeline = ParsePipeline::new();
        let first = pipeline.parse_at(SCENARIO, InputFormat::Txt, true, fixed_now());
        let second = pipeline.parse_at(SCENARIO, InputFormat::Txt, true, fixed_now());

        assert_eq!(first.records(), second.records());
        assert_eq!(first.message(), second.message());
        let mut a = first.stats().clone();
        let mut b = second.stats().clone();
        a.parse_duration_seconds = 0.0;
        b.parse_duration_seconds = 0.0;
        assert_eq!(a, b);

        let stats = pipeline.cache_stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.len, 1);
    }

    #[test]
    fn test_cache_key_ignores_format() {
        let pipeline = ParsePipeline::new();
        let content = "plain words, no markup";

        let as_xml = pipeline.parse_at(content, InputFormat::Xml, true, fixed_now());
        assert!(as_xml.is_success());
        assert!(as_xml.records().is_empty());

        // Uncached, this text is an unrecognized dialect
        let uncached = pipeline.parse_at(content, InputFormat::Txt, false, fixed_now());
        assert_eq!(uncached.status(), ParseStatus::ClientError);

        let as_txt = pipeline.parse_at(content, InputFormat::Txt, true, fixed_now());
        assert!(as_txt.is_success());
        assert_eq!(as_txt.stats().detected_format, Some(DetectedFormat::Xml));
        assert_eq!(pipeline.cache_stats().hits, 1);
    }

    #[test]
    fn test_cache_bypass() {
        let pipeline = ParsePipeline::new();
        pipeline.parse("A: hi", "txt", false);
        pipeline.parse("A: hi", "txt", false);
        let stats = pipeline.cache_stats();
        assert_eq!(stats.hits + stats.misses + stats.insertions, 0);
    }

    #[test]
    fn test_custom_fingerprinter_is_used() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let pipeline = ParsePipeline::new().with_fingerprinter(move |content: &str| {
            counter.fetch_add(1, Ordering::SeqCst);
            content.trim().to_string()
        });

        pipeline.parse("A: hi", "txt", true);
        pipeline.parse("  A: hi  ", "txt", true);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(pipeline.cache_stats().hits, 1);
    }

    #[test]
    fn test_shared_cache() {
        let cache = Arc::new(ContentCache::new(10));
        let a = ParsePipeline::new().with_cache(Arc::clone(&cache));
        let b = ParsePipeline::new().with_cache(Arc::clone(&cache));

        a.parse("A: hi", "txt", true);
        b.parse("A: hi", "txt", true);
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn test_panic_becomes_server_error() {
        let pipeline = ParsePipeline::new()
            .with_fingerprinter(|_: &str| -> String { panic!("fingerprint backend down") });

        let result = pipeline.parse("A: hi", "txt", true);
        assert_eq!(result.status(), ParseStatus::ServerError);
        assert_eq!(result.message(), "parse failed: fingerprint backend down");
        assert!(result.records().is_empty());
        assert!(result.stats().parse_duration_seconds >= 0.0);

        // The same input without the cache never touches the fingerprinter
        assert!(pipeline.parse("A: hi", "txt", false).is_success());
    }

    #[test]
    fn test_server_error_message_is_truncated() {
        let pipeline = ParsePipeline::new();
        let result = pipeline.server_error(&"x".repeat(200));
        assert_eq!(result.status(), ParseStatus::ServerError);
        assert_eq!(result.message(), format!("parse failed: {}", "x".repeat(50)));
    }

    #[test]
    fn test_malformed_xml_is_empty_success() {
        let result = ParsePipeline::new().parse("<chat><msg>", "xml", false);
        assert_eq!(result.status(), ParseStatus::Success);
        assert!(result.records().is_empty());
        assert_eq!(result.stats().accuracy_pct, 0.0);
        assert_eq!(result.stats().detected_format, Some(DetectedFormat::Xml));
    }

    #[test]
    fn test_extra_keywords_from_config() {
        let pipeline =
            ParsePipeline::with_config(ParserConfig::new().with_extra_system_keyword("拍了拍"));
        let result = pipeline.parse("A: hi\nB: 张三拍了拍你", "txt", false);
        assert_eq!(result.records().len(), 1);
        assert_eq!(result.stats().filter_breakdown.system, 1);
    }

    #[test]
    fn test_global_is_shared() {
        assert!(std::ptr::eq(ParsePipeline::global(), ParsePipeline::global()));
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");
        let payload: Box<dyn Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(payload.as_ref()), "bang");
        let payload: Box<dyn Any + Send> = Box::new(42_u8);
        assert_eq!(panic_message(payload.as_ref()), "internal panic");
    }
}
