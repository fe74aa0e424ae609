//! Parse results and statistics.

use serde::{Deserialize, Serialize};

use crate::Message;
use crate::format::DetectedFormat;

/// Message attached to every successful result.
pub const SUCCESS_MESSAGE: &str = "parse succeeded";

/// Rounds `value` to `decimals` decimal places.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Share of raw records that survived cleaning, in percent with two
/// decimals. `0.0` when nothing was parsed.
///
/// ```
/// use chatsift::core::models::accuracy_pct;
///
/// assert_eq!(accuracy_pct(2, 3), 66.67);
/// assert_eq!(accuracy_pct(0, 0), 0.0);
/// ```
pub fn accuracy_pct(total_clean: usize, total_raw: usize) -> f64 {
    if total_raw == 0 {
        return 0.0;
    }
    round_to(total_clean as f64 / total_raw as f64 * 100.0, 2)
}

/// How many records each cleaning stage removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterBreakdown {
    pub system: usize,
    pub junk: usize,
    pub duplicate: usize,
    pub invalid: usize,
}

impl FilterBreakdown {
    /// Sum of all stages.
    pub fn total(&self) -> usize {
        self.system + self.junk + self.duplicate + self.invalid
    }
}

/// Per-invocation parsing statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Records produced by the dialect parser, before cleaning.
    pub total_raw: usize,
    /// Records that survived cleaning.
    pub total_clean: usize,
    /// `total_raw - total_clean`.
    pub filtered_count: usize,
    /// `round(total_clean / total_raw * 100, 2)`, `0.0` for no raw records.
    pub accuracy_pct: f64,
    /// Wall-clock seconds spent in the call, three decimals.
    pub parse_duration_seconds: f64,
    /// Dialect that produced the raw records. `None` when parsing never
    /// started.
    pub detected_format: Option<DetectedFormat>,
    pub filter_breakdown: FilterBreakdown,
}

impl ParseStats {
    /// Builds the stats of a completed cleaning run.
    pub fn from_counts(
        total_raw: usize,
        total_clean: usize,
        detected_format: DetectedFormat,
        filter_breakdown: FilterBreakdown,
    ) -> Self {
        Self {
            total_raw,
            total_clean,
            filtered_count: total_raw.saturating_sub(total_clean),
            accuracy_pct: accuracy_pct(total_clean, total_raw),
            parse_duration_seconds: 0.0,
            detected_format: Some(detected_format),
            filter_breakdown,
        }
    }
}

/// Tri-state outcome of a parse call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseStatus {
    Success,
    ClientError,
    ServerError,
}

impl ParseStatus {
    /// Boundary status code (200/400/500).
    pub fn code(&self) -> u16 {
        match self {
            ParseStatus::Success => 200,
            ParseStatus::ClientError => 400,
            ParseStatus::ServerError => 500,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ParseStatus::Success)
    }
}

/// Complete result of one parse call.
///
/// Always well-formed, whatever went wrong: failures are told apart only by
/// [`status`](Self::status) and [`message`](Self::message). This is also the
/// value stored in the content cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseResult {
    status: ParseStatus,
    message: String,
    records: Vec<Message>,
    stats: ParseStats,
}

impl ParseResult {
    pub fn success(records: Vec<Message>, stats: ParseStats) -> Self {
        Self {
            status: ParseStatus::Success,
            message: SUCCESS_MESSAGE.to_string(),
            records,
            stats,
        }
    }

    /// A rejected input. No records, zeroed stats.
    pub fn client_error(message: impl Into<String>) -> Self {
        Self {
            status: ParseStatus::ClientError,
            message: message.into(),
            records: Vec::new(),
            stats: ParseStats::default(),
        }
    }

    /// An internal fault, with whatever stats were known at the time.
    pub fn server_error(message: impl Into<String>, stats: ParseStats) -> Self {
        Self {
            status: ParseStatus::ServerError,
            message: message.into(),
            records: Vec::new(),
            stats,
        }
    }

    /// Returns the result with `parse_duration_seconds` replaced, rounded to
    /// three decimals. Nothing else changes.
    #[must_use]
    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.stats.parse_duration_seconds = round_to(seconds, 3);
        self
    }

    pub fn status(&self) -> ParseStatus {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn records(&self) -> &[Message] {
        &self.records
    }

    pub fn stats(&self) -> &ParseStats {
        &self.stats
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Consumes the result, returning its records.
    pub fn into_records(self) -> Vec<Message> {
        self.records
    }

    /// Borrowed `{code, msg, data: {records, stats}}` view for the service
    /// boundary.
    pub fn to_envelope(&self) -> ResponseEnvelope<'_> {
        ResponseEnvelope {
            code: self.status.code(),
            msg: &self.message,
            data: EnvelopeData {
                records: &self.records,
                stats: &self.stats,
            },
        }
    }

    /// Serializes the result as compact JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ChatsiftError::Json`](crate::error::ChatsiftError::Json) if
    /// serialization fails.
    #[cfg(feature = "json-output")]
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serializes the result as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ChatsiftError::Json`](crate::error::ChatsiftError::Json) if
    /// serialization fails.
    #[cfg(feature = "json-output")]
    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Response shape of the surrounding service.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ResponseEnvelope<'a> {
    pub code: u16,
    pub msg: &'a str,
    pub data: EnvelopeData<'a>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct EnvelopeData<'a> {
    pub records: &'a [Message],
    pub stats: &'a ParseStats,
}
