//! The cleaning pipeline: named stages applied in a fixed order.
//!
//! ```text
//! raw records ─► SystemFilter ─► JunkFilter ─► Dedup ─► ValidityCheck ─► clean records
//! ```
//!
//! The order is part of the contract: a record is only checked for junk
//! after it passed the system filter, and only deduplicated once both
//! content filters accepted it. [`FilterBreakdown`] reports how many records
//! each stage removed.

use std::fmt;

use tracing::debug;

use super::dedup::remove_duplicates;
use super::filter::{ContentFilter, Verdict};
use super::models::{FilterBreakdown, ParseStats};
use crate::Message;
use crate::format::DetectedFormat;

/// One stage of the cleaning pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleaningStage {
    /// Drops platform notices.
    SystemFilter,
    /// Drops empty content and lone media/emoji tokens.
    JunkFilter,
    /// Drops repeated (timestamp, sender, content) triples.
    Dedup,
    /// Drops anything incomplete. Never fires for well-formed parser output.
    ValidityCheck,
}

impl CleaningStage {
    /// Execution order.
    pub const ORDER: [CleaningStage; 4] = [
        CleaningStage::SystemFilter,
        CleaningStage::JunkFilter,
        CleaningStage::Dedup,
        CleaningStage::ValidityCheck,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CleaningStage::SystemFilter => "system_filter",
            CleaningStage::JunkFilter => "junk_filter",
            CleaningStage::Dedup => "dedup",
            CleaningStage::ValidityCheck => "validity_check",
        }
    }
}

impl fmt::Display for CleaningStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Records that survived cleaning, plus per-stage removal counts.
#[derive(Debug, Clone, PartialEq)]
pub struct CleaningOutcome {
    pub records: Vec<Message>,
    pub breakdown: FilterBreakdown,
}

/// Runs [`CleaningStage::ORDER`] over raw records.
#[derive(Debug, Clone, Default)]
pub struct CleaningPipeline {
    filter: ContentFilter,
}

impl CleaningPipeline {
    /// Creates a pipeline with the built-in system patterns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a pipeline with a custom content filter.
    pub fn with_filter(filter: ContentFilter) -> Self {
        Self { filter }
    }

    /// Applies every stage in order.
    pub fn clean(&self, raw: Vec<Message>) -> CleaningOutcome {
        let mut breakdown = FilterBreakdown::default();
        let mut records = raw;

        for stage in CleaningStage::ORDER {
            let before = records.len();
            records = self.run_stage(stage, records);
            let removed = before - records.len();

            match stage {
                CleaningStage::SystemFilter => breakdown.system = removed,
                CleaningStage::JunkFilter => breakdown.junk = removed,
                CleaningStage::Dedup => breakdown.duplicate = removed,
                CleaningStage::ValidityCheck => breakdown.invalid = removed,
            }
            if removed > 0 {
                debug!(stage = %stage, removed, "Cleaning stage removed records");
            }
        }

        CleaningOutcome { records, breakdown }
    }

    /// Cleans raw records and computes the stats of the run.
    ///
    /// `parse_duration_seconds` is left at zero for the caller to fill in.
    pub fn clean_with_stats(
        &self,
        raw: Vec<Message>,
        detected_format: DetectedFormat,
    ) -> (Vec<Message>, ParseStats) {
        let total_raw = raw.len();
        let CleaningOutcome { records, breakdown } = self.clean(raw);
        let stats = ParseStats::from_counts(total_raw, records.len(), detected_format, breakdown);
        (records, stats)
    }

    fn run_stage(&self, stage: CleaningStage, records: Vec<Message>) -> Vec<Message> {
        match stage {
            CleaningStage::SystemFilter => records
                .into_iter()
                .filter(|m| match self.filter.verdict(m.content()) {
                    Verdict::System => {
                        debug!(sender = m.sender(), content = m.content(), "Dropping system message");
                        false
                    }
                    _ => true,
                })
                .collect(),
            CleaningStage::JunkFilter => records
                .into_iter()
                .filter(|m| match self.filter.verdict(m.content()) {
                    Verdict::Junk(kind) => {
                        debug!(sender = m.sender(), ?kind, "Dropping junk record");
                        false
                    }
                    _ => true,
                })
                .collect(),
            CleaningStage::Dedup => remove_duplicates(records),
            CleaningStage::ValidityCheck => records.into_iter().filter(Message::is_complete).collect(),
        }
    }
}
