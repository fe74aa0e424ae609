//! Core cleaning logic for chatsift.
//!
//! This module contains:
//! - [`filter`] - System-notice and junk-content predicates
//! - [`dedup`] - Order-preserving deduplication
//! - [`cleaning`] - The staged cleaning pipeline
//! - [`models`] - Parse results and statistics
//!
//! # Quick Start
//!
//! ```rust
//! use chatsift::core::{CleaningPipeline, ParseStats};
//! use chatsift::format::{DetectedFormat, SourceFormat};
//! use chatsift::Message;
//!
//! let raw = vec![
//!     Message::new("2024-01-15 10:30:00", "Alice", "hello", SourceFormat::Txt),
//!     Message::new("2024-01-15 10:31:00", "Bob", "撤回了一条消息", SourceFormat::Txt),
//! ];
//!
//! let (records, stats): (_, ParseStats) =
//!     CleaningPipeline::new().clean_with_stats(raw, DetectedFormat::TxtWithTime);
//! assert_eq!(records.len(), 1);
//! assert_eq!(stats.accuracy_pct, 50.0);
//! ```

pub mod cleaning;
pub mod dedup;
pub mod filter;
pub mod models;

pub use cleaning::{CleaningOutcome, CleaningPipeline, CleaningStage};
pub use dedup::{Deduplicator, remove_duplicates};
pub use filter::{ContentFilter, JunkContentFilter, JunkKind, SystemMessageFilter, Verdict};
pub use models::{
    EnvelopeData, FilterBreakdown, ParseResult, ParseStats, ParseStatus, ResponseEnvelope,
    accuracy_pct,
};

// Re-export Message from the crate root
pub use crate::Message;
