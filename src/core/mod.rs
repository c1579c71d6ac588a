//! Selection, deduplication, summary and output.
//!
//! This module contains:
//! - [`recency`] - count and window policies over a classified line stream
//! - [`dedup`] - duplicate suppression at acceptance time
//! - [`summary`] - participants, preview and time span of a message list
//! - [`models`] - output configuration
//! - [`output`] - text, CSV, JSON and JSONL writers
//!
//! # Quick Start
//!
//! ```rust
//! use talkpack::core::{RecencyPolicy, select_by_count, summarize, to_text};
//! use talkpack::parsing::LineClassifier;
//!
//! let extraction = select_by_count("A 오후 2:30 hi\nB 오후 2:31 hello", 20, &LineClassifier::kakao());
//! assert_eq!(to_text(&extraction.messages), "A [오후 2:30]: hi\nB [오후 2:31]: hello");
//! assert_eq!(
//!     summarize(&extraction.messages).status_line(&RecencyPolicy::ByCount(20)),
//!     "2 messages (last 20 messages), 2 participants"
//! );
//! ```

pub mod dedup;
pub mod models;
pub mod output;
pub mod recency;
pub mod summary;

pub use dedup::{DedupRule, is_duplicate};
pub use models::OutputConfig;
pub use recency::{
    Extraction, ExtractionStats, RecencyPolicy, select_by_count, select_by_window,
};
pub use summary::{ChatSummary, TimeRange, summarize};

// Re-export Message from the crate root
pub use crate::Message;

pub use output::{to_context_block, to_text, write_text};
#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};
