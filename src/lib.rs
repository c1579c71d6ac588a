//! # Talkpack
//!
//! Turns copy-pasted KakaoTalk transcripts into a clean, bounded list of
//! recent messages, ready to hand to a reply-suggestion prompt.
//!
//! ## Overview
//!
//! Scraped chat text is noisy: join/leave notices, read counters, media
//! notices, date separators, links and wrapped lines all arrive mixed in
//! with the conversation. Talkpack:
//!
//! 1. drops noise lines using replaceable pattern tables,
//! 2. parses the rest into [`Message`]s (`sender 오후 3:45 content`, `sender content`,
//!    `sender: content`, or an unattributed continuation),
//! 3. keeps only the recent ones, by message count or by a trailing time window,
//! 4. suppresses duplicates,
//! 5. renders the result as text (or JSON/JSONL/CSV) and summarizes it.
//!
//! The core never fails: any string goes in, a possibly empty list comes out.
//!
//! ## Quick Start
//!
//! ```rust
//! use talkpack::prelude::*;
//!
//! let transcript = "\
//! A 오후 2:30 hi
//! B 오후 2:31 hello
//! A님이 들어왔습니다
//! A 오후 2:32 bye";
//!
//! let parser = TranscriptParser::with_config(ExtractConfig::new().with_max_messages(2));
//! let messages = parser.extract(transcript).into_messages();
//!
//! assert_eq!(
//!     parser.format_messages_for_gpt(&messages),
//!     "B [오후 2:31]: hello\nA [오후 2:32]: bye"
//! );
//! ```
//!
//! ## Time windows
//!
//! The window policy follows date separators (`2024년 1월 15일`, `6월 1일`,
//! `오늘`, `어제`, `그저께`) and resolves 12-hour times against them. "Now"
//! is injectable:
//!
//! ```rust
//! use chrono::NaiveDate;
//! use talkpack::prelude::*;
//!
//! let now = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap().and_hms_opt(20, 0, 0).unwrap();
//! let parser = TranscriptParser::with_config(ExtractConfig::last_day().with_now(now));
//!
//! assert!(parser.extract("어제\nA 오후 2:00 hi").is_empty());
//! assert_eq!(parser.extract("오늘\nA 오후 2:00 hi").messages.len(), 1);
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`TranscriptParser`](parser::TranscriptParser) and one-shot free functions
//! - [`config`] - [`ExtractConfig`](config::ExtractConfig)
//! - [`parsing`] - classifier, message-line shapes, date headers, pattern tables
//! - [`core`] - recency policies, dedup, summary, output writers
//! - [`format`] - [`OutputFormat`](format::OutputFormat) selection
//! - [`error`] - [`TalkpackError`], [`Result`]
//! - [`prelude`] - convenient re-exports

pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod message;
pub mod parser;
pub mod parsing;

#[cfg(feature = "cli")]
pub mod cli;

// Re-export the main types at the crate root for convenience
pub use error::{Result, TalkpackError};
pub use message::{CONTINUATION_SENDER, Message};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use talkpack::prelude::*;
/// ```
pub mod prelude {
    pub use crate::Message;
    pub use crate::error::{Result, TalkpackError};

    pub use crate::config::ExtractConfig;
    pub use crate::parser::{
        TranscriptParser, extract_last_day_messages, extract_recent_messages,
        format_messages_for_gpt, get_chat_summary,
    };

    pub use crate::core::models::OutputConfig;
    pub use crate::core::recency::{Extraction, ExtractionStats, RecencyPolicy};
    pub use crate::core::summary::ChatSummary;
    pub use crate::format::{OutputFormat, to_format_string, write_to_format};
    pub use crate::parsing::{LineClassifier, PatternTable};
}
