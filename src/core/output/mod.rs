//! Output writers.
//!
//! - [`to_text`] / [`write_text`] / [`to_context_block`] - plain text, one message per line (always available)
//! - [`write_csv`] / [`to_csv`] - CSV with semicolon delimiter - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - JSON array of messages - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - one JSON object per line - requires `json-output` feature
//!
//! # Choosing a Format
//!
//! | Format | Use Case |
//! |--------|----------|
//! | Text | Pasting into a reply-suggestion prompt |
//! | CSV | Spreadsheets, compact tabular context |
//! | JSON | Structured data, APIs |
//! | JSONL | Pipelines that read one record at a time |
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(feature = "json-output")]
//! # fn main() -> talkpack::Result<()> {
//! use talkpack::core::output::{to_text, write_json};
//! use talkpack::core::models::OutputConfig;
//! use talkpack::Message;
//!
//! let messages = vec![
//!     Message::new("김철수", "점심 드셨어요?").with_timestamp_label("오후 12:30"),
//!     Message::new("이영희", "아직이요"),
//! ];
//!
//! assert_eq!(to_text(&messages), "김철수 [오후 12:30]: 점심 드셨어요?\n이영희: 아직이요");
//! write_json(&messages, "recent.json", &OutputConfig::new().with_labels())?;
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "json-output"))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;
mod text_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};
pub use text_writer::{to_context_block, to_text, write_text};

#[cfg(feature = "json-output")]
use serde::Serialize;

#[cfg(feature = "json-output")]
use crate::Message;
#[cfg(feature = "json-output")]
use crate::core::models::{OutputConfig, TIME_FORMAT};

/// Message shape shared by the JSON and JSONL writers.
#[cfg(feature = "json-output")]
#[derive(Serialize)]
struct Record<'a> {
    sender: &'a str,
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    time_label: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    resolved_time: Option<String>,
}

#[cfg(feature = "json-output")]
impl<'a> Record<'a> {
    fn new(msg: &'a Message, config: &OutputConfig) -> Self {
        Self {
            sender: &msg.sender,
            content: &msg.content,
            time_label: if config.include_labels {
                msg.timestamp_label()
            } else {
                None
            },
            resolved_time: if config.include_times {
                msg.resolved_time
                    .map(|at| at.format(TIME_FORMAT).to_string())
            } else {
                None
            },
        }
    }
}
