//! Message type produced by transcript extraction.
//!
//! A [`Message`] is one attributable chat utterance recovered from a
//! copy-pasted transcript line.
//!
//! # Overview
//!
//! A message consists of:
//! - **Required**: `sender` and `content`
//! - **Optional**: `timestamp_label` (the time text as it appeared, e.g. `오후 3:45`)
//!   and `resolved_time` (an absolute wall-clock time, window policy only)
//!
//! Lines that cannot be attributed to anyone are kept with the
//! [`CONTINUATION_SENDER`] sentinel as their sender.
//!
//! # Examples
//!
//! ```
//! use talkpack::Message;
//! use chrono::NaiveDate;
//!
//! let at = NaiveDate::from_ymd_opt(2024, 6, 1)
//!     .unwrap()
//!     .and_hms_opt(15, 45, 0)
//!     .unwrap();
//!
//! let msg = Message::new("김철수", "점심 드셨어요?")
//!     .with_timestamp_label("오후 3:45")
//!     .with_resolved_time(at);
//!
//! assert_eq!(msg.sender(), "김철수");
//! assert_eq!(msg.timestamp_label(), Some("오후 3:45"));
//! assert_eq!(msg.resolved_time(), Some(at));
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Sender recorded for lines that could not be attributed to a participant.
///
/// Such lines are treated as appended to the conversational stream rather
/// than as a new turn, and are never counted as participants.
pub const CONTINUATION_SENDER: &str = "(continuation)";

/// A single chat utterance extracted from a transcript.
///
/// # Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `sender` | `String` | Display name, or [`CONTINUATION_SENDER`] |
/// | `content` | `String` | Trimmed, non-empty message text |
/// | `timestamp_label` | `Option<String>` | Original time text, e.g. `오후 3:45` |
/// | `resolved_time` | `Option<NaiveDateTime>` | Absolute time against the date cursor |
///
/// Times are naive wall-clock values: transcripts carry no zone, and they
/// are compared against a "now" taken in the same local frame.
///
/// # Serialization
///
/// Optional fields are omitted from JSON when `None`.
///
/// ```
/// use talkpack::Message;
///
/// let msg = Message::new("Alice", "Hello!");
/// let json = serde_json::to_string(&msg)?;
/// assert!(!json.contains("resolved_time"));
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Display name of the author, or [`CONTINUATION_SENDER`].
    pub sender: String,

    /// Text content of the message, trimmed of surrounding whitespace.
    pub content: String,

    /// Time text as it appeared in the transcript.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub timestamp_label: Option<String>,

    /// Absolute time, resolved against the most recent date header.
    ///
    /// `None` means "no signal"; recency windows include such messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub resolved_time: Option<NaiveDateTime>,
}

impl Message {
    /// Creates a new message with only sender and content.
    pub fn new(sender: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            content: content.into(),
            timestamp_label: None,
            resolved_time: None,
        }
    }

    /// Creates a continuation message carrying [`CONTINUATION_SENDER`].
    ///
    /// ```
    /// use talkpack::Message;
    ///
    /// let msg = Message::continuation("and one more thing");
    /// assert!(msg.is_continuation());
    /// ```
    pub fn continuation(content: impl Into<String>) -> Self {
        Self::new(CONTINUATION_SENDER, content)
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Builder method to set the original time text.
    #[must_use]
    pub fn with_timestamp_label(mut self, label: impl Into<String>) -> Self {
        self.timestamp_label = Some(label.into());
        self
    }

    /// Builder method to set the resolved absolute time.
    #[must_use]
    pub fn with_resolved_time(mut self, at: NaiveDateTime) -> Self {
        self.resolved_time = Some(at);
        self
    }

    // =========================================================================
    // Accessor methods
    // =========================================================================

    /// Returns the sender name.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Returns the message content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the original time text, if any.
    pub fn timestamp_label(&self) -> Option<&str> {
        self.timestamp_label.as_deref()
    }

    /// Returns the resolved absolute time, if any.
    pub fn resolved_time(&self) -> Option<NaiveDateTime> {
        self.resolved_time
    }

    /// Returns `true` if this message could not be attributed to a sender.
    pub fn is_continuation(&self) -> bool {
        self.sender == CONTINUATION_SENDER
    }

    /// Returns `true` if sender and content both match `other`.
    pub fn same_utterance(&self, other: &Message) -> bool {
        self.sender == other.sender && self.content == other.content
    }
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.timestamp_label {
            Some(label) => write!(f, "{} [{}]: {}", self.sender, label, self.content),
            None => write!(f, "{}: {}", self.sender, self.content),
        }
    }
}
