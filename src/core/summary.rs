//! Conversation summaries for display next to the context block.

use std::collections::HashSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::recency::RecencyPolicy;
use crate::Message;

/// Preview text used when there are no messages.
pub const EMPTY_PREVIEW: &str = "no conversation";

/// Time-range text used when no message carries a resolved time.
pub const NO_TIME_INFO: &str = "no time information";

/// How many trailing messages go into the preview.
pub const PREVIEW_MESSAGES: usize = 3;

/// Preview content is cut to this many characters.
pub const PREVIEW_CHARS: usize = 30;

/// Earliest and latest resolved times among a set of messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub earliest: NaiveDateTime,
    pub latest: NaiveDateTime,
}

impl TimeRange {
    /// Computes the range over messages that have a resolved time.
    pub fn of(messages: &[Message]) -> Option<Self> {
        let mut times = messages.iter().filter_map(|m| m.resolved_time);
        let first = times.next()?;
        let (earliest, latest) = times.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t)));
        Some(Self { earliest, latest })
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ~ {}",
            self.earliest.format("%H:%M"),
            self.latest.format("%H:%M")
        )
    }
}

/// Overview of an extracted conversation.
///
/// # Example
///
/// ```
/// use talkpack::Message;
/// use talkpack::core::summary::ChatSummary;
///
/// let messages = vec![
///     Message::new("김철수", "점심 뭐 먹을까요?"),
///     Message::new("이영희", "김치찌개 좋아요"),
/// ];
/// let summary = ChatSummary::from_messages(&messages);
///
/// assert_eq!(summary.total_messages, 2);
/// assert_eq!(summary.participants, vec!["김철수", "이영희"]);
/// assert_eq!(summary.last_sender.as_deref(), Some("이영희"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSummary {
    /// Number of messages summarized.
    pub total_messages: usize,
    /// Distinct named senders in order of first appearance.
    pub participants: Vec<String>,
    /// Sender of the final message, if any.
    pub last_sender: Option<String>,
    /// Up to three trailing messages as `sender: content` lines.
    pub preview: String,
    /// Span of resolved times, when any message has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub time_range: Option<TimeRange>,
}

impl ChatSummary {
    /// Summarizes a message list.
    pub fn from_messages(messages: &[Message]) -> Self {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut participants = Vec::new();
        for msg in messages {
            if !msg.is_continuation() && seen.insert(msg.sender()) {
                participants.push(msg.sender.clone());
            }
        }

        Self {
            total_messages: messages.len(),
            participants,
            last_sender: messages.last().map(|m| m.sender.clone()),
            preview: preview(messages),
            time_range: TimeRange::of(messages),
        }
    }

    /// Returns `true` if no messages were summarized.
    pub fn is_empty(&self) -> bool {
        self.total_messages == 0
    }

    /// Time range as display text, e.g. `14:00 ~ 15:30`.
    pub fn time_range_label(&self) -> String {
        self.time_range
            .map(|r| r.to_string())
            .unwrap_or_else(|| NO_TIME_INFO.to_string())
    }

    /// Participant names joined by commas, listing at most `limit`.
    ///
    /// ```
    /// use talkpack::Message;
    /// use talkpack::core::summary::ChatSummary;
    ///
    /// let messages: Vec<_> = ["A", "B", "C", "D"]
    ///     .iter()
    ///     .map(|s| Message::new(*s, "hello"))
    ///     .collect();
    /// let summary = ChatSummary::from_messages(&messages);
    /// assert_eq!(summary.participant_label(2), "A, B +2 more");
    /// assert_eq!(summary.participant_label(10), "A, B, C, D");
    /// ```
    pub fn participant_label(&self, limit: usize) -> String {
        let shown: Vec<&str> = self
            .participants
            .iter()
            .take(limit)
            .map(String::as_str)
            .collect();
        let rest = self.participants.len().saturating_sub(limit);

        let mut label = shown.join(", ");
        if rest > 0 {
            label.push_str(&format!(" +{rest} more"));
        }
        label
    }

    /// One-line status, e.g. `5 messages (last 24 hours), 2 participants`.
    pub fn status_line(&self, policy: &RecencyPolicy) -> String {
        format!(
            "{} messages ({}), {} participants",
            self.total_messages,
            policy.describe(),
            self.participants.len()
        )
    }
}

/// Summarizes a message list.
pub fn summarize(messages: &[Message]) -> ChatSummary {
    ChatSummary::from_messages(messages)
}

fn preview(messages: &[Message]) -> String {
    if messages.is_empty() {
        return EMPTY_PREVIEW.to_string();
    }

    let start = messages.len().saturating_sub(PREVIEW_MESSAGES);
    messages[start..]
        .iter()
        .map(|m| format!("{}: {}", m.sender, truncate(&m.content)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn truncate(content: &str) -> String {
    match content.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => content.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 2)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_empty_summary() {
        let summary = summarize(&[]);
        assert!(summary.is_empty());
        assert!(summary.participants.is_empty());
        assert!(summary.last_sender.is_none());
        assert_eq!(summary.preview, EMPTY_PREVIEW);
        assert_eq!(summary.time_range_label(), NO_TIME_INFO);
    }

    #[test]
    fn test_participants_skip_continuations() {
        let messages = vec![
            Message::new("A", "hi"),
            Message::continuation("more words here"),
            Message::new("B", "hello"),
            Message::new("A", "again"),
        ];
        let summary = summarize(&messages);
        assert_eq!(summary.participants, vec!["A", "B"]);
        assert_eq!(summary.last_sender.as_deref(), Some("A"));
    }

    #[test]
    fn test_last_sender_may_be_continuation() {
        let messages = vec![Message::new("A", "hi"), Message::continuation("trailing words")];
        let summary = summarize(&messages);
        assert_eq!(summary.last_sender.as_deref(), Some(crate::CONTINUATION_SENDER));
    }

    #[test]
    fn test_preview_keeps_last_three_and_truncates() {
        let long = "가".repeat(40);
        let messages = vec![
            Message::new("A", "one"),
            Message::new("B", "two"),
            Message::new("C", "three"),
            Message::new("D", long.clone()),
        ];
        let summary = summarize(&messages);
        let lines: Vec<&str> = summary.preview.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "B: two");
        assert_eq!(lines[2], format!("D: {}...", "가".repeat(30)));
    }

    #[test]
    fn test_preview_exactly_thirty_chars_untouched() {
        let text = "a".repeat(30);
        let summary = summarize(&[Message::new("A", text.clone())]);
        assert_eq!(summary.preview, format!("A: {text}"));
    }

    #[test]
    fn test_time_range() {
        let messages = vec![
            Message::new("A", "x").with_resolved_time(at(15, 30)),
            Message::new("B", "y"),
            Message::new("A", "z").with_resolved_time(at(14, 0)),
        ];
        let summary = summarize(&messages);
        assert_eq!(summary.time_range_label(), "14:00 ~ 15:30");
    }

    #[test]
    fn test_status_line() {
        let messages = vec![Message::new("A", "x"), Message::new("B", "y")];
        let summary = summarize(&messages);
        assert_eq!(
            summary.status_line(&RecencyPolicy::last_day()),
            "2 messages (last 24 hours), 2 participants"
        );
    }

    #[test]
    fn test_participant_label_empty() {
        assert_eq!(summarize(&[]).participant_label(3), "");
    }
}
