//! Transcript extraction entry points.
//!
//! [`TranscriptParser`] ties the pieces together: a [`LineClassifier`] with
//! its pattern tables, an [`ExtractConfig`] choosing the recency policy, and
//! the formatting helpers that turn the result into prompt context.
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use talkpack::config::ExtractConfig;
//! use talkpack::parser::TranscriptParser;
//!
//! let transcript = "\
//! 2024년 6월 2일 일요일
//! 김철수 오후 2:30 안녕하세요!
//! 이영희님이 들어왔습니다
//! 이영희 오후 2:31 반가워요";
//!
//! let now = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap().and_hms_opt(20, 0, 0).unwrap();
//! let parser = TranscriptParser::with_config(ExtractConfig::last_day().with_now(now));
//!
//! let extraction = parser.extract(transcript);
//! assert_eq!(extraction.messages.len(), 2);
//!
//! let context = parser.format_messages_for_gpt(&extraction.messages);
//! assert_eq!(context, "김철수 [오후 2:30]: 안녕하세요!\n이영희 [오후 2:31]: 반가워요");
//! ```
//!
//! # Free functions
//!
//! For one-off calls with the built-in KakaoTalk tables:
//!
//! ```rust
//! use talkpack::parser::{extract_recent_messages, get_chat_summary};
//!
//! let messages = extract_recent_messages("A 오후 2:30 hi\nB 오후 2:31 hello", 1);
//! assert_eq!(messages[0].content, "hello");
//! assert_eq!(get_chat_summary(&messages).total_messages, 1);
//! ```

use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::Message;
use crate::config::ExtractConfig;
use crate::core::output::{to_context_block, to_text};
use crate::core::recency::{
    DEFAULT_WINDOW_HOURS, Extraction, RecencyPolicy, select_by_count, select_by_window,
};
use crate::core::summary::ChatSummary;
use crate::error::Result;
use crate::parsing::{DateResolver, LineClassifier, parse_message_line};

/// Extracts recent messages from copy-pasted transcripts.
///
/// Holds only read-only state, so one parser can serve any number of
/// calls, including from several threads.
#[derive(Debug, Clone, Default)]
pub struct TranscriptParser {
    config: ExtractConfig,
    classifier: LineClassifier,
}

impl TranscriptParser {
    /// Creates a parser with the default policy (last 20 messages).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with the given configuration.
    pub fn with_config(config: ExtractConfig) -> Self {
        Self {
            config,
            classifier: LineClassifier::kakao(),
        }
    }

    /// Replaces the classifier (and with it the pattern tables).
    #[must_use]
    pub fn with_classifier(mut self, classifier: LineClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// Returns the classifier.
    pub fn classifier(&self) -> &LineClassifier {
        &self.classifier
    }

    /// Runs the configured policy over `text`.
    pub fn extract(&self, text: &str) -> Extraction {
        match self.config.policy {
            RecencyPolicy::ByCount(max) => select_by_count(text, max, &self.classifier),
            RecencyPolicy::ByWindow(hours) => {
                select_by_window(text, hours, self.config.reference_time(), &self.classifier)
            }
        }
    }

    /// Reads a UTF-8 transcript from disk and extracts from it.
    pub fn extract_file(&self, path: impl AsRef<Path>) -> Result<Extraction> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        debug!(path = %path.display(), bytes = text.len(), "read transcript");
        Ok(self.extract(&text))
    }

    /// Count policy: the newest `max_messages` structured messages.
    pub fn extract_recent_messages(&self, text: &str, max_messages: usize) -> Vec<Message> {
        select_by_count(text, max_messages, &self.classifier).into_messages()
    }

    /// Window policy against the configured reference time.
    ///
    /// Uses the configured window when the policy is a window, 24 hours
    /// otherwise.
    pub fn extract_last_day_messages(&self, text: &str) -> Vec<Message> {
        let hours = match self.config.policy {
            RecencyPolicy::ByWindow(hours) => hours,
            RecencyPolicy::ByCount(_) => DEFAULT_WINDOW_HOURS,
        };
        select_by_window(text, hours, self.config.reference_time(), &self.classifier)
            .into_messages()
    }

    /// Parses one candidate line against an optional date cursor.
    pub fn parse_line(&self, line: &str, active_date: Option<NaiveDateTime>) -> Option<Message> {
        parse_message_line(line, active_date, self.classifier.url_patterns())
    }

    /// Returns `true` if the line is noise.
    ///
    /// Under the window policy date headers count as noise too.
    pub fn is_noise(&self, line: &str) -> bool {
        if self.config.policy.is_window() {
            let dates = DateResolver::from_now(self.config.reference_time());
            self.classifier.is_noise_with_dates(line, &dates)
        } else {
            self.classifier.is_noise(line)
        }
    }

    /// Renders messages as the plain-text block handed to a reply generator.
    pub fn format_messages_for_gpt(&self, messages: &[Message]) -> String {
        to_text(messages)
    }

    /// Like [`format_messages_for_gpt`](Self::format_messages_for_gpt), under
    /// a header naming the configured window.
    pub fn context_block(&self, messages: &[Message]) -> String {
        to_context_block(messages, &self.config.policy)
    }

    /// Summarizes a message list.
    pub fn get_chat_summary(&self, messages: &[Message]) -> ChatSummary {
        ChatSummary::from_messages(messages)
    }
}

/// Count policy with the built-in tables.
pub fn extract_recent_messages(text: &str, max_messages: usize) -> Vec<Message> {
    TranscriptParser::new().extract_recent_messages(text, max_messages)
}

/// Trailing 24-hour window against the local wall clock.
pub fn extract_last_day_messages(text: &str) -> Vec<Message> {
    TranscriptParser::with_config(ExtractConfig::last_day()).extract_last_day_messages(text)
}

/// Trailing window of `hours` against an explicit reference time.
pub fn extract_messages_since(text: &str, hours: f64, now: NaiveDateTime) -> Vec<Message> {
    select_by_window(text, hours, now, &LineClassifier::kakao()).into_messages()
}

/// Renders messages one per line.
pub fn format_messages_for_gpt(messages: &[Message]) -> String {
    to_text(messages)
}

/// Summarizes a message list.
pub fn get_chat_summary(messages: &[Message]) -> ChatSummary {
    ChatSummary::from_messages(messages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::PatternTable;
    use chrono::NaiveDate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 2)
            .unwrap()
            .and_hms_opt(20, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_default_policy_is_count() {
        let parser = TranscriptParser::new();
        assert_eq!(parser.config().policy, RecencyPolicy::ByCount(20));
    }

    #[test]
    fn test_extract_dispatches_on_policy() {
        let text = "어제\nA 오후 1:00 old\n오늘\nA 오후 3:00 new";

        let by_count = TranscriptParser::with_config(ExtractConfig::new().with_max_messages(5));
        assert_eq!(by_count.extract(text).messages.len(), 2);

        let by_window =
            TranscriptParser::with_config(ExtractConfig::last_day().with_now(now()));
        let messages = by_window.extract(text).into_messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, "new");
    }

    #[test]
    fn test_extract_last_day_uses_configured_window() {
        let text = "오늘\nA 오전 9:00 morning\nA 오후 7:30 evening";
        let parser =
            TranscriptParser::with_config(ExtractConfig::new().with_window_hours(2.0).with_now(now()));
        let messages = parser.extract_last_day_messages(text);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, "evening");

        let default_window = TranscriptParser::with_config(ExtractConfig::new().with_now(now()));
        assert_eq!(default_window.extract_last_day_messages(text).len(), 2);
    }

    #[test]
    fn test_extract_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "A 오후 2:30 hi").unwrap();
        writeln!(file, "B 오후 2:31 hello").unwrap();

        let extraction = TranscriptParser::new().extract_file(file.path()).unwrap();
        assert_eq!(extraction.messages.len(), 2);
    }

    #[test]
    fn test_extract_file_missing() {
        let err = TranscriptParser::new()
            .extract_file("/definitely/not/here.txt")
            .unwrap_err();
        assert!(err.is_io());
    }

    #[test]
    fn test_is_noise_depends_on_policy() {
        let count = TranscriptParser::new();
        let window = TranscriptParser::with_config(ExtractConfig::last_day().with_now(now()));

        assert!(count.is_noise("철수님이 나갔습니다"));
        assert!(window.is_noise("2024년1월15일"));
        assert!(!window.is_noise("김철수 오후 1:00 안녕하세요"));
    }

    #[test]
    fn test_custom_classifier() {
        let system = PatternTable::new([r"^\[bot\]"]).unwrap();
        let parser = TranscriptParser::new()
            .with_classifier(LineClassifier::new(system, PatternTable::urls()));
        let messages = parser.extract_recent_messages("[bot] 알림 메시지\nA 오후 1:00 hi", 10);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender, "A");
    }

    #[test]
    fn test_parse_line() {
        let parser = TranscriptParser::new();
        let msg = parser.parse_line("A 오후 2:30 hi", Some(now())).unwrap();
        assert_eq!(msg.timestamp_label(), Some("오후 2:30"));
        assert!(parser.parse_line("ㅋ", None).is_none());
    }

    #[test]
    fn test_context_block_names_policy() {
        let parser = TranscriptParser::with_config(ExtractConfig::new().with_max_messages(5));
        let block = parser.context_block(&[Message::new("A", "hi")]);
        assert!(block.contains("last 5 messages"));
    }

    #[test]
    fn test_free_functions() {
        let messages = extract_recent_messages("A 오후 2:30 hi\nB 오후 2:31 hello", 20);
        assert_eq!(format_messages_for_gpt(&messages), "A [오후 2:30]: hi\nB [오후 2:31]: hello");
        assert_eq!(get_chat_summary(&messages).participants, vec!["A", "B"]);

        let recent = extract_messages_since("어제\nA 오후 2:00 hi", 24.0, now());
        assert!(recent.is_empty());
    }
}
