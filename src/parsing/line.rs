//! Message-line parsing.
//!
//! Candidate lines are matched against a fixed priority list of shapes:
//!
//! 1. `sender 오전|오후 H:MM content`: the canonical timestamped form
//! 2. `sender content`: split on the first whitespace run; sender under 20 chars
//! 3. `sender: content`: colon form; sender under 20 chars
//! 4. anything longer than 5 chars: a continuation of the previous turn
//!
//! Any shape whose content carries a URL discards the whole line.

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

use super::datetime::{Meridiem, resolve_time};
use super::patterns::PatternTable;
use crate::Message;

/// Senders this long or longer are assumed to be prose, not a name.
pub const MAX_SENDER_CHARS: usize = 20;

/// Unattributed lines must be longer than this to count as a continuation.
pub const MIN_CONTINUATION_CHARS: usize = 5;

static TIMESTAMPED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?)\s+(오전|오후)\s+(\d{1,2}:\d{2})\s*(.+)$")
        .expect("valid timestamped line regex")
});

static TWO_PART_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s+(.+)$").expect("valid two-part line regex"));

static COLON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^:]+):\s*(.+)$").expect("valid colon line regex"));

/// Outcome of trying one structural shape.
enum Shape {
    /// The shape produced a message.
    Message(Message),
    /// The shape matched but its content carried a URL: drop the line.
    Discard,
    /// Try the next shape.
    NoMatch,
}

impl Shape {
    fn or_else(self, next: impl FnOnce() -> Shape) -> Shape {
        match self {
            Shape::NoMatch => next(),
            decided => decided,
        }
    }
}

/// Parses a candidate line into a [`Message`].
///
/// `active_date` is the date cursor. When present, the canonical form gets a
/// `resolved_time` on that date; other shapes never do. Pass `None` for the
/// count policy, which has no use for absolute times.
///
/// Returns `None` for lines that yield no usable message.
///
/// # Example
///
/// ```
/// use talkpack::parsing::{PatternTable, parse_message_line};
///
/// let urls = PatternTable::urls();
/// let msg = parse_message_line("김철수 오후 2:30 안녕하세요!", None, &urls).unwrap();
/// assert_eq!(msg.sender(), "김철수");
/// assert_eq!(msg.content(), "안녕하세요!");
/// assert_eq!(msg.timestamp_label(), Some("오후 2:30"));
/// ```
pub fn parse_message_line(
    line: &str,
    active_date: Option<NaiveDateTime>,
    urls: &PatternTable,
) -> Option<Message> {
    let line = line.trim();

    match timestamped(line, active_date, urls)
        .or_else(|| two_part(line, urls))
        .or_else(|| colon(line, urls))
    {
        Shape::Message(msg) => Some(msg),
        Shape::Discard => None,
        Shape::NoMatch => continuation(line, urls),
    }
}

fn timestamped(line: &str, active_date: Option<NaiveDateTime>, urls: &PatternTable) -> Shape {
    let Some(caps) = TIMESTAMPED_RE.captures(line) else {
        return Shape::NoMatch;
    };

    let content = caps[4].trim();
    if content.is_empty() {
        return Shape::NoMatch;
    }
    if urls.is_match(content) {
        return Shape::Discard;
    }

    let marker = &caps[2];
    let time = &caps[3];
    let mut msg =
        Message::new(caps[1].trim(), content).with_timestamp_label(format!("{marker} {time}"));

    if let (Some(base), Some(meridiem)) = (active_date, Meridiem::from_marker(marker)) {
        msg = msg.with_resolved_time(resolve_time(meridiem, time, base));
    }

    Shape::Message(msg)
}

fn two_part(line: &str, urls: &PatternTable) -> Shape {
    match TWO_PART_RE.captures(line) {
        Some(caps) => attributed(&caps[1], &caps[2], urls),
        None => Shape::NoMatch,
    }
}

fn colon(line: &str, urls: &PatternTable) -> Shape {
    match COLON_RE.captures(line) {
        Some(caps) => attributed(&caps[1], &caps[2], urls),
        None => Shape::NoMatch,
    }
}

fn attributed(sender: &str, content: &str, urls: &PatternTable) -> Shape {
    let content = content.trim();
    let sender = sender.trim();
    if sender.chars().count() >= MAX_SENDER_CHARS || sender.is_empty() || content.is_empty() {
        return Shape::NoMatch;
    }
    if urls.is_match(content) {
        return Shape::Discard;
    }
    Shape::Message(Message::new(sender, content))
}

fn continuation(line: &str, urls: &PatternTable) -> Option<Message> {
    if line.chars().count() <= MIN_CONTINUATION_CHARS || urls.is_match(line) {
        return None;
    }
    Some(Message::continuation(line))
}
