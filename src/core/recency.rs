//! Recency selection: which parsed messages are recent enough to keep.
//!
//! Two interchangeable policies consume the same line stream:
//!
//! | Policy | Scan | Keeps |
//! |--------|------|-------|
//! | [`RecencyPolicy::ByCount`] | last line backwards | the newest N structured messages |
//! | [`RecencyPolicy::ByWindow`] | first line forwards | everything within the trailing window |
//!
//! The window policy tracks the date cursor while scanning and resolves
//! every timestamped line to an absolute time. Messages without a resolved
//! time are always inside the window.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use talkpack::core::recency::{select_by_count, select_by_window};
//! use talkpack::parsing::LineClassifier;
//!
//! let classifier = LineClassifier::kakao();
//! let text = "A 오후 2:30 hi\nB 오후 2:31 hello\nA님이 들어왔습니다\nA 오후 2:32 bye";
//!
//! let recent = select_by_count(text, 2, &classifier);
//! assert_eq!(recent.messages.len(), 2);
//! assert_eq!(recent.stats.noise_filtered, 1);
//!
//! let now = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap().and_hms_opt(20, 0, 0).unwrap();
//! let today = select_by_window(&format!("오늘\n{text}"), 24.0, now, &classifier);
//! assert_eq!(today.messages.len(), 3);
//! ```

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use super::dedup::{DedupRule, SeenMessages};
use crate::Message;
use crate::parsing::{DateResolver, LineClassifier, LineKind, parse_message_line};

/// How many messages the count policy keeps unless told otherwise.
pub const DEFAULT_MAX_MESSAGES: usize = 20;

/// How many hours the window policy spans unless told otherwise.
pub const DEFAULT_WINDOW_HOURS: f64 = 24.0;

/// Bound applied to decide which messages are recent enough.
///
/// # Example
///
/// ```
/// use talkpack::core::recency::RecencyPolicy;
///
/// assert_eq!(RecencyPolicy::default(), RecencyPolicy::ByCount(20));
/// assert_eq!(RecencyPolicy::last_day().describe(), "last 24 hours");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecencyPolicy {
    /// Keep the last N structured messages.
    ByCount(usize),
    /// Keep messages timestamped within the trailing N hours.
    ByWindow(f64),
}

impl Default for RecencyPolicy {
    fn default() -> Self {
        RecencyPolicy::ByCount(DEFAULT_MAX_MESSAGES)
    }
}

impl RecencyPolicy {
    /// The trailing 24-hour window.
    pub fn last_day() -> Self {
        RecencyPolicy::ByWindow(DEFAULT_WINDOW_HOURS)
    }

    /// Human-readable description, e.g. "last 20 messages".
    pub fn describe(&self) -> String {
        match self {
            RecencyPolicy::ByCount(1) => "last message".to_string(),
            RecencyPolicy::ByCount(n) => format!("last {n} messages"),
            RecencyPolicy::ByWindow(h) if (*h - 1.0).abs() < f64::EPSILON => "last hour".to_string(),
            RecencyPolicy::ByWindow(h) => format!("last {h} hours"),
        }
    }

    /// Duplicate rule paired with this policy.
    pub fn dedup_rule(&self) -> DedupRule {
        match self {
            RecencyPolicy::ByCount(_) => DedupRule::Exact,
            RecencyPolicy::ByWindow(_) => DedupRule::within_minute(),
        }
    }

    /// Returns `true` for the time-window policy.
    pub fn is_window(&self) -> bool {
        matches!(self, RecencyPolicy::ByWindow(_))
    }
}

impl std::fmt::Display for RecencyPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Counters reported by one extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Lines examined (the count policy may stop early).
    pub lines_seen: usize,
    /// Lines dropped as noise (short, URL, system event).
    pub noise_filtered: usize,
    /// Date-section headers that moved the cursor.
    pub date_sections: usize,
    /// Candidate lines that produced no message.
    pub unparsed: usize,
    /// Messages resolved outside the window.
    pub out_of_window: usize,
    /// Messages suppressed as duplicates.
    pub duplicates: usize,
    /// Messages retained.
    pub retained: usize,
}

/// Messages kept by an extraction, in chronological order, plus counters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    /// Retained messages, oldest first.
    pub messages: Vec<Message>,
    /// What happened along the way.
    pub stats: ExtractionStats,
}

impl Extraction {
    /// Returns `true` if nothing was retained.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Consumes the extraction, returning the messages.
    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }
}

/// Converts a window length in hours to a span, saturating on overflow.
///
/// Non-finite or non-positive lengths give a zero span.
pub fn window_span(hours: f64) -> Duration {
    if !hours.is_finite() || hours <= 0.0 {
        return Duration::zero();
    }
    let millis = (hours * 3_600_000.0).round();
    if millis >= i64::MAX as f64 {
        return Duration::MAX;
    }
    Duration::try_milliseconds(millis as i64).unwrap_or(Duration::MAX)
}

/// Count policy: the newest `max_messages` structured messages.
///
/// Scans from the last line backwards, skipping noise, until enough messages
/// are accepted; the result is then returned oldest first.
pub fn select_by_count(text: &str, max_messages: usize, classifier: &LineClassifier) -> Extraction {
    let mut seen = SeenMessages::new(DedupRule::Exact);
    let mut stats = ExtractionStats::default();
    let mut accepted: Vec<Message> = Vec::new();

    for line in text.lines().rev() {
        if accepted.len() >= max_messages {
            break;
        }
        stats.lines_seen += 1;

        if let Some(kind) = classifier.noise_kind(line) {
            stats.noise_filtered += 1;
            trace!(
                ?kind,
                pattern = classifier.matching_pattern(line).unwrap_or("-"),
                line,
                "noise line"
            );
            continue;
        }

        let Some(msg) = parse_message_line(line, None, classifier.url_patterns()) else {
            stats.unparsed += 1;
            continue;
        };

        if !seen.insert(&msg) {
            stats.duplicates += 1;
            continue;
        }
        accepted.push(msg);
    }

    accepted.reverse();
    stats.retained = accepted.len();

    info!(
        lines = stats.lines_seen,
        noise = stats.noise_filtered,
        duplicates = stats.duplicates,
        retained = stats.retained,
        max_messages,
        "count extraction complete"
    );

    Extraction {
        messages: accepted,
        stats,
    }
}

/// Window policy: everything within `hours` before `now`.
///
/// Scans forwards, moving the date cursor at each date header. The cursor
/// starts at `now`, so timestamped lines before the first header resolve to
/// today. Retained messages are sorted by resolved time; untimed messages
/// go last, in input order.
pub fn select_by_window(
    text: &str,
    hours: f64,
    now: NaiveDateTime,
    classifier: &LineClassifier,
) -> Extraction {
    let mut seen = SeenMessages::new(DedupRule::within_minute());
    let span = window_span(hours);
    let dates = DateResolver::from_now(now);
    let mut cursor = now;
    let mut stats = ExtractionStats::default();
    let mut accepted: Vec<Message> = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        stats.lines_seen += 1;

        match classifier.classify(line, &dates) {
            LineKind::DateHeader(at) => {
                cursor = at;
                stats.date_sections += 1;
                debug!(line = idx + 1, date = %at.date(), "date section");
                continue;
            }
            LineKind::Noise(kind) => {
                stats.noise_filtered += 1;
                trace!(
                    ?kind,
                    pattern = classifier.matching_pattern(line).unwrap_or("-"),
                    line,
                    "noise line"
                );
                continue;
            }
            LineKind::Candidate => {}
        }

        let Some(msg) = parse_message_line(line, Some(cursor), classifier.url_patterns()) else {
            stats.unparsed += 1;
            continue;
        };

        if !within_window(&msg, now, span) {
            stats.out_of_window += 1;
            continue;
        }

        if !seen.insert(&msg) {
            stats.duplicates += 1;
            continue;
        }
        accepted.push(msg);
    }

    accepted.sort_by_key(|m| (m.resolved_time.is_none(), m.resolved_time));
    stats.retained = accepted.len();

    info!(
        reference = %now.format("%Y-%m-%d %H:%M"),
        lines = stats.lines_seen,
        date_sections = stats.date_sections,
        noise = stats.noise_filtered,
        out_of_window = stats.out_of_window,
        duplicates = stats.duplicates,
        retained = stats.retained,
        hours,
        "window extraction complete"
    );

    Extraction {
        messages: accepted,
        stats,
    }
}

/// Returns `true` if `msg` is no older than `span` before `now`.
///
/// Messages without a resolved time are always inside.
pub fn within_window(msg: &Message, now: NaiveDateTime, span: Duration) -> bool {
    match msg.resolved_time {
        Some(at) => now.signed_duration_since(at) <= span,
        None => true,
    }
}
