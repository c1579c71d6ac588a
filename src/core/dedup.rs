//! Duplicate suppression at acceptance time.
//!
//! Transcript scrapes often repeat lines (scroll overlap, double copies).
//! A candidate is checked against everything already accepted; the first
//! accepted copy always wins.

use std::collections::HashMap;

use chrono::{Duration, NaiveDateTime};

use crate::Message;

/// Two timed copies closer than this are the same utterance.
pub const DEDUP_WINDOW_SECS: i64 = 60;

/// How two messages with the same sender and content are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedupRule {
    /// Same sender and content is always a duplicate.
    Exact,
    /// Same sender and content is a duplicate when the resolved times are
    /// closer than the given span, or when either side has no time.
    WithinSpan(Duration),
}

impl DedupRule {
    /// The rule used by the window policy: a one-minute span.
    pub fn within_minute() -> Self {
        DedupRule::WithinSpan(Duration::seconds(DEDUP_WINDOW_SECS))
    }

    /// Returns `true` if `candidate` duplicates any message in `accepted`.
    pub fn is_duplicate(&self, candidate: &Message, accepted: &[Message]) -> bool {
        accepted
            .iter()
            .any(|existing| self.same(existing, candidate))
    }

    fn same(&self, a: &Message, b: &Message) -> bool {
        a.same_utterance(b) && self.times_collide(a.resolved_time, b.resolved_time)
    }

    fn times_collide(&self, a: Option<NaiveDateTime>, b: Option<NaiveDateTime>) -> bool {
        match (self, a, b) {
            (DedupRule::Exact, _, _) => true,
            (DedupRule::WithinSpan(span), Some(ta), Some(tb)) => {
                ta.signed_duration_since(tb).abs() < *span
            }
            // no time signal on one side: fall back to sender + content
            (DedupRule::WithinSpan(_), _, _) => true,
        }
    }
}

/// Accepted messages indexed by sender and content.
///
/// Gives the same answers as [`DedupRule::is_duplicate`] over the accepted
/// list without scanning all of it.
#[derive(Debug, Clone)]
pub struct SeenMessages {
    rule: DedupRule,
    seen: HashMap<(String, String), Vec<Option<NaiveDateTime>>>,
}

impl SeenMessages {
    pub fn new(rule: DedupRule) -> Self {
        Self {
            rule,
            seen: HashMap::new(),
        }
    }

    /// Records `msg` unless it duplicates an earlier one.
    ///
    /// Returns `true` if the message was new.
    pub fn insert(&mut self, msg: &Message) -> bool {
        let times = self
            .seen
            .entry((msg.sender.clone(), msg.content.clone()))
            .or_default();

        if times
            .iter()
            .any(|&t| self.rule.times_collide(t, msg.resolved_time))
        {
            return false;
        }
        times.push(msg.resolved_time);
        true
    }
}

/// Returns `true` if `candidate` duplicates any already-accepted message.
///
/// # Example
///
/// ```
/// use talkpack::Message;
/// use talkpack::core::dedup::{DedupRule, is_duplicate};
///
/// let accepted = vec![Message::new("A", "ok")];
/// assert!(is_duplicate(&Message::new("A", "ok"), &accepted, DedupRule::Exact));
/// assert!(!is_duplicate(&Message::new("B", "ok"), &accepted, DedupRule::Exact));
/// ```
pub fn is_duplicate(candidate: &Message, accepted: &[Message], rule: DedupRule) -> bool {
    rule.is_duplicate(candidate, accepted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_exact_rule_ignores_time() {
        let accepted = vec![Message::new("A", "ok").with_resolved_time(at(9, 0, 0))];
        let later = Message::new("A", "ok").with_resolved_time(at(18, 0, 0));
        assert!(DedupRule::Exact.is_duplicate(&later, &accepted));
    }

    #[test]
    fn test_different_sender_or_content_is_not_duplicate() {
        let accepted = vec![Message::new("A", "ok")];
        assert!(!DedupRule::Exact.is_duplicate(&Message::new("A", "ok!"), &accepted));
        assert!(!DedupRule::Exact.is_duplicate(&Message::new("B", "ok"), &accepted));
    }

    #[test]
    fn test_span_rule_within_minute() {
        let rule = DedupRule::within_minute();
        let accepted = vec![Message::new("A", "ok").with_resolved_time(at(15, 0, 0))];

        let close = Message::new("A", "ok").with_resolved_time(at(15, 0, 59));
        assert!(rule.is_duplicate(&close, &accepted));

        let boundary = Message::new("A", "ok").with_resolved_time(at(15, 1, 0));
        assert!(!rule.is_duplicate(&boundary, &accepted));

        let earlier = Message::new("A", "ok").with_resolved_time(at(14, 59, 30));
        assert!(rule.is_duplicate(&earlier, &accepted));
    }

    #[test]
    fn test_span_rule_without_time_falls_back_to_exact() {
        let rule = DedupRule::within_minute();
        let accepted = vec![Message::continuation("이어서 하는 말이에요")];
        assert!(rule.is_duplicate(&Message::continuation("이어서 하는 말이에요"), &accepted));
    }

    #[test]
    fn test_seen_messages_matches_rule() {
        let rule = DedupRule::within_minute();
        let mut seen = SeenMessages::new(rule);

        assert!(seen.insert(&Message::new("A", "ok").with_resolved_time(at(15, 0, 0))));
        assert!(!seen.insert(&Message::new("A", "ok").with_resolved_time(at(15, 0, 30))));
        assert!(seen.insert(&Message::new("A", "ok").with_resolved_time(at(16, 0, 0))));
        assert!(seen.insert(&Message::new("B", "ok").with_resolved_time(at(15, 0, 0))));
        assert!(!seen.insert(&Message::new("A", "ok")));

        let mut exact = SeenMessages::new(DedupRule::Exact);
        assert!(exact.insert(&Message::new("A", "ok")));
        assert!(!exact.insert(&Message::new("A", "ok").with_resolved_time(at(9, 0, 0))));
    }

    #[test]
    fn test_empty_accepted_set() {
        assert!(!is_duplicate(&Message::new("A", "ok"), &[], DedupRule::within_minute()));
    }
}
