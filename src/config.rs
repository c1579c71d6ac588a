//! Extraction configuration.
//!
//! Plain data, no CLI framework dependencies. The CLI builds one of these
//! from its flags; library users build it directly.
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use talkpack::config::ExtractConfig;
//!
//! let now = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap().and_hms_opt(20, 0, 0).unwrap();
//! let config = ExtractConfig::new()
//!     .with_window_hours(12.0)
//!     .with_now(now);
//!
//! assert!(config.validate().is_ok());
//! assert_eq!(config.reference_time(), now);
//! ```

use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::core::recency::RecencyPolicy;
use crate::error::{Result, TalkpackError};

/// Accepted layouts for an explicit reference time.
pub const REFERENCE_TIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

/// Configuration for one extraction.
///
/// # Fields
///
/// | Field | Default | Meaning |
/// |-------|---------|---------|
/// | `policy` | last 20 messages | which messages count as recent |
/// | `now` | `None` (wall clock) | reference time for the window policy |
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Recency policy.
    #[serde(default)]
    pub policy: RecencyPolicy,

    /// Fixed "now"; the local wall clock is read when `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub now: Option<NaiveDateTime>,
}

impl ExtractConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// The trailing 24-hour window.
    pub fn last_day() -> Self {
        Self::new().with_policy(RecencyPolicy::last_day())
    }

    /// Sets the recency policy.
    #[must_use]
    pub fn with_policy(mut self, policy: RecencyPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Keeps the last `max` structured messages.
    #[must_use]
    pub fn with_max_messages(self, max: usize) -> Self {
        self.with_policy(RecencyPolicy::ByCount(max))
    }

    /// Keeps messages within the trailing `hours`.
    #[must_use]
    pub fn with_window_hours(self, hours: f64) -> Self {
        self.with_policy(RecencyPolicy::ByWindow(hours))
    }

    /// Pins the reference time.
    #[must_use]
    pub fn with_now(mut self, now: NaiveDateTime) -> Self {
        self.now = Some(now);
        self
    }

    /// The pinned reference time, or the local wall clock to the second.
    pub fn reference_time(&self) -> NaiveDateTime {
        self.now.unwrap_or_else(|| {
            let now = Local::now().naive_local();
            now.with_nanosecond(0).unwrap_or(now)
        })
    }

    /// Checks that the policy bounds are usable.
    ///
    /// ```rust
    /// use talkpack::config::ExtractConfig;
    ///
    /// assert!(ExtractConfig::new().with_max_messages(0).validate().is_err());
    /// assert!(ExtractConfig::new().with_window_hours(-1.0).validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        match self.policy {
            RecencyPolicy::ByCount(0) => Err(TalkpackError::invalid_config(
                "max_messages",
                "must be at least 1",
            )),
            RecencyPolicy::ByWindow(h) if !h.is_finite() || h <= 0.0 => {
                Err(TalkpackError::invalid_config(
                    "window_hours",
                    format!("must be a positive number of hours, got {h}"),
                ))
            }
            _ => Ok(()),
        }
    }
}

/// Parses an explicit reference time such as `2024-06-02 20:00`.
pub fn parse_reference_time(input: &str) -> Result<NaiveDateTime> {
    let trimmed = input.trim();
    REFERENCE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| TalkpackError::invalid_timestamp(input))
}
