//! Output configuration shared by the structured writers.

use serde::{Deserialize, Serialize};

/// Controls which optional fields the structured writers emit.
///
/// Plain-text output always carries the original time label; JSON, JSONL
/// and CSV only include metadata that is switched on here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Include the original time text (e.g. `오후 3:45`).
    pub include_labels: bool,
    /// Include the resolved absolute time.
    pub include_times: bool,
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every optional field switched on.
    pub fn all() -> Self {
        Self {
            include_labels: true,
            include_times: true,
        }
    }

    #[must_use]
    pub fn with_labels(mut self) -> Self {
        self.include_labels = true;
        self
    }

    #[must_use]
    pub fn with_times(mut self) -> Self {
        self.include_times = true;
        self
    }
}

/// Resolved-time format used by the structured writers.
pub(crate) const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
