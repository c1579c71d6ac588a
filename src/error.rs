//! Unified error types for talkpack.
//!
//! The parsing core is deliberately infallible: any string goes in, a
//! (possibly empty) message list comes out. [`TalkpackError`] covers the
//! edges around it instead:
//!
//! - reading transcripts from disk and writing output files,
//! - compiling user-supplied noise or URL pattern tables,
//! - validating extraction configuration,
//! - parsing an explicit reference time on the command line.

use std::io;

use thiserror::Error;

/// A specialized [`Result`] type for talkpack operations.
///
/// # Example
///
/// ```rust
/// use talkpack::error::Result;
/// use talkpack::Message;
///
/// fn my_function() -> Result<Vec<Message>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, TalkpackError>;

/// The error type for all fallible talkpack operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TalkpackError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The transcript file doesn't exist
    /// - Permission denied
    /// - Disk is full (when writing output)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A pattern in a noise or URL table failed to compile.
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The offending pattern source
        pattern: String,
        /// The underlying regex error
        #[source]
        source: regex::Error,
    },

    /// Extraction configuration is out of range.
    ///
    /// This occurs when:
    /// - `max_messages` is zero
    /// - the window length is zero, negative or not finite
    #[error("Invalid configuration for {field}: {message}")]
    InvalidConfig {
        /// The configuration field at fault
        field: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// A reference time could not be parsed.
    #[error("Invalid timestamp '{input}'. Expected format: {expected}")]
    InvalidTimestamp {
        /// The string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// An output format is unknown or unavailable in this build.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// Which format slot was at fault (e.g. "output")
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// UTF-8 encoding error.
    ///
    /// Occurs when an in-memory writer buffer is not valid UTF-8.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl From<std::string::FromUtf8Error> for TalkpackError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        TalkpackError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl TalkpackError {
    /// Creates an invalid pattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        TalkpackError::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(field: &'static str, message: impl Into<String>) -> Self {
        TalkpackError::InvalidConfig {
            field,
            message: message.into(),
        }
    }

    /// Creates an invalid timestamp error.
    pub fn invalid_timestamp(input: impl Into<String>) -> Self {
        TalkpackError::InvalidTimestamp {
            input: input.into(),
            expected: "YYYY-MM-DD HH:MM",
        }
    }

    /// Creates an invalid output format error.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        TalkpackError::InvalidFormat {
            format: "output",
            message: message.into(),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, TalkpackError::Io(_))
    }

    /// Returns `true` if this is an invalid pattern error.
    pub fn is_invalid_pattern(&self) -> bool {
        matches!(self, TalkpackError::InvalidPattern { .. })
    }

    /// Returns `true` if this is an invalid configuration error.
    pub fn is_invalid_config(&self) -> bool {
        matches!(self, TalkpackError::InvalidConfig { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let err = TalkpackError::from(io::Error::new(io::ErrorKind::NotFound, "missing"));
        assert!(err.is_io());
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_invalid_config_display() {
        let err = TalkpackError::invalid_config("max_messages", "must be at least 1");
        assert!(err.is_invalid_config());
        assert_eq!(
            err.to_string(),
            "Invalid configuration for max_messages: must be at least 1"
        );
    }

    #[test]
    fn test_invalid_pattern_keeps_source() {
        let source = regex::Regex::new("(").unwrap_err();
        let err = TalkpackError::invalid_pattern("(", source);
        assert!(err.is_invalid_pattern());
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_invalid_timestamp_mentions_expected_format() {
        let err = TalkpackError::invalid_timestamp("yesterday");
        assert!(err.to_string().contains("YYYY-MM-DD HH:MM"));
    }
}
