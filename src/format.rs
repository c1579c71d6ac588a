//! Output format selection.
//!
//! Library-first format types: usable without the CLI feature.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() -> talkpack::Result<()> {
//! use talkpack::format::{OutputFormat, to_format_string};
//! use talkpack::core::models::OutputConfig;
//! use talkpack::Message;
//!
//! let messages = vec![Message::new("김철수", "안녕하세요")];
//!
//! let text = to_format_string(&messages, OutputFormat::Text, &OutputConfig::new())?;
//! assert_eq!(text, "김철수: 안녕하세요");
//!
//! let format = OutputFormat::from_path("recent.jsonl")?;
//! assert_eq!(format, OutputFormat::Jsonl);
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Message;
use crate::core::models::OutputConfig;
use crate::error::{Result, TalkpackError};

/// Output format for extracted messages.
///
/// - [`Text`](OutputFormat::Text) - one `sender [label]: content` line per message
/// - [`Json`](OutputFormat::Json) - structured array
/// - [`Jsonl`](OutputFormat::Jsonl) - one JSON object per line
/// - [`Csv`](OutputFormat::Csv) - semicolon-delimited table
///
/// ```rust
/// use talkpack::format::OutputFormat;
/// use std::str::FromStr;
///
/// let format = OutputFormat::from_str("jsonl").unwrap();
/// assert_eq!(format, OutputFormat::Jsonl);
/// assert_eq!(format.extension(), "jsonl");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// Plain text, ready to paste into a prompt (default)
    #[default]
    Text,

    /// JSON array of messages
    Json,

    /// JSON Lines - one JSON object per line
    Jsonl,

    /// CSV with semicolon delimiter
    Csv,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
            OutputFormat::Csv => "csv",
        }
    }

    /// Returns all accepted format names.
    pub fn all_names() -> &'static [&'static str] {
        &["text", "txt", "json", "jsonl", "ndjson", "csv"]
    }

    /// Returns all available formats.
    pub fn all() -> &'static [OutputFormat] {
        &[
            OutputFormat::Text,
            OutputFormat::Json,
            OutputFormat::Jsonl,
            OutputFormat::Csv,
        ]
    }

    /// Detects the format from a file extension.
    ///
    /// ```rust
    /// use talkpack::format::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::from_path("out.txt").unwrap(), OutputFormat::Text);
    /// assert!(OutputFormat::from_path("out.xml").is_err());
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "txt" | "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(TalkpackError::invalid_format(format!(
                "Unknown file extension: '.{ext}'. Expected one of: txt, json, jsonl, csv"
            ))),
        }
    }

    /// Cargo feature this format needs, if any.
    pub fn required_feature(&self) -> Option<&'static str> {
        match self {
            OutputFormat::Text => None,
            OutputFormat::Json | OutputFormat::Jsonl => Some("json-output"),
            OutputFormat::Csv => Some("csv-output"),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "Text"),
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Jsonl => write!(f, "JSONL"),
            OutputFormat::Csv => write!(f, "CSV"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

fn feature_missing(format: OutputFormat) -> TalkpackError {
    TalkpackError::invalid_format(format!(
        "Output format {format} requires the '{}' feature to be enabled",
        format.required_feature().unwrap_or("default")
    ))
}

/// Writes messages to a file in the given format.
#[allow(unused_variables)]
pub fn write_to_format(
    messages: &[Message],
    path: impl AsRef<Path>,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<()> {
    match format {
        OutputFormat::Text => crate::core::output::write_text(messages, path),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::write_json(messages, path, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::write_jsonl(messages, path, config),
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::write_csv(messages, path, config),
        #[allow(unreachable_patterns)]
        _ => Err(feature_missing(format)),
    }
}

/// Converts messages to a string in the given format.
#[allow(unused_variables)]
pub fn to_format_string(
    messages: &[Message],
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(crate::core::output::to_text(messages)),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::to_json(messages, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::to_jsonl(messages, config),
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::to_csv(messages, config),
        #[allow(unreachable_patterns)]
        _ => Err(feature_missing(format)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_format_from_str() {
        assert_eq!(OutputFormat::from_str("text").unwrap(), OutputFormat::Text);
        assert_eq!(OutputFormat::from_str("TXT").unwrap(), OutputFormat::Text);
        assert_eq!(OutputFormat::from_str("json").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("ndjson").unwrap(), OutputFormat::Jsonl);
        assert_eq!(OutputFormat::from_str("CSV").unwrap(), OutputFormat::Csv);
        assert!(OutputFormat::from_str("xml").is_err());
    }

    #[test]
    fn test_format_display_and_extension() {
        assert_eq!(OutputFormat::Text.to_string(), "Text");
        assert_eq!(OutputFormat::Jsonl.to_string(), "JSONL");
        assert_eq!(OutputFormat::Text.extension(), "txt");
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(OutputFormat::from_path("a.csv").unwrap(), OutputFormat::Csv);
        assert_eq!(OutputFormat::from_path("/x/y/file.JSON").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_path("a.ndjson").unwrap(), OutputFormat::Jsonl);
        assert!(OutputFormat::from_path("noext").is_err());
    }

    #[test]
    fn test_format_default_is_text() {
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
        assert_eq!(OutputFormat::all().len(), 4);
    }

    #[test]
    fn test_text_always_available() {
        let messages = vec![Message::new("A", "hi"), Message::new("B", "yo")];
        let out = to_format_string(&messages, OutputFormat::Text, &OutputConfig::new()).unwrap();
        assert_eq!(out, "A: hi\nB: yo");
    }

    #[test]
    fn test_format_serde() {
        let json = serde_json::to_string(&OutputFormat::Jsonl).unwrap();
        assert_eq!(json, "\"jsonl\"");
        let parsed: OutputFormat = serde_json::from_str("\"text\"").unwrap();
        assert_eq!(parsed, OutputFormat::Text);
    }
}
