//! Command-line interface definition using clap.
//!
//! [`Args`] maps flags onto an [`ExtractConfig`] and an output selection;
//! the binary in `main.rs` does the I/O.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{ExtractConfig, parse_reference_time};
use crate::core::models::OutputConfig;
use crate::core::recency::DEFAULT_MAX_MESSAGES;
use crate::error::Result;
use crate::format::OutputFormat;

/// Extract the recent part of a copy-pasted KakaoTalk transcript
/// as clean context for reply suggestion.
#[derive(Parser, Debug, Clone)]
#[command(name = "talkpack")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    talkpack chat.txt
    talkpack chat.txt --max-messages 50
    pbpaste | talkpack --hours 24 --summary
    talkpack chat.txt --hours 6 --now \"2024-06-02 20:00\" --format json -o recent.json")]
pub struct Args {
    /// Transcript file; reads stdin when absent or "-"
    pub input: Option<PathBuf>,

    /// Keep the last N structured messages (default policy)
    #[arg(short = 'n', long, value_name = "N", conflicts_with = "hours")]
    pub max_messages: Option<usize>,

    /// Keep messages from the trailing H hours instead
    #[arg(long, value_name = "H")]
    pub hours: Option<f64>,

    /// Reference time for --hours, e.g. "2024-06-02 20:00" (default: now)
    #[arg(long, value_name = "TIME")]
    pub now: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Write output to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Include original time labels in structured output
    #[arg(short = 't', long)]
    pub labels: bool,

    /// Include resolved times in structured output
    #[arg(short = 'r', long)]
    pub resolved_times: bool,

    /// Print a conversation summary to stderr
    #[arg(short, long)]
    pub summary: bool,

    /// Verbose logging (overridden by RUST_LOG)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Builds and validates the extraction configuration.
    pub fn extract_config(&self) -> Result<ExtractConfig> {
        let mut config = match (self.max_messages, self.hours) {
            (_, Some(hours)) => ExtractConfig::new().with_window_hours(hours),
            (Some(max), None) => ExtractConfig::new().with_max_messages(max),
            (None, None) => ExtractConfig::new().with_max_messages(DEFAULT_MAX_MESSAGES),
        };

        if let Some(ref now) = self.now {
            config = config.with_now(parse_reference_time(now)?);
        }

        config.validate()?;
        Ok(config)
    }

    /// Output fields requested for structured formats.
    pub fn output_config(&self) -> OutputConfig {
        OutputConfig {
            include_labels: self.labels,
            include_times: self.resolved_times,
        }
    }

    /// Input path, or `None` for stdin.
    pub fn input_path(&self) -> Option<&PathBuf> {
        self.input.as_ref().filter(|p| p.as_os_str() != "-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::recency::RecencyPolicy;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("talkpack").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[]);
        assert!(args.input_path().is_none());
        assert_eq!(args.format, OutputFormat::Text);
        assert_eq!(args.extract_config().unwrap().policy, RecencyPolicy::ByCount(20));
    }

    #[test]
    fn test_hours_selects_window() {
        let args = parse(&["chat.txt", "--hours", "6", "--now", "2024-06-02 20:00"]);
        let config = args.extract_config().unwrap();
        assert_eq!(config.policy, RecencyPolicy::ByWindow(6.0));
        assert!(config.now.is_some());
        assert_eq!(args.input_path(), Some(&PathBuf::from("chat.txt")));
    }

    #[test]
    fn test_stdin_dash() {
        assert!(parse(&["-"]).input_path().is_none());
    }

    #[test]
    fn test_conflicting_policies_rejected() {
        let result = Args::try_parse_from(["talkpack", "-n", "5", "--hours", "3"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_values() {
        assert!(parse(&["-n", "0"]).extract_config().is_err());
        assert!(parse(&["--hours", "0"]).extract_config().is_err());
        assert!(parse(&["--now", "tomorrow"]).extract_config().is_err());
    }

    #[test]
    fn test_format_and_output_flags() {
        let args = parse(&["-f", "jsonl", "-o", "out.jsonl", "-t"]);
        assert_eq!(args.format, OutputFormat::Jsonl);
        assert_eq!(args.output, Some(PathBuf::from("out.jsonl")));
        assert!(args.output_config().include_labels);
        assert!(!args.output_config().include_times);
    }
}
