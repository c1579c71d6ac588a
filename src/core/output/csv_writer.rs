//! CSV output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::Message;
use crate::Result;
use crate::core::models::{OutputConfig, TIME_FORMAT};

/// Writes messages to CSV with a semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: depend on [`OutputConfig`]
///   - Basic: `Sender`, `Content`
///   - With times: `Time`, `Sender`, `Content`
///   - With labels: `Sender`, `Content`, `Label`
/// - Encoding: UTF-8
pub fn write_csv(
    messages: &[Message],
    output_path: impl AsRef<Path>,
    config: &OutputConfig,
) -> Result<()> {
    let file = File::create(output_path)?;
    write_records(file, messages, config)
}

/// Converts messages to a CSV string.
pub fn to_csv(messages: &[Message], config: &OutputConfig) -> Result<String> {
    let mut buf = Vec::new();
    write_records(&mut buf, messages, config)?;
    Ok(String::from_utf8(buf)?)
}

fn write_records<W: Write>(out: W, messages: &[Message], config: &OutputConfig) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(out);

    writer.write_record(build_header(config))?;
    for msg in messages {
        writer.write_record(build_record(msg, config))?;
    }

    writer.flush()?;
    Ok(())
}

fn build_header(config: &OutputConfig) -> Vec<&'static str> {
    let mut header = Vec::new();
    if config.include_times {
        header.push("Time");
    }
    header.push("Sender");
    header.push("Content");
    if config.include_labels {
        header.push("Label");
    }
    header
}

fn build_record(msg: &Message, config: &OutputConfig) -> Vec<String> {
    let mut record = Vec::new();
    if config.include_times {
        record.push(
            msg.resolved_time
                .map(|at| at.format(TIME_FORMAT).to_string())
                .unwrap_or_default(),
        );
    }
    record.push(msg.sender.clone());
    record.push(msg.content.clone());
    if config.include_labels {
        record.push(msg.timestamp_label.clone().unwrap_or_default());
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::NamedTempFile;

    #[test]
    fn test_write_csv_basic() {
        let messages = vec![Message::new("Alice", "Hello"), Message::new("Bob", "Hi there")];

        let temp_file = NamedTempFile::new().unwrap();
        write_csv(&messages, temp_file.path(), &OutputConfig::new()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(content.contains("Sender;Content"));
        assert!(content.contains("Alice;Hello"));
        assert!(content.contains("Bob;Hi there"));
    }

    #[test]
    fn test_to_csv_with_times_and_labels() {
        let at = NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();
        let msg = Message::new("Alice", "Hello")
            .with_timestamp_label("오후 12:30")
            .with_resolved_time(at);

        let csv = to_csv(&[msg, Message::new("Bob", "Hi")], &OutputConfig::all()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Time;Sender;Content;Label");
        assert_eq!(lines[1], "2024-06-15T12:30:00;Alice;Hello;오후 12:30");
        assert_eq!(lines[2], ";Bob;Hi;");
    }

    #[test]
    fn test_to_csv_quotes_delimiter() {
        let csv = to_csv(&[Message::new("A", "a;b")], &OutputConfig::new()).unwrap();
        assert!(csv.contains("A;\"a;b\""));
    }
}
