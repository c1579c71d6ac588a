//! JSON output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::Record;
use crate::Message;
use crate::Result;
use crate::core::models::OutputConfig;

/// Writes messages to a JSON file as an array.
///
/// # Format
/// ```json
/// [
///   {"sender": "김철수", "content": "안녕하세요"},
///   {"sender": "이영희", "content": "네 좋아요"}
/// ]
/// ```
pub fn write_json(
    messages: &[Message],
    output_path: impl AsRef<Path>,
    config: &OutputConfig,
) -> Result<()> {
    let json = to_json(messages, config)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts messages to a pretty-printed JSON array.
pub fn to_json(messages: &[Message], config: &OutputConfig) -> Result<String> {
    let records: Vec<Record<'_>> = messages.iter().map(|m| Record::new(m, config)).collect();
    Ok(serde_json::to_string_pretty(&records)?)
}
