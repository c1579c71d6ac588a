//! JSON Lines (JSONL) output writer.
//!
//! One message per line, so downstream tools can read records one at a
//! time.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::Record;
use crate::Message;
use crate::Result;
use crate::core::models::OutputConfig;

/// Writes messages to a JSONL file.
///
/// ```jsonl
/// {"sender":"김철수","content":"안녕하세요"}
/// {"sender":"이영희","content":"네 좋아요"}
/// ```
pub fn write_jsonl(
    messages: &[Message],
    output_path: impl AsRef<Path>,
    config: &OutputConfig,
) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);

    for msg in messages {
        let line = serde_json::to_string(&Record::new(msg, config))?;
        writeln!(writer, "{line}")?;
    }

    writer.flush()?;
    Ok(())
}

/// Converts messages to a JSONL string, each line newline-terminated.
pub fn to_jsonl(messages: &[Message], config: &OutputConfig) -> Result<String> {
    let mut out = String::new();
    for msg in messages {
        out.push_str(&serde_json::to_string(&Record::new(msg, config))?);
        out.push('\n');
    }
    Ok(out)
}
