//! Plain-text output: the shape handed to a reply-suggestion prompt.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::Message;
use crate::Result;
use crate::core::recency::RecencyPolicy;

/// Renders messages one per line.
///
/// Lines read `sender [label]: content` when the original time text is
/// known, otherwise `sender: content`. Empty input gives an empty string.
pub fn to_text(messages: &[Message]) -> String {
    messages
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders messages under a header naming the recency window.
///
/// ```
/// use talkpack::Message;
/// use talkpack::core::output::to_context_block;
/// use talkpack::core::recency::RecencyPolicy;
///
/// let block = to_context_block(&[Message::new("A", "hi")], &RecencyPolicy::last_day());
/// assert_eq!(block, "KakaoTalk conversation (last 24 hours):\n\nA: hi");
/// assert_eq!(to_context_block(&[], &RecencyPolicy::last_day()), "");
/// ```
pub fn to_context_block(messages: &[Message], policy: &RecencyPolicy) -> String {
    if messages.is_empty() {
        return String::new();
    }
    format!(
        "KakaoTalk conversation ({}):\n\n{}",
        policy.describe(),
        to_text(messages)
    )
}

/// Writes [`to_text`] output to a file, with a trailing newline.
pub fn write_text(messages: &[Message], output_path: impl AsRef<Path>) -> Result<()> {
    let mut file = File::create(output_path)?;
    let text = to_text(messages);
    file.write_all(text.as_bytes())?;
    if !text.is_empty() {
        file.write_all(b"\n")?;
    }
    Ok(())
}
