//! JSON Lines (JSONL) output writer.
//!
//! One message object per line, which suits streaming consumers and
//! line-oriented tools.

use std::fs::File;
use std::io::{BufWriter, Write};

use super::OutputMessage;
use crate::core::models::OutputConfig;
use crate::error::Result;
use crate::message::ParsedMessage;

/// Writes messages to JSONL (JSON Lines) format.
///
/// Each line is a valid JSON object:
/// ```jsonl
/// {"sender":"Alice","content":"Hello","direction":"sent"}
/// {"sender":"Bob","content":"Hi","direction":"received"}
/// ```
pub fn write_jsonl(messages: &[ParsedMessage], output_path: &str, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    write_lines(&mut writer, messages, config)?;
    writer.flush()?;
    Ok(())
}

/// Converts messages to a JSONL string.
pub fn to_jsonl(messages: &[ParsedMessage], config: &OutputConfig) -> Result<String> {
    let mut buffer = Vec::new();
    write_lines(&mut buffer, messages, config)?;
    Ok(String::from_utf8(buffer)?)
}

fn write_lines<W: Write>(writer: &mut W, messages: &[ParsedMessage], config: &OutputConfig) -> Result<()> {
    for msg in messages {
        let line = serde_json::to_string(&OutputMessage::project(msg, config))?;
        writeln!(writer, "{line}")?;
    }
    Ok(())
}
