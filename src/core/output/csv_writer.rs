//! CSV output writer.

use std::fs::File;
use std::io::Write;

use super::TIMESTAMP_FORMAT;
use crate::core::models::OutputConfig;
use crate::error::Result;
use crate::message::ParsedMessage;

/// Writes messages to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: Depends on OutputConfig
///   - Basic: `Sender`, `Content`, `Direction`
///   - With IDs: `ID` first
///   - With timestamps: `Timestamp` before `Sender`
///   - With deltas: `TimeSinceLastMs` after `Direction`
///   - With attribution: `Attribution` last
/// - Encoding: UTF-8
pub fn write_csv(messages: &[ParsedMessage], output_path: &str, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    write_records(file, messages, config)
}

/// Converts messages to a CSV string.
pub fn to_csv(messages: &[ParsedMessage], config: &OutputConfig) -> Result<String> {
    let mut buffer = Vec::new();
    write_records(&mut buffer, messages, config)?;
    Ok(String::from_utf8(buffer)?)
}

fn write_records<W: Write>(sink: W, messages: &[ParsedMessage], config: &OutputConfig) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(sink);

    writer.write_record(build_header(config))?;
    for msg in messages {
        writer.write_record(build_record(msg, config))?;
    }

    writer.flush()?;
    Ok(())
}

/// Build CSV header based on output configuration.
fn build_header(config: &OutputConfig) -> Vec<&'static str> {
    let mut header = Vec::new();

    if config.include_ids {
        header.push("ID");
    }
    if config.include_timestamps {
        header.push("Timestamp");
    }

    header.extend(["Sender", "Content", "Direction"]);

    if config.include_deltas {
        header.push("TimeSinceLastMs");
    }
    if config.include_attribution {
        header.push("Attribution");
    }

    header
}

/// Build CSV record for a single message.
fn build_record(msg: &ParsedMessage, config: &OutputConfig) -> Vec<String> {
    let mut record = Vec::new();

    if config.include_ids {
        record.push(msg.id.to_string());
    }
    if config.include_timestamps {
        record.push(msg.timestamp.format(TIMESTAMP_FORMAT).to_string());
    }

    record.push(msg.sender.clone());
    record.push(msg.content.clone());
    record.push(msg.direction.to_string());

    if config.include_deltas {
        record.push(
            msg.time_since_last
                .map(|d| d.num_milliseconds().to_string())
                .unwrap_or_default(),
        );
    }
    if config.include_attribution {
        record.push(msg.attribution.as_str().to_string());
    }

    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::normalize_at;
    use crate::message::ProvisionalMessage;
    use chrono::{TimeZone, Utc};
    use tempfile::NamedTempFile;

    fn sample() -> Vec<ParsedMessage> {
        normalize_at(
            vec![
                ProvisionalMessage::new("Alice", "Hello"),
                ProvisionalMessage::new("Bob", "Hi; there"),
            ],
            Utc.with_ymd_and_hms(2024, 6, 15, 12, 30, 0).unwrap(),
        )
    }

    #[test]
    fn test_write_csv_basic() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();

        write_csv(&sample(), path, &OutputConfig::new()).unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("Sender;Content;Direction"));
        assert!(content.contains("Alice;Hello;sent"));
        assert!(content.contains("Bob;\"Hi; there\";received"));
    }

    #[test]
    fn test_to_csv_all_columns() {
        let content = to_csv(&sample(), &OutputConfig::all()).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "ID;Timestamp;Sender;Content;Direction;TimeSinceLastMs;Attribution"
        );
        assert_eq!(
            lines.next().unwrap(),
            "0;2024-06-15T12:30:00Z;Alice;Hello;sent;;sender_marker"
        );
    }
}
