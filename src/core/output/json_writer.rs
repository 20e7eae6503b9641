//! JSON output writer.

use std::fs::File;
use std::io::Write;

use super::OutputMessage;
use crate::core::models::OutputConfig;
use crate::error::Result;
use crate::message::ParsedMessage;

/// Writes messages to a JSON file as a pretty-printed array.
///
/// # Format
/// ```json
/// [
///   {"sender": "Alice", "content": "Hello", "direction": "sent"},
///   {"sender": "Bob", "content": "Hi", "direction": "received"}
/// ]
/// ```
pub fn write_json(messages: &[ParsedMessage], output_path: &str, config: &OutputConfig) -> Result<()> {
    let json = to_json(messages, config)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts messages to a JSON array string.
///
/// Same format as `write_json`, but returns a String instead of writing to file.
pub fn to_json(messages: &[ParsedMessage], config: &OutputConfig) -> Result<String> {
    let projected: Vec<OutputMessage<'_>> = messages
        .iter()
        .map(|m| OutputMessage::project(m, config))
        .collect();

    Ok(serde_json::to_string_pretty(&projected)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::normalize_at;
    use crate::message::ProvisionalMessage;
    use chrono::{TimeZone, Utc};
    use tempfile::NamedTempFile;

    fn sample() -> Vec<ParsedMessage> {
        let t0 = Utc.with_ymd_and_hms(2024, 6, 15, 12, 30, 0).unwrap();
        normalize_at(
            vec![
                ProvisionalMessage::new("Alice", "Hello").with_timestamp(t0),
                ProvisionalMessage::new("Bob", "Hi").with_timestamp(t0 + chrono::TimeDelta::seconds(90)),
            ],
            t0,
        )
    }

    #[test]
    fn test_to_json_basic() {
        let json = to_json(&sample(), &OutputConfig::new()).unwrap();

        assert!(json.contains(r#""sender": "Alice""#));
        assert!(json.contains(r#""content": "Hello""#));
        assert!(json.contains(r#""direction": "received""#));
        assert!(!json.contains("timestamp"));
        assert!(!json.contains("\"id\""));
    }

    #[test]
    fn test_write_json_with_metadata() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();

        write_json(&sample(), path, &OutputConfig::all()).unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains(r#""timestamp": "2024-06-15T12:30:00Z""#));
        assert!(content.contains(r#""id": 1"#));
        assert!(content.contains(r#""time_since_last_ms": 90000"#));
        assert!(content.contains(r#""attribution": "sender_marker""#));
    }
}
