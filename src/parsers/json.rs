//! Structured JSON conversation parser.
//!
//! Accepts either a top-level array of message objects or an object with a
//! `messages` array:
//!
//! ```json
//! {
//!   "messages": [
//!     {"sender": "Alice", "content": "hi", "timestamp": "2024-01-15T10:30:00Z", "direction": "received"},
//!     {"sender": "Me", "text": "hello"}
//!   ]
//! }
//! ```
//!
//! The body is the first non-null of `content`, `text`, `message`.
//! `timestamp` may be an ISO-8601 string or a Unix epoch (seconds or
//! milliseconds). `direction` is `"sent"` for sent messages; any other value
//! means received; a missing value means sent.
//!
//! Input that does not decode is handed to the plain-text parser instead of
//! failing.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{ChatsiftError, Result};
use crate::format::InputFormat;
use crate::message::{Attribution, Direction, ProvisionalMessage};
use crate::parser::Parser;
use crate::parsers::PlainTextParser;
use crate::parsing::{from_epoch, parse_datetime_str};

/// Sender used when a message object has none.
const UNKNOWN_SENDER: &str = "Unknown";

// Internal structures for deserializing conversation JSON

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonConversation {
    List(Vec<JsonMessage>),
    Wrapped { messages: Vec<JsonMessage> },
}

impl JsonConversation {
    fn into_messages(self) -> Vec<JsonMessage> {
        match self {
            JsonConversation::List(messages) | JsonConversation::Wrapped { messages } => messages,
        }
    }
}

#[derive(Debug, Deserialize)]
struct JsonMessage {
    #[serde(default)]
    sender: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    message: Option<String>,
    /// ISO string, numeric string, or epoch number
    #[serde(default)]
    timestamp: Option<Value>,
    #[serde(default)]
    direction: Option<String>,
}

impl JsonMessage {
    fn into_provisional(self) -> Option<ProvisionalMessage> {
        let body = self.content.or(self.text).or(self.message)?;
        let timestamp = self.timestamp.as_ref().and_then(decode_timestamp);

        let (direction, attribution) = match self.direction.as_deref() {
            Some("sent") => (Direction::Sent, Attribution::Authoritative),
            Some(_) => (Direction::Received, Attribution::Authoritative),
            None => (Direction::Sent, Attribution::SenderMarker),
        };

        let sender = self
            .sender
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| UNKNOWN_SENDER.to_string());

        let msg = ProvisionalMessage::new(sender, body)
            .with_optional_timestamp(timestamp)
            .with_direction(direction)
            .with_attribution(attribution);

        (!msg.is_empty()).then_some(msg)
    }
}

fn decode_timestamp(value: &Value) -> Option<chrono::DateTime<chrono::Utc>> {
    match value {
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(from_epoch)
            .or_else(|| parse_datetime_str(s)),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .and_then(from_epoch),
        _ => None,
    }
}

/// Parser for structured JSON conversations.
///
/// # Example
///
/// ```rust
/// use chatsift::Direction;
/// use chatsift::parser::Parser;
/// use chatsift::parsers::JsonParser;
///
/// let messages = JsonParser::new()
///     .parse_str(r#"[{"sender":"Alice","content":"hi","direction":"received"}]"#);
///
/// assert_eq!(messages[0].sender, "Alice");
/// assert_eq!(messages[0].direction, Direction::Received);
/// ```
pub struct JsonParser {
    fallback: PlainTextParser,
}

impl JsonParser {
    /// Creates a new parser with a default plain-text fallback.
    pub fn new() -> Self {
        Self::with_fallback(PlainTextParser::new())
    }

    /// Creates a parser with a configured plain-text fallback.
    pub fn with_fallback(fallback: PlainTextParser) -> Self {
        Self { fallback }
    }

    /// Decodes `content` strictly, without the plain-text fallback.
    ///
    /// # Errors
    ///
    /// Returns [`ChatsiftError::Json`](crate::ChatsiftError::Json) if the
    /// content is not valid JSON, and
    /// [`ChatsiftError::InvalidFormat`](crate::ChatsiftError::InvalidFormat)
    /// if it is valid JSON but not a supported conversation shape.
    pub fn try_parse_str(&self, content: &str) -> Result<Vec<ProvisionalMessage>> {
        let value: Value = serde_json::from_str(content)?;
        let conversation = JsonConversation::deserialize(value)
            .map_err(|e| ChatsiftError::invalid_format("JSON conversation", e.to_string()))?;

        Ok(conversation
            .into_messages()
            .into_iter()
            .filter_map(JsonMessage::into_provisional)
            .collect())
    }
}

impl Default for JsonParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for JsonParser {
    fn name(&self) -> &'static str {
        "JSON"
    }

    fn format(&self) -> InputFormat {
        InputFormat::StructuredJson
    }

    fn parse_str(&self, content: &str) -> Vec<ProvisionalMessage> {
        match self.try_parse_str(content) {
            Ok(messages) => messages,
            Err(e) => {
                log::warn!("JSON decode failed ({e}), parsing as plain text");
                self.fallback.parse_str(content)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn parse(content: &str) -> Vec<ProvisionalMessage> {
        JsonParser::new().parse_str(content)
    }

    #[test]
    fn test_top_level_array() {
        let messages = parse(r#"[{"sender":"Alice","content":"hi","direction":"received"}]"#);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender, "Alice");
        assert_eq!(messages[0].content, "hi");
        assert_eq!(messages[0].direction, Direction::Received);
        assert_eq!(messages[0].attribution, Attribution::Authoritative);
    }

    #[test]
    fn test_wrapped_messages_object() {
        let messages = parse(
            r#"{"title": "chat", "messages": [
                {"sender":"Alice","text":"one"},
                {"sender":"Bob","message":"two","direction":"SENT"}
            ]}"#,
        );
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content, "one");
        assert_eq!(messages[0].direction, Direction::Sent);
        assert_eq!(messages[0].attribution, Attribution::SenderMarker);
        assert_eq!(messages[1].content, "two");
        assert_eq!(messages[1].direction, Direction::Received);
        assert_eq!(messages[1].attribution, Attribution::Authoritative);
    }

    #[test]
    fn test_direction_is_case_sensitive() {
        let messages = parse(
            r#"[{"sender":"A","content":"x","direction":"sent"},
                {"sender":"A","content":"y","direction":"Sent"},
                {"sender":"A","content":"z","direction":" sent "}]"#,
        );
        assert_eq!(messages[0].direction, Direction::Sent);
        assert_eq!(messages[1].direction, Direction::Received);
        assert_eq!(messages[2].direction, Direction::Received);
    }

    #[test]
    fn test_body_priority() {
        let messages = parse(
            r#"[{"sender":"A","content":null,"text":"from text","message":"from message"},
                {"sender":"A","content":"from content","text":"from text"}]"#,
        );
        assert_eq!(messages[0].content, "from text");
        assert_eq!(messages[1].content, "from content");
    }

    #[test]
    fn test_unknown_direction_is_received() {
        let messages = parse(r#"[{"sender":"A","content":"x","direction":"incoming"}]"#);
        assert_eq!(messages[0].direction, Direction::Received);
    }

    #[test]
    fn test_missing_body_and_blank_body_dropped() {
        let messages = parse(
            r#"[{"sender":"A"},{"sender":"B","content":"   "},{"sender":"C","content":"ok"}]"#,
        );
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender, "C");
    }

    #[test]
    fn test_missing_sender_is_unknown() {
        let messages = parse(r#"[{"content":"orphan"}]"#);
        assert_eq!(messages[0].sender, "Unknown");
    }

    #[test]
    fn test_timestamp_shapes() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        let messages = parse(
            r#"[{"sender":"A","content":"iso","timestamp":"2024-01-15T10:30:00Z"},
                {"sender":"A","content":"secs","timestamp":1705314600},
                {"sender":"A","content":"millis","timestamp":1705314600000},
                {"sender":"A","content":"str secs","timestamp":"1705314600"},
                {"sender":"A","content":"junk","timestamp":"someday"}]"#,
        );
        assert_eq!(messages[0].timestamp, Some(expected));
        assert_eq!(messages[1].timestamp, Some(expected));
        assert_eq!(messages[2].timestamp, Some(expected));
        assert_eq!(messages[3].timestamp, Some(expected));
        assert_eq!(messages[4].timestamp, None);
    }

    #[test]
    fn test_malformed_json_falls_back_to_plain_text() {
        let content = "{broken\nAlice: still here";
        let err = JsonParser::new().try_parse_str(content).unwrap_err();
        assert!(matches!(err, ChatsiftError::Json(_)));

        let messages = parse(content);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].sender, "person1");
        assert_eq!(messages[1].sender, "Alice");
        assert_eq!(messages[1].content, "still here");
    }

    #[test]
    fn test_wrong_shape_falls_back() {
        let err = JsonParser::new().try_parse_str("[1, 2, 3]").unwrap_err();
        assert!(err.is_invalid_format());
        assert!(err.to_string().contains("JSON conversation"));

        let messages = parse("[1, 2, 3]");
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, "[1, 2, 3]");
        assert_eq!(messages[0].attribution, Attribution::Alternating);
    }
}
