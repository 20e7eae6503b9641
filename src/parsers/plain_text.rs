//! Plain-text conversation parser.
//!
//! Handles pasted chats and OCR'd screenshots: one message per non-blank
//! line, optionally prefixed by a timestamp and a `Sender:` label.
//!
//! Supported line shapes:
//! - `12/25/2023, 3:45 PM - Alice: text`
//! - `2024-01-15T10:30:00Z Alice: text`
//! - `[10:30] Alice: text`
//! - `10:30 - Alice: text`
//! - `Alice: text`
//! - `text` (sender alternates between `person1` and `person2`)

use chrono::{DateTime, Utc};

use crate::config::PlainTextConfig;
use crate::format::InputFormat;
use crate::message::{Attribution, ProvisionalMessage};
use crate::parser::Parser;
use crate::parsing::TimestampStripper;

/// Synthetic sender for even-numbered unlabeled lines.
pub const FALLBACK_SENDER_EVEN: &str = "person1";
/// Synthetic sender for odd-numbered unlabeled lines.
pub const FALLBACK_SENDER_ODD: &str = "person2";

/// Parser for freeform plain-text conversations.
///
/// # Example
///
/// ```rust
/// use chatsift::parser::Parser;
/// use chatsift::parsers::PlainTextParser;
///
/// let parser = PlainTextParser::new();
/// let messages = parser.parse_str("[10:30] Alice: hey\nno sender here");
///
/// assert_eq!(messages[0].sender, "Alice");
/// assert_eq!(messages[0].content, "hey");
/// assert_eq!(messages[1].sender, "person2");
/// ```
pub struct PlainTextParser {
    config: PlainTextConfig,
    stripper: TimestampStripper,
}

impl PlainTextParser {
    /// Creates a new parser with default configuration.
    pub fn new() -> Self {
        Self::with_config(PlainTextConfig::default())
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: PlainTextConfig) -> Self {
        Self {
            config,
            stripper: TimestampStripper::new(),
        }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &PlainTextConfig {
        &self.config
    }

    /// Parses `content`, placing clock-only timestamps on the date of
    /// `reference`.
    pub fn parse_at(&self, content: &str, reference: DateTime<Utc>) -> Vec<ProvisionalMessage> {
        let reference_date = reference.date_naive();

        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
            .filter_map(|(index, line)| {
                let stripped = self.stripper.strip(line, reference_date);
                let msg = self
                    .split_sender(stripped.rest, index)
                    .with_optional_timestamp(stripped.timestamp);
                (!msg.is_empty()).then_some(msg)
            })
            .collect()
    }

    /// Splits `Sender: text` on the first colon, or falls back to the
    /// line-parity sender.
    fn split_sender(&self, rest: &str, index: usize) -> ProvisionalMessage {
        if let Some((sender, text)) = rest.split_once(':') {
            let sender = sender.trim();
            let text = text.trim();
            if !sender.is_empty()
                && !text.is_empty()
                && sender.chars().count() < self.config.max_sender_chars
            {
                return ProvisionalMessage::new(sender, text);
            }
        }

        let sender = if index % 2 == 0 {
            FALLBACK_SENDER_EVEN
        } else {
            FALLBACK_SENDER_ODD
        };
        ProvisionalMessage::new(sender, rest).with_attribution(Attribution::Alternating)
    }
}

impl Default for PlainTextParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for PlainTextParser {
    fn name(&self) -> &'static str {
        "Plain text"
    }

    fn format(&self) -> InputFormat {
        InputFormat::PlainText
    }

    fn parse_str(&self, content: &str) -> Vec<ProvisionalMessage> {
        self.parse_at(content, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Direction;
    use chrono::TimeZone;

    fn parse(content: &str) -> Vec<ProvisionalMessage> {
        PlainTextParser::new().parse_str(content)
    }

    #[test]
    fn test_sender_split() {
        let messages = parse("Alice: Hello there\nBob:   Hi!  ");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].sender, "Alice");
        assert_eq!(messages[0].content, "Hello there");
        assert_eq!(messages[1].sender, "Bob");
        assert_eq!(messages[1].content, "Hi!");
        assert_eq!(messages[1].attribution, Attribution::SenderMarker);
    }

    #[test]
    fn test_every_message_tentatively_sent() {
        let messages = parse("Alice: a\nBob: b\nplain");
        assert!(messages.iter().all(|m| m.direction == Direction::Sent));
    }

    #[test]
    fn test_blank_lines_skipped_and_parity_counts_non_blank() {
        let messages = parse("first\n\n   \nsecond\nthird");
        let senders: Vec<&str> = messages.iter().map(|m| m.sender.as_str()).collect();
        assert_eq!(senders, ["person1", "person2", "person1"]);
        assert!(messages.iter().all(|m| m.attribution == Attribution::Alternating));
    }

    #[test]
    fn test_long_sender_not_split() {
        let line = "ThisIsASenderNameThatIsDefinitelyOverFiftyCharactersLongXXXXXXXXXXXXXXXXXXXXXXXX: hello";
        let messages = parse(line);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender, "person1");
        assert_eq!(messages[0].content, line);
    }

    #[test]
    fn test_sender_length_boundary() {
        let sender_49 = "a".repeat(49);
        let sender_50 = "b".repeat(50);
        let messages = parse(&format!("{sender_49}: ok\n{sender_50}: not ok"));
        assert_eq!(messages[0].sender, sender_49);
        assert_eq!(messages[1].sender, "person2");
    }

    #[test]
    fn test_empty_message_after_colon_falls_back() {
        let messages = parse("Note:");
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender, "person1");
        assert_eq!(messages[0].content, "Note:");
    }

    #[test]
    fn test_timestamp_then_sender() {
        let reference = Utc.with_ymd_and_hms(2024, 3, 10, 8, 0, 0).unwrap();
        let messages = PlainTextParser::new().parse_at(
            "12/25/2023, 3:45 PM - Alice: Merry Christmas\n[09:15] Bob: thanks",
            reference,
        );
        assert_eq!(messages[0].sender, "Alice");
        assert_eq!(
            messages[0].timestamp,
            Some(Utc.with_ymd_and_hms(2023, 12, 25, 15, 45, 0).unwrap())
        );
        assert_eq!(messages[1].sender, "Bob");
        assert_eq!(
            messages[1].timestamp,
            Some(Utc.with_ymd_and_hms(2024, 3, 10, 9, 15, 0).unwrap())
        );
    }

    #[test]
    fn test_timestamp_only_line_dropped() {
        let messages = parse("2024-01-15 10:30\nAlice: hi");
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender, "Alice");
    }

    #[test]
    fn test_custom_sender_limit() {
        let parser = PlainTextParser::with_config(PlainTextConfig::new().with_max_sender_chars(4));
        let messages = parser.parse_str("Bob: hi\nAlice: hi");
        assert_eq!(messages[0].sender, "Bob");
        assert_eq!(messages[1].sender, "person2");
    }

    #[test]
    fn test_only_first_colon_splits() {
        let messages = parse("Alice: meet at 10:30: ok?");
        assert_eq!(messages[0].sender, "Alice");
        assert_eq!(messages[0].content, "meet at 10:30: ok?");
    }
}
