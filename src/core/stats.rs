//! Summary statistics over a normalized conversation.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::message::{Direction, ParsedMessage};

/// Aggregate figures for a list of [`ParsedMessage`]s.
///
/// # Example
///
/// ```rust
/// use chatsift::ProvisionalMessage;
/// use chatsift::core::{ConversationStats, normalize};
///
/// let messages = normalize(vec![
///     ProvisionalMessage::new("Alice", "hi"),
///     ProvisionalMessage::new("Bob", "hello"),
/// ]);
/// let stats = ConversationStats::from_messages(&messages);
///
/// assert_eq!(stats.total_messages, 2);
/// assert_eq!(stats.unique_senders, 2);
/// assert_eq!(stats.average_length, 3.5);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ConversationStats {
    pub total_messages: usize,
    pub unique_senders: usize,
    /// Earliest and latest timestamp, `None` for an empty conversation.
    pub date_range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    /// Mean character count of message content.
    pub average_length: f64,
    pub sent_count: usize,
    pub received_count: usize,
}

impl ConversationStats {
    /// Computes statistics. An empty slice yields all-zero figures.
    pub fn from_messages(messages: &[ParsedMessage]) -> Self {
        if messages.is_empty() {
            return Self::default();
        }

        let unique_senders = messages
            .iter()
            .map(|m| m.sender.as_str())
            .collect::<HashSet<_>>()
            .len();

        let earliest = messages.iter().map(|m| m.timestamp).min();
        let latest = messages.iter().map(|m| m.timestamp).max();
        let date_range = earliest.zip(latest);

        let total_length: usize = messages.iter().map(|m| m.length).sum();
        let sent_count = messages
            .iter()
            .filter(|m| m.direction == Direction::Sent)
            .count();

        Self {
            total_messages: messages.len(),
            unique_senders,
            date_range,
            average_length: total_length as f64 / messages.len() as f64,
            sent_count,
            received_count: messages.len() - sent_count,
        }
    }
}

impl fmt::Display for ConversationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Messages:       {}", self.total_messages)?;
        writeln!(f, "Senders:        {}", self.unique_senders)?;
        writeln!(
            f,
            "Sent/received:  {}/{}",
            self.sent_count, self.received_count
        )?;
        writeln!(f, "Average length: {:.1}", self.average_length)?;
        match self.date_range {
            Some((first, last)) => write!(
                f,
                "Date range:     {} .. {}",
                first.format("%Y-%m-%d %H:%M:%S"),
                last.format("%Y-%m-%d %H:%M:%S")
            ),
            None => write!(f, "Date range:     -"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::normalize_at;
    use crate::message::ProvisionalMessage;
    use chrono::TimeZone;

    #[test]
    fn test_empty_is_zeroed() {
        let stats = ConversationStats::from_messages(&[]);
        assert_eq!(stats.total_messages, 0);
        assert_eq!(stats.unique_senders, 0);
        assert_eq!(stats.date_range, None);
        assert_eq!(stats.average_length, 0.0);
        assert_eq!(stats.sent_count + stats.received_count, 0);
    }

    #[test]
    fn test_figures() {
        let early = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2024, 1, 3, 18, 30, 0).unwrap();
        let messages = normalize_at(
            vec![
                ProvisionalMessage::new("Alice", "abcd").with_timestamp(late),
                ProvisionalMessage::new("Zed", "ab").with_timestamp(early),
                ProvisionalMessage::new("Alice", "abcdef").with_timestamp(late),
            ],
            late,
        );

        let stats = ConversationStats::from_messages(&messages);
        assert_eq!(stats.total_messages, 3);
        assert_eq!(stats.unique_senders, 2);
        assert_eq!(stats.date_range, Some((early, late)));
        assert!((stats.average_length - 4.0).abs() < f64::EPSILON);
        assert_eq!(stats.sent_count, 2);
        assert_eq!(stats.received_count, 1);
    }

    #[test]
    fn test_display_mentions_counts() {
        let messages = normalize_at(
            vec![ProvisionalMessage::new("Alice", "hi")],
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        );
        let text = ConversationStats::from_messages(&messages).to_string();
        assert!(text.contains("Messages:       1"));
        assert!(text.contains("2024-01-01 00:00:00"));
    }
}
