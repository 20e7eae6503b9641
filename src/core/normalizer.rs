//! Canonicalization of provisional messages.
//!
//! Every parser's output passes through [`normalize`], which:
//!
//! 1. drops messages whose content is empty after trimming,
//! 2. decides the final [`Direction`] of each message,
//! 3. fills missing timestamps with the current time,
//! 4. assigns dense 0-based IDs,
//! 5. computes the delta to the previous message's timestamp.
//!
//! # Direction inference
//!
//! With fewer than two messages everything is [`Direction::Sent`]. Otherwise
//! a message is sent if its sender is any of:
//!
//! - the sender of the first message a parser marked as sent,
//! - the lexicographically first distinct sender,
//! - the literal `"You"`.
//!
//! Everything else is received. The second rule is a heuristic and can mark
//! both parties of a conversation as sent.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::message::{Direction, ParsedMessage, ProvisionalMessage};
use crate::parsers::SELF_SENDER;

/// Normalizes provisional messages, stamping untimed ones with `Utc::now()`.
///
/// # Example
///
/// ```rust
/// use chatsift::{Direction, ProvisionalMessage};
/// use chatsift::core::normalize;
///
/// let messages = normalize(vec![
///     ProvisionalMessage::new("Alice", "hi"),
///     ProvisionalMessage::new("Bob", "  "),
///     ProvisionalMessage::new("Bob", "hello"),
/// ]);
///
/// assert_eq!(messages.len(), 2);
/// assert_eq!(messages[1].id, 1);
/// assert_eq!(messages[1].direction, Direction::Received);
/// ```
pub fn normalize(provisional: Vec<ProvisionalMessage>) -> Vec<ParsedMessage> {
    normalize_at(provisional, Utc::now())
}

/// Normalizes provisional messages, stamping untimed ones with `now`.
pub fn normalize_at(provisional: Vec<ProvisionalMessage>, now: DateTime<Utc>) -> Vec<ParsedMessage> {
    let input_count = provisional.len();
    let kept: Vec<ProvisionalMessage> = provisional
        .into_iter()
        .filter(|msg| !msg.content.trim().is_empty())
        .collect();

    let directions = infer_directions(&kept);
    let track_deltas = kept.len() >= 2;

    let mut previous: Option<DateTime<Utc>> = None;
    let normalized: Vec<ParsedMessage> = kept
        .into_iter()
        .zip(directions)
        .enumerate()
        .map(|(index, (msg, direction))| {
            let timestamp = msg.timestamp.unwrap_or(now);
            let time_since_last = if track_deltas {
                previous.map(|prev| timestamp - prev)
            } else {
                None
            };
            previous = Some(timestamp);

            let content = msg.content.trim().to_string();
            ParsedMessage {
                id: index as u64,
                timestamp,
                sender: msg.sender,
                length: content.chars().count(),
                content,
                direction,
                time_since_last,
                attribution: msg.attribution,
            }
        })
        .collect();

    log::debug!(
        "Normalized {} of {} provisional messages ({} sent)",
        normalized.len(),
        input_count,
        normalized.iter().filter(|m| m.is_sent()).count()
    );

    normalized
}

/// Decides the final direction of each message.
///
/// The result is index-aligned with `messages`. Empty-content messages are
/// not skipped here; callers filter them first.
pub fn infer_directions(messages: &[ProvisionalMessage]) -> Vec<Direction> {
    if messages.len() < 2 {
        return vec![Direction::Sent; messages.len()];
    }

    let person1 = messages
        .iter()
        .map(|m| m.sender.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .next();
    let user_sender = messages
        .iter()
        .find(|m| m.direction == Direction::Sent)
        .map(|m| m.sender.as_str())
        .or(person1);

    messages
        .iter()
        .map(|m| {
            let sender = m.sender.as_str();
            if Some(sender) == user_sender || Some(sender) == person1 || sender == SELF_SENDER {
                Direction::Sent
            } else {
                Direction::Received
            }
        })
        .collect()
}
