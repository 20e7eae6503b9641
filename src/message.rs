//! Message types shared by every stage of the import pipeline.
//!
//! Format parsers and the spatial grouper emit [`ProvisionalMessage`]s, whose
//! direction is only a hint. The normalizer turns them into the final
//! [`ParsedMessage`] sequence with dense IDs, a binary [`Direction`] and
//! inter-message deltas.
//!
//! # Example
//!
//! ```
//! use chatsift::{Direction, ProvisionalMessage};
//! use chatsift::core::normalize;
//!
//! let provisional = vec![
//!     ProvisionalMessage::new("Alice", "Hello"),
//!     ProvisionalMessage::new("Bob", "Hi there"),
//! ];
//!
//! let messages = normalize(provisional);
//! assert_eq!(messages[0].id, 0);
//! assert_eq!(messages[0].direction, Direction::Sent);
//! assert_eq!(messages[1].direction, Direction::Received);
//! ```

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Whether a message came from the analysis subject or the other party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Written by the analysis subject.
    #[default]
    Sent,
    /// Written by the other conversation party.
    Received,
}

impl Direction {
    /// Returns `true` for [`Direction::Sent`].
    pub fn is_sent(self) -> bool {
        self == Direction::Sent
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Sent => write!(f, "sent"),
            Direction::Received => write!(f, "received"),
        }
    }
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sent" => Ok(Direction::Sent),
            "received" => Ok(Direction::Received),
            _ => Err(format!(
                "Unknown direction: '{}'. Expected one of: sent, received",
                s
            )),
        }
    }
}

/// How a message's sender and direction were obtained.
///
/// Attribution is heuristic for most inputs. Downstream consumers can use
/// this to discount messages whose sender is a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribution {
    /// The source format encodes direction explicitly
    /// (export-log `from`/`to` keyword, JSON `direction` field).
    Authoritative,
    /// An explicit sender label was present (`Sender: text`, JSON `sender`).
    #[default]
    SenderMarker,
    /// Derived from the horizontal position of an OCR text block.
    Layout,
    /// No marker at all; sender alternates by line parity.
    Alternating,
}

impl Attribution {
    /// Returns the serialized name.
    pub fn as_str(self) -> &'static str {
        match self {
            Attribution::Authoritative => "authoritative",
            Attribution::SenderMarker => "sender_marker",
            Attribution::Layout => "layout",
            Attribution::Alternating => "alternating",
        }
    }

    /// Returns `true` when the sender is a guess rather than a reading.
    pub fn is_low_confidence(self) -> bool {
        self == Attribution::Alternating
    }
}

/// A message record produced by a format parser, before normalization.
///
/// Its `direction` is a hint. Only the export-log parser sets it
/// authoritatively; the normalizer decides the final value.
#[derive(Debug, Clone, PartialEq)]
pub struct ProvisionalMessage {
    /// Sender label as found (or synthesized) in the source.
    pub sender: String,
    /// Message text, trimmed.
    pub content: String,
    /// Timestamp, if the source carried one.
    pub timestamp: Option<DateTime<Utc>>,
    /// Tentative direction.
    pub direction: Direction,
    /// How the sender was determined.
    pub attribution: Attribution,
}

impl ProvisionalMessage {
    /// Creates a provisional message with trimmed content, no timestamp,
    /// a tentative [`Direction::Sent`] and [`Attribution::SenderMarker`].
    pub fn new(sender: impl Into<String>, content: impl AsRef<str>) -> Self {
        Self {
            sender: sender.into(),
            content: content.as_ref().trim().to_string(),
            timestamp: None,
            direction: Direction::Sent,
            attribution: Attribution::SenderMarker,
        }
    }

    /// Builder method to set the timestamp.
    #[must_use]
    pub fn with_timestamp(mut self, ts: DateTime<Utc>) -> Self {
        self.timestamp = Some(ts);
        self
    }

    /// Builder method to set an optional timestamp.
    #[must_use]
    pub fn with_optional_timestamp(mut self, ts: Option<DateTime<Utc>>) -> Self {
        self.timestamp = ts;
        self
    }

    /// Builder method to set the tentative direction.
    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Builder method to set the attribution.
    #[must_use]
    pub fn with_attribution(mut self, attribution: Attribution) -> Self {
        self.attribution = attribution;
        self
    }

    /// Returns `true` if the content is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// The canonical normalized message.
///
/// Produced only by [`normalize`](crate::core::normalize). IDs are dense and
/// 0-based within one run, `content` is never empty, and `length` caches the
/// character count of `content`.
///
/// # Serialization
///
/// `time_since_last` is written as signed milliseconds under
/// `time_since_last_ms` and omitted for the first message.
///
/// ```
/// use chatsift::ProvisionalMessage;
/// use chatsift::core::normalize;
///
/// let messages = normalize(vec![ProvisionalMessage::new("Alice", "Hello!")]);
/// let json = serde_json::to_string(&messages[0])?;
/// assert!(json.contains(r#""direction":"sent""#));
/// assert!(!json.contains("time_since_last_ms"));
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedMessage {
    /// Position in the output sequence.
    pub id: u64,
    /// Source timestamp, or the parse-time "now" when the source had none.
    pub timestamp: DateTime<Utc>,
    /// Sender label. Only exact string equality is meaningful.
    pub sender: String,
    /// Trimmed, non-empty message text.
    pub content: String,
    /// Final binary direction.
    pub direction: Direction,
    /// Character count of `content`.
    pub length: usize,
    /// Delta from the previous message's timestamp. May be negative.
    #[serde(
        rename = "time_since_last_ms",
        with = "delta_millis",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub time_since_last: Option<TimeDelta>,
    /// How the sender/direction was obtained.
    #[serde(default)]
    pub attribution: Attribution,
}

impl ParsedMessage {
    /// Returns `true` when the sender attribution is a line-parity guess.
    pub fn is_low_confidence(&self) -> bool {
        self.attribution.is_low_confidence()
    }

    /// Returns `true` for sent messages.
    pub fn is_sent(&self) -> bool {
        self.direction.is_sent()
    }
}

mod delta_millis {
    use chrono::TimeDelta;
    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(value: &Option<TimeDelta>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(delta) => s.serialize_i64(delta.num_milliseconds()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<TimeDelta>, D::Error> {
        let millis = Option::<i64>::deserialize(d)?;
        Ok(millis.map(TimeDelta::milliseconds))
    }
}
