//! Filter normalized messages by date range, sender and direction.
//!
//! This module provides [`FilterConfig`] for defining filter criteria and
//! [`apply_filters`] for filtering message collections.
//!
//! # Filter Types
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Date from | [`with_date_from`](FilterConfig::with_date_from) | Messages on or after date |
//! | Date to | [`with_date_to`](FilterConfig::with_date_to) | Messages on or before date |
//! | Sender | [`with_sender`](FilterConfig::with_sender) | Messages from specific sender |
//! | Direction | [`with_direction`](FilterConfig::with_direction) | Only sent or only received |
//!
//! # Examples
//!
//! ```
//! use chatsift::core::filter::{FilterConfig, apply_filters};
//! use chatsift::core::normalize;
//! use chatsift::ProvisionalMessage;
//!
//! let messages = normalize(vec![
//!     ProvisionalMessage::new("Alice", "Hello"),
//!     ProvisionalMessage::new("Bob", "Hi there"),
//!     ProvisionalMessage::new("Alice", "How are you?"),
//! ]);
//!
//! // Case-insensitive sender matching
//! let config = FilterConfig::new().with_sender("alice");
//! let filtered = apply_filters(messages, &config);
//!
//! assert_eq!(filtered.len(), 2);
//! assert_eq!(filtered[1].id, 2);
//! ```
//!
//! # Behavior Notes
//!
//! - Sender matching is case-insensitive for ASCII characters
//! - Multiple filters are combined with AND logic
//! - IDs and `time_since_last` keep the values assigned at normalization

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::ChatsiftError;
use crate::message::{Direction, ParsedMessage};

/// Configuration for filtering messages.
///
/// Filters are combined with AND logic: a message must match all active
/// filters to be included in the result.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Include only messages on or after this timestamp.
    pub after: Option<DateTime<Utc>>,

    /// Include only messages on or before this timestamp.
    pub before: Option<DateTime<Utc>>,

    /// Include only messages from this sender (case-insensitive).
    pub from: Option<String>,

    /// Include only messages with this direction.
    pub direction: Option<Direction>,
}

impl FilterConfig {
    /// Creates a new empty filter configuration.
    ///
    /// No filters are active by default; all messages pass through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start date filter (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatsiftError::InvalidDate`] if the format is invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use chatsift::core::filter::FilterConfig;
    ///
    /// # fn main() -> chatsift::Result<()> {
    /// let config = FilterConfig::new()
    ///     .with_date_from("2024-01-01")?
    ///     .with_date_to("2024-12-31")?;
    /// assert!(config.has_date_filter());
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self, ChatsiftError> {
        self.after = Some(parse_date_at(date_str, 0, 0, 0)?);
        Ok(self)
    }

    /// Sets the end date filter (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatsiftError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self, ChatsiftError> {
        // End of the day to include the full day
        self.before = Some(parse_date_at(date_str, 23, 59, 59)?);
        Ok(self)
    }

    /// Sets the sender filter. Matching is case-insensitive for ASCII.
    #[must_use]
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.from = Some(sender.into());
        self
    }

    /// Sets the direction filter.
    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    /// Sets the start timestamp directly.
    #[must_use]
    pub fn with_after(mut self, dt: DateTime<Utc>) -> Self {
        self.after = Some(dt);
        self
    }

    /// Sets the end timestamp directly.
    #[must_use]
    pub fn with_before(mut self, dt: DateTime<Utc>) -> Self {
        self.before = Some(dt);
        self
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        self.has_date_filter() || self.from.is_some() || self.direction.is_some()
    }

    /// Returns `true` if date filters are active.
    pub fn has_date_filter(&self) -> bool {
        self.after.is_some() || self.before.is_some()
    }

    /// Returns `true` if `msg` passes every active filter.
    pub fn matches(&self, msg: &ParsedMessage) -> bool {
        if let Some(ref from) = self.from {
            if !msg.sender.eq_ignore_ascii_case(from) {
                return false;
            }
        }
        if self.direction.is_some_and(|d| d != msg.direction) {
            return false;
        }
        if self.after.is_some_and(|after| msg.timestamp < after) {
            return false;
        }
        if self.before.is_some_and(|before| msg.timestamp > before) {
            return false;
        }
        true
    }
}

/// Parse a `YYYY-MM-DD` string to a UTC timestamp at the given time of day.
fn parse_date_at(date_str: &str, h: u32, m: u32, s: u32) -> Result<DateTime<Utc>, ChatsiftError> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(h, m, s))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| ChatsiftError::invalid_date(date_str))
}

/// Filters a collection of messages based on the provided configuration.
///
/// Returns only messages that match all active filters. If no filters are
/// active, returns the original messages unchanged.
pub fn apply_filters(messages: Vec<ParsedMessage>, config: &FilterConfig) -> Vec<ParsedMessage> {
    if !config.is_active() {
        return messages;
    }

    let before = messages.len();
    let filtered: Vec<ParsedMessage> = messages.into_iter().filter(|m| config.matches(m)).collect();
    log::debug!("Filters kept {} of {} messages", filtered.len(), before);
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::normalize_at;
    use crate::message::ProvisionalMessage;
    use chrono::TimeZone;

    fn day(d: &str) -> DateTime<Utc> {
        NaiveDate::parse_from_str(d, "%Y-%m-%d")
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
            .and_utc()
    }

    fn conversation(items: &[(&str, &str, &str)]) -> Vec<ParsedMessage> {
        let provisional = items
            .iter()
            .map(|(sender, content, date)| ProvisionalMessage::new(*sender, content).with_timestamp(day(date)))
            .collect();
        normalize_at(provisional, Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap())
    }

    #[test]
    fn test_filter_by_sender() {
        let messages = conversation(&[
            ("Alice", "Hello", "2024-01-01"),
            ("Bob", "Hi", "2024-01-01"),
            ("alice", "Bye", "2024-01-01"),
        ]);

        let filtered = apply_filters(messages, &FilterConfig::new().with_sender("Alice"));

        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|m| m.sender.eq_ignore_ascii_case("Alice")));
    }

    #[test]
    fn test_filter_by_date_after() {
        let messages = conversation(&[("Alice", "Old", "2024-01-01"), ("Bob", "New", "2024-06-15")]);

        let config = FilterConfig::new().with_date_from("2024-06-01").unwrap();
        let filtered = apply_filters(messages, &config);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].content, "New");
    }

    #[test]
    fn test_filter_by_date_before_is_inclusive() {
        let messages = conversation(&[("Alice", "Old", "2024-03-01"), ("Bob", "New", "2024-06-15")]);

        let config = FilterConfig::new().with_date_to("2024-03-01").unwrap();
        let filtered = apply_filters(messages, &config);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].content, "Old");
    }

    #[test]
    fn test_filter_by_direction_keeps_ids() {
        let messages = conversation(&[
            ("Alice", "a", "2024-01-01"),
            ("Bob", "b", "2024-01-01"),
            ("Alice", "c", "2024-01-01"),
            ("Bob", "d", "2024-01-01"),
        ]);

        let filtered = apply_filters(messages, &FilterConfig::new().with_direction(Direction::Received));

        let ids: Vec<u64> = filtered.iter().map(|m| m.id).collect();
        assert_eq!(ids, [1, 3]);
    }

    #[test]
    fn test_invalid_date_format() {
        let result = FilterConfig::new().with_date_from("01-01-2024");
        assert!(matches!(result, Err(ChatsiftError::InvalidDate { .. })));
    }

    #[test]
    fn test_combined_filters() {
        let messages = conversation(&[
            ("Alice", "Old Alice", "2024-01-01"),
            ("Alice", "New Alice", "2024-06-15"),
            ("Bob", "New Bob", "2024-06-15"),
        ]);

        let config = FilterConfig::new()
            .with_date_from("2024-06-01")
            .unwrap()
            .with_sender("Alice");

        let filtered = apply_filters(messages, &config);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].content, "New Alice");
    }

    #[test]
    fn test_is_active() {
        assert!(!FilterConfig::new().is_active());
        assert!(FilterConfig::new().with_sender("Alice").is_active());
        assert!(FilterConfig::new().with_direction(Direction::Sent).is_active());
        assert!(FilterConfig::new().with_date_from("2024-01-01").unwrap().is_active());
    }
}
