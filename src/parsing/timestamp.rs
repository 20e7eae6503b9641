//! Timestamp recognition shared by the text parsers.
//!
//! Plain-text lines may start with one of four timestamp styles. They are
//! tried in a fixed order and the first match wins; the matched prefix is
//! stripped and decoded. Decoding failures keep the strip but yield no
//! timestamp.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use regex::Regex;

/// Leading timestamp styles, in match priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimestampPattern {
    /// `12/25/2023, 3:45 PM - ` (slash date, 12-hour clock, dash separator)
    SlashDateMeridiem,
    /// `2024-01-15T10:30:00Z ` or `2024-01-15 10:30 - `
    Iso8601,
    /// `[10:30] ` or `[3:45:10 PM] `
    BracketedClock,
    /// `10:30 - ` or `3:45 PM - `
    BareClock,
}

impl TimestampPattern {
    /// Returns regex pattern for this style.
    ///
    /// Every pattern is anchored at the start of the line and consumes the
    /// separator that follows the timestamp.
    pub fn pattern(self) -> &'static str {
        match self {
            TimestampPattern::SlashDateMeridiem => {
                r"^(\d{1,2}/\d{1,2}/\d{2,4}),?\s+(\d{1,2}:\d{2}(?::\d{2})?)\s?([APap][Mm])\s*-\s*"
            }
            TimestampPattern::Iso8601 => {
                r"^(\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}(?::\d{2}(?:\.\d+)?)?(?:Z|[+-]\d{2}:?\d{2})?)(?:\s*-\s*|\s+|$)"
            }
            TimestampPattern::BracketedClock => {
                r"^\[(\d{1,2}:\d{2}(?::\d{2})?(?:\s?[APap][Mm])?)\]\s*"
            }
            TimestampPattern::BareClock => {
                r"^(\d{1,2}:\d{2}(?::\d{2})?(?:\s?[APap][Mm])?)\s*-\s*"
            }
        }
    }

    /// Returns all styles in priority order.
    pub fn all() -> &'static [TimestampPattern] {
        &[
            TimestampPattern::SlashDateMeridiem,
            TimestampPattern::Iso8601,
            TimestampPattern::BracketedClock,
            TimestampPattern::BareClock,
        ]
    }

    /// Decodes the captures of this style. Clock-only styles are placed on
    /// `reference_date`.
    fn decode(self, caps: &regex::Captures<'_>, reference_date: NaiveDate) -> Option<DateTime<Utc>> {
        let group = |i: usize| caps.get(i).map_or("", |m| m.as_str());
        match self {
            TimestampPattern::SlashDateMeridiem => {
                let joined = format!("{} {} {}", group(1), group(2), group(3).to_uppercase());
                parse_slash_date(&joined)
            }
            TimestampPattern::Iso8601 => parse_datetime_str(group(1)),
            TimestampPattern::BracketedClock | TimestampPattern::BareClock => {
                parse_clock(group(1)).map(|time| reference_date.and_time(time).and_utc())
            }
        }
    }
}

/// Result of stripping a leading timestamp from a line.
#[derive(Debug, Clone, PartialEq)]
pub struct StrippedLine<'a> {
    /// The style that matched, if any.
    pub pattern: Option<TimestampPattern>,
    /// The decoded timestamp, if the match could be decoded.
    pub timestamp: Option<DateTime<Utc>>,
    /// The remainder of the line after the timestamp and its separator.
    pub rest: &'a str,
}

/// Compiled, ordered timestamp patterns.
#[derive(Debug, Clone)]
pub struct TimestampStripper {
    patterns: Vec<(TimestampPattern, Regex)>,
}

impl TimestampStripper {
    /// Compiles every [`TimestampPattern`] in priority order.
    pub fn new() -> Self {
        let patterns = TimestampPattern::all()
            .iter()
            .map(|&p| {
                let regex = Regex::new(p.pattern()).expect("timestamp patterns are valid");
                (p, regex)
            })
            .collect();
        Self { patterns }
    }

    /// Strips the first matching leading timestamp from `line`.
    ///
    /// Lines that match no pattern are returned whole with no timestamp.
    pub fn strip<'a>(&self, line: &'a str, reference_date: NaiveDate) -> StrippedLine<'a> {
        for (pattern, regex) in &self.patterns {
            if let Some(caps) = regex.captures(line) {
                let end = caps.get(0).map_or(0, |m| m.end());
                return StrippedLine {
                    pattern: Some(*pattern),
                    timestamp: pattern.decode(&caps, reference_date),
                    rest: &line[end..],
                };
            }
        }

        StrippedLine {
            pattern: None,
            timestamp: None,
            rest: line,
        }
    }
}

impl Default for TimestampStripper {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses ISO-8601-like date-times.
///
/// Accepts RFC 3339 with an offset, and naive `YYYY-MM-DD[T ]HH:MM[:SS[.f]]`
/// which is taken as UTC.
pub fn parse_datetime_str(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    const NAIVE_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    let s = s.trim_end_matches('Z');
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Converts a Unix epoch number to a timestamp.
///
/// Values above `10^11` are taken as milliseconds, smaller ones as seconds.
pub fn from_epoch(value: i64) -> Option<DateTime<Utc>> {
    if value.unsigned_abs() > 100_000_000_000 {
        DateTime::from_timestamp_millis(value)
    } else {
        DateTime::from_timestamp(value, 0)
    }
}

fn parse_slash_date(s: &str) -> Option<DateTime<Utc>> {
    // %y must be tried first: %Y would read "24" as year 24.
    const FORMATS: &[&str] = &[
        "%m/%d/%y %I:%M %p",
        "%m/%d/%y %I:%M:%S %p",
        "%m/%d/%Y %I:%M %p",
        "%m/%d/%Y %I:%M:%S %p",
    ];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}

fn parse_clock(s: &str) -> Option<NaiveTime> {
    let upper = s.trim().to_uppercase();
    let meridiem = ["AM", "PM"].into_iter().find(|m| upper.ends_with(m));

    match meridiem {
        Some(m) => {
            let clock = upper.trim_end_matches(m).trim_end();
            let normalized = format!("{clock} {m}");
            ["%I:%M %p", "%I:%M:%S %p"]
                .iter()
                .find_map(|fmt| NaiveTime::parse_from_str(&normalized, fmt).ok())
        }
        None => ["%H:%M", "%H:%M:%S"]
            .iter()
            .find_map(|fmt| NaiveTime::parse_from_str(&upper, fmt).ok()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone, Timelike};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    #[test]
    fn test_slash_date_meridiem() {
        let stripper = TimestampStripper::new();
        let line = stripper.strip("12/25/2023, 3:45 PM - Alice: Merry Christmas", today());
        assert_eq!(line.pattern, Some(TimestampPattern::SlashDateMeridiem));
        assert_eq!(line.rest, "Alice: Merry Christmas");
        assert_eq!(
            line.timestamp,
            Some(Utc.with_ymd_and_hms(2023, 12, 25, 15, 45, 0).unwrap())
        );
    }

    #[test]
    fn test_slash_date_two_digit_year() {
        let stripper = TimestampStripper::new();
        let line = stripper.strip("1/5/24, 9:05am - hey", today());
        assert_eq!(line.rest, "hey");
        assert_eq!(
            line.timestamp,
            Some(Utc.with_ymd_and_hms(2024, 1, 5, 9, 5, 0).unwrap())
        );
    }

    #[test]
    fn test_iso_variants() {
        let stripper = TimestampStripper::new();

        let line = stripper.strip("2024-01-15T10:30:00Z Bob: hi", today());
        assert_eq!(line.pattern, Some(TimestampPattern::Iso8601));
        assert_eq!(line.rest, "Bob: hi");
        assert_eq!(
            line.timestamp,
            Some(Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap())
        );

        let line = stripper.strip("2024-01-15 10:30 - Bob: hi", today());
        assert_eq!(line.rest, "Bob: hi");
        assert_eq!(line.timestamp.unwrap().minute(), 30);

        let line = stripper.strip("2024-01-15T10:30:00+02:00 hi", today());
        assert_eq!(line.timestamp.unwrap().hour(), 8);
    }

    #[test]
    fn test_bracketed_clock_uses_reference_date() {
        let stripper = TimestampStripper::new();
        let line = stripper.strip("[10:42] Alice: morning", today());
        assert_eq!(line.pattern, Some(TimestampPattern::BracketedClock));
        assert_eq!(line.rest, "Alice: morning");
        let ts = line.timestamp.unwrap();
        assert_eq!(ts.date_naive(), today());
        assert_eq!((ts.hour(), ts.minute()), (10, 42));
    }

    #[test]
    fn test_bare_clock_with_meridiem() {
        let stripper = TimestampStripper::new();
        let line = stripper.strip("3:15 PM - Bob: see you", today());
        assert_eq!(line.pattern, Some(TimestampPattern::BareClock));
        assert_eq!(line.rest, "Bob: see you");
        assert_eq!(line.timestamp.unwrap().hour(), 15);
    }

    #[test]
    fn test_unmatched_line_is_kept_whole() {
        let stripper = TimestampStripper::new();
        let line = stripper.strip("just some words", today());
        assert_eq!(line.pattern, None);
        assert_eq!(line.timestamp, None);
        assert_eq!(line.rest, "just some words");
    }

    #[test]
    fn test_clock_without_separator_is_not_stripped() {
        let stripper = TimestampStripper::new();
        // "10:30 hello" has no dash, so no style applies.
        let line = stripper.strip("10:30 hello", today());
        assert_eq!(line.pattern, None);
        assert_eq!(line.rest, "10:30 hello");
    }

    #[test]
    fn test_undecodable_match_still_strips() {
        let stripper = TimestampStripper::new();
        let line = stripper.strip("[99:99] ghost", today());
        assert_eq!(line.pattern, Some(TimestampPattern::BracketedClock));
        assert_eq!(line.timestamp, None);
        assert_eq!(line.rest, "ghost");
    }

    #[test]
    fn test_parse_datetime_str() {
        let ts = parse_datetime_str("2018-11-18 23:14:21").unwrap();
        assert_eq!(ts.year(), 2018);
        assert_eq!(ts.second(), 21);
        assert!(parse_datetime_str("2024-06-15T12:00:00.250Z").is_some());
        assert!(parse_datetime_str("yesterday").is_none());
    }

    #[test]
    fn test_from_epoch_seconds_and_millis() {
        let secs = from_epoch(1_705_314_600).unwrap();
        let millis = from_epoch(1_705_314_600_000).unwrap();
        assert_eq!(secs, millis);
    }

    #[test]
    fn test_from_epoch_out_of_range() {
        assert_eq!(from_epoch(i64::MIN), None);
        assert_eq!(from_epoch(i64::MAX), None);
        assert!(from_epoch(-1_705_314_600_000).is_some());
    }
}
