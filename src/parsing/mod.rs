//! Shared parsing utilities for all text formats.
//!
//! This module contains the timestamp recognition used by the plain-text,
//! export-log and JSON parsers.

pub mod timestamp;

pub use timestamp::{
    StrippedLine, TimestampPattern, TimestampStripper, from_epoch, parse_datetime_str,
};
