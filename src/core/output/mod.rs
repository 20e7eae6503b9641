//! Output format writers.
//!
//! This module provides writers for different output formats:
//! - [`write_csv`] / [`to_csv`] - CSV with semicolon delimiter - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - pretty JSON array of messages
//! - [`write_jsonl`] / [`to_jsonl`] - JSON Lines, one message per line
//!
//! # Example
//!
//! ```rust,no_run
//! # fn main() -> chatsift::Result<()> {
//! use chatsift::core::models::OutputConfig;
//! use chatsift::core::normalize;
//! use chatsift::core::output::{to_jsonl, write_json};
//! use chatsift::ProvisionalMessage;
//!
//! let messages = normalize(vec![
//!     ProvisionalMessage::new("Alice", "Hello!"),
//!     ProvisionalMessage::new("Bob", "Hi there!"),
//! ]);
//!
//! let config = OutputConfig::new().with_timestamps();
//! write_json(&messages, "output.json", &config)?;
//! let jsonl = to_jsonl(&messages, &config)?;
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
mod json_writer;
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
pub use json_writer::{to_json, write_json};
pub use jsonl_writer::{to_jsonl, write_jsonl};

use serde::Serialize;

use crate::core::models::OutputConfig;
use crate::message::{Attribution, Direction, ParsedMessage};

/// Timestamp format shared by every writer.
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Message projection for JSON and JSONL output.
/// Only includes fields enabled in `OutputConfig`.
#[derive(Serialize)]
pub(crate) struct OutputMessage<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<String>,
    sender: &'a str,
    content: &'a str,
    direction: Direction,
    #[serde(skip_serializing_if = "Option::is_none")]
    time_since_last_ms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    attribution: Option<Attribution>,
}

impl<'a> OutputMessage<'a> {
    pub(crate) fn project(msg: &'a ParsedMessage, config: &OutputConfig) -> Self {
        Self {
            id: config.include_ids.then_some(msg.id),
            timestamp: config
                .include_timestamps
                .then(|| msg.timestamp.format(TIMESTAMP_FORMAT).to_string()),
            sender: &msg.sender,
            content: &msg.content,
            direction: msg.direction,
            time_since_last_ms: if config.include_deltas {
                msg.time_since_last.map(|d| d.num_milliseconds())
            } else {
                None
            },
            attribution: config.include_attribution.then_some(msg.attribution),
        }
    }
}
