//! Export-log parser.
//!
//! Export logs are conversation dumps made of blocks separated by a line of
//! twenty dashes. Each block starts with a header naming the time, the
//! direction keyword and the other party:
//!
//! ```text
//! 2018-11-18 23:14:21 to Amber - on my way
//! --------------------
//! 2018-11-18 23:15:02 from Amber (Mobile)
//! see you soon
//! --------------------
//! ```
//!
//! `to` means the log owner wrote the message, `from` means they received
//! it. This is the only format where direction is read, not inferred.

use regex::Regex;

use crate::format::InputFormat;
use crate::message::{Attribution, Direction, ProvisionalMessage};
use crate::parser::Parser;
use crate::parsing::parse_datetime_str;

/// Separator between blocks.
pub const BLOCK_SEPARATOR: &str = "--------------------";

/// Sender label used for messages written by the log owner.
pub const SELF_SENDER: &str = "You";

/// Header: timestamp, keyword, name, optional `(note)`, then either a
/// ` - ` dash separator or the end of the line.
const HEADER_PATTERN: &str = r"(?m)\A(\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}) (from|to) (.+?)(?:[ \t]*\([^)\n]*\))?(?:[ \t]+-(?:[ \t]|$)|[ \t]*$)";

/// Parser for dash-separated export logs.
///
/// # Example
///
/// ```rust
/// use chatsift::Direction;
/// use chatsift::parser::Parser;
/// use chatsift::parsers::ExportLogParser;
///
/// let messages = ExportLogParser::new().parse_str("2018-11-18 23:14:21 to Amber - text");
/// assert_eq!(messages[0].sender, "You");
/// assert_eq!(messages[0].direction, Direction::Sent);
/// assert_eq!(messages[0].content, "text");
/// ```
pub struct ExportLogParser {
    header: Regex,
}

impl ExportLogParser {
    /// Creates a new parser.
    pub fn new() -> Self {
        Self {
            header: Regex::new(HEADER_PATTERN).expect("export log header pattern is valid"),
        }
    }

    /// Parses a single block. Returns `None` if the header does not match or
    /// the block has no content.
    fn parse_block(&self, block: &str) -> Option<ProvisionalMessage> {
        let block = block.trim_start();
        let caps = self.header.captures(block)?;

        let header_end = caps.get(0)?.end();
        let timestamp = parse_datetime_str(caps.get(1)?.as_str());
        let direction = match caps.get(2)?.as_str() {
            "to" => Direction::Sent,
            _ => Direction::Received,
        };
        let name = caps.get(3)?.as_str().trim();

        let sender = match direction {
            Direction::Sent => SELF_SENDER,
            Direction::Received => name,
        };

        let msg = ProvisionalMessage::new(sender, &block[header_end..])
            .with_optional_timestamp(timestamp)
            .with_direction(direction)
            .with_attribution(Attribution::Authoritative);

        (!msg.is_empty()).then_some(msg)
    }
}

impl Default for ExportLogParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for ExportLogParser {
    fn name(&self) -> &'static str {
        "Export log"
    }

    fn format(&self) -> InputFormat {
        InputFormat::ExportLog
    }

    fn parse_str(&self, content: &str) -> Vec<ProvisionalMessage> {
        content
            .split(BLOCK_SEPARATOR)
            .filter_map(|block| self.parse_block(block))
            .collect()
    }
}
