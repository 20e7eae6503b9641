//! Unified parser trait for the textual input formats.
//!
//! Each format parser turns raw text into [`ProvisionalMessage`]s. Parsing
//! never fails: content that does not fit the format degrades to fewer or
//! lower-confidence messages instead of an error.
//!
//! # Example
//!
//! ```rust
//! use chatsift::format::InputFormat;
//! use chatsift::parser::create_parser;
//!
//! let parser = create_parser(InputFormat::PlainText);
//! let messages = parser.parse_str("Alice: hi\nBob: hello");
//! assert_eq!(messages.len(), 2);
//! assert_eq!(messages[1].sender, "Bob");
//! ```

use crate::config::ImportConfig;
use crate::format::InputFormat;
use crate::message::ProvisionalMessage;

/// Unified trait for parsing one textual conversation encoding.
///
/// # Implementation Notes
///
/// Implementations must:
/// - emit messages in source order,
/// - trim content and drop messages whose content is empty,
/// - hold no state between calls.
pub trait Parser: Send + Sync {
    /// Returns the human-readable name of this parser.
    fn name(&self) -> &'static str;

    /// Returns the format this parser handles.
    fn format(&self) -> InputFormat;

    /// Parses raw text into provisional messages.
    fn parse_str(&self, content: &str) -> Vec<ProvisionalMessage>;
}

/// Creates a parser for the specified format with default configuration.
pub fn create_parser(format: InputFormat) -> Box<dyn Parser> {
    create_parser_with_config(format, &ImportConfig::default())
}

/// Creates a parser for the specified format.
pub fn create_parser_with_config(format: InputFormat, config: &ImportConfig) -> Box<dyn Parser> {
    match format {
        InputFormat::PlainText => Box::new(crate::parsers::PlainTextParser::with_config(
            config.plain_text,
        )),
        InputFormat::ExportLog => Box::new(crate::parsers::ExportLogParser::new()),
        InputFormat::StructuredJson => Box::new(crate::parsers::JsonParser::with_fallback(
            crate::parsers::PlainTextParser::with_config(config.plain_text),
        )),
    }
}
