//! Format-specific conversation parsers.
//!
//! Each parser implements [`Parser`](crate::parser::Parser) and produces
//! [`ProvisionalMessage`](crate::ProvisionalMessage)s.
//!
//! # Available Parsers
//!
//! - [`PlainTextParser`] - freeform pasted or OCR'd text
//! - [`ExportLogParser`] - dash-separated `from`/`to` export logs
//! - [`JsonParser`] - structured JSON, falling back to plain text

mod export_log;
mod json;
mod plain_text;

pub use export_log::{BLOCK_SEPARATOR, ExportLogParser, SELF_SENDER};
pub use json::JsonParser;
pub use plain_text::{FALLBACK_SENDER_EVEN, FALLBACK_SENDER_ODD, PlainTextParser};
