//! # Chatsift
//!
//! A Rust library for importing chat history from arbitrary sources into one
//! normalized, direction-labeled message sequence.
//!
//! ## Overview
//!
//! Chatsift accepts:
//! - **Pasted text** and OCR'd screenshot text, parsed line by line
//! - **Export logs** with `YYYY-MM-DD HH:MM:SS from|to Name` block headers
//! - **Structured JSON**, either an array of messages or `{"messages": [...]}`
//! - **OCR text blocks** with bounding boxes, attributed by layout
//!
//! Every input ends up as a list of [`ParsedMessage`]s with dense IDs, a
//! binary [`Direction`] (sent by the user or received), and the time since
//! the previous message.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatsift::prelude::*;
//!
//! let messages = import_text("Alice: hi\nBob: hey there", &ImportConfig::default());
//!
//! assert_eq!(messages.len(), 2);
//! assert_eq!(messages[0].direction, Direction::Sent);
//! assert_eq!(messages[1].direction, Direction::Received);
//!
//! let stats = ConversationStats::from_messages(&messages);
//! assert_eq!(stats.unique_senders, 2);
//! ```
//!
//! ## Screenshots
//!
//! OCR engines plug in through [`extract::TextExtractor`]. Their blocks are
//! grouped into lines and attributed by horizontal position:
//!
//! ```rust
//! use chatsift::prelude::*;
//!
//! let blocks = vec![
//!     TextBlock::new("hey", (0.05, 0.80, 0.20, 0.03), 0.95),
//!     TextBlock::new("hello!", (0.70, 0.70, 0.20, 0.03), 0.90),
//! ];
//! let messages = import_blocks(&blocks, &ImportConfig::default());
//!
//! assert_eq!(messages[0].sender, "Them");
//! assert_eq!(messages[1].sender, "Me");
//! ```
//!
//! ## Module Structure
//!
//! - [`pipeline`] - end-to-end entry points
//! - [`format`] - [`InputFormat`](format::InputFormat) detection and [`InputSource`](format::InputSource)
//! - [`parser`] - the [`Parser`](parser::Parser) trait and [`create_parser`](parser::create_parser)
//! - [`parsers`] - plain-text, export-log and JSON parsers
//! - [`parsing`] - timestamp recognition shared by the parsers
//! - [`spatial`] - OCR block grouping and attribution
//! - [`extract`] - external text extractor seam
//! - [`core`] - normalization, statistics, filtering and output writers
//! - [`config`] - per-stage configuration
//! - [`message`] - [`ProvisionalMessage`] and [`ParsedMessage`]
//! - [`error`] - [`ChatsiftError`] and [`Result`]

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod extract;
pub mod format;
pub mod message;
pub mod parser;
pub mod parsers;
pub mod parsing;
pub mod pipeline;
pub mod spatial;

// Re-export the main types at the crate root for convenience
pub use error::{ChatsiftError, Result};
pub use message::{Attribution, Direction, ParsedMessage, ProvisionalMessage};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatsift::prelude::*;
/// ```
pub mod prelude {
    // Message types
    pub use crate::message::{Attribution, Direction, ParsedMessage, ProvisionalMessage};

    // Error types
    pub use crate::error::{ChatsiftError, Result};

    // Configuration
    pub use crate::config::{ImportConfig, ParticipantNames, PlainTextConfig, SpatialConfig};

    // Format detection and parsers
    pub use crate::format::{InputFormat, InputSource, detect_format};
    pub use crate::parser::{Parser, create_parser};
    pub use crate::parsers::{ExportLogParser, JsonParser, PlainTextParser};

    // Screenshots
    pub use crate::extract::{ExtractionError, JsonBlockExtractor, TextExtractor};
    pub use crate::spatial::{BoundingBox, GroupedLine, LineOwner, SpatialBlockGrouper, TextBlock};

    // Normalization and post-processing
    pub use crate::core::{
        ConversationStats, FilterConfig, OutputConfig, apply_filters, normalize, normalize_at,
    };

    // Output (file writers and string converters)
    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    pub use crate::core::output::{to_json, to_jsonl, write_json, write_jsonl};

    // Pipeline
    pub use crate::pipeline::{import_as, import_blocks, import_extracted, import_source, import_text};
}
