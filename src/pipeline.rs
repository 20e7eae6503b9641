//! End-to-end import entry points.
//!
//! Each function runs one input through the matching front-end and then the
//! normalizer:
//!
//! | Entry point | Front-end |
//! |---|---|
//! | [`import_text`] | format detection, then the detected parser |
//! | [`import_as`] | the given parser |
//! | [`import_source`] | per [`InputSource`] |
//! | [`import_blocks`] | [`SpatialBlockGrouper`] |
//! | [`import_extracted`] | a [`TextExtractor`], then [`import_blocks`] |
//!
//! # Example
//!
//! ```rust
//! use chatsift::Direction;
//! use chatsift::config::ImportConfig;
//! use chatsift::pipeline::import_text;
//!
//! let log = "2018-11-18 23:14:21 to Amber - text\n--------------------\n2018-11-18 23:15:00 from Amber\n";
//! let messages = import_text(log, &ImportConfig::default());
//!
//! assert_eq!(messages.len(), 1);
//! assert_eq!(messages[0].sender, "You");
//! assert_eq!(messages[0].direction, Direction::Sent);
//! ```

use chrono::{DateTime, Utc};

use crate::config::ImportConfig;
use crate::core::normalize_at;
use crate::error::Result;
use crate::extract::{JsonBlockExtractor, TextExtractor};
use crate::format::{InputFormat, InputSource, detect_format};
use crate::message::ParsedMessage;
use crate::parser::create_parser_with_config;
use crate::parsers::PlainTextParser;
use crate::spatial::{SpatialBlockGrouper, TextBlock};

/// Detects the format of `raw` and imports it.
pub fn import_text(raw: &str, config: &ImportConfig) -> Vec<ParsedMessage> {
    let format = detect_format(raw);
    log::debug!("Detected input format: {format}");
    import_as(raw, format, config)
}

/// Imports `raw` as the given format, skipping detection.
pub fn import_as(raw: &str, format: InputFormat, config: &ImportConfig) -> Vec<ParsedMessage> {
    let now = Utc::now();
    let provisional = match format {
        // One clock reading for both clock-only timestamps and missing ones.
        InputFormat::PlainText => PlainTextParser::with_config(config.plain_text).parse_at(raw, now),
        _ => create_parser_with_config(format, config).parse_str(raw),
    };
    log::debug!("{format} parser produced {} provisional messages", provisional.len());
    normalize_at(provisional, now)
}

/// Imports `raw` the way its source requires.
///
/// Pasted text and OCR'd screenshots are always plain text; files are
/// detected. [`InputSource::Blocks`] treats `raw` as serialized OCR blocks.
///
/// # Errors
///
/// Returns [`ChatsiftError::Extraction`](crate::ChatsiftError::Extraction)
/// only for [`InputSource::Blocks`] when the blocks do not decode or hold no
/// text.
pub fn import_source(raw: &str, source: InputSource, config: &ImportConfig) -> Result<Vec<ParsedMessage>> {
    if source == InputSource::Blocks {
        return import_extracted(&JsonBlockExtractor::new(), raw.as_bytes(), config);
    }

    Ok(match source.forced_format() {
        Some(format) => import_as(raw, format, config),
        None => import_text(raw, config),
    })
}

/// Imports positioned OCR blocks.
///
/// Lines are attributed by horizontal position and labeled with
/// `config.names`. Centered lines are dropped.
pub fn import_blocks(blocks: &[TextBlock], config: &ImportConfig) -> Vec<ParsedMessage> {
    import_blocks_at(blocks, config, Utc::now())
}

fn import_blocks_at(blocks: &[TextBlock], config: &ImportConfig, now: DateTime<Utc>) -> Vec<ParsedMessage> {
    let grouper = SpatialBlockGrouper::with_config(config.spatial);
    normalize_at(grouper.to_provisional(blocks, &config.names), now)
}

/// Runs `extractor` over `input` and imports the resulting blocks.
///
/// # Errors
///
/// Propagates the extractor's failure as
/// [`ChatsiftError::Extraction`](crate::ChatsiftError::Extraction).
pub fn import_extracted(
    extractor: &dyn TextExtractor,
    input: &[u8],
    config: &ImportConfig,
) -> Result<Vec<ParsedMessage>> {
    let blocks = extractor.extract(input)?;
    log::debug!("{} extractor returned {} blocks", extractor.name(), blocks.len());
    Ok(import_blocks(&blocks, config))
}
