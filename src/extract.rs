//! Seam to external text extractors.
//!
//! Screenshot OCR and PDF text extraction are performed by engines outside
//! this crate. An engine plugs in by implementing [`TextExtractor`]: it turns
//! raw bytes into positioned [`TextBlock`]s, which the
//! [`SpatialBlockGrouper`](crate::spatial::SpatialBlockGrouper) then
//! attributes.
//!
//! [`JsonBlockExtractor`] is the built-in implementation. It reads blocks an
//! engine has already serialized, either as a bare array or wrapped in a
//! `blocks` field:
//!
//! ```json
//! {"blocks": [{"text": "hey", "bounding_box": {"x": 0.05, "y": 0.8, "width": 0.2, "height": 0.03}, "confidence": 0.93}]}
//! ```

use serde::Deserialize;
use thiserror::Error;

use crate::spatial::TextBlock;

/// Failures reported by a text extractor.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExtractionError {
    /// The input held no recognizable text.
    #[error("no text found in input")]
    NoTextFound,

    /// The engine itself failed.
    #[error("extraction engine error: {0}")]
    Engine(String),

    /// The engine does not accept this kind of input.
    #[error("unsupported input: {0}")]
    UnsupportedInput(String),

    /// Serialized blocks could not be decoded.
    #[error("invalid block data: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Converts an image or document into positioned text blocks.
///
/// # Implementation Notes
///
/// Coordinates must be image fractions with the origin at the bottom-left,
/// and `confidence` must lie in `[0, 1]`. Implementations return
/// [`ExtractionError::NoTextFound`] rather than an empty list when nothing
/// was recognized.
pub trait TextExtractor: Send + Sync {
    /// Returns the human-readable name of this extractor.
    fn name(&self) -> &'static str;

    /// Extracts text blocks from raw input bytes.
    fn extract(&self, input: &[u8]) -> Result<Vec<TextBlock>, ExtractionError>;
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BlockDocument {
    List(Vec<TextBlock>),
    Wrapped { blocks: Vec<TextBlock> },
}

/// Extractor for pre-serialized JSON text blocks.
///
/// # Example
///
/// ```rust
/// use chatsift::extract::{JsonBlockExtractor, TextExtractor};
///
/// let json = br#"[{"text":"hi","bounding_box":{"x":0.7,"y":0.5,"width":0.2,"height":0.03},"confidence":0.9}]"#;
/// let blocks = JsonBlockExtractor::new().extract(json)?;
/// assert_eq!(blocks[0].text, "hi");
/// # Ok::<(), chatsift::extract::ExtractionError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBlockExtractor;

impl JsonBlockExtractor {
    /// Creates a new extractor.
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for JsonBlockExtractor {
    fn name(&self) -> &'static str {
        "JSON blocks"
    }

    fn extract(&self, input: &[u8]) -> Result<Vec<TextBlock>, ExtractionError> {
        let blocks = match serde_json::from_slice::<BlockDocument>(input)? {
            BlockDocument::List(blocks) | BlockDocument::Wrapped { blocks } => blocks,
        };

        if blocks.iter().all(|b| b.text.trim().is_empty()) {
            return Err(ExtractionError::NoTextFound);
        }
        Ok(blocks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_array() {
        let json = br#"[
            {"text":"hey","bounding_box":{"x":0.05,"y":0.8,"width":0.2,"height":0.03},"confidence":0.93},
            {"text":"hi","bounding_box":{"x":0.7,"y":0.7,"width":0.2,"height":0.03},"confidence":0.88}
        ]"#;
        let blocks = JsonBlockExtractor::new().extract(json).unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].text, "hi");
        assert!((blocks[1].bounding_box.center_x() - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_wrapped_blocks() {
        let json = br#"{"engine":"vision","blocks":[
            {"text":"ok","bounding_box":{"x":0.1,"y":0.1,"width":0.1,"height":0.1},"confidence":1.0}
        ]}"#;
        let blocks = JsonBlockExtractor::new().extract(json).unwrap();
        assert_eq!(blocks.len(), 1);
    }

    #[test]
    fn test_empty_is_no_text() {
        let err = JsonBlockExtractor::new().extract(b"[]").unwrap_err();
        assert!(matches!(err, ExtractionError::NoTextFound));
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let err = JsonBlockExtractor::new().extract(b"\x89PNG\r\n").unwrap_err();
        assert!(matches!(err, ExtractionError::Decode(_)));
        assert!(err.to_string().contains("invalid block data"));
    }
}
