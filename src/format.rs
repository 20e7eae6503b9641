//! Input format detection.
//!
//! [`detect_format`] classifies a raw string into one of the three textual
//! encodings the pipeline understands. [`InputSource`] names where the input
//! came from (pasted, uploaded file, OCR'd screenshot, pre-extracted OCR
//! blocks) and decides whether detection runs at all.
//!
//! # Example
//!
//! ```rust
//! use chatsift::format::{InputFormat, detect_format};
//!
//! assert_eq!(detect_format(r#"[{"sender": "A", "content": "hi"}]"#), InputFormat::StructuredJson);
//! assert_eq!(detect_format("Alice: hi\nBob: hello"), InputFormat::PlainText);
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// The `YYYY-MM-DD HH:MM:SS (from|to) ` header shape of export logs.
static EXPORT_LOG_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2} (?:from|to) ")
        .expect("export log header pattern is valid")
});

/// Textual encodings recognized by the detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputFormat {
    /// Freeform pasted text, one message per line.
    PlainText,
    /// Dash-separated blocks with `timestamp from|to name` headers.
    ExportLog,
    /// A JSON array of messages, or an object with a `messages` array.
    StructuredJson,
}

impl InputFormat {
    /// Returns all formats.
    pub fn all() -> &'static [InputFormat] {
        &[
            InputFormat::PlainText,
            InputFormat::ExportLog,
            InputFormat::StructuredJson,
        ]
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFormat::PlainText => write!(f, "plain text"),
            InputFormat::ExportLog => write!(f, "export log"),
            InputFormat::StructuredJson => write!(f, "JSON"),
        }
    }
}

/// Classifies raw input.
///
/// - `StructuredJson` if the trimmed input starts with `{` or `[`.
/// - `ExportLog` if the text contains `" from "`, `" to "` and at least one
///   `YYYY-MM-DD HH:MM:SS from|to ` header. All three must hold.
/// - `PlainText` otherwise.
pub fn detect_format(raw: &str) -> InputFormat {
    let trimmed = raw.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return InputFormat::StructuredJson;
    }

    if raw.contains(" from ") && raw.contains(" to ") && EXPORT_LOG_HEADER.is_match(raw) {
        return InputFormat::ExportLog;
    }

    InputFormat::PlainText
}

/// Where an input came from.
///
/// # Example
///
/// ```rust
/// use chatsift::format::InputSource;
/// use std::str::FromStr;
///
/// assert_eq!(InputSource::from_str("screenshot").unwrap(), InputSource::Screenshot);
/// assert_eq!(InputSource::from_str("ocr").unwrap(), InputSource::Screenshot);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum InputSource {
    /// Pasted text, always parsed as plain text.
    Paste,
    /// An uploaded file; its format is auto-detected.
    File,
    /// Text already extracted from a screenshot by OCR, parsed as plain text.
    #[serde(alias = "ocr")]
    Screenshot,
    /// A JSON array of OCR text blocks with bounding boxes.
    Blocks,
}

impl InputSource {
    /// Returns the fixed format for this source, or `None` when the format
    /// must be detected from the content.
    ///
    /// [`InputSource::Blocks`] never reaches a text parser and reports `None`.
    pub fn forced_format(&self) -> Option<InputFormat> {
        match self {
            InputSource::Paste | InputSource::Screenshot => Some(InputFormat::PlainText),
            InputSource::File | InputSource::Blocks => None,
        }
    }

    /// Returns all source names including aliases.
    pub fn all_names() -> &'static [&'static str] {
        &["paste", "file", "screenshot", "ocr", "blocks"]
    }
}

impl std::fmt::Display for InputSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputSource::Paste => write!(f, "paste"),
            InputSource::File => write!(f, "file"),
            InputSource::Screenshot => write!(f, "screenshot"),
            InputSource::Blocks => write!(f, "blocks"),
        }
    }
}

impl std::str::FromStr for InputSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "paste" => Ok(InputSource::Paste),
            "file" => Ok(InputSource::File),
            "screenshot" | "ocr" => Ok(InputSource::Screenshot),
            "blocks" => Ok(InputSource::Blocks),
            _ => Err(format!(
                "Unknown source: '{}'. Expected one of: {}",
                s,
                InputSource::all_names().join(", ")
            )),
        }
    }
}
