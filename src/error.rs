//! Unified error types for chatsift.
//!
//! The import pipeline itself never fails on malformed conversational
//! content: undecodable JSON falls back to plain text, unrecognized lines are
//! kept with a low-confidence attribution, and weak OCR fragments are
//! dropped. What remains here are the failures of the surrounding plumbing:
//! reading input, writing output, parsing user-supplied filter dates, and
//! errors reported by an external text extractor.

use std::io;

use thiserror::Error;

use crate::extract::ExtractionError;

/// A specialized [`Result`] type for chatsift operations.
///
/// # Example
///
/// ```rust
/// use chatsift::error::Result;
/// use chatsift::ParsedMessage;
///
/// fn my_function() -> Result<Vec<ParsedMessage>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatsiftError>;

/// The error type for all chatsift operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatsiftError {
    /// An I/O error occurred while reading input or writing output.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error.
    ///
    /// Raised when writing output and by the strict
    /// [`JsonParser::try_parse_str`](crate::parsers::JsonParser::try_parse_str).
    /// The pipeline recovers decoding failures with the plain-text fallback.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Well-formed input did not match the expected structure.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// Invalid date format in filter configuration.
    ///
    /// Date filters expect YYYY-MM-DD format.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// The external OCR/PDF extractor failed.
    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl From<std::string::FromUtf8Error> for ChatsiftError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ChatsiftError::Utf8 {
            context: "input decoding".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatsiftError {
    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ChatsiftError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ChatsiftError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatsiftError::Io(_))
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, ChatsiftError::InvalidFormat { .. })
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ChatsiftError::InvalidDate { .. })
    }

    /// Returns `true` if the external extractor reported the failure.
    pub fn is_extraction(&self) -> bool {
        matches!(self, ChatsiftError::Extraction(_))
    }
}
