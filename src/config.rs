//! Configuration types for the import pipeline.
//!
//! Every default reproduces the thresholds the pipeline is specified with, so
//! `ImportConfig::default()` is the reference behavior. Fields are public and
//! serializable so callers can load them from their own settings files.
//!
//! # Example
//!
//! ```rust
//! use chatsift::config::{ImportConfig, ParticipantNames, SpatialConfig};
//!
//! let config = ImportConfig::new()
//!     .with_spatial(SpatialConfig::new().with_min_confidence(0.7))
//!     .with_names(ParticipantNames::new("Sam", "Alex"));
//!
//! assert_eq!(config.spatial.min_confidence, 0.7);
//! assert_eq!(config.names.you, "Sam");
//! ```

use serde::{Deserialize, Serialize};

/// Configuration for [`PlainTextParser`](crate::parsers::PlainTextParser).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlainTextConfig {
    /// A `Sender: text` split is accepted only if the sender candidate has
    /// strictly fewer characters than this (default: 50).
    pub max_sender_chars: usize,
}

impl Default for PlainTextConfig {
    fn default() -> Self {
        Self {
            max_sender_chars: 50,
        }
    }
}

impl PlainTextConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sender length limit.
    #[must_use]
    pub fn with_max_sender_chars(mut self, chars: usize) -> Self {
        self.max_sender_chars = chars;
        self
    }
}

/// Configuration for [`SpatialBlockGrouper`](crate::spatial::SpatialBlockGrouper).
///
/// All geometry is in image-fraction units (`0.0..=1.0`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpatialConfig {
    /// Blocks with confidence below this are discarded (default: 0.5).
    pub min_confidence: f32,

    /// Maximum vertical-center distance between consecutive blocks of one
    /// line (default: 0.05).
    pub line_tolerance: f64,

    /// Lines whose average horizontal center exceeds this belong to "Me"
    /// (default: 0.6).
    pub sent_threshold: f64,

    /// Lines whose average horizontal center is below this belong to "Them"
    /// (default: 0.4).
    pub received_threshold: f64,
}

impl Default for SpatialConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.5,
            line_tolerance: 0.05,
            sent_threshold: 0.6,
            received_threshold: 0.4,
        }
    }
}

impl SpatialConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the confidence floor.
    #[must_use]
    pub fn with_min_confidence(mut self, confidence: f32) -> Self {
        self.min_confidence = confidence;
        self
    }

    /// Sets the line grouping tolerance.
    #[must_use]
    pub fn with_line_tolerance(mut self, tolerance: f64) -> Self {
        self.line_tolerance = tolerance;
        self
    }

    /// Sets the horizontal thresholds for "Them" and "Me" lines.
    #[must_use]
    pub fn with_thresholds(mut self, received_below: f64, sent_above: f64) -> Self {
        self.received_threshold = received_below;
        self.sent_threshold = sent_above;
        self
    }
}

/// Human-readable names used to relabel spatially attributed messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantNames {
    /// Label for [`Direction::Sent`](crate::Direction::Sent) messages.
    pub you: String,
    /// Label for [`Direction::Received`](crate::Direction::Received) messages.
    pub them: String,
}

impl Default for ParticipantNames {
    fn default() -> Self {
        Self {
            you: "Me".to_string(),
            them: "Them".to_string(),
        }
    }
}

impl ParticipantNames {
    /// Creates a name pair.
    pub fn new(you: impl Into<String>, them: impl Into<String>) -> Self {
        Self {
            you: you.into(),
            them: them.into(),
        }
    }
}

/// Top-level configuration passed through the [`pipeline`](crate::pipeline).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Plain-text parser settings.
    #[serde(default)]
    pub plain_text: PlainTextConfig,

    /// Spatial grouper settings.
    #[serde(default)]
    pub spatial: SpatialConfig,

    /// Names used on the OCR path.
    #[serde(default)]
    pub names: ParticipantNames,
}

impl ImportConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the plain-text settings.
    #[must_use]
    pub fn with_plain_text(mut self, plain_text: PlainTextConfig) -> Self {
        self.plain_text = plain_text;
        self
    }

    /// Replaces the spatial settings.
    #[must_use]
    pub fn with_spatial(mut self, spatial: SpatialConfig) -> Self {
        self.spatial = spatial;
        self
    }

    /// Replaces the participant names.
    #[must_use]
    pub fn with_names(mut self, names: ParticipantNames) -> Self {
        self.names = names;
        self
    }
}
