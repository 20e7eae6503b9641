//! Screenshot layout analysis.
//!
//! OCR yields positioned text fragments rather than lines of text. Chat UIs
//! right-align the user's bubbles and left-align the other party's, so the
//! horizontal position of a line is the direction signal here; no sender
//! names are read.
//!
//! Coordinates are image fractions in `[0, 1]` with the origin at the
//! bottom-left: a larger `y` is higher on the screen.
//!
//! # Example
//!
//! ```rust
//! use chatsift::spatial::{LineOwner, SpatialBlockGrouper, TextBlock};
//!
//! let blocks = vec![
//!     TextBlock::new("hey", (0.05, 0.80, 0.20, 0.03), 0.95),
//!     TextBlock::new("hi!", (0.70, 0.70, 0.20, 0.03), 0.90),
//! ];
//!
//! let lines = SpatialBlockGrouper::new().group(&blocks);
//! assert_eq!(lines[0].owner, LineOwner::Them);
//! assert_eq!(lines[1].owner, LineOwner::Me);
//! assert_eq!(lines[1].to_string(), "Me: hi!");
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ParticipantNames, SpatialConfig};
use crate::message::{Attribution, Direction, ProvisionalMessage};

/// Axis-aligned box in image-fraction coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge.
    pub x: f64,
    /// Bottom edge.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// Creates a bounding box.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Horizontal center.
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Vertical center.
    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Returns `true` if every coordinate is a finite number.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }
}

impl From<(f64, f64, f64, f64)> for BoundingBox {
    fn from((x, y, width, height): (f64, f64, f64, f64)) -> Self {
        Self::new(x, y, width, height)
    }
}

/// A text fragment recognized by OCR.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    pub text: String,
    pub bounding_box: BoundingBox,
    /// Recognition confidence in `[0, 1]`.
    pub confidence: f32,
}

impl TextBlock {
    /// Creates a text block.
    pub fn new(text: impl Into<String>, bounding_box: impl Into<BoundingBox>, confidence: f32) -> Self {
        Self {
            text: text.into(),
            bounding_box: bounding_box.into(),
            confidence,
        }
    }
}

/// Who a grouped line belongs to, judged by its horizontal position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineOwner {
    /// Right-aligned: the user.
    Me,
    /// Left-aligned: the other party.
    Them,
    /// Centered: usually a timestamp or system notice.
    Unattributed,
}

/// One visual line of text assembled from blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedLine {
    /// Block texts joined left-to-right with single spaces.
    pub text: String,
    pub owner: LineOwner,
    /// Average horizontal center of the line's blocks.
    pub center_x: f64,
}

impl std::fmt::Display for GroupedLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.owner {
            LineOwner::Me => write!(f, "Me: {}", self.text),
            LineOwner::Them => write!(f, "Them: {}", self.text),
            LineOwner::Unattributed => write!(f, "{}", self.text),
        }
    }
}

/// Groups OCR blocks into directional lines.
#[derive(Debug, Clone, Default)]
pub struct SpatialBlockGrouper {
    config: SpatialConfig,
}

impl SpatialBlockGrouper {
    /// Creates a grouper with default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a grouper with custom thresholds.
    pub fn with_config(config: SpatialConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &SpatialConfig {
        &self.config
    }

    /// Groups blocks into lines, top of the image first.
    ///
    /// Blocks under the confidence floor, with blank text, or with
    /// non-finite geometry are discarded first.
    pub fn group(&self, blocks: &[TextBlock]) -> Vec<GroupedLine> {
        let mut kept: Vec<&TextBlock> = blocks
            .iter()
            .filter(|b| b.confidence >= self.config.min_confidence)
            .filter(|b| !b.text.trim().is_empty())
            .filter(|b| {
                let finite = b.bounding_box.is_finite();
                if !finite {
                    log::warn!("Skipping OCR block with non-finite geometry: {:?}", b.text);
                }
                finite
            })
            .collect();

        log::debug!(
            "Kept {} of {} OCR blocks (min confidence {})",
            kept.len(),
            blocks.len(),
            self.config.min_confidence
        );

        kept.sort_by(|a, b| b.bounding_box.y.total_cmp(&a.bounding_box.y));

        let mut groups: Vec<Vec<&TextBlock>> = Vec::new();
        let mut previous_center: Option<f64> = None;
        for block in kept {
            let center = block.bounding_box.center_y();
            match (groups.last_mut(), previous_center) {
                (Some(group), Some(prev)) if (center - prev).abs() < self.config.line_tolerance => {
                    group.push(block);
                }
                _ => groups.push(vec![block]),
            }
            previous_center = Some(center);
        }

        let lines: Vec<GroupedLine> = groups.into_iter().map(|group| self.assemble(group)).collect();
        log::debug!("Grouped OCR blocks into {} lines", lines.len());
        lines
    }

    /// Renders grouped lines as text, one per line, with `Me: ` / `Them: `
    /// prefixes on attributed lines.
    pub fn transcript(&self, blocks: &[TextBlock]) -> String {
        self.group(blocks)
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Converts attributed lines into provisional messages labeled with
    /// `names`. Unattributed lines are not emitted.
    pub fn to_provisional(&self, blocks: &[TextBlock], names: &ParticipantNames) -> Vec<ProvisionalMessage> {
        self.group(blocks)
            .into_iter()
            .filter_map(|line| {
                let (sender, direction) = match line.owner {
                    LineOwner::Me => (names.you.as_str(), Direction::Sent),
                    LineOwner::Them => (names.them.as_str(), Direction::Received),
                    LineOwner::Unattributed => return None,
                };
                Some(
                    ProvisionalMessage::new(sender, &line.text)
                        .with_direction(direction)
                        .with_attribution(Attribution::Layout),
                )
            })
            .filter(|msg| !msg.is_empty())
            .collect()
    }

    fn assemble(&self, mut group: Vec<&TextBlock>) -> GroupedLine {
        group.sort_by(|a, b| a.bounding_box.x.total_cmp(&b.bounding_box.x));

        let text = group
            .iter()
            .map(|b| b.text.trim())
            .collect::<Vec<_>>()
            .join(" ");
        let center_x =
            group.iter().map(|b| b.bounding_box.center_x()).sum::<f64>() / group.len() as f64;

        let owner = if center_x > self.config.sent_threshold {
            LineOwner::Me
        } else if center_x < self.config.received_threshold {
            LineOwner::Them
        } else {
            LineOwner::Unattributed
        };

        GroupedLine {
            text,
            owner,
            center_x,
        }
    }
}
