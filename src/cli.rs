//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure
//! - [`OutputFormat`] - Output format options
//!
//! The input source reuses [`InputSource`] and the direction filter reuses
//! [`Direction`]; both parse from strings.

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::{ImportConfig, ParticipantNames, SpatialConfig};
use crate::core::{FilterConfig, OutputConfig};
use crate::error::Result;
use crate::format::InputSource;
use crate::message::Direction;

/// Import chat history from pasted text, export logs, JSON or OCR blocks
/// into one normalized, direction-labeled message list.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatsift")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatsift file chat.txt
    chatsift paste - -f jsonl < clipboard.txt
    chatsift file export.log --direction received -o theirs.csv
    chatsift blocks ocr.json --you Sam --them Alex -f json
    chatsift file chat.json --stats")]
pub struct Args {
    /// Input source: paste, file, screenshot (ocr) or blocks
    pub source: InputSource,

    /// Path to input file, or '-' for stdin
    pub input: String,

    /// Path to output file, or '-' for stdout
    #[arg(short, long, default_value = "-")]
    pub output: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: OutputFormat,

    /// Name for your own messages on the screenshot path
    #[arg(long, value_name = "NAME", default_value = "Me")]
    pub you: String,

    /// Name for the other party on the screenshot path
    #[arg(long, value_name = "NAME", default_value = "Them")]
    pub them: String,

    /// Drop OCR blocks below this confidence
    #[arg(long, value_name = "F", default_value_t = 0.5)]
    pub min_confidence: f32,

    /// Filter messages after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Filter messages before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Filter messages from specific sender
    #[arg(long, value_name = "SENDER")]
    pub from: Option<String>,

    /// Keep only sent or only received messages
    #[arg(long, value_name = "DIRECTION")]
    pub direction: Option<Direction>,

    /// Print conversation statistics to stdout instead of messages
    #[arg(long)]
    pub stats: bool,

    /// Include timestamps in output
    #[arg(short = 't', long)]
    pub timestamps: bool,

    /// Include message IDs in output
    #[arg(long)]
    pub ids: bool,

    /// Include time since the previous message in output
    #[arg(long)]
    pub deltas: bool,

    /// Include how each sender was determined in output
    #[arg(long)]
    pub attribution: bool,

    /// Log pipeline details to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Builds the import configuration from the flags.
    pub fn import_config(&self) -> ImportConfig {
        ImportConfig::new()
            .with_spatial(SpatialConfig::new().with_min_confidence(self.min_confidence))
            .with_names(ParticipantNames::new(&self.you, &self.them))
    }

    /// Builds the filter configuration from the flags.
    ///
    /// # Errors
    ///
    /// Returns [`ChatsiftError::InvalidDate`](crate::ChatsiftError::InvalidDate)
    /// for a malformed `--after` or `--before`.
    pub fn filter_config(&self) -> Result<FilterConfig> {
        let mut filter = FilterConfig::new();
        if let Some(ref after) = self.after {
            filter = filter.with_date_from(after)?;
        }
        if let Some(ref before) = self.before {
            filter = filter.with_date_to(before)?;
        }
        if let Some(ref from) = self.from {
            filter = filter.with_sender(from);
        }
        if let Some(direction) = self.direction {
            filter = filter.with_direction(direction);
        }
        Ok(filter)
    }

    /// Builds the output configuration from the flags.
    pub fn output_config(&self) -> OutputConfig {
        OutputConfig {
            include_ids: self.ids,
            include_timestamps: self.timestamps,
            include_deltas: self.deltas,
            include_attribution: self.attribution,
        }
    }
}

/// Output format options.
///
/// - [`Csv`](OutputFormat::Csv) - semicolon-delimited table
/// - [`Json`](OutputFormat::Json) - pretty-printed array
/// - [`Jsonl`](OutputFormat::Jsonl) - one JSON object per line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// CSV with semicolon delimiter (default)
    #[default]
    Csv,

    /// JSON array of messages
    Json,

    /// JSON Lines - one JSON object per line
    #[value(alias = "ndjson")]
    Jsonl,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "CSV"),
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Jsonl => write!(f, "JSONL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("chatsift").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["file", "chat.txt"]);
        assert_eq!(args.source, InputSource::File);
        assert_eq!(args.output, "-");
        assert_eq!(args.format, OutputFormat::Csv);
        assert_eq!(args.import_config(), ImportConfig::default());
        assert!(!args.filter_config().unwrap().is_active());
    }

    #[test]
    fn test_source_alias_and_direction() {
        let args = parse(&["ocr", "-", "--direction", "Received", "-f", "ndjson"]);
        assert_eq!(args.source, InputSource::Screenshot);
        assert_eq!(args.direction, Some(Direction::Received));
        assert_eq!(args.format, OutputFormat::Jsonl);
    }

    #[test]
    fn test_unknown_source_rejected() {
        assert!(Args::try_parse_from(["chatsift", "telegram", "x.json"]).is_err());
    }

    #[test]
    fn test_names_and_confidence() {
        let args = parse(&["blocks", "b.json", "--you", "Sam", "--them", "Alex", "--min-confidence", "0.8"]);
        let config = args.import_config();
        assert_eq!(config.names.you, "Sam");
        assert_eq!(config.names.them, "Alex");
        assert!((config.spatial.min_confidence - 0.8).abs() < f32::EPSILON);
    }

    #[test]
    fn test_bad_date_is_error() {
        let args = parse(&["file", "chat.txt", "--after", "yesterday"]);
        assert!(args.filter_config().unwrap_err().is_invalid_date());
    }

    #[test]
    fn test_output_flags() {
        let config = parse(&["file", "c.txt", "-t", "--ids", "--deltas"]).output_config();
        assert!(config.include_timestamps);
        assert!(config.include_ids);
        assert!(config.include_deltas);
        assert!(!config.include_attribution);
    }

    #[test]
    fn test_format_serde() {
        let json = serde_json::to_string(&OutputFormat::Jsonl).unwrap();
        assert_eq!(json, "\"jsonl\"");
    }
}
