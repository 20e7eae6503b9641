//! Normalization and post-processing.
//!
//! This module contains:
//! - [`normalizer`] - Direction inference, IDs and deltas
//! - [`stats`] - Conversation summary statistics
//! - [`filter`] - Message filtering by date, sender and direction
//! - [`models`] - Output configuration
//! - [`output`] - Format writers (CSV, JSON, JSONL)
//!
//! # Quick Start
//!
//! ```rust
//! use chatsift::ProvisionalMessage;
//! use chatsift::core::{ConversationStats, FilterConfig, apply_filters, normalize};
//!
//! let messages = normalize(vec![
//!     ProvisionalMessage::new("Alice", "hi"),
//!     ProvisionalMessage::new("Bob", "hello"),
//! ]);
//! let from_bob = apply_filters(messages, &FilterConfig::new().with_sender("bob"));
//! assert_eq!(ConversationStats::from_messages(&from_bob).received_count, 1);
//! ```

pub mod filter;
pub mod models;
pub mod normalizer;
pub mod output;
pub mod stats;

pub use filter::{FilterConfig, apply_filters};
pub use models::OutputConfig;
pub use normalizer::{infer_directions, normalize, normalize_at};
pub use stats::ConversationStats;

#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
pub use output::{to_json, to_jsonl, write_json, write_jsonl};
