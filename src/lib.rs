//! # Chatscope
//!
//! A Rust library for turning plain-text chat exports into a structured
//! analytics report.
//!
//! ## Overview
//!
//! Chatscope reads message-per-line transcripts of the kind messaging apps
//! produce when you export a conversation, tolerates their many regional
//! quirks (date component orders, two-digit years, 12-hour clocks,
//! right-to-left marks, multi-line messages), and computes:
//!
//! - **Activity** — per-author totals, hour and weekday histograms, busiest
//!   days, average messages per day
//! - **Vocabulary** — top words after stop-word filtering, unique-word
//!   counts, emoji leaderboards, shared-link domains
//! - **Conversation shape** — same-author threads, longest messages, the
//!   biggest silence, who opens and closes each day
//! - **Responsiveness** — response-time averages, a delay distribution, and
//!   the fastest responders
//!
//! Bad lines never abort a run: unrecognized or media-placeholder lines are
//! reported as skip counts and system notes in the final report.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatscope::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let transcript = "\
//! 01/02/2024, 09:15 - Alice: Good morning!
//! 01/02/2024, 09:16 - Bob: Morning! Coffee?";
//!
//!     let report = ChatAnalyzer::new().analyze(transcript)?;
//!     assert_eq!(report.total_messages, 2);
//!     println!("{}", serde_json::to_string_pretty(&report)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Reproducible runs
//!
//! Date plausibility checks compare against "today". Pin the reference date
//! through [`AnalyzerConfig`](config::AnalyzerConfig) to make runs
//! reproducible:
//!
//! ```rust
//! use chatscope::{AnalyzerConfig, ChatAnalyzer};
//! use chrono::NaiveDate;
//!
//! let config = AnalyzerConfig::new()
//!     .with_reference_date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
//! let analyzer = ChatAnalyzer::with_config(config);
//! # let _ = analyzer;
//! ```
//!
//! ## Module Structure
//!
//! - [`pipeline`] — [`ChatAnalyzer`], the main entry point
//! - [`config`] — [`AnalyzerConfig`](config::AnalyzerConfig) thresholds and
//!   list sizes
//! - [`message`] — the [`Message`] record
//! - [`parse`] — line grammars, date/time normalization, transcript scanning
//! - [`analyze`] — aggregation fold, derived structures, reply attribution
//! - [`report`] — the serializable [`Report`](report::Report)
//! - [`error`] — [`ChatscopeError`] and [`Result`]
//! - [`prelude`] — convenient re-exports

pub mod analyze;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod message;
pub mod parse;
pub mod pipeline;
pub mod report;

// Re-export the main types at the crate root for convenience
pub use config::AnalyzerConfig;
pub use error::{ChatscopeError, Result};
pub use message::Message;
pub use pipeline::ChatAnalyzer;
pub use report::Report;

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use chatscope::prelude::*;
/// ```
pub mod prelude {
    // Entry point and configuration
    pub use crate::config::AnalyzerConfig;
    pub use crate::pipeline::ChatAnalyzer;

    // Core message type
    pub use crate::message::Message;

    // Error types
    pub use crate::error::{ChatscopeError, Result};

    // Report and its building blocks
    pub use crate::report::{AuthorSummary, CountedItem, LinkStats, Report, WeekdayActivity};

    // Derived structures referenced from the report
    pub use crate::analyze::{
        InactivityGap, LengthHistogram, LongestMessage, MessageThread, RepliedMessage,
        ResponderAverage, ResponseStats,
    };
}
