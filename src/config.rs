//! Analyzer configuration.
//!
//! [`AnalyzerConfig`] collects the thresholds and list sizes used by the
//! pipeline. Defaults match the reference behavior; everything is adjustable
//! through the builder methods.
//!
//! # Example
//!
//! ```rust
//! use chatscope::config::AnalyzerConfig;
//!
//! let config = AnalyzerConfig::new()
//!     .with_inactivity_min_hours(12.0)
//!     .with_reply_lookback(20);
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Configuration for one analysis run.
///
/// The `reference_date` field pins "now" for the two-digit-year correction
/// and year-range guard, which makes runs reproducible in tests. When `None`,
/// today's date is used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Pinned "today" for date plausibility checks (default: the current date).
    pub reference_date: Option<NaiveDate>,

    /// Minimum adjacent-message gap counted as an inactivity period, in
    /// hours (default: 6, inclusive).
    pub inactivity_min_hours: f64,

    /// Upper bound on a believable gap, in hours (default: 8760 = 1 year,
    /// exclusive). Gaps at or above this suggest corrupted timestamps.
    pub inactivity_max_hours: f64,

    /// Maximum gap still treated as "the same conversation" when measuring
    /// response times, in seconds (default: 43200 = 12 hours, exclusive).
    pub response_window_secs: i64,

    /// How many messages to search backward when attributing a reply
    /// (default: 10).
    pub reply_lookback: usize,

    /// Number of top common words retained (default: 10).
    pub top_words: usize,

    /// Number of top emoji retained (default: 10).
    pub top_emojis: usize,

    /// Number of longest messages retained (default: 5).
    pub top_longest_messages: usize,

    /// Number of most-replied messages retained (default: 3).
    pub top_replied: usize,

    /// Number of fastest responders retained (default: 5).
    pub top_responders: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            reference_date: None,
            inactivity_min_hours: 6.0,
            inactivity_max_hours: 8760.0,
            response_window_secs: 12 * 3600,
            reply_lookback: 10,
            top_words: 10,
            top_emojis: 10,
            top_longest_messages: 5,
            top_replied: 3,
            top_responders: 5,
        }
    }
}

impl AnalyzerConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pins the reference date used for date plausibility checks.
    #[must_use]
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    /// Sets the minimum inactivity gap in hours.
    #[must_use]
    pub fn with_inactivity_min_hours(mut self, hours: f64) -> Self {
        self.inactivity_min_hours = hours;
        self
    }

    /// Sets the maximum believable gap in hours.
    #[must_use]
    pub fn with_inactivity_max_hours(mut self, hours: f64) -> Self {
        self.inactivity_max_hours = hours;
        self
    }

    /// Sets the response-time conversation window in seconds.
    #[must_use]
    pub fn with_response_window_secs(mut self, secs: i64) -> Self {
        self.response_window_secs = secs;
        self
    }

    /// Sets the reply-attribution lookback window.
    #[must_use]
    pub fn with_reply_lookback(mut self, lookback: usize) -> Self {
        self.reply_lookback = lookback;
        self
    }

    /// Sets how many top common words are retained.
    #[must_use]
    pub fn with_top_words(mut self, n: usize) -> Self {
        self.top_words = n;
        self
    }

    /// Sets how many top emoji are retained.
    #[must_use]
    pub fn with_top_emojis(mut self, n: usize) -> Self {
        self.top_emojis = n;
        self
    }

    /// Resolves the reference date, falling back to today.
    pub fn resolve_reference_date(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}
