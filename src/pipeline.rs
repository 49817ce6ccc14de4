//! The analysis pipeline.
//!
//! [`ChatAnalyzer`] ties the stages together: scan the transcript into
//! messages, fold the aggregates, derive the ordered structures, and
//! assemble the report. Synchronous, no I/O, no shared state between runs.
//!
//! # Example
//!
//! ```rust
//! use chatscope::ChatAnalyzer;
//!
//! let transcript = "01/02/2024, 09:15 - Alice: Good morning!\n\
//!                   01/02/2024, 09:16 - Bob: Morning, Alice.";
//! let report = ChatAnalyzer::new().analyze(transcript)?;
//! assert_eq!(report.total_messages, 2);
//! # Ok::<(), chatscope::ChatscopeError>(())
//! ```

use tracing::debug;

use crate::config::AnalyzerConfig;
use crate::error::Result;
use crate::parse::scan_transcript;
use crate::report::Report;

/// Runs the full analysis over a transcript string.
#[derive(Debug, Clone, Default)]
pub struct ChatAnalyzer {
    config: AnalyzerConfig,
}

impl ChatAnalyzer {
    /// Creates an analyzer with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an analyzer with a custom configuration.
    #[must_use]
    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyzes a transcript and produces a [`Report`].
    ///
    /// # Errors
    ///
    /// Returns [`ChatscopeError::EmptyInput`](crate::ChatscopeError::EmptyInput)
    /// for empty or whitespace-only input, and
    /// [`ChatscopeError::UnparseableFormat`](crate::ChatscopeError::UnparseableFormat)
    /// when no line of the input can be read as a message. Individual bad
    /// lines are never errors; they show up in the report as skip counts and
    /// system notes.
    pub fn analyze(&self, text: &str) -> Result<Report> {
        let reference = self.config.resolve_reference_date();
        let scan = scan_transcript(text, reference)?;
        debug!(
            messages = scan.messages.len(),
            skipped = scan.skipped_lines,
            system_notes = scan.system_notes.len(),
            "transcript scanned"
        );
        Ok(Report::assemble(scan, &self.config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChatscopeError;
    use chrono::NaiveDate;

    fn pinned() -> AnalyzerConfig {
        AnalyzerConfig::new()
            .with_reference_date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
    }

    #[test]
    fn test_analyze_two_author_exchange() {
        let transcript = "\
01/02/2024, 09:15 - Alice: Good morning!
01/02/2024, 09:20 - Bob: Morning, want coffee?
01/02/2024, 09:21 - Alice: Always.";
        let report = ChatAnalyzer::with_config(pinned()).analyze(transcript).unwrap();

        assert_eq!(report.total_messages, 3);
        assert_eq!(report.authors.len(), 2);
        assert_eq!(report.most_active_author.as_deref(), Some("Alice"));
        assert_eq!(report.response_times.sample_count, 2);
    }

    #[test]
    fn test_analyze_empty_input() {
        let err = ChatAnalyzer::new().analyze("   \n\t  ").unwrap_err();
        assert!(matches!(err, ChatscopeError::EmptyInput));
    }

    #[test]
    fn test_analyze_unparseable() {
        let err = ChatAnalyzer::new()
            .analyze("not a chat export\njust prose\n")
            .unwrap_err();
        assert!(matches!(
            err,
            ChatscopeError::UnparseableFormat { lines_scanned: 2 }
        ));
    }

    #[test]
    fn test_analyze_is_deterministic_with_pinned_date() {
        let transcript = "1/2/99, 10:00 - Alice: vintage message";
        let analyzer = ChatAnalyzer::with_config(pinned());
        let first = analyzer.analyze(transcript).unwrap();
        let second = analyzer.analyze(transcript).unwrap();

        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        // Two-digit year rolled back to the previous century.
        assert_eq!(
            first.first_message_at.unwrap().date(),
            NaiveDate::from_ymd_opt(1999, 1, 2).unwrap()
        );
    }
}
