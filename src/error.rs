//! Unified error types for chatscope.
//!
//! This module provides a single [`ChatscopeError`] enum that covers all error
//! cases in the library.
//!
//! # Error Handling Philosophy
//!
//! The pipeline distinguishes two severities:
//!
//! - **Per-line, recoverable**: a single line fails classification or
//!   date/time resolution. These never surface as errors; they are counted,
//!   collected as system notes, and reported as data on the final
//!   [`Report`](crate::report::Report).
//! - **Whole-run, fatal**: the input is empty, nothing in it could be parsed,
//!   or an unexpected internal failure occurred. These abort the run and are
//!   represented by the variants below.

use std::io;

use thiserror::Error;

/// A specialized [`Result`] type for chatscope operations.
///
/// # Example
///
/// ```rust
/// use chatscope::error::Result;
/// use chatscope::report::Report;
///
/// fn my_function() -> Result<Option<Report>> {
///     // ... operations that may fail
///     Ok(None)
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatscopeError>;

/// The error type for all chatscope operations.
///
/// Each variant carries enough context for a caller to surface an actionable
/// message to the end user.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatscopeError {
    /// The input text was empty or contained only whitespace.
    ///
    /// Raised before any aggregation begins. An empty export is a caller
    /// error, not something the pipeline silently accepts.
    #[error("The chat export is empty")]
    EmptyInput,

    /// The whole run yielded zero messages.
    ///
    /// Every line failed classification, which usually means the wrong kind
    /// of file was provided (not a chat export at all).
    #[error(
        "No messages could be recognized in the input ({lines_scanned} lines scanned). \
         Make sure the file is a chat export in text format."
    )]
    UnparseableFormat {
        /// Number of lines examined before giving up.
        lines_scanned: usize,
    },

    /// An unexpected internal failure escaped the pipeline.
    ///
    /// Callers must not partially apply a report when this is returned.
    #[error("Internal analysis error: {0}")]
    Internal(String),

    /// An I/O error occurred while reading input or writing the report.
    ///
    /// Only produced by the file-facing helpers and the CLI; the in-memory
    /// pipeline performs no I/O.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Failed to serialize the report to JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatscopeError {
    /// Creates an unparseable-format error.
    pub fn unparseable(lines_scanned: usize) -> Self {
        ChatscopeError::UnparseableFormat { lines_scanned }
    }

    /// Creates an internal error from any displayable cause.
    pub fn internal(cause: impl Into<String>) -> Self {
        ChatscopeError::Internal(cause.into())
    }

    /// Returns `true` if this is the empty-input error.
    pub fn is_empty_input(&self) -> bool {
        matches!(self, ChatscopeError::EmptyInput)
    }

    /// Returns `true` if this is an unparseable-format error.
    pub fn is_unparseable(&self) -> bool {
        matches!(self, ChatscopeError::UnparseableFormat { .. })
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatscopeError::Io(_))
    }
}

// ============================================================================
// Tests
// ============================================================================
