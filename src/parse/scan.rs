//! Transcript scanning: raw text to ordered message records.
//!
//! One forward pass over the input lines. Each trimmed, non-empty line is
//! classified against the header grammars; matches become new [`Message`]
//! records (or system notes), everything else is appended to the previous
//! message body as a continuation. A single malformed line never aborts the
//! run — it is counted and kept for diagnostics.

use chrono::NaiveDate;
use tracing::warn;

use crate::error::{ChatscopeError, Result};
use crate::message::Message;
use crate::parse::datetime::{resolve_date, resolve_time};
use crate::parse::grammar::{classify_header, cleanup_text, is_excluded_body};

/// Result of one transcript scan.
#[derive(Debug, Clone, Default)]
pub struct TranscriptScan {
    /// Authored messages in source order.
    pub messages: Vec<Message>,

    /// Unattributed or content-excluded lines, kept for diagnostics only.
    /// These never contribute to aggregates.
    pub system_notes: Vec<String>,

    /// Lines that failed every grammar with no prior message to attach to,
    /// plus lines whose date or time token could not be resolved.
    pub skipped_lines: usize,

    /// Total non-empty lines examined.
    pub lines_scanned: usize,
}

/// Scans raw export text into ordered messages.
///
/// # Errors
///
/// - [`ChatscopeError::EmptyInput`] when the text is empty or whitespace.
/// - [`ChatscopeError::UnparseableFormat`] when the scan finishes with zero
///   messages, which suggests the wrong kind of file was provided.
pub fn scan_transcript(text: &str, reference: NaiveDate) -> Result<TranscriptScan> {
    if text.trim().is_empty() {
        return Err(ChatscopeError::EmptyInput);
    }

    let mut scan = TranscriptScan::default();

    for (line_no, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        scan.lines_scanned += 1;

        let Some(header) = classify_header(line) else {
            // Continuation of a multi-line message, or leading noise.
            if let Some(last) = scan.messages.last_mut() {
                last.body.push('\n');
                last.body.push_str(&cleanup_text(line));
            } else {
                warn!(line = line_no + 1, "unparseable line before any message");
                scan.system_notes.push(cleanup_text(line));
                scan.skipped_lines += 1;
            }
            continue;
        };

        let Some(date) = resolve_date(&header.date_token, reference) else {
            warn!(
                line = line_no + 1,
                token = %header.date_token,
                "invalid date token"
            );
            scan.skipped_lines += 1;
            continue;
        };
        let Some(time) = resolve_time(&header.time_token) else {
            warn!(
                line = line_no + 1,
                token = %header.time_token,
                "invalid time token"
            );
            scan.skipped_lines += 1;
            continue;
        };

        match header.author {
            // Media placeholders and deletion notices carry an author but no
            // countable content.
            Some(_) if is_excluded_body(&header.body) => {
                scan.system_notes.push(header.body);
            }
            Some(author) => {
                scan.messages
                    .push(Message::new(date, time, author, header.body));
            }
            None => {
                scan.system_notes.push(header.body);
            }
        }
    }

    if scan.messages.is_empty() {
        return Err(ChatscopeError::unparseable(scan.lines_scanned));
    }

    Ok(scan)
}
