//! The core message record.
//!
//! [`Message`] is one authored, timestamped utterance reconstructed from the
//! raw export. It is immutable once the builder has assembled it; list order
//! follows the source file and is authoritative for thread, reply and
//! adjacency logic even where timestamps disagree.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// One authored chat message.
///
/// # Example
///
/// ```
/// use chatscope::Message;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let msg = Message::new(
///     NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
///     NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
///     "Alice",
///     "Hello!",
/// );
/// assert_eq!(msg.author, "Alice");
/// assert_eq!(msg.timestamp().to_string(), "2024-01-15 10:30:00");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Calendar date the message was sent.
    pub date: NaiveDate,

    /// Wall-clock time the message was sent. Seconds default to zero when
    /// the export omits them.
    pub time: NaiveTime,

    /// Display name of the author. Case-sensitive, not validated against a
    /// roster.
    pub author: String,

    /// Text content. Multi-line messages keep their embedded newlines.
    pub body: String,
}

impl Message {
    /// Creates a new message.
    pub fn new(
        date: NaiveDate,
        time: NaiveTime,
        author: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            date,
            time,
            author: author.into(),
            body: body.into(),
        }
    }

    /// Combines date and time into a single timestamp.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    /// Body length in grapheme clusters.
    ///
    /// Used for the length histogram and longest-message ranking so that
    /// emoji and non-Latin scripts count as one unit each.
    pub fn body_len(&self) -> usize {
        self.body.graphemes(true).count()
    }

    /// Returns `true` if the body is empty or whitespace-only.
    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }
}
