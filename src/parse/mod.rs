//! Transcript parsing: line classification, date/time resolution, and
//! message assembly.
//!
//! - [`grammar`] — ordered header grammars and body-content classification
//! - [`datetime`] — date/time token resolution with plausibility guards
//! - [`scan`] — the forward pass assembling [`Message`](crate::Message) records

pub mod datetime;
pub mod grammar;
pub mod scan;

pub use datetime::{resolve_date, resolve_time};
pub use grammar::{HeaderGrammar, HeaderLine, classify_header, is_excluded_body};
pub use scan::{TranscriptScan, scan_transcript};
