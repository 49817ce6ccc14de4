//! Header-line grammars.
//!
//! Chat exports have no formal schema; lines arrive in several mutually
//! ambiguous shapes depending on platform and locale. This module formalizes
//! them as an ordered list of grammars tried most-specific first — the first
//! structural match wins. Order matters: the unattributed grammar is a strict
//! superset of the authored ones, so trying it early would misclassify every
//! authored message as a system note.
//!
//! Recognized shapes:
//! - `1/2/23, 10:00 - Alice: hello` (authored, dash separator)
//! - `[1/15/24, 10:30:45 AM] Alice: hello` (authored, bracketed, no dash)
//! - `1/2/23, 10:00 - Messages and calls are end-to-end encrypted` (system)
//!
//! All patterns tolerate bidirectional text marks (U+200E/U+200F), optional
//! brackets around the date and time tokens, `-` or `–` separators, optional
//! seconds, and optional AM/PM suffixes.

use once_cell::sync::Lazy;
use regex::Regex;

/// Date token: 1-2 digit, separator, 1-2 digit, separator, 2-4 digit year.
const DATE_TOKEN: &str = r"\d{1,4}[-/.]\d{1,2}[-/.]\d{1,4}";

/// Time token: `H:MM`, optional seconds, optional am/pm marker.
const TIME_TOKEN: &str = r"\d{1,2}:\d{2}(?::\d{2})?(?:\s?[APap]\.?[Mm]\.?)?";

/// The header grammars, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderGrammar {
    /// `date, time - author: body`
    AuthoredDashed,
    /// `[date, time] author: body` (no dash between header and author)
    Authored,
    /// `date, time - body` with no author group; the line is a system note.
    Unattributed,
}

impl HeaderGrammar {
    /// Returns the regex pattern for this grammar.
    pub fn pattern(self) -> String {
        let prefix = format!(
            r"^[\u{{200E}}\u{{200F}}]?\[?({DATE_TOKEN})[,\]]?,?\s*[\u{{200E}}\u{{200F}}]?\[?({TIME_TOKEN})\]?"
        );
        match self {
            HeaderGrammar::AuthoredDashed => format!(r"{prefix}\s*[-–]\s*(.*?):\s*(.+)$"),
            HeaderGrammar::Authored => format!(r"{prefix}\s*(.*?):\s*(.+)$"),
            HeaderGrammar::Unattributed => format!(r"{prefix}\s*[-–]?\s*(.+)$"),
        }
    }

    /// All grammars, most-specific first.
    pub fn all() -> &'static [HeaderGrammar] {
        &[
            HeaderGrammar::AuthoredDashed,
            HeaderGrammar::Authored,
            HeaderGrammar::Unattributed,
        ]
    }

    /// Whether a match against this grammar carries an author group.
    pub fn has_author(self) -> bool {
        !matches!(self, HeaderGrammar::Unattributed)
    }
}

static COMPILED: Lazy<Vec<(HeaderGrammar, Regex)>> = Lazy::new(|| {
    HeaderGrammar::all()
        .iter()
        .map(|&g| (g, Regex::new(&g.pattern()).expect("header grammar regex")))
        .collect()
});

/// A structurally matched header line, tokens still unresolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLine {
    /// Raw date token as captured (brackets and marks already stripped).
    pub date_token: String,
    /// Raw time token as captured.
    pub time_token: String,
    /// Author display name; `None` when the line matched the unattributed
    /// grammar.
    pub author: Option<String>,
    /// Message body (or system-note text).
    pub body: String,
}

/// Classifies one trimmed, non-empty line against the grammar list.
///
/// Returns `None` when no grammar matches; the caller decides whether the
/// line is a continuation or unparseable noise.
pub fn classify_header(line: &str) -> Option<HeaderLine> {
    for (grammar, regex) in COMPILED.iter() {
        if let Some(caps) = regex.captures(line) {
            let date_token = strip_formatting(caps.get(1).map_or("", |m| m.as_str()));
            let time_token = strip_formatting(caps.get(2).map_or("", |m| m.as_str()));

            let (author, body) = if grammar.has_author() {
                let author = cleanup_text(&strip_formatting(caps.get(3).map_or("", |m| m.as_str())));
                let body = cleanup_text(&strip_formatting(caps.get(4).map_or("", |m| m.as_str())));
                // An empty author after cleanup means the capture swallowed
                // only direction marks; treat as unattributed.
                if author.is_empty() {
                    (None, body)
                } else {
                    (Some(author), body)
                }
            } else {
                (
                    None,
                    cleanup_text(&strip_formatting(caps.get(3).map_or("", |m| m.as_str()))),
                )
            };

            return Some(HeaderLine {
                date_token,
                time_token,
                author,
                body,
            });
        }
    }
    None
}

static EXCLUDED_BODY: Lazy<Regex> = Lazy::new(|| {
    // Media placeholders, deletion notices, and poll/location/contact cards
    // in the languages commonly seen in exports. These lines carry an author
    // but no countable text.
    Regex::new(
        r"(?ix)
        <?\s*(?:media|image|video|audio|sticker|gif|document)\s+omitted\s*>?
        | this\ message\ was\ deleted
        | you\ deleted\ this\ message
        | ^poll:
        | ^location:
        | live\ location\ shared
        | contact\ card\ omitted
        | <medien\ ausgeschlossen>
        | <multimedia\ omitido>
        | <media\ omessi?>
        | <arquivo\ de\ m\u{ed}dia\ oculto>
        | <m\u{e9}dias\ omis>
        | <без\ медиафайлов>
        ",
    )
    .expect("excluded body regex")
});

/// Returns `true` when a message body is a placeholder that must be counted
/// as a system note even though the header carried an author.
pub fn is_excluded_body(body: &str) -> bool {
    EXCLUDED_BODY.is_match(body)
}

static BIDI_MARKS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\u{200E}\u{200F}\u{202A}-\u{202E}]").expect("bidi regex"));

static CONTROL_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\u{0000}-\u{001F}\u{007F}-\u{009F}\u{200B}]").expect("ctrl regex"));

/// Strips directionality marks and enclosing brackets from a token.
pub fn strip_formatting(text: &str) -> String {
    let no_marks = BIDI_MARKS.replace_all(text, "");
    no_marks
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .trim()
        .to_string()
}

/// Removes control characters while preserving RTL text itself.
pub fn cleanup_text(text: &str) -> String {
    CONTROL_CHARS.replace_all(text, "").trim().to_string()
}
