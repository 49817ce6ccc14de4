//! Body-text helpers: word tokenization, stop words, emoji and URL
//! extraction.
//!
//! All per-message derivations (words, emoji, links) live here so the
//! aggregator can compute them in one place without re-scanning bodies.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use stopwords::{Language, Spark, Stopwords};

/// Export-format noise that should never count as vocabulary: placeholder
/// fragments and system-notice words leaking through localized exports.
const EXPORT_EXTRAS: &[&str] = &[
    "<media",
    "omitted>",
    "omitted",
    "<attached:",
    "attached",
    "edited>",
    "deleted",
    "missed",
    "voice",
    "call",
    "location:",
    "weggelassen",
    "<medien",
    "ausgeschlossen>",
    "omitido",
    "omesso>",
];

/// Curated multi-language stop-word set, built once per process.
///
/// Union of several Spark word lists plus chat-export extras. Languages the
/// crate has no list for contribute nothing (empty default).
pub fn stopwords_set() -> &'static HashSet<&'static str> {
    static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
        let languages = [
            Language::English,
            Language::Spanish,
            Language::French,
            Language::German,
            Language::Italian,
            Language::Portuguese,
            Language::Russian,
            Language::Dutch,
        ];
        let mut set: HashSet<&'static str> = HashSet::new();
        for language in languages {
            set.extend(Spark::stopwords(language).unwrap_or_default().iter().copied());
        }
        set.extend(EXPORT_EXTRAS.iter().copied());
        set
    });
    &STOPWORDS
}

static URL_RE: Lazy<Regex> = Lazy::new(|| {
    // Common URL forms; stripped from bodies before word splitting and
    // counted separately.
    Regex::new(r"(?i)\bhttps?://\S+|\bwww\.[^\s]+").expect("url regex")
});

/// Word boundaries: whitespace plus the broad Unicode punctuation and symbol
/// classes, so non-Latin scripts are not merged into one giant token.
static WORD_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s\p{P}\p{S}]+").expect("word boundary regex"));

static EMOJI_RE: Lazy<Regex> = Lazy::new(|| {
    // Complete emoji sequences rather than lone code points: flag pairs,
    // skin-tone modifiers, variation selectors, and ZWJ joins.
    Regex::new(
        r"(?x)
        [\u{1F1E6}-\u{1F1FF}]{2}            # regional indicator pairs (flags)
        |
        (?:
            [\u{1F000}-\u{1FAFF}
             \u{2600}-\u{27BF}
             \u{2B00}-\u{2BFF}
             \u{2190}-\u{21FF}
             \u{2300}-\u{23FF}
             \u{FE0F}
             \u{203C}\u{2049}\u{00A9}\u{00AE}\u{2122}
             \u{3030}\u{303D}\u{3297}\u{3299}]
            [\u{1F3FB}-\u{1F3FF}]?          # optional skin tone
            \u{FE0F}?                       # optional variation selector
            (?:
                \u{200D}                    # ZWJ join
                [\u{1F000}-\u{1FAFF}\u{2600}-\u{27BF}\u{2640}\u{2642}\u{2695}\u{2696}\u{2708}\u{2764}]
                [\u{1F3FB}-\u{1F3FF}]?
                \u{FE0F}?
            )*
        )
        ",
    )
    .expect("emoji regex")
});

/// Removes URLs from a body and returns the cleaned text together with the
/// raw URL matches.
pub fn split_off_urls(body: &str) -> (String, Vec<String>) {
    let urls: Vec<String> = URL_RE
        .find_iter(body)
        .map(|m| m.as_str().to_string())
        .collect();
    if urls.is_empty() {
        return (body.to_string(), urls);
    }
    (URL_RE.replace_all(body, " ").into_owned(), urls)
}

/// Tokenizes a URL-free body into countable words.
///
/// Lowercased; pure-digit tokens, stop words, and tokens shorter than two
/// characters are discarded.
pub fn tokenize(body: &str) -> Vec<String> {
    let stop = stopwords_set();
    WORD_BOUNDARY
        .split(body)
        .filter_map(|raw| {
            if raw.is_empty() {
                return None;
            }
            let token = raw.to_lowercase();
            if token.chars().count() < 2 {
                return None;
            }
            if token.chars().all(|c| c.is_ascii_digit()) {
                return None;
            }
            if stop.contains(token.as_str()) {
                return None;
            }
            Some(token)
        })
        .collect()
}

/// Extracts complete emoji sequences from a body. One body may contribute
/// several, including repeats.
pub fn extract_emojis(body: &str) -> Vec<String> {
    EMOJI_RE
        .find_iter(body)
        .map(|m| m.as_str().to_string())
        // A bare variation selector can slip through the first alternation.
        .filter(|s| s != "\u{FE0F}")
        .collect()
}

/// Extracts the host part of a URL, stripping a leading `www.`.
///
/// Malformed URLs fall back to the raw matched string rather than failing.
pub fn extract_domain(url: &str) -> String {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .or_else(|| url.strip_prefix("HTTPS://"))
        .or_else(|| url.strip_prefix("HTTP://"))
        .unwrap_or(url);

    let authority = rest
        .split(['/', '?', '#'])
        .next()
        .unwrap_or(rest);

    // Drop credentials and port if present.
    let host = authority.rsplit('@').next().unwrap_or(authority);
    let host = host.split(':').next().unwrap_or(host);

    let host = host.strip_prefix("www.").unwrap_or(host);

    if host.is_empty() {
        url.to_string()
    } else {
        host.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopwords_cover_multiple_languages() {
        let stop = stopwords_set();
        assert!(stop.contains("the"));
        assert!(stop.contains("omitted"));
        assert!(!stop.contains("unicorn"));
    }

    #[test]
    fn test_split_off_urls() {
        let (clean, urls) = split_off_urls("look at https://example.com/page and www.foo.org now");
        assert_eq!(urls.len(), 2);
        assert!(!clean.contains("example.com"));
        assert!(clean.contains("look"));
        assert!(clean.contains("now"));
    }

    #[test]
    fn test_tokenize_basic() {
        let tokens = tokenize("Hello, wonderful world!");
        assert_eq!(tokens, vec!["hello", "wonderful", "world"]);
    }

    #[test]
    fn test_tokenize_filters_digits_and_short() {
        let tokens = tokenize("a 42 kiwi 100 pizza");
        assert_eq!(tokens, vec!["kiwi", "pizza"]);
    }

    #[test]
    fn test_tokenize_stopwords_removed() {
        let tokens = tokenize("the quick brown fox and the lazy dog");
        assert!(!tokens.contains(&"the".to_string()));
        assert!(!tokens.contains(&"and".to_string()));
        assert!(tokens.contains(&"quick".to_string()));
    }

    #[test]
    fn test_tokenize_non_latin_scripts() {
        let tokens = tokenize("привет、мир。こんにちは！");
        // Ideographic punctuation splits the scripts apart.
        assert!(tokens.contains(&"привет".to_string()));
        assert!(tokens.contains(&"мир".to_string()));
        assert!(tokens.contains(&"こんにちは".to_string()));
    }

    #[test]
    fn test_extract_emojis_simple() {
        assert_eq!(extract_emojis("nice 🎉🎉"), vec!["🎉", "🎉"]);
        assert!(extract_emojis("no emoji here").is_empty());
    }

    #[test]
    fn test_extract_emojis_sequences() {
        // Flag = regional indicator pair, family = ZWJ sequence.
        assert_eq!(extract_emojis("🇩🇪 wins"), vec!["🇩🇪"]);
        assert_eq!(extract_emojis("👨‍👩‍👧‍👦 trip"), vec!["👨‍👩‍👧‍👦"]);
    }

    #[test]
    fn test_extract_domain() {
        assert_eq!(extract_domain("https://www.example.com/page?q=1"), "example.com");
        assert_eq!(extract_domain("http://sub.domain.org/x"), "sub.domain.org");
        assert_eq!(extract_domain("https://host:8080/path"), "host");
        assert_eq!(extract_domain("https://user@host.net/a"), "host.net");
    }

    #[test]
    fn test_extract_domain_malformed_falls_back() {
        assert_eq!(extract_domain("https://"), "https://");
        assert_eq!(extract_domain("http://///"), "http://///");
    }
}
