//! Single-pass accumulator over parsed messages.
//!
//! Everything that can be computed by folding one message at a time lives
//! here. Order-dependent structures (threads, gaps, replies) are derived
//! separately in [`crate::analyze::derive`] and [`crate::analyze::reply`].

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{Datelike, NaiveDate, Timelike};

use crate::analyze::text::{extract_domain, extract_emojis, split_off_urls, tokenize};
use crate::message::Message;

/// Per-author counters built up during the fold.
#[derive(Debug, Default, Clone)]
pub struct AuthorStats {
    pub message_count: u64,
    pub word_count: u64,
    pub unique_words: HashSet<String>,
}

/// All fold-derived state for one analysis run.
///
/// One value per pipeline invocation; nothing here is shared or `static`,
/// so concurrent analyses never observe each other.
#[derive(Debug, Default)]
pub struct Aggregates {
    pub total_messages: u64,
    pub total_words: u64,
    pub authors: HashMap<String, AuthorStats>,
    /// Messages per calendar date, ordered for stable day-span math.
    pub per_date: BTreeMap<NaiveDate, u64>,
    pub per_author_date: HashMap<String, BTreeMap<NaiveDate, u64>>,
    /// Messages per hour of day, index 0..=23.
    pub per_hour: [u64; 24],
    /// Messages per weekday, index 0 = Monday.
    pub per_weekday: [u64; 7],
    pub word_freq: HashMap<String, u64>,
    pub emoji_freq: HashMap<String, u64>,
    pub emoji_per_author: HashMap<String, u64>,
    pub domain_freq: HashMap<String, u64>,
    pub total_links: u64,
}

impl Aggregates {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one message into every counter.
    pub fn fold(&mut self, message: &Message) {
        self.total_messages += 1;
        *self.per_date.entry(message.date).or_insert(0) += 1;
        self.per_hour[message.time.hour() as usize] += 1;
        self.per_weekday[message.date.weekday().num_days_from_monday() as usize] += 1;

        self.per_author_date
            .entry(message.author.clone())
            .or_default()
            .entry(message.date)
            .and_modify(|n| *n += 1)
            .or_insert(1);

        let (clean_body, urls) = split_off_urls(&message.body);
        self.total_links += urls.len() as u64;
        for url in &urls {
            *self.domain_freq.entry(extract_domain(url)).or_insert(0) += 1;
        }

        let tokens = tokenize(&clean_body);
        let author = self
            .authors
            .entry(message.author.clone())
            .or_default();
        author.message_count += 1;
        author.word_count += tokens.len() as u64;
        self.total_words += tokens.len() as u64;
        for token in tokens {
            author.unique_words.insert(token.clone());
            *self.word_freq.entry(token).or_insert(0) += 1;
        }

        let emojis = extract_emojis(&message.body);
        if !emojis.is_empty() {
            *self
                .emoji_per_author
                .entry(message.author.clone())
                .or_insert(0) += emojis.len() as u64;
        }
        for emoji in emojis {
            *self.emoji_freq.entry(emoji).or_insert(0) += 1;
        }
    }

    /// Folds a whole slice in order.
    #[must_use]
    pub fn from_messages(messages: &[Message]) -> Self {
        let mut agg = Self::new();
        for message in messages {
            agg.fold(message);
        }
        agg
    }

    /// Number of distinct calendar dates seen.
    #[must_use]
    pub fn distinct_days(&self) -> u64 {
        self.per_date.len() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn msg(date: &str, time: &str, author: &str, body: &str) -> Message {
        Message::new(
            date.parse::<NaiveDate>().unwrap(),
            time.parse::<NaiveTime>().unwrap(),
            author.to_string(),
            body.to_string(),
        )
    }

    #[test]
    fn test_fold_basic_counts() {
        let messages = vec![
            msg("2024-03-01", "09:15:00", "Alice", "good morning everyone"),
            msg("2024-03-01", "09:16:00", "Bob", "morning Alice"),
            msg("2024-03-02", "22:40:00", "Alice", "late reply again"),
        ];
        let agg = Aggregates::from_messages(&messages);

        assert_eq!(agg.total_messages, 3);
        assert_eq!(agg.distinct_days(), 2);
        assert_eq!(agg.authors["Alice"].message_count, 2);
        assert_eq!(agg.authors["Bob"].message_count, 1);
        assert_eq!(agg.per_hour[9], 2);
        assert_eq!(agg.per_hour[22], 1);
        // 2024-03-01 is a Friday, 2024-03-02 a Saturday.
        assert_eq!(agg.per_weekday[4], 2);
        assert_eq!(agg.per_weekday[5], 1);
    }

    #[test]
    fn test_fold_word_frequency_and_unique() {
        let messages = vec![
            msg("2024-03-01", "10:00:00", "Alice", "coffee coffee tea"),
            msg("2024-03-01", "10:01:00", "Alice", "coffee beans"),
        ];
        let agg = Aggregates::from_messages(&messages);

        assert_eq!(agg.word_freq["coffee"], 3);
        assert_eq!(agg.authors["Alice"].word_count, 5);
        assert_eq!(agg.authors["Alice"].unique_words.len(), 3);
        assert!(agg.authors["Alice"].word_count >= agg.authors["Alice"].unique_words.len() as u64);
    }

    #[test]
    fn test_fold_links_and_domains() {
        let messages = vec![msg(
            "2024-03-01",
            "10:00:00",
            "Alice",
            "see https://www.example.com/a and https://example.com/b",
        )];
        let agg = Aggregates::from_messages(&messages);

        assert_eq!(agg.total_links, 2);
        assert_eq!(agg.domain_freq["example.com"], 2);
        // URLs never leak into the vocabulary.
        assert!(!agg.word_freq.keys().any(|w| w.contains("example")));
    }

    #[test]
    fn test_fold_emoji_counts() {
        let messages = vec![
            msg("2024-03-01", "10:00:00", "Alice", "party 🎉🎉"),
            msg("2024-03-01", "10:01:00", "Bob", "flag 🇩🇪"),
        ];
        let agg = Aggregates::from_messages(&messages);

        assert_eq!(agg.emoji_freq["🎉"], 2);
        assert_eq!(agg.emoji_freq["🇩🇪"], 1);
        assert_eq!(agg.emoji_per_author["Alice"], 2);
        assert_eq!(agg.emoji_per_author["Bob"], 1);
    }
}
