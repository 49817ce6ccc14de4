//! Order-dependent structures extracted from the message sequence.
//!
//! Unlike the fold in [`crate::analyze::aggregate`], everything here cares
//! about adjacency: runs of one author, gaps between neighbours, date
//! transitions, and who answered whom how fast.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::config::AnalyzerConfig;
use crate::message::Message;

/// One entry in the longest-messages leaderboard.
#[derive(Debug, Clone, Serialize)]
pub struct LongestMessage {
    pub author: String,
    pub length: usize,
    pub body: String,
}

/// Top messages by body length, longest first. Ties keep transcript order.
#[must_use]
pub fn longest_messages(messages: &[Message], limit: usize) -> Vec<LongestMessage> {
    let mut ranked: Vec<&Message> = messages.iter().collect();
    ranked.sort_by(|a, b| b.body_len().cmp(&a.body_len()));
    ranked
        .into_iter()
        .take(limit)
        .map(|m| LongestMessage {
            author: m.author.clone(),
            length: m.body_len(),
            body: m.body.clone(),
        })
        .collect()
}

/// Message-length distribution over fixed bucket boundaries.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct LengthHistogram {
    #[serde(rename = "0-10")]
    pub up_to_10: u64,
    #[serde(rename = "11-20")]
    pub up_to_20: u64,
    #[serde(rename = "21-50")]
    pub up_to_50: u64,
    #[serde(rename = "51-100")]
    pub up_to_100: u64,
    #[serde(rename = "101+")]
    pub over_100: u64,
}

impl LengthHistogram {
    pub fn record(&mut self, length: usize) {
        match length {
            0..=10 => self.up_to_10 += 1,
            11..=20 => self.up_to_20 += 1,
            21..=50 => self.up_to_50 += 1,
            51..=100 => self.up_to_100 += 1,
            _ => self.over_100 += 1,
        }
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.up_to_10 + self.up_to_20 + self.up_to_50 + self.up_to_100 + self.over_100
    }
}

#[must_use]
pub fn length_histogram(messages: &[Message]) -> LengthHistogram {
    let mut histogram = LengthHistogram::default();
    for message in messages {
        histogram.record(message.body_len());
    }
    histogram
}

/// A maximal run of consecutive messages by one author.
#[derive(Debug, Clone, Serialize)]
pub struct MessageThread {
    pub author: String,
    pub length: usize,
    pub started_at: NaiveDateTime,
    /// Bodies of the run, in transcript order.
    pub bodies: Vec<String>,
}

/// Same-author runs of length >= 2, longest first. The final run is flushed
/// even when the transcript ends mid-run.
#[must_use]
pub fn threads(messages: &[Message]) -> Vec<MessageThread> {
    let mut out = Vec::new();
    let mut run_start = 0usize;
    for i in 1..=messages.len() {
        let run_ended = i == messages.len() || messages[i].author != messages[run_start].author;
        if run_ended {
            let length = i - run_start;
            if length >= 2 {
                out.push(MessageThread {
                    author: messages[run_start].author.clone(),
                    length,
                    started_at: messages[run_start].timestamp(),
                    bodies: messages[run_start..i].iter().map(|m| m.body.clone()).collect(),
                });
            }
            run_start = i;
        }
    }
    out.sort_by(|a, b| b.length.cmp(&a.length));
    out
}

/// A silence between two adjacent messages.
#[derive(Debug, Clone, Serialize)]
pub struct InactivityGap {
    pub last_author: String,
    pub last_at: NaiveDateTime,
    pub next_author: String,
    pub next_at: NaiveDateTime,
    pub gap_hours: f64,
}

/// Every adjacent-message gap within the configured window, in transcript
/// order.
///
/// Gaps below `inactivity_min_hours` are routine pauses; gaps at or above
/// `inactivity_max_hours` are treated as parse artifacts and ignored, as are
/// non-positive gaps from out-of-order timestamps.
#[must_use]
pub fn inactivity_periods(messages: &[Message], config: &AnalyzerConfig) -> Vec<InactivityGap> {
    let mut periods = Vec::new();
    for pair in messages.windows(2) {
        let secs = (pair[1].timestamp() - pair[0].timestamp()).num_seconds();
        if secs <= 0 {
            continue;
        }
        let hours = secs as f64 / 3600.0;
        if hours < config.inactivity_min_hours || hours >= config.inactivity_max_hours {
            continue;
        }
        periods.push(InactivityGap {
            last_author: pair[0].author.clone(),
            last_at: pair[0].timestamp(),
            next_author: pair[1].author.clone(),
            next_at: pair[1].timestamp(),
            gap_hours: hours,
        });
    }
    periods
}

/// The longest of the collected gaps; the earliest wins ties.
#[must_use]
pub fn biggest_inactivity(periods: &[InactivityGap]) -> Option<InactivityGap> {
    periods
        .iter()
        .fold(None::<&InactivityGap>, |best, gap| match best {
            Some(b) if b.gap_hours >= gap.gap_hours => best,
            _ => Some(gap),
        })
        .cloned()
}

/// Who opens and who closes calendar days.
#[derive(Debug, Default, Clone)]
pub struct DayBoundaries {
    pub starts: HashMap<String, u64>,
    pub closes: HashMap<String, u64>,
}

/// Credits day starts and closes across calendar-date transitions. The very
/// first message starts its day and closes nothing; the final message closes
/// nothing either, matching "closed by the last word before a new day".
#[must_use]
pub fn day_boundaries(messages: &[Message]) -> DayBoundaries {
    let mut boundaries = DayBoundaries::default();
    let Some(first) = messages.first() else {
        return boundaries;
    };
    *boundaries.starts.entry(first.author.clone()).or_insert(0) += 1;
    for pair in messages.windows(2) {
        if pair[1].date != pair[0].date {
            *boundaries.starts.entry(pair[1].author.clone()).or_insert(0) += 1;
            *boundaries.closes.entry(pair[0].author.clone()).or_insert(0) += 1;
        }
    }
    boundaries
}

/// Response-delay distribution over fixed bucket boundaries.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseBuckets {
    #[serde(rename = "0-10s")]
    pub under_10s: u64,
    #[serde(rename = "10-30s")]
    pub under_30s: u64,
    #[serde(rename = "30s-1m")]
    pub under_1m: u64,
    #[serde(rename = "1-5m")]
    pub under_5m: u64,
    #[serde(rename = "5-30m")]
    pub under_30m: u64,
    #[serde(rename = "30m-1h")]
    pub under_1h: u64,
    #[serde(rename = "1h+")]
    pub over_1h: u64,
}

impl ResponseBuckets {
    fn record(&mut self, secs: i64) {
        match secs {
            ..10 => self.under_10s += 1,
            10..30 => self.under_30s += 1,
            30..60 => self.under_1m += 1,
            60..300 => self.under_5m += 1,
            300..1800 => self.under_30m += 1,
            1800..3600 => self.under_1h += 1,
            _ => self.over_1h += 1,
        }
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.under_10s
            + self.under_30s
            + self.under_1m
            + self.under_5m
            + self.under_30m
            + self.under_1h
            + self.over_1h
    }
}

/// One author's average response delay.
#[derive(Debug, Clone, Serialize)]
pub struct ResponderAverage {
    pub author: String,
    pub average_secs: f64,
    pub samples: u64,
}

/// Response-time summary for the whole transcript.
#[derive(Debug, Default, Clone, Serialize)]
pub struct ResponseStats {
    pub sample_count: u64,
    pub average_secs: f64,
    pub fastest_responders: Vec<ResponderAverage>,
    pub distribution: ResponseBuckets,
}

/// Measures how fast authors answer each other.
///
/// A sample is an adjacent pair with different authors and a strictly
/// positive delay below `response_window_secs`; anything longer is a new
/// conversation, not a response. Fastest responders need at least two
/// samples so a single lucky reply never tops the board.
#[must_use]
pub fn response_stats(messages: &[Message], config: &AnalyzerConfig) -> ResponseStats {
    let mut stats = ResponseStats::default();
    let mut per_author: HashMap<String, (i64, u64)> = HashMap::new();
    let mut total_secs: i64 = 0;

    for pair in messages.windows(2) {
        if pair[0].author == pair[1].author {
            continue;
        }
        let secs = (pair[1].timestamp() - pair[0].timestamp()).num_seconds();
        if secs <= 0 || secs >= config.response_window_secs {
            continue;
        }
        stats.sample_count += 1;
        total_secs += secs;
        stats.distribution.record(secs);
        let entry = per_author.entry(pair[1].author.clone()).or_insert((0, 0));
        entry.0 += secs;
        entry.1 += 1;
    }

    if stats.sample_count > 0 {
        stats.average_secs = total_secs as f64 / stats.sample_count as f64;
    }

    let mut responders: Vec<ResponderAverage> = per_author
        .into_iter()
        .filter(|(_, (_, samples))| *samples >= 2)
        .map(|(author, (sum, samples))| ResponderAverage {
            author,
            average_secs: sum as f64 / samples as f64,
            samples,
        })
        .collect();
    responders.sort_by(|a, b| {
        a.average_secs
            .total_cmp(&b.average_secs)
            .then_with(|| a.author.cmp(&b.author))
    });
    responders.truncate(config.top_responders);
    stats.fastest_responders = responders;

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn msg(date: &str, time: &str, author: &str, body: &str) -> Message {
        Message::new(
            date.parse::<NaiveDate>().unwrap(),
            time.parse::<NaiveTime>().unwrap(),
            author.to_string(),
            body.to_string(),
        )
    }

    #[test]
    fn test_longest_messages_stable_ties() {
        let messages = vec![
            msg("2024-03-01", "10:00:00", "Alice", "aaaa"),
            msg("2024-03-01", "10:01:00", "Bob", "bbbb"),
            msg("2024-03-01", "10:02:00", "Carol", "cc"),
        ];
        let top = longest_messages(&messages, 2);
        assert_eq!(top.len(), 2);
        // Equal lengths keep transcript order.
        assert_eq!(top[0].author, "Alice");
        assert_eq!(top[1].author, "Bob");
    }

    #[test]
    fn test_length_histogram_boundaries() {
        let mut histogram = LengthHistogram::default();
        for length in [0, 10, 11, 20, 21, 50, 51, 100, 101] {
            histogram.record(length);
        }
        assert_eq!(histogram.up_to_10, 2);
        assert_eq!(histogram.up_to_20, 2);
        assert_eq!(histogram.up_to_50, 2);
        assert_eq!(histogram.up_to_100, 2);
        assert_eq!(histogram.over_100, 1);
        assert_eq!(histogram.total(), 9);
    }

    #[test]
    fn test_threads_min_length_and_final_flush() {
        let messages = vec![
            msg("2024-03-01", "10:00:00", "Alice", "one"),
            msg("2024-03-01", "10:01:00", "Alice", "two"),
            msg("2024-03-01", "10:02:00", "Bob", "solo"),
            msg("2024-03-01", "10:03:00", "Alice", "a"),
            msg("2024-03-01", "10:04:00", "Alice", "b"),
            msg("2024-03-01", "10:05:00", "Alice", "c"),
        ];
        let runs = threads(&messages);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].author, "Alice");
        assert_eq!(runs[0].length, 3);
        assert_eq!(runs[0].bodies, vec!["a", "b", "c"]);
        assert_eq!(runs[1].length, 2);
        assert_eq!(runs[1].bodies, vec!["one", "two"]);
        assert!(runs.iter().all(|t| t.length >= 2));
    }

    #[test]
    fn test_inactivity_window() {
        let config = AnalyzerConfig::default();
        let messages = vec![
            msg("2024-03-01", "10:00:00", "Alice", "hi"),
            msg("2024-03-01", "14:00:00", "Bob", "4h gap, below minimum"),
            msg("2024-03-02", "02:00:00", "Alice", "12h gap, counted"),
        ];
        let periods = inactivity_periods(&messages, &config);
        assert_eq!(periods.len(), 1);
        let gap = biggest_inactivity(&periods).unwrap();
        assert_eq!(gap.last_author, "Bob");
        assert_eq!(gap.next_author, "Alice");
        assert!((gap.gap_hours - 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_inactivity_keeps_every_qualifying_gap() {
        let config = AnalyzerConfig::default();
        let messages = vec![
            msg("2024-03-01", "10:00:00", "Alice", "hi"),
            msg("2024-03-01", "18:00:00", "Bob", "8h later"),
            msg("2024-03-01", "18:05:00", "Alice", "quick reply"),
            msg("2024-03-02", "06:05:00", "Bob", "12h later"),
            msg("2024-03-02", "13:05:00", "Alice", "7h later"),
        ];
        let periods = inactivity_periods(&messages, &config);
        let hours: Vec<f64> = periods.iter().map(|p| p.gap_hours).collect();
        assert_eq!(hours, vec![8.0, 12.0, 7.0]);

        let biggest = biggest_inactivity(&periods).unwrap();
        assert!((biggest.gap_hours - 12.0).abs() < f64::EPSILON);
        assert_eq!(biggest.next_author, "Bob");
    }

    #[test]
    fn test_inactivity_boundaries() {
        let config = AnalyzerConfig::default();
        // Exactly 6h counts, exactly the max does not.
        let at_min = vec![
            msg("2024-03-01", "10:00:00", "Alice", "hi"),
            msg("2024-03-01", "16:00:00", "Bob", "later"),
        ];
        assert_eq!(inactivity_periods(&at_min, &config).len(), 1);

        let at_max = vec![
            msg("2024-03-01", "10:00:00", "Alice", "hi"),
            msg("2025-03-01", "10:00:00", "Bob", "a year later"),
        ];
        assert!(inactivity_periods(&at_max, &config).is_empty());
        assert!(biggest_inactivity(&[]).is_none());
    }

    #[test]
    fn test_day_boundaries() {
        let messages = vec![
            msg("2024-03-01", "10:00:00", "Alice", "first"),
            msg("2024-03-01", "23:00:00", "Bob", "last of friday"),
            msg("2024-03-02", "08:00:00", "Carol", "saturday opener"),
        ];
        let boundaries = day_boundaries(&messages);
        assert_eq!(boundaries.starts["Alice"], 1);
        assert_eq!(boundaries.starts["Carol"], 1);
        assert_eq!(boundaries.closes["Bob"], 1);
        assert!(!boundaries.closes.contains_key("Carol"));
    }

    #[test]
    fn test_response_stats_samples() {
        let config = AnalyzerConfig::default();
        let messages = vec![
            msg("2024-03-01", "10:00:00", "Alice", "question"),
            msg("2024-03-01", "10:05:00", "Bob", "answer in 300s"),
            msg("2024-03-01", "10:05:10", "Alice", "reply in 10s"),
            msg("2024-03-01", "10:05:20", "Bob", "reply in 10s"),
            msg("2024-03-02", "10:05:20", "Alice", "a day later, no sample"),
        ];
        let stats = response_stats(&messages, &config);
        assert_eq!(stats.sample_count, 3);
        assert!((stats.average_secs - (300.0 + 10.0 + 10.0) / 3.0).abs() < 1e-9);
        assert_eq!(stats.distribution.under_30s, 2);
        // Exactly five minutes lands in the 5-30m bucket.
        assert_eq!(stats.distribution.under_30m, 1);
        assert_eq!(stats.distribution.total(), stats.sample_count);
    }

    #[test]
    fn test_fastest_responders_need_two_samples() {
        let config = AnalyzerConfig::default();
        let messages = vec![
            msg("2024-03-01", "10:00:00", "Alice", "q1"),
            msg("2024-03-01", "10:00:05", "Bob", "a1"),
            msg("2024-03-01", "10:01:00", "Alice", "q2"),
            msg("2024-03-01", "10:01:15", "Bob", "a2"),
            msg("2024-03-01", "10:02:00", "Carol", "only one sample"),
        ];
        let stats = response_stats(&messages, &config);
        assert_eq!(stats.fastest_responders.len(), 1);
        assert_eq!(stats.fastest_responders[0].author, "Bob");
        assert_eq!(stats.fastest_responders[0].samples, 2);
        assert!((stats.fastest_responders[0].average_secs - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_same_author_pairs_are_not_samples() {
        let config = AnalyzerConfig::default();
        let messages = vec![
            msg("2024-03-01", "10:00:00", "Alice", "one"),
            msg("2024-03-01", "10:00:05", "Alice", "two"),
        ];
        let stats = response_stats(&messages, &config);
        assert_eq!(stats.sample_count, 0);
        assert!((stats.average_secs).abs() < f64::EPSILON);
    }
}
