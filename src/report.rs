//! The analysis report.
//!
//! [`Report`] is a plain serializable value: the fold results, the derived
//! structures, and a few convenience figures merged into one struct.
//! Internal sets become counts here; consumers never see raw accumulators.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::analyze::{
    biggest_inactivity, day_boundaries, inactivity_periods, length_histogram, longest_messages,
    most_replied, response_stats, threads, Aggregates, InactivityGap, LengthHistogram,
    LongestMessage, MessageThread, RepliedMessage, ResponseStats,
};
use crate::config::AnalyzerConfig;
use crate::message::Message;
use crate::parse::TranscriptScan;

const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Per-author totals. Unique words are reported as a count only.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorSummary {
    pub author: String,
    pub message_count: u64,
    pub word_count: u64,
    pub unique_word_count: u64,
    /// The author's most active calendar date. Earliest date wins ties.
    pub busiest_date: Option<NaiveDate>,
}

/// A ranked (item, count) pair used for words, emoji, domains, and
/// day-boundary leaderboards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountedItem {
    pub item: String,
    pub count: u64,
}

/// Messages per weekday with a per-occurrence average.
#[derive(Debug, Clone, Serialize)]
pub struct WeekdayActivity {
    pub weekday: &'static str,
    pub messages: u64,
    /// Messages divided by how many distinct dates fell on this weekday.
    pub average_per_day: f64,
}

/// Shared-link totals.
#[derive(Debug, Clone, Serialize)]
pub struct LinkStats {
    pub total: u64,
    pub domains: Vec<CountedItem>,
}

/// Everything one analysis run produces.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub total_messages: u64,
    pub total_words: u64,
    pub distinct_days: u64,
    pub first_message_at: Option<NaiveDateTime>,
    pub last_message_at: Option<NaiveDateTime>,
    pub average_messages_per_day: f64,

    /// Sorted by message count descending, author name breaking ties.
    pub authors: Vec<AuthorSummary>,
    pub most_active_author: Option<String>,
    pub least_active_author: Option<String>,

    /// Messages per calendar date; serializes as ISO-dated keys.
    pub messages_per_date: BTreeMap<NaiveDate, u64>,
    /// Per-author breakdown of [`Self::messages_per_date`].
    pub messages_per_author_date: BTreeMap<String, BTreeMap<NaiveDate, u64>>,
    pub messages_per_hour: [u64; 24],
    pub average_messages_by_hour: Vec<f64>,
    pub weekday_activity: Vec<WeekdayActivity>,

    pub common_words: Vec<CountedItem>,
    pub top_emojis: Vec<CountedItem>,
    pub emoji_per_author: Vec<CountedItem>,
    pub links: LinkStats,

    pub longest_messages: Vec<LongestMessage>,
    pub length_histogram: LengthHistogram,
    pub threads: Vec<MessageThread>,
    /// Every qualifying silence, in transcript order.
    pub inactivity_periods: Vec<InactivityGap>,
    pub biggest_time_stop: Option<InactivityGap>,
    pub conversation_starters: Vec<CountedItem>,
    pub conversation_closers: Vec<CountedItem>,
    pub most_replied: Vec<RepliedMessage>,
    pub response_times: ResponseStats,

    /// Lines recognized as system notices, reported as data.
    pub system_notes: Vec<String>,
    /// Lines that matched nothing, reported as data.
    pub skipped_lines: usize,
}

/// Ranks a frequency map: count descending, item ascending on ties.
fn ranked(map: &HashMap<String, u64>, limit: Option<usize>) -> Vec<CountedItem> {
    let mut items: Vec<CountedItem> = map
        .iter()
        .map(|(item, count)| CountedItem {
            item: item.clone(),
            count: *count,
        })
        .collect();
    items.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.item.cmp(&b.item)));
    if let Some(limit) = limit {
        items.truncate(limit);
    }
    items
}

impl Report {
    /// Merges the fold results and derived structures into the final value.
    #[must_use]
    pub(crate) fn assemble(scan: TranscriptScan, config: &AnalyzerConfig) -> Self {
        let messages: &[Message] = &scan.messages;
        let aggregates = Aggregates::from_messages(messages);

        let mut authors: Vec<AuthorSummary> = aggregates
            .authors
            .iter()
            .map(|(author, stats)| {
                // BTreeMap iterates ascending, so strictly-greater keeps the
                // earliest date on ties.
                let busiest_date = aggregates
                    .per_author_date
                    .get(author)
                    .and_then(|dates| {
                        dates
                            .iter()
                            .fold(None::<(&NaiveDate, u64)>, |best, (date, &count)| {
                                match best {
                                    Some((_, best_count)) if best_count >= count => best,
                                    _ => Some((date, count)),
                                }
                            })
                    })
                    .map(|(date, _)| *date);
                AuthorSummary {
                    author: author.clone(),
                    message_count: stats.message_count,
                    word_count: stats.word_count,
                    unique_word_count: stats.unique_words.len() as u64,
                    busiest_date,
                }
            })
            .collect();
        authors.sort_by(|a, b| {
            b.message_count
                .cmp(&a.message_count)
                .then_with(|| a.author.cmp(&b.author))
        });
        let most_active_author = authors.first().map(|a| a.author.clone());
        let least_active_author = authors.last().map(|a| a.author.clone());

        let distinct_days = aggregates.distinct_days();
        let day_divisor = distinct_days.max(1) as f64;
        let average_messages_per_day = aggregates.total_messages as f64 / day_divisor;
        let average_messages_by_hour: Vec<f64> = aggregates
            .per_hour
            .iter()
            .map(|&count| count as f64 / day_divisor)
            .collect();

        // Distinct dates per weekday, for per-occurrence averages.
        let mut weekday_dates = [0u64; 7];
        for date in aggregates.per_date.keys() {
            weekday_dates[date.weekday().num_days_from_monday() as usize] += 1;
        }
        let weekday_activity: Vec<WeekdayActivity> = (0..7)
            .map(|i| WeekdayActivity {
                weekday: WEEKDAY_NAMES[i],
                messages: aggregates.per_weekday[i],
                average_per_day: aggregates.per_weekday[i] as f64 / weekday_dates[i].max(1) as f64,
            })
            .collect();

        let boundaries = day_boundaries(messages);
        let periods = inactivity_periods(messages, config);
        let biggest_time_stop = biggest_inactivity(&periods);
        let messages_per_author_date: BTreeMap<String, BTreeMap<NaiveDate, u64>> =
            aggregates.per_author_date.into_iter().collect();

        Self {
            total_messages: aggregates.total_messages,
            total_words: aggregates.total_words,
            distinct_days,
            first_message_at: messages.first().map(Message::timestamp),
            last_message_at: messages.last().map(Message::timestamp),
            average_messages_per_day,

            most_active_author,
            least_active_author,
            authors,

            messages_per_date: aggregates.per_date,
            messages_per_author_date,
            messages_per_hour: aggregates.per_hour,
            average_messages_by_hour,
            weekday_activity,

            common_words: ranked(&aggregates.word_freq, Some(config.top_words)),
            top_emojis: ranked(&aggregates.emoji_freq, Some(config.top_emojis)),
            emoji_per_author: ranked(&aggregates.emoji_per_author, None),
            links: LinkStats {
                total: aggregates.total_links,
                domains: ranked(&aggregates.domain_freq, None),
            },

            longest_messages: longest_messages(messages, config.top_longest_messages),
            length_histogram: length_histogram(messages),
            threads: threads(messages),
            inactivity_periods: periods,
            biggest_time_stop,
            conversation_starters: ranked(&boundaries.starts, None),
            conversation_closers: ranked(&boundaries.closes, None),
            most_replied: most_replied(messages, config),
            response_times: response_stats(messages, config),

            system_notes: scan.system_notes,
            skipped_lines: scan.skipped_lines,
        }
    }
}
