//! Analysis passes over parsed messages.
//!
//! [`aggregate`] folds per-message counters, [`derive`] extracts
//! order-dependent structures, [`reply`] attributes replies, and [`text`]
//! holds the shared body-text helpers.

pub mod aggregate;
pub mod derive;
pub mod reply;
pub mod text;

pub use aggregate::{Aggregates, AuthorStats};
pub use derive::{
    biggest_inactivity, day_boundaries, inactivity_periods, length_histogram, longest_messages,
    response_stats, threads, DayBoundaries, InactivityGap, LengthHistogram, LongestMessage,
    MessageThread, ResponderAverage, ResponseBuckets, ResponseStats,
};
pub use reply::{most_replied, RepliedMessage};
