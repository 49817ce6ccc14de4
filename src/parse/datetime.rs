//! Date and time token resolution.
//!
//! Export date tokens carry no locale metadata, so `03/04/23` is genuinely
//! ambiguous between March 4 and April 3. This module resolves tokens by
//! trying an ordered list of component interpretations — month-first, then
//! day-first, then year-first — and accepting the first one that forms a
//! structurally valid, plausible calendar date. The order is a documented
//! policy choice, not a correctness claim.
//!
//! Two-digit years are assumed to live in 2000-2099 and rolled back by 100
//! years when that lands more than one year past the reference date. Any
//! resolved year outside `[1970, reference + 1]` is rejected so garbage input
//! is not silently accepted.

use chrono::{Datelike, NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

/// Earliest year accepted as a real chat timestamp.
const MIN_YEAR: i32 = 1970;

/// Component orders tried against a three-part numeric date token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ComponentOrder {
    MonthDayYear,
    DayMonthYear,
    YearMonthDay,
}

const CANDIDATE_ORDERS: &[ComponentOrder] = &[
    ComponentOrder::MonthDayYear,
    ComponentOrder::DayMonthYear,
    ComponentOrder::YearMonthDay,
];

/// Resolves a raw date token to a calendar date.
///
/// Returns `None` when no interpretation produces a valid, in-range date;
/// the caller treats the line as unparseable and moves on.
pub fn resolve_date(token: &str, reference: NaiveDate) -> Option<NaiveDate> {
    let clean = token.trim().replace(',', "");

    let parts: Vec<&str> = clean
        .split(['-', '/', '.'])
        .map(str::trim)
        .collect();

    if parts.len() == 3 && parts.iter().all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit())) {
        let numbers: Vec<u32> = parts.iter().filter_map(|p| p.parse().ok()).collect();
        if numbers.len() == 3 {
            for order in CANDIDATE_ORDERS {
                let (year_raw, year_digits, month, day) = match order {
                    ComponentOrder::MonthDayYear => (numbers[2], parts[2].len(), numbers[0], numbers[1]),
                    ComponentOrder::DayMonthYear => (numbers[2], parts[2].len(), numbers[1], numbers[0]),
                    ComponentOrder::YearMonthDay => (numbers[0], parts[0].len(), numbers[1], numbers[2]),
                };
                let year = normalize_year(year_raw as i32, year_digits, reference);
                if !year_in_range(year, reference) {
                    continue;
                }
                if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                    return Some(date);
                }
            }
        }
        return None;
    }

    // Generic fallback for anything the split didn't produce three numeric
    // parts for, e.g. a full ISO token.
    let parsed: NaiveDate = clean.parse().ok()?;
    year_in_range(parsed.year(), reference).then_some(parsed)
}

/// Expands a 2-digit year into 2000-2099, then applies the 100-year rollback
/// when the result lands in the implausible future.
///
/// The rollback is a heuristic: `99` becomes 2099, which is more than a year
/// past any present-day reference, so it is corrected to 1999. A token that
/// genuinely means 2099 cannot be distinguished from one that means 1999.
fn normalize_year(raw: i32, digits: usize, reference: NaiveDate) -> i32 {
    if digits > 2 {
        return raw;
    }
    let year = 2000 + raw;
    if year > reference.year() + 1 {
        year - 100
    } else {
        year
    }
}

fn year_in_range(year: i32, reference: NaiveDate) -> bool {
    (MIN_YEAR..=reference.year() + 1).contains(&year)
}

static AMPM_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s?([ap])\.?m\.?\s*$").expect("am/pm regex"));

/// Resolves a raw time token to a wall-clock time.
///
/// Accepts `H:MM`, `H:MM:SS`, each with an optional am/pm suffix which is
/// converted to 24-hour form (12 AM maps to 00, 12 PM stays 12).
pub fn resolve_time(token: &str) -> Option<NaiveTime> {
    let trimmed = token.trim();

    let (clock, meridiem) = match AMPM_SUFFIX.captures(trimmed) {
        Some(caps) => {
            let marker = caps.get(1)?.as_str().to_ascii_uppercase();
            (trimmed[..caps.get(0)?.start()].trim(), Some(marker))
        }
        None => (trimmed, None),
    };

    let mut parts = clock.split(':');
    let mut hour: u32 = parts.next()?.trim().parse().ok()?;
    let minute: u32 = parts.next()?.trim().parse().ok()?;
    let second: u32 = match parts.next() {
        Some(s) => s.trim().parse().ok()?,
        None => 0,
    };
    if parts.next().is_some() {
        return None;
    }

    if let Some(marker) = meridiem {
        if hour == 0 || hour > 12 {
            return None;
        }
        if hour == 12 {
            hour = 0;
        }
        if marker == "P" {
            hour += 12;
        }
    }

    NaiveTime::from_hms_opt(hour, minute, second)
}
