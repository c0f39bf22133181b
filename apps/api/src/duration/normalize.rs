//! Turns free-text date tokens into typed [`Interval`]s.

use chrono::NaiveDate;

use crate::duration::interval::{Interval, IntervalEnd, RawIntervalInput};
use crate::duration::DurationError;

/// End tokens meaning "still ongoing".
const OPEN_END_SYNONYMS: &[&str] = &[
    "present",
    "ongoing",
    "current",
    "now",
    "till date",
    "currently",
    "to date",
    "till now",
    "until now",
    "today",
];

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

const MIN_YEAR: i32 = 1900;
const MAX_YEAR: i32 = 2100;

/// Normalizes one raw interval.
///
/// A blank or missing end is treated as open. A blank or missing start is a
/// [`DurationError::DateParse`].
pub fn normalize_interval(raw: &RawIntervalInput) -> Result<Interval, DurationError> {
    let start_token = raw.start.as_deref().unwrap_or_default();
    let start = parse_date_token(start_token)?;

    let end = match raw.end.as_deref().map(str::trim) {
        None | Some("") => IntervalEnd::Open,
        Some(token) if is_open_token(token) => IntervalEnd::Open,
        Some(token) => IntervalEnd::On(parse_date_token(token)?),
    };

    Ok(Interval {
        start,
        end,
        explicit_duration: raw.explicit_duration,
    })
}

/// True when `token` is one of the "ongoing" synonyms (case-insensitive).
pub fn is_open_token(token: &str) -> bool {
    let cleaned = clean(token);
    OPEN_END_SYNONYMS.contains(&cleaned.as_str())
}

/// Parses a calendar expression into a date. Missing day → 1st, missing month → January.
pub fn parse_date_token(token: &str) -> Result<NaiveDate, DurationError> {
    let err = || DurationError::DateParse {
        token: token.to_string(),
    };

    let cleaned = clean(token);
    if cleaned.is_empty() {
        return Err(err());
    }

    // ISO timestamps: keep the date part.
    let date_part = match cleaned.split_once('t') {
        Some((head, tail)) if head.len() == 10 && tail.starts_with(|c: char| c.is_ascii_digit()) => {
            head
        }
        _ => cleaned.as_str(),
    };

    let parts: Vec<Part> = date_part
        .split(|c: char| matches!(c, ' ' | '-' | '/' | '.' | ','))
        .filter(|p| !p.is_empty())
        .map(Part::classify)
        .collect();

    let (year, month, day) = match parts.as_slice() {
        [Part::Year(y)] => (*y, 1, 1),
        [Part::Year(y), Part::Number(m)] => (*y, *m, 1),
        [Part::Number(m), Part::Year(y)] => (*y, *m, 1),
        [Part::Month(m), Part::Year(y)] | [Part::Year(y), Part::Month(m)] => (*y, *m, 1),
        [Part::Year(y), Part::Number(m), Part::Number(d)] => (*y, *m, *d),
        [Part::Number(a), Part::Number(b), Part::Year(y)] => {
            // Day-first only when the first field cannot be a month.
            if *a > 12 {
                (*y, *b, *a)
            } else {
                (*y, *a, *b)
            }
        }
        [Part::Month(m), Part::Number(d), Part::Year(y)]
        | [Part::Number(d), Part::Month(m), Part::Year(y)] => (*y, *m, *d),
        _ => return Err(err()),
    };

    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(err());
    }
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(err)
}

fn clean(token: &str) -> String {
    token
        .trim()
        .trim_end_matches(|c: char| matches!(c, '.' | ',' | ';'))
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Part {
    Year(i32),
    Number(u32),
    Month(u32),
    Unknown,
}

impl Part {
    fn classify(raw: &str) -> Self {
        if raw.chars().all(|c| c.is_ascii_digit()) {
            return match raw.len() {
                4 => raw.parse().map(Part::Year).unwrap_or(Part::Unknown),
                1 | 2 => raw.parse().map(Part::Number).unwrap_or(Part::Unknown),
                _ => Part::Unknown,
            };
        }
        month_from_name(raw).map(Part::Month).unwrap_or(Part::Unknown)
    }
}

/// "jan", "sept", "September" → month number. Needs at least three letters.
fn month_from_name(word: &str) -> Option<u32> {
    if word.len() < 3 || !word.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    MONTH_NAMES
        .iter()
        .position(|name| name.starts_with(word))
        .map(|idx| idx as u32 + 1)
}
