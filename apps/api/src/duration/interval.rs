use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::lenient;

/// A non-negative `(years, months)` pair with `months` in `0..=11`.
///
/// Used both as the reconciled total and as the shape of duration fields in
/// extracted records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TotalDuration {
    pub years: u32,
    pub months: u32,
}

impl TotalDuration {
    pub fn from_months(total_months: u32) -> Self {
        Self {
            years: total_months / 12,
            months: total_months % 12,
        }
    }

    /// Total months. Tolerates un-normalized input (`months >= 12`) from
    /// caller-supplied values.
    pub fn total_months(&self) -> u32 {
        self.years.saturating_mul(12).saturating_add(self.months)
    }
}

/// End of an interval: a concrete date, or ongoing as of the evaluation instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalEnd {
    On(NaiveDate),
    Open,
}

/// A single normalized time span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    pub start: NaiveDate,
    pub end: IntervalEnd,
    /// Stated length for this span, if the source gave one. Informational only.
    pub explicit_duration: Option<TotalDuration>,
}

impl Interval {
    pub fn resolved_end(&self, ctx: &EvaluationContext) -> NaiveDate {
        match self.end {
            IntervalEnd::On(date) => date,
            IntervalEnd::Open => ctx.reference_instant,
        }
    }
}

/// The instant open intervals are resolved against.
///
/// Always supplied by the caller; reconciliation never reads the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationContext {
    pub reference_instant: NaiveDate,
}

impl EvaluationContext {
    pub fn new(reference_instant: NaiveDate) -> Self {
        Self { reference_instant }
    }

    /// Reads the wall clock. Call at the request boundary only.
    pub fn today() -> Self {
        Self::new(Utc::now().date_naive())
    }
}

/// One upstream interval as it arrives from extraction output or a client.
///
/// Both `start`/`end` and the record-style `date_start`/`date_end` keys are
/// accepted. A missing `end` means the span is ongoing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawIntervalInput {
    #[serde(default, alias = "date_start", deserialize_with = "lenient::opt_string")]
    pub start: Option<String>,
    #[serde(default, alias = "date_end", deserialize_with = "lenient::opt_string")]
    pub end: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_duration"
    )]
    pub explicit_duration: Option<TotalDuration>,
}

#[allow(dead_code)]
impl RawIntervalInput {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: Some(start.into()),
            end: Some(end.into()),
            explicit_duration: None,
        }
    }

    pub fn with_explicit_duration(mut self, duration: TotalDuration) -> Self {
        self.explicit_duration = Some(duration);
        self
    }
}

/// Month ordinal used for all month-granularity comparisons.
pub(crate) fn month_index(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}

/// Whole months from `start` to `end`, day-of-month ignored.
pub(crate) fn elapsed_months(start: NaiveDate, end: NaiveDate) -> u32 {
    (month_index(end) - month_index(start)).max(0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_from_months_splits_years() {
        assert_eq!(
            TotalDuration::from_months(17),
            TotalDuration { years: 1, months: 5 }
        );
        assert_eq!(TotalDuration::from_months(0), TotalDuration::default());
    }

    #[test]
    fn test_total_months_tolerates_overflowing_months() {
        let d = TotalDuration { years: 1, months: 14 };
        assert_eq!(d.total_months(), 26);
    }

    #[test]
    fn test_open_end_resolves_to_reference_instant() {
        let ctx = EvaluationContext::new(date(2024, 6, 1));
        let interval = Interval {
            start: date(2022, 6, 1),
            end: IntervalEnd::Open,
            explicit_duration: None,
        };
        assert_eq!(interval.resolved_end(&ctx), date(2024, 6, 1));
    }

    #[test]
    fn test_elapsed_months_ignores_days() {
        assert_eq!(elapsed_months(date(2019, 1, 31), date(2019, 2, 1)), 1);
        assert_eq!(elapsed_months(date(2019, 1, 1), date(2019, 1, 31)), 0);
        assert_eq!(elapsed_months(date(2018, 11, 15), date(2020, 2, 3)), 15);
    }

    #[test]
    fn test_raw_input_accepts_record_keys() {
        let raw: RawIntervalInput = serde_json::from_str(
            r#"{"date_start": "2019-01", "date_end": "Present", "company": "Acme"}"#,
        )
        .unwrap();
        assert_eq!(raw.start.as_deref(), Some("2019-01"));
        assert_eq!(raw.end.as_deref(), Some("Present"));
        assert!(raw.explicit_duration.is_none());
    }
}
