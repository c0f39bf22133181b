//! Interval-merge duration reconciler.
//!
//! Algorithm:
//! 1. Normalize every raw interval; unreadable ones are skipped and recorded.
//! 2. Resolve open ends to the reference instant; drop `start > end`.
//! 3. Sort by start, ties by end.
//! 4. Merge into disjoint runs at month granularity. A span starting no later
//!    than the month after the current run's last month continues the run.
//! 5. Sum `(end.year - start.year) * 12 + (end.month - start.month)` per run.
//!
//! Per-interval failures never escape; the total is never negative.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::duration::interval::{
    elapsed_months, month_index, EvaluationContext, Interval, RawIntervalInput, TotalDuration,
};
use crate::duration::normalize::normalize_interval;
use crate::duration::DurationError;

/// Why an interval was left out of the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    DateParse,
    InvalidInterval,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedInterval {
    /// Position in the caller's input.
    pub index: usize,
    pub reason: SkipReason,
    pub detail: String,
}

/// An interval whose stated length disagrees with its dates.
/// Recorded only; the merged total is always recomputed from dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExplicitDurationConflict {
    pub index: usize,
    pub stated: TotalDuration,
    pub from_dates: TotalDuration,
}

/// A maximal stretch of continuously covered time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoveredRun {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub months: u32,
}

/// Full outcome of a reconciliation: the total plus what was left out and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reconciliation {
    pub duration: TotalDuration,
    pub total_months: u32,
    pub runs: Vec<CoveredRun>,
    pub skipped: Vec<SkippedInterval>,
    pub explicit_conflicts: Vec<ExplicitDurationConflict>,
}

#[derive(Debug, Clone, Copy)]
struct Span {
    start: NaiveDate,
    end: NaiveDate,
}

/// Union duration of `inputs`, as `(years, months)`.
pub fn reconcile_duration(inputs: &[RawIntervalInput], ctx: &EvaluationContext) -> TotalDuration {
    reconcile(inputs, ctx).duration
}

/// Union duration of `inputs` with per-interval diagnostics.
pub fn reconcile(inputs: &[RawIntervalInput], ctx: &EvaluationContext) -> Reconciliation {
    reconcile_normalized(inputs.iter().map(normalize_interval), ctx)
}

fn reconcile_normalized<I>(entries: I, ctx: &EvaluationContext) -> Reconciliation
where
    I: IntoIterator<Item = Result<Interval, DurationError>>,
{
    let mut spans = Vec::new();
    let mut skipped = Vec::new();
    let mut explicit_conflicts = Vec::new();

    for (index, entry) in entries.into_iter().enumerate() {
        let interval = match entry {
            Ok(interval) => interval,
            Err(err) => {
                warn!(index, error = %err, "Skipping interval with unrecognised date");
                skipped.push(SkippedInterval {
                    index,
                    reason: SkipReason::DateParse,
                    detail: err.to_string(),
                });
                continue;
            }
        };

        let end = interval.resolved_end(ctx);
        if interval.start > end {
            let err = DurationError::InvalidInterval {
                start: interval.start,
                end,
            };
            warn!(index, error = %err, "Skipping interval that ends before it starts");
            skipped.push(SkippedInterval {
                index,
                reason: SkipReason::InvalidInterval,
                detail: err.to_string(),
            });
            continue;
        }

        if let Some(stated) = interval.explicit_duration {
            let from_dates = TotalDuration::from_months(elapsed_months(interval.start, end));
            if stated.total_months() != from_dates.total_months() {
                debug!(index, ?stated, ?from_dates, "Stated duration disagrees with dates");
                explicit_conflicts.push(ExplicitDurationConflict {
                    index,
                    stated,
                    from_dates,
                });
            }
        }

        spans.push(Span {
            start: interval.start,
            end,
        });
    }

    let runs = merge_spans(spans);
    let total_months: u32 = runs.iter().map(|run| run.months).sum();

    Reconciliation {
        duration: TotalDuration::from_months(total_months),
        total_months,
        runs,
        skipped,
        explicit_conflicts,
    }
}

/// Reconciles an untrusted JSON payload.
///
/// `null` is an empty set and a lone object is a one-element set. Any other
/// non-list value, or a list holding a non-object, is an `InputShape` error.
/// An object whose keys cannot be read (for example both `start` and
/// `date_start`) is skipped like an unparseable date.
pub fn reconcile_value(
    payload: &Value,
    ctx: &EvaluationContext,
) -> Result<Reconciliation, DurationError> {
    let records = records_from_value(payload)?;
    Ok(reconcile_normalized(
        records
            .into_iter()
            .map(|record| record.and_then(|raw| normalize_interval(&raw))),
        ctx,
    ))
}

/// The readable records of an untrusted JSON payload.
///
/// Same shape rules as [`reconcile_value`]; unreadable objects are dropped.
pub fn interval_inputs(payload: &Value) -> Result<Vec<RawIntervalInput>, DurationError> {
    let records = records_from_value(payload)?;
    Ok(records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match record {
            Ok(raw) => Some(raw),
            Err(err) => {
                warn!(index, error = %err, "Dropping unreadable interval record");
                None
            }
        })
        .collect())
}

fn records_from_value(
    payload: &Value,
) -> Result<Vec<Result<RawIntervalInput, DurationError>>, DurationError> {
    match payload {
        Value::Null => Ok(Vec::new()),
        Value::Object(_) => Ok(vec![record_from_value(payload)]),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(idx, item)| match item {
                Value::Object(_) => Ok(record_from_value(item)),
                other => Err(DurationError::InputShape(format!(
                    "element {idx} is {}, expected an object",
                    json_kind(other)
                ))),
            })
            .collect(),
        other => Err(DurationError::InputShape(format!(
            "expected a list of records, got {}",
            json_kind(other)
        ))),
    }
}

fn record_from_value(value: &Value) -> Result<RawIntervalInput, DurationError> {
    RawIntervalInput::deserialize(value).map_err(|e| DurationError::MalformedRecord(e.to_string()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn merge_spans(mut spans: Vec<Span>) -> Vec<CoveredRun> {
    spans.sort_by(|a, b| a.start.cmp(&b.start).then(a.end.cmp(&b.end)));

    let mut runs: Vec<CoveredRun> = Vec::new();
    for span in spans {
        if let Some(run) = runs.last_mut() {
            if month_index(span.start) <= month_index(run.end) + 1 {
                run.end = run.end.max(span.end);
                continue;
            }
        }
        runs.push(CoveredRun {
            start: span.start,
            end: span.end,
            months: 0,
        });
    }

    for run in &mut runs {
        run.months = elapsed_months(run.start, run.end);
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx(y: i32, m: u32, d: u32) -> EvaluationContext {
        EvaluationContext::new(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn intervals(pairs: &[(&str, &str)]) -> Vec<RawIntervalInput> {
        pairs
            .iter()
            .map(|(start, end)| RawIntervalInput::new(*start, *end))
            .collect()
    }

    fn months(pairs: &[(&str, &str)], at: &EvaluationContext) -> u32 {
        reconcile_duration(&intervals(pairs), at).total_months()
    }

    #[test]
    fn test_empty_input_is_zero() {
        let result = reconcile(&[], &ctx(2024, 6, 1));
        assert_eq!(result.duration, TotalDuration { years: 0, months: 0 });
        assert!(result.runs.is_empty());
        assert!(result.skipped.is_empty());
    }

    #[test]
    fn test_adjacent_intervals_join_without_gap() {
        let total = reconcile_duration(
            &intervals(&[("2019-01", "2019-12"), ("2020-01", "2020-06")]),
            &ctx(2024, 6, 1),
        );
        assert_eq!(total, TotalDuration { years: 1, months: 5 });
    }

    #[test]
    fn test_contained_interval_is_not_double_counted() {
        let at = ctx(2024, 6, 1);
        assert_eq!(
            months(&[("2018-01", "2020-01"), ("2019-01", "2019-06")], &at),
            24
        );
    }

    #[test]
    fn test_partial_overlap_counts_union() {
        let at = ctx(2024, 6, 1);
        assert_eq!(
            months(&[("2018-01", "2019-01"), ("2018-07", "2019-07")], &at),
            18
        );
    }

    #[test]
    fn test_open_interval_resolves_against_reference_instant() {
        let total = reconcile_duration(&intervals(&[("2022-06", "present")]), &ctx(2024, 6, 1));
        assert_eq!(total, TotalDuration { years: 2, months: 0 });
    }

    #[test]
    fn test_malformed_interval_is_dropped_and_recorded() {
        let result = reconcile(
            &intervals(&[("not-a-date", "2020-01"), ("2021-01", "2022-01")]),
            &ctx(2024, 6, 1),
        );
        assert_eq!(result.total_months, 12);
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].index, 0);
        assert_eq!(result.skipped[0].reason, SkipReason::DateParse);
    }

    #[test]
    fn test_reversed_interval_is_dropped() {
        let result = reconcile(
            &intervals(&[("2021-05", "2020-01"), ("2021-01", "2021-04")]),
            &ctx(2024, 6, 1),
        );
        assert_eq!(result.total_months, 3);
        assert_eq!(result.skipped[0].reason, SkipReason::InvalidInterval);
    }

    #[test]
    fn test_open_interval_starting_after_reference_is_dropped() {
        let result = reconcile(&intervals(&[("2025-01", "present")]), &ctx(2024, 6, 1));
        assert_eq!(result.total_months, 0);
        assert_eq!(result.skipped[0].reason, SkipReason::InvalidInterval);
    }

    #[test]
    fn test_zero_length_interval_counts_as_zero() {
        let result = reconcile(&intervals(&[("2020-03", "2020-03")]), &ctx(2024, 6, 1));
        assert_eq!(result.total_months, 0);
        assert_eq!(result.runs.len(), 1);
        assert!(result.skipped.is_empty());
    }

    #[test]
    fn test_gap_between_runs_is_excluded() {
        let result = reconcile(
            &intervals(&[("2015-01", "2016-01"), ("2018-01", "2018-07")]),
            &ctx(2024, 6, 1),
        );
        assert_eq!(result.runs.len(), 2);
        assert_eq!(result.total_months, 18);
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let at = ctx(2024, 6, 1);
        let forward = months(
            &[("2016", "2018"), ("2017-06", "2019-03"), ("2021-01", "present")],
            &at,
        );
        let backward = months(
            &[("2021-01", "present"), ("2017-06", "2019-03"), ("2016", "2018")],
            &at,
        );
        assert_eq!(forward, backward);
        // 2016-01..2019-03 = 38, 2021-01..2024-06 = 41
        assert_eq!(forward, 79);
    }

    #[test]
    fn test_reconciliation_is_deterministic() {
        let at = ctx(2024, 6, 1);
        let set = intervals(&[
            ("Jan 2018", "Mar 2019"),
            ("2018-11", "present"),
            ("garbage", "2020"),
        ]);
        assert_eq!(reconcile(&set, &at), reconcile(&set, &at));
    }

    #[test]
    fn test_explicit_duration_is_informational_only() {
        let at = ctx(2024, 6, 1);
        let set = vec![RawIntervalInput::new("2019-01", "2020-01")
            .with_explicit_duration(TotalDuration { years: 3, months: 0 })];
        let result = reconcile(&set, &at);
        assert_eq!(result.total_months, 12);
        assert_eq!(result.explicit_conflicts.len(), 1);
        assert_eq!(
            result.explicit_conflicts[0].from_dates,
            TotalDuration { years: 1, months: 0 }
        );
    }

    #[test]
    fn test_matching_explicit_duration_records_no_conflict() {
        let set = vec![RawIntervalInput::new("2019-01", "2020-01")
            .with_explicit_duration(TotalDuration { years: 1, months: 0 })];
        assert!(reconcile(&set, &ctx(2024, 6, 1)).explicit_conflicts.is_empty());
    }

    #[test]
    fn test_months_always_normalized_and_total_monotonic() {
        let at = ctx(2024, 6, 1);
        let base: Vec<(&str, &str)> = vec![
            ("2010-01", "2010-05"),
            ("2010-03", "2011-11"),
            ("2013-02", "2013-02"),
            ("2014-07", "2016-01"),
            ("bad", "2016-01"),
        ];
        let additions = [
            ("2017-01", "2017-08"),
            ("2018-01", "2019-12"),
            ("2020-05", "present"),
        ];

        let mut set = base.clone();
        let mut previous = months(&set, &at);
        for addition in additions {
            set.push(addition);
            let total = reconcile_duration(&intervals(&set), &at);
            assert!(total.months <= 11);
            assert!(total.total_months() >= previous);
            previous = total.total_months();
        }
    }

    #[test]
    fn test_reconcile_value_accepts_records() {
        let payload = json!([
            {"date_start": "2019-01", "date_end": "2019-12", "company": "A"},
            {"start": "2020-01", "end": "2020-06"}
        ]);
        let result = reconcile_value(&payload, &ctx(2024, 6, 1)).unwrap();
        assert_eq!(result.duration, TotalDuration { years: 1, months: 5 });
    }

    #[test]
    fn test_reconcile_value_wraps_single_record_and_null() {
        let at = ctx(2024, 6, 1);
        let single = json!({"date_start": "2022-06", "date_end": "Present"});
        assert_eq!(reconcile_value(&single, &at).unwrap().total_months, 24);
        assert_eq!(reconcile_value(&Value::Null, &at).unwrap().total_months, 0);
    }

    #[test]
    fn test_reconcile_value_numeric_year_is_a_token() {
        let payload = json!([{"date_start": 2016, "date_end": 2020}]);
        let result = reconcile_value(&payload, &ctx(2024, 6, 1)).unwrap();
        assert_eq!(result.total_months, 48);
    }

    #[test]
    fn test_adjacent_zero_length_intervals_bridge_one_month() {
        let at = ctx(2024, 6, 1);
        assert_eq!(months(&[("2019-01", "2019-01")], &at), 0);
        assert_eq!(months(&[("2019-02", "2019-02")], &at), 0);

        let result = reconcile(&intervals(&[("2019-01", "2019-01"), ("2019-02", "2019-02")]), &at);
        assert_eq!(result.runs.len(), 1);
        assert_eq!(result.total_months, 1);
    }

    #[test]
    fn test_reconcile_value_skips_record_with_both_key_spellings() {
        let payload = json!([
            {"start": "2019-01", "date_start": "2019-01", "end": "2020-01"},
            {"start": "2021-01", "end": "2022-01"}
        ]);
        let result = reconcile_value(&payload, &ctx(2024, 6, 1)).unwrap();
        assert_eq!(result.total_months, 12);
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].index, 0);
        assert_eq!(result.skipped[0].reason, SkipReason::DateParse);
        assert!(result.skipped[0].detail.contains("duplicate field"));
    }

    #[test]
    fn test_interval_inputs_drops_unreadable_records() {
        let payload = json!([
            {"end": "2019-06", "date_end": "2019-07", "start": "2019-01"},
            {"date_start": "2021-01", "date_end": "2022-01"}
        ]);
        let inputs = interval_inputs(&payload).unwrap();
        assert_eq!(inputs, vec![RawIntervalInput::new("2021-01", "2022-01")]);
        assert!(matches!(
            interval_inputs(&json!("2019")),
            Err(DurationError::InputShape(_))
        ));
    }

    #[test]
    fn test_reconcile_value_rejects_unusable_shapes() {
        let at = ctx(2024, 6, 1);
        for payload in [json!("2019-01"), json!(42), json!(true), json!([["2019", "2020"]])] {
            assert!(
                matches!(
                    reconcile_value(&payload, &at),
                    Err(DurationError::InputShape(_))
                ),
                "expected shape error for {payload}"
            );
        }
    }
}
