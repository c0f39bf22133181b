//! Axum route handler exposing reconciliation directly.

use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use crate::duration::{reconcile_value, EvaluationContext, Reconciliation};
use crate::errors::AppError;

#[derive(Debug, Deserialize)]
pub struct ReconcileRequest {
    /// List of `{start|date_start, end|date_end, explicit_duration?}` records.
    #[serde(default)]
    pub intervals: Value,
    /// Resolves open intervals. Defaults to today.
    pub reference_date: Option<NaiveDate>,
}

/// POST /api/v1/durations/reconcile
///
/// Returns the union duration of the given intervals together with the
/// covered runs and any intervals that were skipped.
pub async fn handle_reconcile(
    Json(request): Json<ReconcileRequest>,
) -> Result<Json<Reconciliation>, AppError> {
    let ctx = request
        .reference_date
        .map(EvaluationContext::new)
        .unwrap_or_else(EvaluationContext::today);
    let reconciliation = reconcile_value(&request.intervals, &ctx)?;
    Ok(Json(reconciliation))
}
