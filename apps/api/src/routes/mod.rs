pub mod health;
pub mod upload;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::duration::{self, EvaluationContext};
use crate::extraction;
use crate::generation;
use crate::state::AppState;

/// `?as_of=YYYY-MM-DD`: the date open-ended intervals are measured up to.
#[derive(Debug, Default, Deserialize)]
pub struct AsOfQuery {
    pub as_of: Option<NaiveDate>,
}

impl AsOfQuery {
    pub fn context(&self) -> EvaluationContext {
        self.as_of
            .map(EvaluationContext::new)
            .unwrap_or_else(EvaluationContext::today)
    }
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/", get(health::health_handler))
        .route("/health", get(health::health_handler))
        // Extraction API
        .route(
            "/api/v1/resumes/parse",
            post(extraction::handlers::handle_parse_resume),
        )
        .route(
            "/api/v1/job-descriptions/parse",
            post(extraction::handlers::handle_parse_job_description),
        )
        // Generation API
        .route(
            "/api/v1/job-descriptions/enhance",
            post(generation::handlers::handle_enhance_job_description),
        )
        .route(
            "/api/v1/resumes/score",
            post(generation::handlers::handle_score_resumes),
        )
        .route(
            "/api/v1/resumes/generate/upload",
            post(generation::handlers::handle_generate_from_upload),
        )
        .route(
            "/api/v1/resumes/generate/form",
            post(generation::handlers::handle_generate_from_form),
        )
        // Duration API
        .route(
            "/api/v1/durations/reconcile",
            post(duration::handlers::handle_reconcile),
        )
        .layer(body_limit)
        .with_state(state)
}
