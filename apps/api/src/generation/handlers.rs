//! Axum route handlers for the Generation API.

use axum::extract::{Multipart, Query, State};
use axum::response::Html;
use axum::Json;
use serde_json::Value;

use crate::errors::AppError;
use crate::generation::ats_resume::{generate_from_form, generate_from_upload};
use crate::generation::enhancement::enhance_uploaded_job_description;
use crate::generation::scoring::score_resumes;
use crate::models::job_description::EnhancementResult;
use crate::models::scoring::ResumeScoringResponse;
use crate::routes::upload::read_upload_form;
use crate::routes::AsOfQuery;
use crate::state::AppState;

/// Multipart text field carrying the output of the enhance endpoint.
const ENHANCEMENT_FIELD: &str = "enhancement";

/// POST /api/v1/job-descriptions/enhance
///
/// Multipart `file`. Extracts and enhances the job description, then generates
/// sample candidates. Send the response back as the `enhancement` field of
/// POST /api/v1/resumes/score.
pub async fn handle_enhance_job_description(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<EnhancementResult>, AppError> {
    let file = read_upload_form(multipart).await?.single_file()?;
    let result = enhance_uploaded_job_description(state.llm.as_ref(), &file).await?;
    Ok(Json(result))
}

/// POST /api/v1/resumes/score
///
/// Multipart `enhancement` (JSON from the enhance endpoint) plus one or more
/// resume files. Each file gets its own result slot; failures do not abort
/// the batch.
pub async fn handle_score_resumes(
    State(state): State<AppState>,
    Query(query): Query<AsOfQuery>,
    multipart: Multipart,
) -> Result<Json<ResumeScoringResponse>, AppError> {
    let form = read_upload_form(multipart).await?;

    let raw = form.field(ENHANCEMENT_FIELD).ok_or_else(|| {
        AppError::Validation(format!(
            "missing '{ENHANCEMENT_FIELD}' field; call /api/v1/job-descriptions/enhance first"
        ))
    })?;
    let enhancement: EnhancementResult = serde_json::from_str(raw)
        .map_err(|e| AppError::Validation(format!("invalid '{ENHANCEMENT_FIELD}' JSON: {e}")))?;

    let response = score_resumes(
        state.llm.as_ref(),
        &enhancement,
        form.files,
        &query.context(),
        state.config.scoring_concurrency,
    )
    .await?;
    Ok(Json(response))
}

/// POST /api/v1/resumes/generate/upload
///
/// Multipart `file`. Returns the ATS-optimized resume as HTML.
pub async fn handle_generate_from_upload(
    State(state): State<AppState>,
    Query(query): Query<AsOfQuery>,
    multipart: Multipart,
) -> Result<Html<String>, AppError> {
    let file = read_upload_form(multipart).await?.single_file()?;
    let html = generate_from_upload(state.llm.as_ref(), &file, &query.context()).await?;
    Ok(Html(html))
}

/// POST /api/v1/resumes/generate/form
///
/// JSON candidate data in the resume record shape. Returns HTML.
pub async fn handle_generate_from_form(
    State(state): State<AppState>,
    Query(query): Query<AsOfQuery>,
    Json(candidate): Json<Value>,
) -> Result<Html<String>, AppError> {
    let html = generate_from_form(state.llm.as_ref(), candidate, &query.context()).await?;
    Ok(Html(html))
}
