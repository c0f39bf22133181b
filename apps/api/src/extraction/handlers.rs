//! Axum route handlers for the Extraction API.

use axum::extract::{Multipart, Query, State};
use axum::Json;

use crate::errors::AppError;
use crate::extraction::job_description::parse_job_description;
use crate::extraction::resume::parse_resume;
use crate::models::job_description::JobDescriptionRecord;
use crate::models::resume::ResumeRecord;
use crate::routes::upload::read_upload_form;
use crate::routes::AsOfQuery;
use crate::state::AppState;

/// POST /api/v1/resumes/parse
///
/// Multipart `file` (.pdf, .docx, .txt, .md). Returns the extracted resume with
/// `work_experience` and `educations_duration` recomputed from its dates as of
/// `?as_of=YYYY-MM-DD` (default: today).
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    Query(query): Query<AsOfQuery>,
    multipart: Multipart,
) -> Result<Json<ResumeRecord>, AppError> {
    let file = read_upload_form(multipart).await?.single_file()?;
    let record = parse_resume(state.llm.as_ref(), &file, &query.context()).await?;
    Ok(Json(record))
}

/// POST /api/v1/job-descriptions/parse
///
/// Multipart `file`. Returns the structured job description.
pub async fn handle_parse_job_description(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<JobDescriptionRecord>, AppError> {
    let file = read_upload_form(multipart).await?.single_file()?;
    let record = parse_job_description(state.llm.as_ref(), &file).await?;
    Ok(Json(record))
}
