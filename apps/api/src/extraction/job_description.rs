//! Job description extraction: text -> `JobDescriptionRecord`.

use tracing::info;

use crate::documents::{self, UploadedFile};
use crate::errors::AppError;
use crate::extraction::prompts::{JD_EXTRACTION_PROMPT_TEMPLATE, JD_EXTRACTION_SYSTEM};
use crate::llm_client::{complete_as, JsonCompletion};
use crate::models::job_description::JobDescriptionRecord;

/// Extracts a job description record from raw posting text.
pub async fn extract_job_description(
    llm: &dyn JsonCompletion,
    jd_text: &str,
) -> Result<JobDescriptionRecord, AppError> {
    let prompt = JD_EXTRACTION_PROMPT_TEMPLATE.replace("{jd_text}", jd_text);
    let record = complete_as::<JobDescriptionRecord>(llm, &prompt, JD_EXTRACTION_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Job description extraction failed: {e}")))?;

    if record.job_title.trim().is_empty() && record.job_description.trim().is_empty() {
        return Err(AppError::UnprocessableEntity(
            "no job description could be identified in the document".to_string(),
        ));
    }
    Ok(record)
}

/// Full pipeline for one uploaded job description.
pub async fn parse_job_description(
    llm: &dyn JsonCompletion,
    file: &UploadedFile,
) -> Result<JobDescriptionRecord, AppError> {
    let text = documents::extract_uploaded(file).await?;
    let record = extract_job_description(llm, &text).await?;
    info!(
        "Parsed job description {}: '{}' with {} required skills",
        file.filename,
        record.job_title,
        record.required_skills.len()
    );
    Ok(record)
}
