//! Job description enhancement: extracted JD -> enhanced JD -> scored sample candidates.
//!
//! The result is returned to the caller, who passes it back to the scoring
//! endpoint. Nothing is kept between requests.

use serde::Serialize;
use tracing::{info, warn};

use crate::documents::UploadedFile;
use crate::errors::AppError;
use crate::extraction::job_description::parse_job_description;
use crate::generation::prompts::{
    CANDIDATE_GENERATION_PROMPT_TEMPLATE, CANDIDATE_GENERATION_SYSTEM,
    JD_ENHANCEMENT_PROMPT_TEMPLATE, JD_ENHANCEMENT_SYSTEM,
};
use crate::llm_client::{complete_as, JsonCompletion};
use crate::models::job_description::{
    CandidateProfile, CandidateProfileList, EnhancedJobDescription, EnhancementResult,
    JobDescriptionRecord,
};

/// One sample candidate per fit level: 10, 8, 6, 4, 2, 0.
pub const SAMPLE_CANDIDATE_COUNT: usize = 6;

pub async fn enhance_job_description(
    llm: &dyn JsonCompletion,
    extracted: &JobDescriptionRecord,
) -> Result<EnhancedJobDescription, AppError> {
    let prompt = JD_ENHANCEMENT_PROMPT_TEMPLATE.replace("{jd_json}", &to_prompt_json(extracted)?);
    let enhanced = complete_as::<EnhancedJobDescription>(llm, &prompt, JD_ENHANCEMENT_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Job description enhancement failed: {e}")))?;

    if enhanced.is_blank() {
        return Err(AppError::Llm(
            "Job description enhancement returned an empty description".to_string(),
        ));
    }
    Ok(enhanced)
}

/// Generates the sample candidates, highest score first.
pub async fn generate_candidate_profiles(
    llm: &dyn JsonCompletion,
    enhanced: &EnhancedJobDescription,
) -> Result<Vec<CandidateProfile>, AppError> {
    let prompt = CANDIDATE_GENERATION_PROMPT_TEMPLATE
        .replace("{candidate_count}", &SAMPLE_CANDIDATE_COUNT.to_string())
        .replace("{jd_json}", &to_prompt_json(enhanced)?);
    let list = complete_as::<CandidateProfileList>(llm, &prompt, CANDIDATE_GENERATION_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Sample candidate generation failed: {e}")))?;

    let mut candidates = list.candidate_list;
    if candidates.is_empty() {
        return Err(AppError::Llm(
            "Sample candidate generation returned no candidates".to_string(),
        ));
    }
    if candidates.len() != SAMPLE_CANDIDATE_COUNT {
        warn!(
            "Expected {SAMPLE_CANDIDATE_COUNT} sample candidates, got {}",
            candidates.len()
        );
    }
    candidates.sort_by(|a, b| b.score.cmp(&a.score));
    Ok(candidates)
}

/// Full pipeline for one uploaded job description.
pub async fn enhance_uploaded_job_description(
    llm: &dyn JsonCompletion,
    file: &UploadedFile,
) -> Result<EnhancementResult, AppError> {
    let extracted = parse_job_description(llm, file).await?;
    let enhanced_job_description = enhance_job_description(llm, &extracted).await?;
    let generated_candidates = generate_candidate_profiles(llm, &enhanced_job_description).await?;

    info!(
        "Enhanced '{}' with {} sample candidates",
        enhanced_job_description.job_title,
        generated_candidates.len()
    );
    Ok(EnhancementResult {
        enhanced_job_description,
        generated_candidates,
    })
}

pub(crate) fn to_prompt_json<T: Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(|e| AppError::Internal(e.into()))
}
