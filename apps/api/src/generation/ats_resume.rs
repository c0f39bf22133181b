//! ATS resume generation, from an uploaded resume or from form data.
//!
//! Output is a complete HTML document; conversion to PDF or DOCX is left to clients.

use serde_json::Value;
use tracing::info;

use crate::documents::UploadedFile;
use crate::duration::{interval_inputs, reconcile_duration, EvaluationContext};
use crate::errors::AppError;
use crate::extraction::resume::parse_resume;
use crate::generation::enhancement::to_prompt_json;
use crate::generation::prompts::{ATS_RESUME_PROMPT_TEMPLATE, ATS_RESUME_SYSTEM};
use crate::llm_client::prompts::FIDELITY_INSTRUCTION;
use crate::llm_client::{complete_as, JsonCompletion};
use crate::models::ats::AtsResume;

/// Extracts the uploaded resume, then rewrites it as ATS-friendly HTML.
pub async fn generate_from_upload(
    llm: &dyn JsonCompletion,
    file: &UploadedFile,
    ctx: &EvaluationContext,
) -> Result<String, AppError> {
    let mut record = parse_resume(llm, file, ctx).await?;
    record.reconciliation = None;
    let candidate_json = to_prompt_json(&record)?;
    render(llm, "extracted from an existing resume", &candidate_json).await
}

/// Rewrites candidate-entered data as ATS-friendly HTML.
///
/// `work_experience` / `educations_duration` are recomputed from the
/// `experiences` / `educations` lists when those are present.
pub async fn generate_from_form(
    llm: &dyn JsonCompletion,
    mut candidate: Value,
    ctx: &EvaluationContext,
) -> Result<String, AppError> {
    annotate_durations(&mut candidate, ctx)?;
    let candidate_json = to_prompt_json(&candidate)?;
    render(llm, "entered by the candidate", &candidate_json).await
}

fn annotate_durations(candidate: &mut Value, ctx: &EvaluationContext) -> Result<(), AppError> {
    let Some(fields) = candidate.as_object_mut() else {
        return Err(AppError::Validation(
            "candidate data must be a JSON object".to_string(),
        ));
    };

    for (list, total) in [
        ("experiences", "work_experience"),
        ("educations", "educations_duration"),
    ] {
        let Some(entries) = fields.get(list) else {
            continue;
        };
        let inputs = interval_inputs(entries)
            .map_err(|e| AppError::Validation(format!("{list}: {e}")))?;
        let duration = serde_json::to_value(reconcile_duration(&inputs, ctx))
            .map_err(|e| AppError::Internal(e.into()))?;
        fields.insert(total.to_string(), duration);
    }
    Ok(())
}

async fn render(
    llm: &dyn JsonCompletion,
    source: &str,
    candidate_json: &str,
) -> Result<String, AppError> {
    let prompt = ATS_RESUME_PROMPT_TEMPLATE
        .replace("{fidelity_instruction}", FIDELITY_INSTRUCTION)
        .replace("{source}", source)
        .replace("{candidate_json}", candidate_json);
    let resume = complete_as::<AtsResume>(llm, &prompt, ATS_RESUME_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("ATS resume generation failed: {e}")))?;

    if resume.formatted_resume.trim().is_empty() {
        return Err(AppError::Llm(
            "ATS resume generation returned no formatted_resume".to_string(),
        ));
    }
    info!(
        "Generated ATS resume ({} chars, {} skills)",
        resume.formatted_resume.len(),
        resume.skills.len()
    );
    Ok(resume.formatted_resume)
}
