//! Resume extraction: text -> `ResumeRecord` with durations recomputed from dates.

use tracing::{info, warn};

use crate::documents::{self, UploadedFile};
use crate::duration::{reconcile, EvaluationContext, Reconciliation, TotalDuration};
use crate::errors::AppError;
use crate::extraction::prompts::{RESUME_EXTRACTION_PROMPT_TEMPLATE, RESUME_EXTRACTION_SYSTEM};
use crate::llm_client::prompts::FIDELITY_INSTRUCTION;
use crate::llm_client::{complete_as, JsonCompletion};
use crate::models::resume::{DurationDiagnostics, ResumeRecord};

/// Extracts a record from resume text. Durations are left as the model sent them.
pub async fn extract_resume_record(
    llm: &dyn JsonCompletion,
    resume_text: &str,
) -> Result<ResumeRecord, AppError> {
    let prompt = RESUME_EXTRACTION_PROMPT_TEMPLATE
        .replace("{fidelity_instruction}", FIDELITY_INSTRUCTION)
        .replace("{resume_text}", resume_text);

    complete_as::<ResumeRecord>(llm, &prompt, RESUME_EXTRACTION_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Resume extraction failed: {e}")))
}

/// Overwrites `work_experience` and `educations_duration` with totals
/// reconciled from the record's own intervals, and attaches the reports.
pub fn apply_reconciled_durations(record: &mut ResumeRecord, ctx: &EvaluationContext) {
    let work = reconcile(&record.work_intervals(), ctx);
    let education = reconcile(&record.education_intervals(), ctx);

    log_disagreement("work_experience", record.work_experience, &work);
    log_disagreement("educations_duration", record.educations_duration, &education);

    record.work_experience = Some(work.duration);
    record.educations_duration = Some(education.duration);
    record.reconciliation = Some(DurationDiagnostics {
        reference_date: ctx.reference_instant,
        work,
        education,
    });
}

fn log_disagreement(field: &str, stated: Option<TotalDuration>, computed: &Reconciliation) {
    if !computed.skipped.is_empty() {
        warn!(
            "{field}: {} of the intervals could not be used",
            computed.skipped.len()
        );
    }
    if let Some(stated) = stated {
        if stated.total_months() != 0 && stated != computed.duration {
            info!(
                "{field}: model stated {}y{}m, dates give {}y{}m",
                stated.years, stated.months, computed.duration.years, computed.duration.months
            );
        }
    }
}

/// Full pipeline for one uploaded resume.
pub async fn parse_resume(
    llm: &dyn JsonCompletion,
    file: &UploadedFile,
    ctx: &EvaluationContext,
) -> Result<ResumeRecord, AppError> {
    let text = documents::extract_uploaded(file).await?;
    let mut record = extract_resume_record(llm, &text).await?;
    apply_reconciled_durations(&mut record, ctx);
    info!(
        "Parsed resume {}: {} experiences, {} educations",
        file.filename,
        record.experiences.len(),
        record.educations.len()
    );
    Ok(record)
}
