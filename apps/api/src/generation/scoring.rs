//! Bulk resume scoring against a caller-supplied enhancement result.
//!
//! Resumes are processed concurrently, bounded by the configured limit. One
//! resume failing is reported in its own slot and does not affect the others.

use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use crate::documents::UploadedFile;
use crate::duration::EvaluationContext;
use crate::errors::AppError;
use crate::extraction::resume::parse_resume;
use crate::generation::enhancement::to_prompt_json;
use crate::generation::prompts::{RESUME_SCORING_PROMPT_TEMPLATE, RESUME_SCORING_SYSTEM};
use crate::llm_client::{complete_as, JsonCompletion};
use crate::models::job_description::EnhancementResult;
use crate::models::scoring::{ResumeScore, ResumeScoringResponse, ScoredResume};

/// Scores every file in `resumes` against `enhancement`.
///
/// Results carry their filename; their order is not the upload order.
pub async fn score_resumes(
    llm: &dyn JsonCompletion,
    enhancement: &EnhancementResult,
    resumes: Vec<UploadedFile>,
    ctx: &EvaluationContext,
    concurrency: usize,
) -> Result<ResumeScoringResponse, AppError> {
    if resumes.is_empty() {
        return Err(AppError::Validation("no resume files were uploaded".to_string()));
    }
    if enhancement.enhanced_job_description.is_blank() {
        return Err(AppError::Validation(
            "enhancement has an empty enhanced_job_description".to_string(),
        ));
    }

    let jd_json = to_prompt_json(&enhancement.enhanced_job_description)?;
    let candidates_json = to_prompt_json(&enhancement.generated_candidates)?;
    let baseline = ScoringBaseline {
        jd_json: &jd_json,
        candidates_json: &candidates_json,
    };

    info!(
        "Scoring {} resumes against '{}' (concurrency {concurrency})",
        resumes.len(),
        enhancement.enhanced_job_description.job_title
    );

    let scored_resumes = stream::iter(resumes)
        .map(|file| async move {
            match score_resume(llm, &file, &baseline, ctx).await {
                Ok(scored) => scored,
                Err(e) => {
                    warn!("Scoring {} failed: {e}", file.filename);
                    ScoredResume::failed(file.filename, e.to_string())
                }
            }
        })
        .buffer_unordered(concurrency.max(1))
        .collect::<Vec<_>>()
        .await;

    Ok(ResumeScoringResponse { scored_resumes })
}

/// Serialized enhancement shared by every resume in a batch.
#[derive(Clone, Copy)]
struct ScoringBaseline<'a> {
    jd_json: &'a str,
    candidates_json: &'a str,
}

async fn score_resume(
    llm: &dyn JsonCompletion,
    file: &UploadedFile,
    baseline: &ScoringBaseline<'_>,
    ctx: &EvaluationContext,
) -> Result<ScoredResume, AppError> {
    let mut record = parse_resume(llm, file, ctx).await?;
    let work_experience = record.work_experience.unwrap_or_default();
    // The scoring model only needs the totals, not how they were derived.
    record.reconciliation = None;

    let prompt = RESUME_SCORING_PROMPT_TEMPLATE
        .replace("{jd_json}", baseline.jd_json)
        .replace("{candidates_json}", baseline.candidates_json)
        .replace("{resume_json}", &to_prompt_json(&record)?);
    let mut score = complete_as::<ResumeScore>(llm, &prompt, RESUME_SCORING_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Resume scoring failed: {e}")))?;

    if score.candidate_name.trim().is_empty() {
        score.candidate_name = record.candidate_name.unwrap_or_default();
    }
    Ok(ScoredResume::scored(
        file.filename.clone(),
        work_experience,
        score,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use chrono::NaiveDate;
    use serde_json::json;

    use crate::duration::TotalDuration;
    use crate::extraction::prompts::RESUME_EXTRACTION_SYSTEM;
    use crate::llm_client::testing::ScriptedLlm;
    use crate::models::job_description::{CandidateProfile, EnhancedJobDescription};

    fn ctx() -> EvaluationContext {
        EvaluationContext::new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
    }

    fn enhancement() -> EnhancementResult {
        EnhancementResult {
            enhanced_job_description: EnhancedJobDescription {
                job_title: "Platform Engineer".to_string(),
                required_skills: vec!["Kubernetes".to_string()],
                ..Default::default()
            },
            generated_candidates: vec![CandidateProfile {
                full_name: "Ideal Ida".to_string(),
                score: 10,
                ..Default::default()
            }],
        }
    }

    fn file(name: &str, body: &'static [u8]) -> UploadedFile {
        UploadedFile {
            filename: name.to_string(),
            data: Bytes::from_static(body),
        }
    }

    fn scripted() -> ScriptedLlm {
        ScriptedLlm::by_system(vec![
            (
                RESUME_EXTRACTION_SYSTEM,
                json!({
                    "candidate_name": "Jane Doe",
                    "work_experience": {"years": 20, "months": 0},
                    "experiences": [
                        {"company": "Acme", "date_start": "2022-06", "date_end": "present"}
                    ]
                }),
            ),
            (
                RESUME_SCORING_SYSTEM,
                json!({"resume_score": 8, "gap_analysis": ["No Kubernetes"],
                       "closest_sample_candidate": "Ideal Ida"}),
            ),
        ])
    }

    #[tokio::test]
    async fn test_batch_reports_each_document() {
        let llm = scripted();
        let resumes = vec![
            file("jane.txt", b"Jane Doe, Acme 2022-06 to present"),
            file("photo.png", b"\x89PNG"),
        ];

        let response = score_resumes(&llm, &enhancement(), resumes, &ctx(), 2)
            .await
            .unwrap();

        assert_eq!(response.scored_resumes.len(), 2);
        let jane = response
            .scored_resumes
            .iter()
            .find(|r| r.filename == "jane.txt")
            .unwrap();
        assert_eq!(jane.work_experience, Some(TotalDuration { years: 2, months: 0 }));
        let score = jane.score.as_ref().unwrap();
        assert_eq!(score.resume_score, 8);
        assert_eq!(score.candidate_name, "Jane Doe");
        assert!(jane.error.is_none());

        let photo = response
            .scored_resumes
            .iter()
            .find(|r| r.filename == "photo.png")
            .unwrap();
        assert!(photo.score.is_none());
        assert!(photo.error.as_deref().unwrap().contains("photo.png"));
    }

    #[tokio::test]
    async fn test_scoring_prompt_carries_supplied_enhancement() {
        let llm = scripted();
        score_resumes(&llm, &enhancement(), vec![file("a.txt", b"A")], &ctx(), 1)
            .await
            .unwrap();

        let calls = llm.calls();
        let (prompt, _) = calls
            .iter()
            .find(|(_, system)| system == RESUME_SCORING_SYSTEM)
            .unwrap();
        assert!(prompt.contains("Platform Engineer"));
        assert!(prompt.contains("Ideal Ida"));
        assert!(prompt.contains("\"years\": 2"));
        assert!(!prompt.contains("reconciliation"));
    }

    #[tokio::test]
    async fn test_empty_batch_is_rejected() {
        let llm = scripted();
        let err = score_resumes(&llm, &enhancement(), Vec::new(), &ctx(), 4)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_blank_enhancement_is_rejected() {
        let llm = scripted();
        let err = score_resumes(
            &llm,
            &EnhancementResult::default(),
            vec![file("a.txt", b"A")],
            &ctx(),
            4,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(llm.calls().is_empty());
    }
}
