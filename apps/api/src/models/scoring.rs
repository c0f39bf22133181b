use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::duration::TotalDuration;
use crate::lenient;

/// The model's assessment of one resume against the enhanced job description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeScore {
    #[serde(default, deserialize_with = "lenient::string")]
    pub candidate_name: String,
    /// 0..=10
    #[serde(default, deserialize_with = "lenient::score_out_of_ten")]
    pub resume_score: u8,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub gap_analysis: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub candidate_summary: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub closest_sample_candidate: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub recommendations: String,
}

/// Outcome for one uploaded file. Exactly one of `score` / `error` is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredResume {
    pub document_id: Uuid,
    pub filename: String,
    /// Reconciled from the resume's own dates, never taken from the model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_experience: Option<TotalDuration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<ResumeScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScoredResume {
    pub fn scored(filename: String, work_experience: TotalDuration, score: ResumeScore) -> Self {
        Self {
            document_id: Uuid::new_v4(),
            filename,
            work_experience: Some(work_experience),
            score: Some(score),
            error: None,
        }
    }

    pub fn failed(filename: String, error: String) -> Self {
        Self {
            document_id: Uuid::new_v4(),
            filename,
            work_experience: None,
            score: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumeScoringResponse {
    pub scored_resumes: Vec<ScoredResume>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failed_slot_omits_score_fields() {
        let slot = ScoredResume::failed("cv.png".to_string(), "unsupported".to_string());
        let value = serde_json::to_value(&slot).unwrap();
        assert_eq!(value["error"], "unsupported");
        assert!(value.get("score").is_none());
        assert!(value.get("work_experience").is_none());
    }

    #[test]
    fn test_score_tolerates_prose_fields() {
        let score: ResumeScore = serde_json::from_value(json!({
            "candidate_name": "Jane",
            "resume_score": 7.4,
            "gap_analysis": "No Kubernetes",
            "recommendations": null
        }))
        .unwrap();
        assert_eq!(score.resume_score, 7);
        assert_eq!(score.gap_analysis, vec!["No Kubernetes".to_string()]);
        assert!(score.recommendations.is_empty());
    }
}
