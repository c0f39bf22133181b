use serde::{Deserialize, Serialize};

use crate::duration::TotalDuration;
use crate::lenient;
use crate::models::resume::{Education, Skills};

/// Job description fields as read from an uploaded file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobDescriptionRecord {
    #[serde(default, deserialize_with = "lenient::string")]
    pub job_title: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub job_description: String,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub required_skills: Vec<String>,
    /// Free text as written in the posting, e.g. "3+ years".
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub min_work_experience: Option<String>,
}

/// Rewritten, expanded job description that sample candidates and resumes
/// are measured against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnhancedJobDescription {
    #[serde(default, deserialize_with = "lenient::string")]
    pub job_title: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub role_summary: String,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub responsibilities: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub required_skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub experience_level: String,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub key_metrics: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub working_conditions: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub growth_opportunities: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub company_culture: String,
}

impl EnhancedJobDescription {
    /// A description with neither a title nor any responsibilities or skills
    /// is unusable as a scoring baseline.
    pub fn is_blank(&self) -> bool {
        self.job_title.trim().is_empty()
            && self.responsibilities.is_empty()
            && self.required_skills.is_empty()
    }
}

/// A synthetic candidate used as a scoring reference point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    #[serde(default, alias = "candidate_name", deserialize_with = "lenient::string")]
    pub full_name: String,
    #[serde(default, deserialize_with = "lenient::opt_duration")]
    pub experience: Option<TotalDuration>,
    #[serde(default, deserialize_with = "lenient::opt_record")]
    pub key_skills: Option<Skills>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub missing_skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient::records")]
    pub educations: Vec<Education>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub work_samples: Vec<String>,
    /// Fit out of 10.
    #[serde(default, deserialize_with = "lenient::score_out_of_ten")]
    pub score: u8,
    #[serde(default, deserialize_with = "lenient::string")]
    pub scoring_justification: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfileList {
    #[serde(default, alias = "candidates", deserialize_with = "lenient::records")]
    pub candidate_list: Vec<CandidateProfile>,
}

/// Output of the enhance endpoint. Clients send it back unchanged with the
/// resumes they want scored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnhancementResult {
    pub enhanced_job_description: EnhancedJobDescription,
    #[serde(default, deserialize_with = "lenient::records")]
    pub generated_candidates: Vec<CandidateProfile>,
}
