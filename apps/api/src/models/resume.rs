use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::duration::{RawIntervalInput, Reconciliation, TotalDuration};
use crate::lenient;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    #[serde(default, deserialize_with = "lenient::string")]
    pub key: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub logo: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub date_start: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub date_end: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub certifications: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub courses: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub tasks: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub languages: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub interests: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub company: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Education {
    #[serde(default, deserialize_with = "lenient::string")]
    pub key: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub logo: Option<String>,
    /// Degree or qualification.
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub date_start: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub date_end: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub certifications: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub courses: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub school: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub cgpa: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialUrl {
    /// LinkedIn, GitHub, portfolio, ...
    #[serde(rename = "type", default, deserialize_with = "lenient::opt_string")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LanguageItem {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Skills {
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub primary_skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub secondary_skills: Vec<String>,
}

/// Structured resume as extracted by the model.
///
/// `work_experience` and `educations_duration` are overwritten with
/// reconciled values before the record leaves the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeRecord {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub candidate_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub email_address: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_duration")]
    pub work_experience: Option<TotalDuration>,
    #[serde(default, deserialize_with = "lenient::opt_duration")]
    pub educations_duration: Option<TotalDuration>,
    #[serde(default, deserialize_with = "lenient::records")]
    pub experiences: Vec<Experience>,
    #[serde(default, deserialize_with = "lenient::records")]
    pub educations: Vec<Education>,
    #[serde(default, deserialize_with = "lenient::records")]
    pub social_urls: Vec<SocialUrl>,
    #[serde(default, deserialize_with = "language_items")]
    pub languages: Vec<LanguageItem>,
    #[serde(default, deserialize_with = "lenient::opt_record")]
    pub skills: Option<Skills>,
    /// How the two durations were computed. Never read from the model.
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub reconciliation: Option<DurationDiagnostics>,
}

impl ResumeRecord {
    pub fn work_intervals(&self) -> Vec<RawIntervalInput> {
        self.experiences
            .iter()
            .map(|e| interval_of(&e.date_start, &e.date_end))
            .collect()
    }

    pub fn education_intervals(&self) -> Vec<RawIntervalInput> {
        self.educations
            .iter()
            .map(|e| interval_of(&e.date_start, &e.date_end))
            .collect()
    }
}

fn interval_of(start: &Option<String>, end: &Option<String>) -> RawIntervalInput {
    RawIntervalInput {
        start: start.clone(),
        end: end.clone(),
        explicit_duration: None,
    }
}

/// Reconciliation reports behind the durations of a [`ResumeRecord`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationDiagnostics {
    pub reference_date: NaiveDate,
    pub work: Reconciliation,
    pub education: Reconciliation,
}

/// Languages arrive either as `{"name": ..}` objects or as bare strings.
fn language_items<'de, D>(deserializer: D) -> Result<Vec<LanguageItem>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items,
        Some(item) => vec![item],
        None => Vec::new(),
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(name) if !name.trim().is_empty() => Some(LanguageItem { name: Some(name) }),
            Value::Object(_) => serde_json::from_value(item).ok(),
            _ => None,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sparse_model_output_deserializes() {
        let record: ResumeRecord = serde_json::from_value(json!({
            "candidate_name": "Jane Doe",
            "work_experience": {"years": 3, "months": 2},
            "experiences": [
                {"key": "exp1", "title": "Engineer", "company": "Acme",
                 "date_start": "2019-01", "date_end": "present", "skills": "Rust"},
                "not a record"
            ],
            "educations": {"school": "MIT", "date_start": 2012, "date_end": 2016},
            "languages": ["English", {"name": "Hindi"}, 42],
            "skills": {"primary_skills": ["Rust", ""], "secondary_skills": null}
        }))
        .unwrap();

        assert_eq!(record.experiences.len(), 1);
        assert_eq!(record.experiences[0].skills, vec!["Rust".to_string()]);
        assert_eq!(record.educations[0].date_start.as_deref(), Some("2012"));
        assert_eq!(record.languages.len(), 2);
        assert_eq!(
            record.skills.unwrap().primary_skills,
            vec!["Rust".to_string()]
        );
        assert!(record.social_urls.is_empty());
    }

    #[test]
    fn test_reconciliation_is_never_read_from_input() {
        let record: ResumeRecord = serde_json::from_value(json!({
            "reconciliation": {"reference_date": "2020-01-01"}
        }))
        .unwrap();
        assert!(record.reconciliation.is_none());
        let out = serde_json::to_value(&record).unwrap();
        assert!(out.get("reconciliation").is_none());
    }

    #[test]
    fn test_intervals_follow_entry_order() {
        let record = ResumeRecord {
            experiences: vec![
                Experience {
                    date_start: Some("2018-01".into()),
                    date_end: Some("2019-01".into()),
                    ..Default::default()
                },
                Experience {
                    date_start: Some("2020-03".into()),
                    date_end: None,
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let intervals = record.work_intervals();
        assert_eq!(intervals[0], RawIntervalInput::new("2018-01", "2019-01"));
        assert_eq!(intervals[1].end, None);
        assert!(record.education_intervals().is_empty());
    }

    #[test]
    fn test_social_url_type_field_is_renamed() {
        let url: SocialUrl =
            serde_json::from_value(json!({"type": "GitHub", "url": "https://github.com/jane"}))
                .unwrap();
        assert_eq!(url.kind.as_deref(), Some("GitHub"));
        assert_eq!(serde_json::to_value(&url).unwrap()["type"], "GitHub");
    }
}
