use serde::{Deserialize, Serialize};

use crate::lenient;

/// ATS-oriented resume produced by the model. Only `formatted_resume` is
/// returned to clients.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AtsResume {
    #[serde(default, deserialize_with = "lenient::string")]
    pub contact_information: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub professional_summary: String,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub certifications: Vec<String>,
    /// Complete HTML document.
    #[serde(default, deserialize_with = "lenient::string")]
    pub formatted_resume: String,
}
