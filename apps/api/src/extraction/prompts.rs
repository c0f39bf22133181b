// All LLM prompt constants for the Extraction module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for resume extraction. Enforces JSON-only output.
pub const RESUME_EXTRACTION_SYSTEM: &str =
    "You are an expert resume parser. \
    Extract structured information from resume text exactly as written. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Resume extraction prompt template.
/// Replace: {fidelity_instruction}, {resume_text}
pub const RESUME_EXTRACTION_PROMPT_TEMPLATE: &str = r#"{fidelity_instruction}

Extract the resume below into a JSON object with this EXACT schema:
{
  "candidate_name": "Full name with spaces between first and last names",
  "email_address": "name@example.com",
  "phone_number": "+91 9876543210",
  "work_experience": {"years": 0, "months": 0},
  "educations_duration": {"years": 0, "months": 0},
  "experiences": [
    {
      "key": "exp1",
      "title": "Software Engineer",
      "description": "What the role involved",
      "date_start": "Jan 2020",
      "date_end": "Present",
      "skills": ["Rust"],
      "certifications": [],
      "courses": [],
      "tasks": ["Built the billing service"],
      "languages": [],
      "interests": [],
      "company": "Acme Corp",
      "location": "Pune"
    }
  ],
  "educations": [
    {
      "key": "edu1",
      "title": "B.Tech Computer Science",
      "description": null,
      "date_start": "2014",
      "date_end": "2018",
      "school": "University name",
      "cgpa": "8.4"
    }
  ],
  "social_urls": [{"type": "GitHub", "url": "https://github.com/..."}],
  "languages": [{"name": "English"}],
  "skills": {"primary_skills": ["Rust"], "secondary_skills": ["Docker"]}
}

Rules:
1. date_start / date_end: copy the text of the resume verbatim ("Mar 2019", "2019-03", "Present").
   If a role has only a start date, set date_end to null.
2. work_experience and educations_duration are computed by the caller; return {"years": 0, "months": 0}.
3. phone_number: country code first (default +91 if none is given), then a space, then the number.
4. Every key above must be present. Use null or [] for anything the resume does not state.
5. If the resume lists fewer than 10 skills, add relevant skills evidenced by the experience and education
   sections to secondary_skills until there are 10 in total.

RESUME TEXT:
{resume_text}"#;

/// System prompt for job description extraction. Enforces JSON-only output.
pub const JD_EXTRACTION_SYSTEM: &str =
    "You are an expert job description analyst. \
    Extract structured information from a job posting. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Job description extraction prompt template.
/// Replace: {jd_text}
pub const JD_EXTRACTION_PROMPT_TEMPLATE: &str = r#"Extract the job description below into a JSON object with this EXACT schema:
{
  "job_title": "Senior Backend Engineer",
  "job_description": "The full description of the role, condensed to plain prose",
  "required_skills": ["Rust", "PostgreSQL"],
  "min_work_experience": "3+ years"
}

Rules:
- required_skills: explicit must-haves only, one skill per entry.
- min_work_experience: as written in the posting, or null if none is stated.

JOB DESCRIPTION:
{jd_text}"#;
