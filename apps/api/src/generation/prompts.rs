// All LLM prompt constants for the Generation module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for job description enhancement. Enforces JSON-only output.
pub const JD_ENHANCEMENT_SYSTEM: &str =
    "You are an expert at refining job descriptions so they are clear, specific \
    and aligned with industry standards. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Job description enhancement prompt template.
/// Replace: {jd_json}
pub const JD_ENHANCEMENT_PROMPT_TEMPLATE: &str = r#"Improve the job description below so it is more structured and detailed.

Return a JSON object with this EXACT schema:
{
  "job_title": "string",
  "role_summary": "Overview of the role, its purpose and impact",
  "responsibilities": ["string"],
  "required_skills": ["string"],
  "experience_level": "Seniority and years of experience required",
  "key_metrics": ["Quantifiable indicator of performance"],
  "working_conditions": "Remote / on-site, travel, hours",
  "growth_opportunities": "string",
  "company_culture": "string"
}

Rules:
- responsibilities: at least 10 entries.
- required_skills: at least 15 entries, technical and non-technical.
- key_metrics: at least 10 entries.
- Keep the job title and seniority of the source; do not turn the role into a different one.

EXTRACTED JOB DESCRIPTION:
{jd_json}"#;

/// System prompt for sample candidate generation. Enforces JSON-only output.
pub const CANDIDATE_GENERATION_SYSTEM: &str =
    "You are a recruiter who creates realistic sample candidate profiles used as \
    reference points for scoring real applicants. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Sample candidate prompt template.
/// Replace: {candidate_count}, {jd_json}
pub const CANDIDATE_GENERATION_PROMPT_TEMPLATE: &str = r#"Generate {candidate_count} sample candidates for the job description below, one for each fit level:
- 10/10: ideal candidate, a perfect fit
- 8/10: strong candidate with minor gaps
- 6/10: good but not the best fit
- 4/10: below average
- 2/10: weak fit
- 0/10: not a fit

Return a JSON object with this EXACT schema:
{
  "candidate_list": [
    {
      "full_name": "First Last",
      "experience": {"years": 5, "months": 6},
      "key_skills": {"primary_skills": ["string"], "secondary_skills": ["string"]},
      "missing_skills": ["Skills from the job description this candidate lacks"],
      "educations": [
        {"key": "edu1", "title": "Degree", "date_start": "2012", "date_end": "2016", "school": "string"}
      ],
      "work_samples": ["Relevant project or piece of work"],
      "score": 10,
      "scoring_justification": "Why this candidate earns this score"
    }
  ]
}

Rules:
- experience: months must be between 0 and 11.
- missing_skills must be empty for the 10/10 candidate and grow as the score drops.

ENHANCED JOB DESCRIPTION:
{jd_json}"#;

/// System prompt for resume scoring. Enforces JSON-only output.
pub const RESUME_SCORING_SYSTEM: &str =
    "You evaluate resumes against an enhanced job description and a set of scored \
    sample candidates. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Resume scoring prompt template.
/// Replace: {jd_json}, {candidates_json}, {resume_json}
pub const RESUME_SCORING_PROMPT_TEMPLATE: &str = r#"Evaluate the candidate resume against the enhanced job description and the sample candidates.

Scoring criteria:
1. Skill match (technical and soft skills)
2. Experience relevance (past roles, industry). The resume's work_experience is computed from its dates and is authoritative.
3. Education and certifications
4. Keyword similarity (ATS optimization)

Return a JSON object with this EXACT schema:
{
  "candidate_name": "Name from the resume",
  "resume_score": 7,
  "gap_analysis": ["Missing skill or experience gap"],
  "candidate_summary": "What the candidate brings",
  "closest_sample_candidate": "full_name of the closest sample candidate",
  "recommendations": "How the candidate could close the gaps"
}

resume_score is an integer from 0 to 10, calibrated against the sample candidates' scores.

ENHANCED JOB DESCRIPTION:
{jd_json}

SAMPLE CANDIDATES:
{candidates_json}

CANDIDATE RESUME:
{resume_json}"#;

/// System prompt for ATS resume generation. Enforces JSON-only output.
pub const ATS_RESUME_SYSTEM: &str =
    "You are an expert resume writer with a deep understanding of Applicant \
    Tracking Systems. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// ATS resume prompt template.
/// Replace: {fidelity_instruction}, {source}, {candidate_json}
pub const ATS_RESUME_PROMPT_TEMPLATE: &str = r#"{fidelity_instruction}

Turn the candidate data below ({source}) into a high-scoring, ATS-friendly resume.

Guidelines:
1. Rephrase and reformat the existing information for clarity; use strong action verbs and
   industry keywords present in the data.
2. Format the resume as HTML:
   - candidate name prominent and center aligned
   - employment and education dates right aligned
   - section headings and body text left aligned
   - bullet points for achievements and skills
3. Sections: contact information, professional summary, work experience, education, skills,
   certifications (if any).
4. work_experience and educations_duration in the data are authoritative totals; quote them as given.

Return a JSON object with this EXACT schema:
{
  "contact_information": "HTML snippet with name, email, phone and links",
  "professional_summary": "HTML summary",
  "skills": ["string"],
  "certifications": ["string"],
  "formatted_resume": "<!DOCTYPE html><html>...complete resume...</html>"
}

CANDIDATE DATA:
{candidate_json}"#;
