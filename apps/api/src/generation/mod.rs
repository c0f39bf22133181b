// Generation: job description enhancement, bulk resume scoring, ATS resumes.
// All LLM calls go through llm_client; all durations go through duration.

pub mod ats_resume;
pub mod enhancement;
pub mod handlers;
pub mod prompts;
pub mod scoring;
