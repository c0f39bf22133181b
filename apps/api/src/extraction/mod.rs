// Extraction: uploaded file -> text -> structured record.
// All LLM calls go through llm_client; all durations go through duration.

pub mod handlers;
pub mod job_description;
pub mod prompts;
pub mod resume;
