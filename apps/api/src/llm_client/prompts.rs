// Cross-cutting prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

/// Common instruction prepended to every prompt that handles candidate data.
pub const FIDELITY_INSTRUCTION: &str = "\
    CRITICAL: Use ONLY the data provided. Do NOT invent employers, dates, \
    degrees, certifications or contact details. \
    If a field is not present in the source, return null or an empty array for it. \
    Copy dates exactly as written in the source; do NOT normalize or guess them.";
