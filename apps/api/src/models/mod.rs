//! Record schemas exchanged with the model and with API clients.
//!
//! Everything the model produces is deserialized through `crate::lenient`,
//! so a malformed field degrades to its default instead of failing the record.

pub mod ats;
pub mod job_description;
pub mod resume;
pub mod scoring;
