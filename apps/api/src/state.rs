use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::JsonCompletion;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Holds no per-request results: anything one request produces for another
/// (an enhanced job description, say) travels back through the client.
#[derive(Clone)]
pub struct AppState {
    /// Structured-output model gateway. `LlmClient` in production.
    pub llm: Arc<dyn JsonCompletion>,
    pub config: Config,
}
