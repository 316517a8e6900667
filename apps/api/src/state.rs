use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::ContentGenerator;
use crate::render::ResumeRenderer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable content generator. Production: `LlmClient`.
    pub generator: Arc<dyn ContentGenerator>,
    /// Immutable after startup; renders run concurrently on the blocking pool.
    pub renderer: Arc<ResumeRenderer>,
    pub config: Config,
}
