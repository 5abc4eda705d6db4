use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::CompletionModel;

/// Shared application state injected into all route handlers via Axum extractors.
/// Handlers are stateless per request; nothing here is mutated after startup.
#[derive(Clone)]
pub struct AppState {
    /// Language model behind the parse pipeline. `OpenAiClient` in production.
    pub model: Arc<dyn CompletionModel>,
    pub config: Config,
}
