use std::sync::Arc;

use crate::llm_client::CompletionClient;

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable: nothing is carried over from one analysis to the next.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable completion backend. Default: OpenAiClient. Tests swap in a mock.
    pub completion: Arc<dyn CompletionClient>,
}
