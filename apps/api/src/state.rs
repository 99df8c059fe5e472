use std::sync::Arc;

use crate::documents::store::TextStore;
use crate::llm_client::Completer;
use crate::matching::extractor::KeywordExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Keyword extractor wrapping the shared annotator. Built once at startup.
    pub extractor: Arc<KeywordExtractor>,
    /// Pluggable text generation. Default: LlmClient.
    pub completer: Arc<dyn Completer>,
    pub store: TextStore,
}
