use std::sync::Arc;

use crate::config::Config;
use crate::embedding::Embedder;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable embedding backend. Default: FastEmbedder. Swap via EMBEDDING_BACKEND.
    /// Holds the process-wide model; read-only once loaded.
    pub embedder: Arc<dyn Embedder>,
}
