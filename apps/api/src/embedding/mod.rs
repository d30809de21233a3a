//! Embedding Provider — pluggable, trait-based text → vector backends.
//!
//! Default: `FastEmbedder` (local ONNX sentence-transformer, loaded once per process).
//! Offline: `HashingEmbedder` (deterministic bag-of-words, no model download).
//!
//! `AppState` holds an `Arc<dyn Embedder>`, chosen at startup via `EMBEDDING_BACKEND`.

pub mod hashing;
pub mod onnx;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::{Config, EmbeddingBackend};

pub use hashing::HashingEmbedder;
pub use onnx::FastEmbedder;

/// Sentence-transformer used unless `EMBEDDING_MODEL` says otherwise.
pub const DEFAULT_MODEL: &str = "all-MiniLM-L6-v2";

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("Unknown embedding model '{0}'")]
    UnknownModel(String),

    #[error("Failed to load embedding model: {0}")]
    ModelLoad(String),

    #[error("Embedding inference failed: {0}")]
    Inference(String),

    #[error("Embedding model returned no vector")]
    EmptyOutput,
}

/// Maps text to a fixed-length vector. Implementations are immutable after
/// construction and safe to share across requests.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Length of every vector returned by `embed`.
    fn dimension(&self) -> usize;

    fn model_name(&self) -> &str;

    /// Forces any lazy initialization. No-op for backends without a model.
    async fn warm_up(&self) -> Result<(), EmbeddingError> {
        Ok(())
    }
}

/// Builds the configured backend. Model weights are not touched here.
pub fn build_embedder(config: &Config) -> Result<Arc<dyn Embedder>, EmbeddingError> {
    let embedder: Arc<dyn Embedder> = match config.embedding_backend {
        EmbeddingBackend::FastEmbed => Arc::new(FastEmbedder::new(
            &config.embedding_model,
            config.model_cache_dir.clone(),
        )?),
        EmbeddingBackend::Hashing => {
            Arc::new(HashingEmbedder::new(HashingEmbedder::DEFAULT_DIMENSION))
        }
    };
    Ok(embedder)
}
