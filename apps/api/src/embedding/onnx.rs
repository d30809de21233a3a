use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use tokio::sync::OnceCell;
use tracing::info;

use super::{Embedder, EmbeddingError};

/// Local sentence-transformer served by fastembed's ONNX runtime.
///
/// The model is loaded on first use, exactly once, and then shared
/// read-only. Construction is cheap; weights are fetched into `cache_dir`
/// the first time they are needed.
pub struct FastEmbedder {
    model: EmbeddingModel,
    model_name: String,
    dimension: usize,
    cache_dir: PathBuf,
    loaded: OnceCell<Arc<TextEmbedding>>,
}

impl FastEmbedder {
    pub fn new(model_name: &str, cache_dir: PathBuf) -> Result<Self, EmbeddingError> {
        let (model, dimension) = resolve_model(model_name)?;
        Ok(Self {
            model,
            model_name: model_name.to_string(),
            dimension,
            cache_dir,
            loaded: OnceCell::new(),
        })
    }

    async fn loaded_model(&self) -> Result<Arc<TextEmbedding>, EmbeddingError> {
        self.loaded
            .get_or_try_init(|| async {
                info!(
                    "Loading embedding model {} (cache: {})",
                    self.model_name,
                    self.cache_dir.display()
                );
                let started = Instant::now();
                let options = InitOptions::new(self.model.clone())
                    .with_cache_dir(self.cache_dir.clone())
                    .with_show_download_progress(false);

                let model = tokio::task::spawn_blocking(move || TextEmbedding::try_new(options))
                    .await
                    .map_err(|e| EmbeddingError::ModelLoad(e.to_string()))?
                    .map_err(|e| EmbeddingError::ModelLoad(e.to_string()))?;

                info!(
                    "Embedding model {} ready in {}ms",
                    self.model_name,
                    started.elapsed().as_millis()
                );
                Ok::<_, EmbeddingError>(Arc::new(model))
            })
            .await
            .cloned()
    }
}

#[async_trait]
impl Embedder for FastEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let model = self.loaded_model().await?;
        let input = text.to_string();

        let mut vectors = tokio::task::spawn_blocking(move || model.embed(vec![input], None))
            .await
            .map_err(|e| EmbeddingError::Inference(e.to_string()))?
            .map_err(|e| EmbeddingError::Inference(e.to_string()))?;

        vectors.pop().ok_or(EmbeddingError::EmptyOutput)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }

    async fn warm_up(&self) -> Result<(), EmbeddingError> {
        self.loaded_model().await.map(|_| ())
    }
}

/// Supported sentence-transformers and their output dimension.
fn resolve_model(name: &str) -> Result<(EmbeddingModel, usize), EmbeddingError> {
    let normalized = name
        .trim()
        .trim_start_matches("sentence-transformers/")
        .trim_start_matches("BAAI/")
        .to_ascii_lowercase();
    match normalized.as_str() {
        "all-minilm-l6-v2" => Ok((EmbeddingModel::AllMiniLML6V2, 384)),
        "all-minilm-l12-v2" => Ok((EmbeddingModel::AllMiniLML12V2, 384)),
        "bge-small-en-v1.5" => Ok((EmbeddingModel::BGESmallENV15, 384)),
        _ => Err(EmbeddingError::UnknownModel(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model_resolves_to_minilm() {
        let (model, dimension) = resolve_model(crate::embedding::DEFAULT_MODEL).unwrap();
        assert_eq!(model, EmbeddingModel::AllMiniLML6V2);
        assert_eq!(dimension, 384);
    }

    #[test]
    fn test_hub_prefix_and_case_are_ignored() {
        let (model, _) = resolve_model("sentence-transformers/All-MiniLM-L6-v2").unwrap();
        assert_eq!(model, EmbeddingModel::AllMiniLML6V2);
    }

    #[test]
    fn test_unknown_model_is_rejected() {
        let err = resolve_model("text-embedding-3-small").unwrap_err();
        assert!(matches!(err, EmbeddingError::UnknownModel(name) if name == "text-embedding-3-small"));
    }

    #[test]
    fn test_construction_does_not_load_weights() {
        let embedder =
            FastEmbedder::new("all-MiniLM-L6-v2", PathBuf::from("/nonexistent/cache")).unwrap();
        assert_eq!(embedder.dimension(), 384);
        assert_eq!(embedder.model_name(), "all-MiniLM-L6-v2");
        assert!(embedder.loaded.get().is_none());
    }
}
