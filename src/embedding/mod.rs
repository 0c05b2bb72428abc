//! Embedding generation for semantic search and retrieval.
//!
//! An embedder is optional. When none can be built the index still stores
//! documents, and semantic queries report [`VidrecallError::EmbeddingUnavailable`].

mod hash;
mod openai;

pub use hash::HashEmbedder;
pub use openai::OpenAIEmbedder;

use crate::config::EmbeddingSettings;
use crate::error::{Result, VidrecallError};
use crate::openai::is_api_key_configured;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

/// Trait for embedding generation.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate an embedding for a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embeddings for multiple texts.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Get the embedding dimensions.
    fn dimensions(&self) -> usize;

    /// Model identifier recorded alongside stored vectors.
    fn model_name(&self) -> &str;
}

/// Outcome of setting up the embedding function.
#[derive(Clone)]
pub enum EmbeddingStatus {
    /// An embedder is ready.
    Available(Arc<dyn Embedder>),
    /// Embeddings are deliberately or predictably absent (disabled, no key).
    Unavailable(String),
    /// Building the embedder was attempted and failed.
    Failed(String),
}

impl EmbeddingStatus {
    /// Wrap a concrete embedder.
    pub fn available(embedder: impl Embedder + 'static) -> Self {
        EmbeddingStatus::Available(Arc::new(embedder))
    }

    pub fn embedder(&self) -> Option<&Arc<dyn Embedder>> {
        match self {
            EmbeddingStatus::Available(embedder) => Some(embedder),
            _ => None,
        }
    }

    /// Human-readable reason embeddings cannot be used, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            EmbeddingStatus::Available(_) => None,
            EmbeddingStatus::Unavailable(reason) => Some(reason),
            EmbeddingStatus::Failed(error) => Some(error),
        }
    }

    /// The embedder, or the error a semantic query should surface.
    pub fn require(&self) -> Result<Arc<dyn Embedder>> {
        match self {
            EmbeddingStatus::Available(embedder) => Ok(embedder.clone()),
            EmbeddingStatus::Unavailable(reason) => {
                Err(VidrecallError::EmbeddingUnavailable(reason.clone()))
            }
            EmbeddingStatus::Failed(error) => Err(VidrecallError::EmbeddingUnavailable(format!(
                "embedder could not be created: {}",
                error
            ))),
        }
    }
}

impl std::fmt::Debug for EmbeddingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmbeddingStatus::Available(embedder) => {
                f.debug_tuple("Available").field(&embedder.model_name()).finish()
            }
            EmbeddingStatus::Unavailable(reason) => f.debug_tuple("Unavailable").field(reason).finish(),
            EmbeddingStatus::Failed(error) => f.debug_tuple("Failed").field(error).finish(),
        }
    }
}

/// Build the configured embedder. Never fails; problems are reported in the
/// returned status.
pub fn create_embedder(settings: &EmbeddingSettings) -> EmbeddingStatus {
    let status = match settings.provider.trim().to_lowercase().as_str() {
        "" | "none" | "disabled" => {
            EmbeddingStatus::Unavailable("embedding provider is disabled in configuration".to_string())
        }
        "hash" => EmbeddingStatus::available(HashEmbedder::new(settings.dimensions as usize)),
        "openai" => {
            if !is_api_key_configured() {
                EmbeddingStatus::Unavailable("OPENAI_API_KEY is not set".to_string())
            } else {
                match OpenAIEmbedder::with_config(&settings.model, settings.dimensions as usize) {
                    Ok(embedder) => EmbeddingStatus::available(embedder),
                    Err(e) => EmbeddingStatus::Failed(e.to_string()),
                }
            }
        }
        other => EmbeddingStatus::Failed(format!("Unknown embedding provider: {}", other)),
    };

    match status.reason() {
        None => info!("Using {} embeddings", settings.provider),
        Some(reason) => warn!("Semantic search disabled: {}", reason),
    }

    status
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(provider: &str) -> EmbeddingSettings {
        EmbeddingSettings {
            provider: provider.to_string(),
            ..EmbeddingSettings::default()
        }
    }

    #[test]
    fn test_disabled_provider_is_unavailable() {
        let status = create_embedder(&settings("none"));
        assert!(matches!(status, EmbeddingStatus::Unavailable(_)));
        assert!(matches!(
            status.require(),
            Err(VidrecallError::EmbeddingUnavailable(_))
        ));
    }

    #[test]
    fn test_unknown_provider_fails() {
        let status = create_embedder(&settings("word2vec"));
        assert!(matches!(status, EmbeddingStatus::Failed(_)));
        assert!(status.reason().unwrap().contains("word2vec"));
        assert!(status.require().err().unwrap().is_embedding_unavailable());
    }

    #[test]
    fn test_hash_provider_is_available() {
        let mut s = settings("hash");
        s.dimensions = 32;
        let status = create_embedder(&s);

        let embedder = status.require().unwrap();
        assert_eq!(embedder.dimensions(), 32);
        assert!(status.reason().is_none());
    }
}
