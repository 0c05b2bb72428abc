//! Named, persistent chunk collections with an optional embedding function.

use super::{ChunkRecord, CollectionInfo, SearchResult, SqliteVectorStore, VectorStore};
use crate::chunking::Chunk;
use crate::config::Settings;
use crate::embedding::{create_embedder, EmbeddingStatus};
use crate::error::{Result, VidrecallError};
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// A collection bound to the embedding function available when it was opened.
#[derive(Debug, Clone)]
pub struct CollectionHandle {
    name: String,
    embedding: EmbeddingStatus,
}

impl CollectionHandle {
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Entry point for persisting and searching transcript chunks.
///
/// Writes never require embeddings: without an embedding function chunks are
/// stored as plain documents and only semantic queries fail.
pub struct IndexStore {
    store: Arc<dyn VectorStore>,
    embedding: EmbeddingStatus,
}

impl IndexStore {
    /// Wrap an existing backend.
    pub fn new(store: Arc<dyn VectorStore>, embedding: EmbeddingStatus) -> Self {
        Self { store, embedding }
    }

    /// Open the SQLite store in `persist_dir`.
    pub fn open(persist_dir: &Path, embedding: EmbeddingStatus) -> Result<Self> {
        let store = SqliteVectorStore::open(persist_dir)?;
        Ok(Self::new(Arc::new(store), embedding))
    }

    /// Open the store and embedder described by the settings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let embedding = create_embedder(&settings.embedding);
        Self::open(&settings.persist_dir(), embedding)
    }

    pub fn embedding_status(&self) -> &EmbeddingStatus {
        &self.embedding
    }

    /// Get a collection, creating it if needed. Idempotent.
    #[instrument(skip(self))]
    pub async fn get_or_create_collection(&self, name: &str) -> Result<CollectionHandle> {
        validate_name(name)?;

        let model = self.embedding.embedder().map(|e| e.model_name().to_string());
        self.store.create_collection(name, model.as_deref()).await?;

        if let Some(reason) = self.embedding.reason() {
            debug!("Collection {} is documents-only: {}", name, reason);
        }

        Ok(CollectionHandle {
            name: name.to_string(),
            embedding: self.embedding.clone(),
        })
    }

    /// Look up an existing collection without creating it.
    pub async fn collection(&self, name: &str) -> Result<Option<CollectionHandle>> {
        if !self.store.has_collection(name).await? {
            return Ok(None);
        }
        Ok(Some(CollectionHandle {
            name: name.to_string(),
            embedding: self.embedding.clone(),
        }))
    }

    async fn records(&self, handle: &CollectionHandle, chunks: &[Chunk]) -> Result<Vec<ChunkRecord>> {
        if chunks.is_empty() {
            return Err(VidrecallError::EmptyInput(format!(
                "no chunks to write to collection {}",
                handle.name()
            )));
        }

        let embeddings: Vec<Option<Vec<f32>>> = match handle.embedding.embedder() {
            Some(embedder) => {
                let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
                embedder.embed_batch(&texts).await?.into_iter().map(Some).collect()
            }
            None => vec![None; chunks.len()],
        };

        if embeddings.len() != chunks.len() {
            return Err(VidrecallError::Embedding(format!(
                "expected {} embeddings, got {}",
                chunks.len(),
                embeddings.len()
            )));
        }

        Ok(chunks
            .iter()
            .zip(embeddings)
            .map(|(chunk, embedding)| ChunkRecord::from_chunk(chunk, embedding))
            .collect())
    }

    /// Insert or replace chunks by id.
    ///
    /// Ids from an earlier run that are absent from `chunks` stay in the
    /// collection; use [`IndexStore::rebuild`] to replace the whole set.
    #[instrument(skip(self, handle, chunks), fields(collection = %handle.name(), count = chunks.len()))]
    pub async fn upsert(&self, handle: &CollectionHandle, chunks: &[Chunk]) -> Result<usize> {
        let records = self.records(handle, chunks).await?;
        self.store.upsert(handle.name(), &records).await
    }

    /// Replace every chunk in the collection with `chunks`.
    #[instrument(skip(self, handle, chunks), fields(collection = %handle.name(), count = chunks.len()))]
    pub async fn rebuild(&self, handle: &CollectionHandle, chunks: &[Chunk]) -> Result<usize> {
        let records = self.records(handle, chunks).await?;
        let written = self.store.replace(handle.name(), &records).await?;
        info!("Rebuilt collection {} with {} chunks", handle.name(), written);
        Ok(written)
    }

    /// Nearest chunks to `query_text`, best first.
    ///
    /// Fails with [`VidrecallError::EmbeddingUnavailable`] when the collection
    /// has no embedding function.
    #[instrument(skip(self, handle, query_text), fields(collection = %handle.name()))]
    pub async fn query(
        &self,
        handle: &CollectionHandle,
        query_text: &str,
        n_results: usize,
    ) -> Result<Vec<SearchResult>> {
        let embedder = handle.embedding.require()?;
        if n_results == 0 {
            return Ok(Vec::new());
        }

        let query_embedding = embedder.embed(query_text).await?;
        self.store.query(handle.name(), &query_embedding, n_results).await
    }

    /// Number of chunks in a collection; zero if it does not exist.
    pub async fn count(&self, name: &str) -> Result<usize> {
        self.store.count(name).await
    }

    /// Permanently remove a collection. Returns `true` if it existed.
    pub async fn delete(&self, name: &str) -> Result<bool> {
        let existed = self.store.delete_collection(name).await?;
        if !existed {
            warn!("Collection {} did not exist", name);
        }
        Ok(existed)
    }

    /// Names of all collections.
    pub async fn list_collections(&self) -> Result<BTreeSet<String>> {
        Ok(self
            .store
            .list_collections()
            .await?
            .into_iter()
            .map(|c| c.name)
            .collect())
    }

    /// Collections with chunk counts.
    pub async fn collections(&self) -> Result<Vec<CollectionInfo>> {
        self.store.list_collections().await
    }

    /// Stored chunks of a collection in chronological order.
    pub async fn chunks(&self, name: &str) -> Result<Vec<Chunk>> {
        Ok(self
            .store
            .documents(name)
            .await?
            .into_iter()
            .map(Chunk::from)
            .collect())
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(VidrecallError::InvalidInput(
            "collection name must not be empty".to_string(),
        ));
    }
    Ok(())
}
