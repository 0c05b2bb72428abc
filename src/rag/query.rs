//! Semantic retrieval from a transcript's collection.

use super::RetrievedChunk;
use crate::error::Result;
use crate::vector_store::IndexStore;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Number of chunks returned when the caller does not ask for a count.
pub const DEFAULT_TOP_K: usize = 4;

/// Answers "which chunks of this transcript match this text".
pub struct QueryEngine {
    index: Arc<IndexStore>,
}

impl QueryEngine {
    pub fn new(index: Arc<IndexStore>) -> Self {
        Self { index }
    }

    /// The `top_k` nearest chunks in the collection `name`, best first.
    ///
    /// Results keep the store's ranking. Fails with
    /// `VidrecallError::EmbeddingUnavailable` when no embedding function is
    /// configured; callers may then fall back to [`super::keyword::retrieve`].
    /// An unknown collection yields no chunks and is not created.
    #[instrument(skip(self, query_text))]
    pub async fn query(&self, name: &str, query_text: &str, top_k: usize) -> Result<Vec<RetrievedChunk>> {
        let Some(handle) = self.index.collection(name).await? else {
            self.index.embedding_status().require()?;
            debug!("Collection {} does not exist", name);
            return Ok(Vec::new());
        };
        let results = self.index.query(&handle, query_text, top_k).await?;
        debug!("Retrieved {} chunks from {}", results.len(), name);

        Ok(results.into_iter().map(RetrievedChunk::from).collect())
    }
}
