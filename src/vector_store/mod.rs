//! Vector store abstraction for Vidrecall.
//!
//! A store holds named collections, one per transcript. [`IndexStore`] layers
//! the embedding function and chunk conversion on top of a [`VectorStore`]
//! backend.

mod index;
mod sqlite;

pub use index::{CollectionHandle, IndexStore};
pub use sqlite::SqliteVectorStore;

use crate::chunking::Chunk;
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Metadata persisted with every chunk.
///
/// Missing fields read back as `0.0`; unknown fields are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkMetadata {
    pub start: f64,
    pub end: f64,
}

impl ChunkMetadata {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Parse stored metadata, falling back to zero bounds when it is not a
    /// JSON object.
    pub fn parse(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_else(|e| {
            debug!("Ignoring malformed chunk metadata {:?}: {}", raw, e);
            Self::default()
        })
    }
}

/// A chunk as written to a collection.
#[derive(Debug, Clone)]
pub struct ChunkRecord {
    pub id: String,
    pub document: String,
    pub metadata: ChunkMetadata,
    /// Absent when the collection has no embedding function.
    pub embedding: Option<Vec<f32>>,
}

impl ChunkRecord {
    pub fn from_chunk(chunk: &Chunk, embedding: Option<Vec<f32>>) -> Self {
        Self {
            id: chunk.id.clone(),
            document: chunk.text.clone(),
            metadata: ChunkMetadata::new(chunk.start, chunk.end),
            embedding,
        }
    }
}

/// A chunk as read back from a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: String,
    pub document: String,
    pub metadata: ChunkMetadata,
}

impl From<StoredDocument> for Chunk {
    fn from(doc: StoredDocument) -> Self {
        Chunk::new(doc.id, doc.document, doc.metadata.start, doc.metadata.end)
    }
}

/// A search result with score.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The matched document.
    pub document: StoredDocument,
    /// Similarity score (higher is better).
    pub score: f32,
}

/// Summary information about a collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionInfo {
    /// Collection name (the transcript name).
    pub name: String,
    /// Number of stored chunks.
    pub chunk_count: usize,
    /// Model of the embedding function bound to the collection, if any.
    pub embedding_model: Option<String>,
    /// When the collection was first created.
    pub created_at: DateTime<Utc>,
}

/// Trait for vector store implementations.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Create a collection if it does not exist. Returns `true` when created.
    ///
    /// A known `embedding_model` is recorded; `None` never clears one.
    async fn create_collection(&self, name: &str, embedding_model: Option<&str>) -> Result<bool>;

    /// Insert or replace records by id. Records not named are left alone.
    async fn upsert(&self, collection: &str, records: &[ChunkRecord]) -> Result<usize>;

    /// Remove every record of a collection, then write `records`, atomically.
    async fn replace(&self, collection: &str, records: &[ChunkRecord]) -> Result<usize>;

    /// Nearest neighbours of `query_embedding` among records with embeddings.
    async fn query(
        &self,
        collection: &str,
        query_embedding: &[f32],
        limit: usize,
    ) -> Result<Vec<SearchResult>>;

    /// All records of a collection in chronological order.
    async fn documents(&self, collection: &str) -> Result<Vec<StoredDocument>>;

    /// Number of records in a collection; zero if it does not exist.
    async fn count(&self, collection: &str) -> Result<usize>;

    /// Drop a collection and its records. Returns `true` if it existed.
    async fn delete_collection(&self, name: &str) -> Result<bool>;

    /// All collections, sorted by name.
    async fn list_collections(&self) -> Result<Vec<CollectionInfo>>;

    /// Whether a collection exists, independent of its record count.
    async fn has_collection(&self, name: &str) -> Result<bool>;
}

/// Compute cosine similarity between two vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}
