//! Retrieval over indexed transcripts.
//!
//! [`QueryEngine`] runs semantic search against a collection, the keyword
//! retriever ranks chunks by word overlap without touching the store, and
//! [`prompt`] turns the retrieved chunks into a question-answering prompt.

pub mod keyword;
pub mod prompt;
mod query;

pub use query::{QueryEngine, DEFAULT_TOP_K};

use crate::chunking::Chunk;
use crate::transcription::format_timestamp;
use crate::vector_store::SearchResult;
use serde::Serialize;

/// A chunk returned by retrieval, with its time range in seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetrievedChunk {
    pub text: String,
    pub start: f64,
    pub end: f64,
}

impl RetrievedChunk {
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }

    /// Time range for display, e.g. `02:13-02:45`.
    pub fn format_range(&self) -> String {
        format!("{}-{}", format_timestamp(self.start), format_timestamp(self.end))
    }
}

impl From<SearchResult> for RetrievedChunk {
    fn from(result: SearchResult) -> Self {
        Self {
            text: result.document.document,
            start: result.document.metadata.start,
            end: result.document.metadata.end,
        }
    }
}

impl From<Chunk> for RetrievedChunk {
    fn from(chunk: Chunk) -> Self {
        Self {
            text: chunk.text,
            start: chunk.start,
            end: chunk.end,
        }
    }
}

/// Anything with searchable text.
pub trait HasText {
    fn text(&self) -> &str;
}

impl HasText for Chunk {
    fn text(&self) -> &str {
        &self.text
    }
}

impl HasText for RetrievedChunk {
    fn text(&self) -> &str {
        &self.text
    }
}

impl HasText for String {
    fn text(&self) -> &str {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector_store::{ChunkMetadata, StoredDocument};

    #[test]
    fn test_from_search_result() {
        let result = SearchResult {
            document: StoredDocument {
                id: "chunk-2".to_string(),
                document: "we talk about lifetimes".to_string(),
                metadata: ChunkMetadata::new(65.0, 100.5),
            },
            score: 0.8,
        };

        let chunk = RetrievedChunk::from(result);
        assert_eq!(chunk, RetrievedChunk::new("we talk about lifetimes", 65.0, 100.5));
        assert_eq!(chunk.format_range(), "01:05-01:40");
    }
}
