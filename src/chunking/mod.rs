//! Transcript chunking for embedding and retrieval.
//!
//! Transcripts are cut into word-bounded windows of consecutive segments,
//! with a few trailing segments of each window repeated at the start of the
//! next one.

mod segmenter;
mod window;

pub use segmenter::{estimate_duration, segment};
pub use window::WordWindowChunker;

use serde::{Deserialize, Serialize};

/// A chunk of transcript text with the time range it covers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Identifier within one chunking run, `chunk-1`, `chunk-2`, ...
    pub id: String,
    /// Space-joined segment texts.
    pub text: String,
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
}

impl Chunk {
    /// Create a new chunk.
    pub fn new(id: impl Into<String>, text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            start,
            end,
        }
    }

}

/// Identifier of the `n`th chunk (1-based).
pub fn chunk_id(n: usize) -> String {
    format!("chunk-{}", n)
}

/// Word budget for chunking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Word count above which a chunk is closed.
    pub max_words: usize,
    /// Maximum words carried over from the end of one chunk into the next.
    pub overlap_words: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_words: 200,
            overlap_words: 40,
        }
    }
}
