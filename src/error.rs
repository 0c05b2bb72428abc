//! Error types for Vidrecall.

use thiserror::Error;

/// Library-level error type for Vidrecall operations.
#[derive(Error, Debug)]
pub enum VidrecallError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// No embedding function is bound to the collection, so semantic search
    /// cannot run. Callers may fall back to keyword retrieval.
    #[error("Embeddings unavailable: {0}")]
    EmbeddingUnavailable(String),

    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    #[error("Nothing to index: {0}")]
    EmptyInput(String),

    #[error("Vector store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Vector store error: {0}")]
    VectorStore(String),

    #[error("Transcript not found: {0}")]
    TranscriptNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl VidrecallError {
    /// Whether this error means semantic search is not possible and the
    /// caller may retry with keyword retrieval.
    pub fn is_embedding_unavailable(&self) -> bool {
        matches!(self, VidrecallError::EmbeddingUnavailable(_))
    }
}

/// Result type alias for Vidrecall operations.
pub type Result<T> = std::result::Result<T, VidrecallError>;
