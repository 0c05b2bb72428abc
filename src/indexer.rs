//! Batch indexing of persisted transcripts.
//!
//! Each transcript goes through segmentation, chunking and an upsert into
//! the collection named after it. A failure is recorded against its
//! transcript and never stops the batch.

use crate::chunking::{Chunk, ChunkingConfig, WordWindowChunker};
use crate::error::{Result, VidrecallError};
use crate::transcription::Transcript;
use crate::vector_store::IndexStore;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Outcome of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    /// Transcripts written to their collection.
    pub indexed: usize,
    /// Transcripts left alone because their collection already had chunks.
    pub skipped: usize,
    /// Transcripts that could not be indexed.
    pub failed: usize,
    /// One `"<name>: <message>"` entry per failure.
    pub errors: Vec<String>,
}

impl BatchReport {
    /// Number of transcripts visited.
    pub fn total(&self) -> usize {
        self.indexed + self.skipped + self.failed
    }

    fn record_failure(&mut self, name: &str, error: &VidrecallError) {
        warn!("Failed to index {}: {}", name, error);
        self.failed += 1;
        self.errors.push(format!("{}: {}", name, error));
    }
}

/// What happened to a single transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexOutcome {
    Indexed(usize),
    Skipped,
}

/// Transcript text as handed to [`BatchIndexer::index_all`]: either the text
/// itself or the outcome of reading it.
pub trait TranscriptText {
    fn into_text(self) -> Result<String>;
}

impl TranscriptText for String {
    fn into_text(self) -> Result<String> {
        Ok(self)
    }
}

impl TranscriptText for Result<String> {
    fn into_text(self) -> Result<String> {
        self
    }
}

/// Indexes transcripts one after another into an [`IndexStore`].
pub struct BatchIndexer {
    index: Arc<IndexStore>,
    chunker: WordWindowChunker,
}

impl BatchIndexer {
    pub fn new(index: Arc<IndexStore>, config: ChunkingConfig) -> Self {
        Self {
            index,
            chunker: WordWindowChunker::new(config),
        }
    }

    pub fn index(&self) -> &Arc<IndexStore> {
        &self.index
    }

    /// Segment and chunk raw transcript text.
    pub fn prepare(&self, name: &str, text: &str) -> Vec<Chunk> {
        let transcript = Transcript::from_text(name.to_string(), text.to_string());
        self.chunker.chunk(&transcript)
    }

    /// Index every `(name, text)` pair, skipping non-empty collections
    /// unless `force` is set. A text that could not be read counts as a
    /// failure of its transcript.
    #[instrument(skip(self, source))]
    pub async fn index_all<I, T>(&self, source: I, force: bool) -> BatchReport
    where
        I: IntoIterator<Item = (String, T)>,
        T: TranscriptText,
    {
        let mut report = BatchReport::default();

        for (name, text) in source {
            let outcome = match text.into_text() {
                Ok(text) => self.index_transcript(&name, &text, force).await,
                Err(e) => Err(e),
            };
            match outcome {
                Ok(IndexOutcome::Indexed(count)) => {
                    info!("Indexed {} ({} chunks)", name, count);
                    report.indexed += 1;
                }
                Ok(IndexOutcome::Skipped) => {
                    debug!("Skipping {}, already indexed", name);
                    report.skipped += 1;
                }
                Err(e) => report.record_failure(&name, &e),
            }
        }

        info!(
            "Batch finished: {} indexed, {} skipped, {} failed",
            report.indexed, report.skipped, report.failed
        );
        report
    }

    /// Index a single transcript.
    ///
    /// Returns `Skipped` when the collection already holds chunks and `force`
    /// is not set. Text that produces no chunks is an `EmptyInput` error.
    pub async fn index_transcript(&self, name: &str, text: &str, force: bool) -> Result<IndexOutcome> {
        if !force && self.index.count(name).await? > 0 {
            return Ok(IndexOutcome::Skipped);
        }

        let chunks = self.prepare(name, text);
        if chunks.is_empty() {
            return Err(VidrecallError::EmptyInput("no chunks produced".to_string()));
        }

        let handle = self.index.get_or_create_collection(name).await?;
        let count = self.index.upsert(&handle, &chunks).await?;
        Ok(IndexOutcome::Indexed(count))
    }

    /// Re-chunk a transcript and replace its whole collection.
    #[instrument(skip(self, text))]
    pub async fn rebuild_transcript(&self, name: &str, text: &str) -> Result<usize> {
        let chunks = self.prepare(name, text);
        if chunks.is_empty() {
            return Err(VidrecallError::EmptyInput("no chunks produced".to_string()));
        }

        let handle = self.index.get_or_create_collection(name).await?;
        self.index.rebuild(&handle, &chunks).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::{EmbeddingStatus, HashEmbedder};
    use crate::transcription::DirectoryTranscriptSource;
    use tempfile::TempDir;

    const TALK: &str = "Welcome to the talk. Today we cover ownership.\n\n\
                        Borrowing comes next. Then lifetimes.\n\n\
                        Questions at the end?";

    fn indexer(dir: &TempDir, status: EmbeddingStatus) -> BatchIndexer {
        let index = Arc::new(IndexStore::open(dir.path(), status).unwrap());
        BatchIndexer::new(index, ChunkingConfig::default())
    }

    fn source() -> Vec<(String, String)> {
        vec![
            ("talk-a".to_string(), TALK.to_string()),
            ("blank".to_string(), "   \n\n  ".to_string()),
            ("talk-b".to_string(), "Short one.".to_string()),
        ]
    }

    #[tokio::test]
    async fn test_failure_does_not_abort_batch() {
        let dir = TempDir::new().unwrap();
        let indexer = indexer(&dir, EmbeddingStatus::available(HashEmbedder::default()));

        let report = indexer.index_all(source(), false).await;

        assert_eq!(report.indexed, 2);
        assert_eq!(report.skipped, 0);
        assert_eq!(report.failed, 1);
        assert_eq!(report.total(), 3);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("blank: "));
        assert_eq!(indexer.index().count("talk-b").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unreadable_file_counts_as_failure() {
        let dir = TempDir::new().unwrap();
        let transcripts = dir.path().join("transcripts");
        std::fs::create_dir_all(&transcripts).unwrap();
        std::fs::write(transcripts.join("a-good.txt"), TALK).unwrap();
        std::fs::write(transcripts.join("b-bad.txt"), [0xff, 0xfe, 0x00]).unwrap();
        std::fs::write(transcripts.join("c-good.txt"), "Short one.").unwrap();

        let index = Arc::new(
            IndexStore::open(&dir.path().join("index"), EmbeddingStatus::available(HashEmbedder::default()))
                .unwrap(),
        );
        let indexer = BatchIndexer::new(index.clone(), ChunkingConfig::default());
        let source = DirectoryTranscriptSource::new(&transcripts);

        let report = indexer.index_all(source.load_all().unwrap(), false).await;

        assert_eq!((report.indexed, report.skipped, report.failed), (2, 0, 1));
        assert_eq!(report.total(), 3);
        assert!(report.errors[0].starts_with("b-bad: "));

        let names = index.list_collections().await.unwrap();
        assert!(names.contains("a-good"));
        assert!(names.contains("c-good"));
        assert!(!names.contains("b-bad"));
    }

    #[tokio::test]
    async fn test_second_run_skips_unless_forced() {
        let dir = TempDir::new().unwrap();
        let indexer = indexer(&dir, EmbeddingStatus::available(HashEmbedder::default()));
        indexer.index_all(source(), false).await;

        let again = indexer.index_all(source(), false).await;
        assert_eq!((again.indexed, again.skipped, again.failed), (0, 2, 1));
        assert_eq!(again.total(), 3);

        let forced = indexer.index_all(source(), true).await;
        assert_eq!((forced.indexed, forced.skipped, forced.failed), (2, 0, 1));
        assert_eq!(forced.total(), 3);
    }

    #[tokio::test]
    async fn test_indexes_without_embedder() {
        let dir = TempDir::new().unwrap();
        let indexer = indexer(&dir, EmbeddingStatus::Unavailable("disabled".to_string()));

        let report = indexer.index_all(source(), false).await;
        assert_eq!(report.indexed, 2);

        let chunks = indexer.index().chunks("talk-a").await.unwrap();
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].text.starts_with("Welcome to the talk."));
        assert_eq!(chunks[0].start, 0.0);
    }

    #[tokio::test]
    async fn test_rebuild_replaces_stale_chunks() {
        let dir = TempDir::new().unwrap();
        let index = Arc::new(
            IndexStore::open(dir.path(), EmbeddingStatus::available(HashEmbedder::default())).unwrap(),
        );

        let small = BatchIndexer::new(index.clone(), ChunkingConfig { max_words: 4, overlap_words: 0 });
        small.index_transcript("talk", TALK, false).await.unwrap();
        let before = index.count("talk").await.unwrap();
        assert!(before > 1);

        let large = BatchIndexer::new(index.clone(), ChunkingConfig::default());
        large.index_transcript("talk", TALK, true).await.unwrap();
        assert_eq!(index.count("talk").await.unwrap(), before);

        assert_eq!(large.rebuild_transcript("talk", TALK).await.unwrap(), 1);
        assert_eq!(index.count("talk").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_empty_text_is_error() {
        let dir = TempDir::new().unwrap();
        let indexer = indexer(&dir, EmbeddingStatus::available(HashEmbedder::default()));

        assert!(matches!(
            indexer.index_transcript("blank", "", false).await,
            Err(VidrecallError::EmptyInput(_))
        ));
    }
}
