//! Vidrecall - search video transcripts by meaning
//!
//! Turns saved video transcripts into timestamped chunks, stores them in one
//! persistent collection per transcript and retrieves the passages that best
//! match a question.
//!
//! # Architecture
//!
//! - `config` - Configuration and prompt templates
//! - `transcription` - Transcript model and the transcripts directory
//! - `chunking` - Paragraph segmentation and word-window chunking
//! - `embedding` - Embedding functions and their availability
//! - `vector_store` - Persistent collections ([`vector_store::IndexStore`])
//! - `rag` - Semantic and keyword retrieval, question-answering prompts
//! - `indexer` - Batch indexing of many transcripts
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use vidrecall::config::Settings;
//! use vidrecall::indexer::BatchIndexer;
//! use vidrecall::rag::QueryEngine;
//! use vidrecall::transcription::DirectoryTranscriptSource;
//! use vidrecall::vector_store::IndexStore;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let index = Arc::new(IndexStore::from_settings(&settings)?);
//!
//!     let source = DirectoryTranscriptSource::new(settings.transcripts_dir());
//!     let indexer = BatchIndexer::new(index.clone(), settings.chunking_config());
//!     let report = indexer.index_all(source.load_all()?, false).await;
//!     println!("Indexed {} transcripts", report.indexed);
//!
//!     let hits = QueryEngine::new(index).query("my-talk", "what is ownership?", 4).await?;
//!     for hit in hits {
//!         println!("[{}] {}", hit.format_range(), hit.text);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod chunking;
pub mod cli;
pub mod config;
pub mod embedding;
pub mod error;
pub mod indexer;
pub mod openai;
pub mod rag;
pub mod transcription;
pub mod vector_store;

pub use error::{Result, VidrecallError};
