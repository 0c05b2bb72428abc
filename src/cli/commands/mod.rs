//! CLI command implementations.

mod config;
mod delete;
mod index;
mod list;
mod prompt;
mod query;
mod rebuild;

pub use config::run_config;
pub use delete::run_delete;
pub use index::run_index;
pub use list::run_list;
pub use prompt::run_prompt;
pub use query::run_query;
pub use rebuild::run_rebuild;

use crate::cli::Output;
use crate::config::Settings;
use crate::embedding::EmbeddingStatus;
use crate::vector_store::IndexStore;
use anyhow::Result;
use std::sync::Arc;

/// Open the index described by the settings, reporting a missing embedder.
fn open_index(settings: &Settings) -> Result<Arc<IndexStore>> {
    let index = IndexStore::from_settings(settings)?;

    match index.embedding_status() {
        EmbeddingStatus::Available(_) => {}
        EmbeddingStatus::Unavailable(reason) => {
            Output::warning(&format!("Embeddings disabled: {}", reason));
        }
        EmbeddingStatus::Failed(error) => {
            Output::warning(&format!("Embedder could not be created: {}", error));
        }
    }

    Ok(Arc::new(index))
}
