//! Query command implementation.

use super::open_index;
use crate::cli::Output;
use crate::config::Settings;
use crate::rag::{keyword, QueryEngine, RetrievedChunk};
use crate::vector_store::IndexStore;
use anyhow::Result;
use std::sync::Arc;

/// Retrieve passages for `question`, by embeddings unless `keyword` is set.
///
/// When embeddings are unavailable and `query.keyword_fallback` is enabled,
/// word-overlap retrieval over the stored chunks is used instead.
pub(crate) async fn retrieve(
    index: Arc<IndexStore>,
    settings: &Settings,
    name: &str,
    question: &str,
    top_k: Option<usize>,
    keyword: bool,
) -> Result<Vec<RetrievedChunk>> {
    if index.count(name).await? == 0 {
        Output::warning(&format!(
            "No chunks indexed for '{}'. Run 'vidrecall index' first.",
            name
        ));
        return Ok(Vec::new());
    }

    if keyword {
        return keyword_retrieve(&index, name, question, top_k.unwrap_or(settings.query.keyword_top_k)).await;
    }

    let engine = QueryEngine::new(index.clone());
    match engine
        .query(name, question, top_k.unwrap_or(settings.query.top_k))
        .await
    {
        Ok(hits) => Ok(hits),
        Err(e) if e.is_embedding_unavailable() && settings.query.keyword_fallback => {
            Output::warning(&format!("{}; using keyword retrieval", e));
            keyword_retrieve(&index, name, question, top_k.unwrap_or(settings.query.keyword_top_k)).await
        }
        Err(e) => Err(e.into()),
    }
}

async fn keyword_retrieve(
    index: &IndexStore,
    name: &str,
    question: &str,
    top_k: usize,
) -> Result<Vec<RetrievedChunk>> {
    let chunks = index.chunks(name).await?;
    Ok(keyword::retrieve(question, &chunks, top_k)
        .into_iter()
        .cloned()
        .map(RetrievedChunk::from)
        .collect())
}

/// Run the query command.
pub async fn run_query(
    name: &str,
    question: &str,
    top_k: Option<usize>,
    keyword: bool,
    settings: Settings,
) -> Result<()> {
    let index = open_index(&settings)?;

    let spinner = Output::spinner("Searching...");
    let results = retrieve(index, &settings, name, question, top_k, keyword).await;
    spinner.finish_and_clear();

    match results {
        Ok(hits) => {
            if hits.is_empty() {
                Output::warning("No relevant chunks found.");
            } else {
                Output::success(&format!("Found {} passages in {}", hits.len(), name));
                for (i, hit) in hits.iter().enumerate() {
                    Output::passage(i + 1, &hit.format_range(), &hit.text);
                }
            }
        }
        Err(e) => {
            Output::error(&format!("Query failed: {}", e));
            return Err(e);
        }
    }

    Ok(())
}
