//! List command implementation.

use super::open_index;
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;

/// Run the list command.
pub async fn run_list(settings: Settings) -> Result<()> {
    let index = open_index(&settings)?;

    match index.collections().await {
        Ok(collections) => {
            if collections.is_empty() {
                Output::info("Nothing indexed yet. Use 'vidrecall index' to add transcripts.");
            } else {
                Output::header(&format!("Indexed Transcripts ({})", collections.len()));
                println!();

                for info in &collections {
                    Output::collection_info(&info.name, info.chunk_count, info.embedding_model.as_deref());
                }

                let total_chunks: usize = collections.iter().map(|c| c.chunk_count).sum();
                println!();
                Output::kv("Total transcripts", &collections.len().to_string());
                Output::kv("Total chunks", &total_chunks.to_string());
            }
        }
        Err(e) => {
            Output::error(&format!("Failed to list transcripts: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
