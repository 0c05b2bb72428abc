//! Rebuild command implementation.

use super::open_index;
use crate::cli::Output;
use crate::config::Settings;
use crate::indexer::BatchIndexer;
use crate::transcription::DirectoryTranscriptSource;
use anyhow::Result;

/// Run the rebuild command.
pub async fn run_rebuild(name: &str, settings: Settings) -> Result<()> {
    let source = DirectoryTranscriptSource::new(settings.transcripts_dir());
    let text = source.load(name)?;

    let index = open_index(&settings)?;
    let indexer = BatchIndexer::new(index, settings.chunking_config());

    let spinner = Output::spinner(&format!("Rebuilding {}...", name));
    let result = indexer.rebuild_transcript(name, &text).await;
    spinner.finish_and_clear();

    match result {
        Ok(count) => {
            Output::success(&format!("Rebuilt '{}' ({} chunks)", name, count));
        }
        Err(e) => {
            Output::error(&format!("Failed to rebuild: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
