//! Index command implementation.

use super::open_index;
use crate::cli::Output;
use crate::config::Settings;
use crate::indexer::BatchIndexer;
use crate::transcription::DirectoryTranscriptSource;
use anyhow::Result;

/// Run the index command.
pub async fn run_index(force: bool, settings: Settings) -> Result<()> {
    let source = DirectoryTranscriptSource::new(settings.transcripts_dir());
    let transcripts = source.load_all()?;

    if transcripts.is_empty() {
        Output::info(&format!(
            "No transcripts found in {}. Save transcripts as <name>.txt there.",
            source.dir().display()
        ));
        return Ok(());
    }

    let index = open_index(&settings)?;
    let indexer = BatchIndexer::new(index, settings.chunking_config());

    let pb = Output::progress_bar(transcripts.len() as u64, "Indexing");
    let visiting = transcripts.into_iter().inspect(|(name, _)| {
        pb.set_message(name.clone());
        pb.inc(1);
    });
    let report = indexer.index_all(visiting, force).await;
    pb.finish_and_clear();

    Output::header("Index Report");
    Output::kv("Indexed", &report.indexed.to_string());
    Output::kv("Skipped", &report.skipped.to_string());
    Output::kv("Failed", &report.failed.to_string());

    for error in &report.errors {
        Output::error(error);
    }

    if report.failed == 0 {
        Output::success(&format!("Processed {} transcripts", report.total()));
    } else {
        Output::warning(&format!(
            "{} of {} transcripts failed",
            report.failed,
            report.total()
        ));
    }

    Ok(())
}
