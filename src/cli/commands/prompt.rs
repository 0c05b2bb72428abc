//! Prompt command implementation.

use super::open_index;
use super::query::retrieve;
use crate::cli::Output;
use crate::config::{Prompts, Settings};
use crate::rag::prompt::build_prompt;
use anyhow::Result;

/// Run the prompt command.
///
/// Prints the question-answering prompt to stdout so it can be piped into a
/// text-completion model.
pub async fn run_prompt(name: &str, question: &str, top_k: Option<usize>, settings: Settings) -> Result<()> {
    let prompts = Prompts::load(settings.prompts.custom_dir.as_deref())?;
    let index = open_index(&settings)?;

    let hits = retrieve(index, &settings, name, question, top_k, false).await?;
    if hits.is_empty() {
        Output::warning("No relevant chunks found.");
    }

    println!("{}", build_prompt(&prompts.qa, question, &hits));
    Ok(())
}
