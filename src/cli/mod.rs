//! CLI module for Vidrecall.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Vidrecall - search video transcripts by meaning
///
/// Indexes saved transcripts into per-video collections and retrieves the
/// timestamped passages that answer a question.
#[derive(Parser, Debug)]
#[command(name = "vidrecall")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "VIDRECALL_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Index every transcript in the transcripts directory
    Index {
        /// Re-index transcripts that already have chunks
        #[arg(short, long)]
        force: bool,
    },

    /// Find the passages of a transcript that match a question
    Query {
        /// Transcript name (file stem)
        name: String,

        /// The question or search text
        question: String,

        /// Number of passages to return
        #[arg(short = 'k', long)]
        top_k: Option<usize>,

        /// Use word-overlap retrieval instead of embeddings
        #[arg(long)]
        keyword: bool,
    },

    /// Print a question-answering prompt built from the matching passages
    Prompt {
        /// Transcript name (file stem)
        name: String,

        /// The question to answer
        question: String,

        /// Number of passages to include
        #[arg(short = 'k', long)]
        top_k: Option<usize>,
    },

    /// List indexed transcripts
    List,

    /// Re-chunk a transcript and replace its collection
    Rebuild {
        /// Transcript name (file stem)
        name: String,
    },

    /// Delete a transcript's collection
    Delete {
        /// Transcript name (file stem)
        name: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Show configuration file path
    Path,
}
