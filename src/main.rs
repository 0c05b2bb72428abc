//! Vidrecall CLI entry point.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vidrecall::cli::{commands, Cli, Commands};
use vidrecall::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = cli.config.as_deref().map(PathBuf::from);
    let settings = Settings::load_from(config_path.as_ref())?;

    // Initialize logging
    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("vidrecall={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match &cli.command {
        Commands::Index { force } => {
            std::fs::create_dir_all(settings.data_dir())?;
            commands::run_index(*force, settings).await?;
        }

        Commands::Query {
            name,
            question,
            top_k,
            keyword,
        } => {
            commands::run_query(name, question, *top_k, *keyword, settings).await?;
        }

        Commands::Prompt { name, question, top_k } => {
            commands::run_prompt(name, question, *top_k, settings).await?;
        }

        Commands::List => {
            commands::run_list(settings).await?;
        }

        Commands::Rebuild { name } => {
            commands::run_rebuild(name, settings).await?;
        }

        Commands::Delete { name } => {
            commands::run_delete(name, settings).await?;
        }

        Commands::Config { action } => {
            commands::run_config(action, config_path.as_ref(), settings)?;
        }
    }

    Ok(())
}
