//! Config command implementation.

use crate::cli::{ConfigAction, Output};
use crate::config::Settings;
use anyhow::Result;
use std::path::PathBuf;

/// Run the config command.
pub fn run_config(action: &ConfigAction, config_path: Option<&PathBuf>, settings: Settings) -> Result<()> {
    let path = config_path
        .cloned()
        .unwrap_or_else(Settings::default_config_path);

    match action {
        ConfigAction::Show => {
            if !path.exists() {
                Output::info(&format!("No config file at {}, showing defaults", path.display()));
            }
            let toml_str = toml::to_string_pretty(&settings)
                .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;
            println!("{}", toml_str);
        }

        ConfigAction::Init { force } => {
            if write_default_config(&path, *force)? {
                Output::success(&format!("Wrote default config to {}", path.display()));
            } else {
                Output::warning(&format!(
                    "{} already exists. Use --force to overwrite it.",
                    path.display()
                ));
            }
        }

        ConfigAction::Path => {
            println!("{}", path.display());
        }
    }

    Ok(())
}

/// Write the default settings to `path`. Returns `false` when a file already
/// exists and `force` is not set.
fn write_default_config(path: &PathBuf, force: bool) -> Result<bool> {
    if path.exists() && !force {
        return Ok(false);
    }
    Settings::default().save_to(path)?;
    Ok(true)
}
