//! Delete command implementation.

use super::open_index;
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;

/// Run the delete command.
pub async fn run_delete(name: &str, settings: Settings) -> Result<()> {
    let index = open_index(&settings)?;

    if index.delete(name).await? {
        Output::success(&format!("Deleted '{}'", name));
    } else {
        Output::warning(&format!("'{}' is not indexed", name));
    }

    Ok(())
}
