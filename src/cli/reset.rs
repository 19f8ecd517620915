//! CLI `reset` command: Delete all records after user confirmation.

use anyhow::{bail, Result};

use chatsensei::config::SenseiConfig;
use chatsensei::records;

use super::prompt;

/// Delete all records after user confirmation.
pub fn reset(config: &SenseiConfig) -> Result<()> {
    let location = match config.storage.backend.as_str() {
        "json" => config.resolved_data_dir(),
        _ => config.resolved_db_path(),
    };

    println!("WARNING: This will permanently delete ALL vocabulary, chat history, and flashcards.");
    println!("Store: {} ({})", location.display(), config.storage.backend);

    let input = prompt("\nType YES to confirm: ")?.unwrap_or_default();
    if input.trim() != "YES" {
        bail!("reset cancelled");
    }

    let mut store = records::open_store(config)?;
    store.clear()?;

    println!("All records deleted. Reset complete.");
    Ok(())
}
