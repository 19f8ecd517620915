//! CLI `import` command: Pull in records kept as flat JSON files.

use anyhow::{bail, Result};
use std::path::Path;

use chatsensei::config::SenseiConfig;
use chatsensei::records::{self, json::JsonStore};

/// Copy the records in `dir` (`vocab.json`, `chat_history.json`,
/// `flashcards.json`) into the configured store.
///
/// Vocabulary and flashcards are upserted; history is appended with its
/// original timestamps.
pub fn import(config: &SenseiConfig, dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        bail!("not a directory: {}", dir.display());
    }
    if config.storage.backend == "json" && config.resolved_data_dir() == dir {
        bail!("import source is the configured data directory");
    }

    let source = JsonStore::open(dir)?;
    let mut target = records::open_store(config)?;

    println!("Importing from {}...", dir.display());
    let summary = records::copy_records(&source, target.as_mut())?;

    println!("Import complete:");
    println!("  Vocabulary:     {}", summary.vocab);
    println!("  Chat exchanges: {}", summary.history);
    println!("  Flashcards:     {}", summary.flashcards);

    Ok(())
}
