use anyhow::Result;
use serde::Serialize;

use chatsensei::config::SenseiConfig;
use chatsensei::records;
use chatsensei::records::types::{ChatRecord, FlashcardEntry, VocabEntry};

/// Export format: all three record kinds.
#[derive(Debug, Serialize)]
struct ExportData {
    vocab: Vec<VocabEntry>,
    chat_history: Vec<ChatRecord>,
    flashcards: Vec<FlashcardEntry>,
}

/// Export all records as JSON to stdout.
pub fn export(config: &SenseiConfig) -> Result<()> {
    let store = records::open_store(config)?;

    let data = ExportData {
        vocab: store.load_vocab()?,
        chat_history: store.load_history()?,
        flashcards: store.load_flashcards()?,
    };

    let json = serde_json::to_string_pretty(&data)?;
    println!("{json}");

    eprintln!(
        "Exported {} vocabulary entries, {} exchanges, and {} flashcards.",
        data.vocab.len(),
        data.chat_history.len(),
        data.flashcards.len()
    );

    Ok(())
}
