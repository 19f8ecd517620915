//! Record store: vocabulary, chat history, and flashcards.
//!
//! [`RecordStore`] is the capability set the rest of the crate is written
//! against. Two backends implement it: [`sqlite::SqliteStore`] (default) and
//! [`json::JsonStore`], which reads and writes the flat JSON files of the
//! original study app. Every write is persisted before the call returns.

pub mod json;
pub mod sqlite;
pub mod types;

use anyhow::Result;
use serde::Serialize;

use crate::config::SenseiConfig;
use crate::error::SenseiError;
use types::{ChatRecord, FlashcardEntry, VocabEntry};

/// Durable storage for the three record kinds.
///
/// Vocabulary and flashcards are keyed by word (last write wins); history is
/// append-only and loads in insertion order. No write spans more than one call.
pub trait RecordStore {
    /// Insert or overwrite the vocabulary entry for `word`.
    fn upsert_vocab(&mut self, word: &str, meaning: &str) -> Result<()>;

    /// Append an exchange, stamped with the current local time.
    fn append_history(
        &mut self,
        topic: &str,
        user_message: &str,
        sensei_response: &str,
    ) -> Result<ChatRecord>;

    /// Insert or overwrite the flashcard for `word`.
    fn upsert_flashcard(&mut self, word: &str, meaning: &str) -> Result<()>;

    /// Remove a vocabulary entry. Flashcards are not touched.
    /// Returns `false` if the word was not present.
    fn delete_vocab(&mut self, word: &str) -> Result<bool>;

    /// Remove every record of every kind.
    fn clear(&mut self) -> Result<()>;

    /// All vocabulary entries, ordered by word.
    fn load_vocab(&self) -> Result<Vec<VocabEntry>>;

    /// All chat records, oldest first.
    fn load_history(&self) -> Result<Vec<ChatRecord>>;

    /// All flashcards, ordered by word.
    fn load_flashcards(&self) -> Result<Vec<FlashcardEntry>>;

    /// Backend name for logs and reports.
    fn backend(&self) -> &'static str;

    /// Re-insert a history record as-is, keeping its original timestamp.
    /// Used when copying records between stores.
    fn restore_history(&mut self, record: &ChatRecord) -> Result<()>;
}

/// Open the store selected by `config.storage.backend`.
pub fn open_store(config: &SenseiConfig) -> Result<Box<dyn RecordStore>> {
    match config.storage.backend.as_str() {
        "sqlite" => {
            let store = sqlite::SqliteStore::open(config.resolved_db_path())?;
            Ok(Box::new(store))
        }
        "json" => {
            let store = json::JsonStore::open(config.resolved_data_dir())?;
            Ok(Box::new(store))
        }
        other => Err(SenseiError::UnknownBackend(other.to_string()).into()),
    }
}

/// Copy the vocabulary entry for `word` into the flashcards.
///
/// The flashcard is a snapshot: later changes to the vocabulary entry do not
/// reach it.
pub fn promote_to_flashcard(store: &mut dyn RecordStore, word: &str) -> Result<FlashcardEntry> {
    let entry = store
        .load_vocab()?
        .into_iter()
        .find(|v| v.word == word)
        .ok_or_else(|| SenseiError::NotInVocabulary(word.to_string()))?;

    store.upsert_flashcard(&entry.word, &entry.meaning)?;
    tracing::info!(word = %entry.word, "added to flashcards");
    Ok(entry.into())
}

/// Counts across all three record kinds.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct RecordStats {
    pub backend: String,
    pub vocab_entries: usize,
    pub history_records: usize,
    pub flashcards: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_exchange: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_exchange: Option<String>,
}

pub fn record_stats(store: &dyn RecordStore) -> Result<RecordStats> {
    let history = store.load_history()?;
    Ok(RecordStats {
        backend: store.backend().to_string(),
        vocab_entries: store.load_vocab()?.len(),
        history_records: history.len(),
        flashcards: store.load_flashcards()?.len(),
        first_exchange: history.first().map(|r| r.timestamp.clone()),
        last_exchange: history.last().map(|r| r.timestamp.clone()),
    })
}

/// Result of [`copy_records`].
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CopySummary {
    pub vocab: usize,
    pub history: usize,
    pub flashcards: usize,
}

/// Copy every record from `from` into `to`. Vocabulary and flashcards are
/// upserted; history is appended after whatever `to` already holds.
pub fn copy_records(from: &dyn RecordStore, to: &mut dyn RecordStore) -> Result<CopySummary> {
    let mut summary = CopySummary::default();

    for entry in from.load_vocab()? {
        to.upsert_vocab(&entry.word, &entry.meaning)?;
        summary.vocab += 1;
    }
    for record in from.load_history()? {
        to.restore_history(&record)?;
        summary.history += 1;
    }
    for card in from.load_flashcards()? {
        to.upsert_flashcard(&card.word, &card.meaning)?;
        summary.flashcards += 1;
    }

    tracing::info!(
        from = from.backend(),
        to = to.backend(),
        vocab = summary.vocab,
        history = summary.history,
        flashcards = summary.flashcards,
        "records copied"
    );
    Ok(summary)
}
