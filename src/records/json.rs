//! Flat-file [`RecordStore`] using the original study app's JSON layout.
//!
//! - `vocab.json`, `flashcards.json`: `{ "word": "meaning", ... }`
//! - `chat_history.json`: `[ { "timestamp", "topic", "user_message", "sensei_response" }, ... ]`
//!
//! Files are pretty-printed with four-space indentation and raw (unescaped)
//! Japanese text. Every write rewrites the whole file through a temp file and
//! rename. A missing, empty, or unparseable file loads as empty. Before a
//! write replaces an unparseable file, the file is moved aside to
//! `<name>.<timestamp>.bak`; any other I/O failure aborts the write.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::types::{ChatRecord, FlashcardEntry, VocabEntry};
use super::RecordStore;

pub const VOCAB_FILE: &str = "vocab.json";
pub const HISTORY_FILE: &str = "chat_history.json";
pub const FLASHCARDS_FILE: &str = "flashcards.json";

type WordMap = BTreeMap<String, String>;

pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    /// Use `dir` as the data directory, creating it if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create directory {}", dir.display()))?;
        tracing::info!(dir = %dir.display(), "json store ready");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    fn upsert_word(&self, file: &str, word: &str, meaning: &str) -> Result<()> {
        let path = self.path(file);
        let mut map: WordMap = read_for_update(&path)?;
        map.insert(word.to_string(), meaning.to_string());
        write_pretty(&path, &map)
    }

    fn push_history(&self, record: &ChatRecord) -> Result<()> {
        let path = self.path(HISTORY_FILE);
        let mut history: Vec<ChatRecord> = read_for_update(&path)?;
        history.push(record.clone());
        write_pretty(&path, &history)
    }
}

/// Read and parse `path` for display. Anything short of a valid document
/// yields the default.
fn read_or_empty<T: DeserializeOwned + Default>(path: &Path) -> T {
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return T::default(),
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "unreadable record file, treating as empty"
            );
            return T::default();
        }
    };

    if is_blank(&bytes) {
        return T::default();
    }

    match serde_json::from_slice(&bytes) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "malformed record file, treating as empty"
            );
            T::default()
        }
    }
}

/// Read and parse `path` ahead of rewriting it.
///
/// Missing or blank files start empty. An unparseable file is renamed to a
/// backup first so the write cannot destroy it. Any other I/O error is
/// returned.
fn read_for_update<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => {
            return Err(e).with_context(|| format!("failed to read {}", path.display()));
        }
    };

    if is_blank(&bytes) {
        return Ok(T::default());
    }

    match serde_json::from_slice(&bytes) {
        Ok(value) => Ok(value),
        Err(e) => {
            let backup = backup_path(path);
            std::fs::rename(path, &backup).with_context(|| {
                format!("failed to move malformed {} aside", path.display())
            })?;
            tracing::warn!(
                path = %path.display(),
                backup = %backup.display(),
                error = %e,
                "malformed record file moved aside, starting fresh"
            );
            Ok(T::default())
        }
    }
}

fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_whitespace)
}

/// `vocab.json` -> `vocab.json.20250314-190211123.bak`
pub fn backup_path(path: &Path) -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S%3f");
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{name}.{stamp}.bak"))
}

/// Serialize with four-space indentation and write via temp file + rename.
fn write_pretty<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;

    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, &buf)
        .with_context(|| format!("failed to write {}", tmp_path.display()))?;
    std::fs::rename(&tmp_path, path)
        .with_context(|| format!("failed to replace {}", path.display()))?;
    Ok(())
}

impl RecordStore for JsonStore {
    fn upsert_vocab(&mut self, word: &str, meaning: &str) -> Result<()> {
        self.upsert_word(VOCAB_FILE, word, meaning)?;
        tracing::debug!(word, "vocab upserted");
        Ok(())
    }

    fn append_history(
        &mut self,
        topic: &str,
        user_message: &str,
        sensei_response: &str,
    ) -> Result<ChatRecord> {
        let record = ChatRecord::now(topic, user_message, sensei_response);
        self.push_history(&record)?;
        tracing::debug!(topic, timestamp = %record.timestamp, "history appended");
        Ok(record)
    }

    fn upsert_flashcard(&mut self, word: &str, meaning: &str) -> Result<()> {
        self.upsert_word(FLASHCARDS_FILE, word, meaning)?;
        tracing::debug!(word, "flashcard upserted");
        Ok(())
    }

    fn delete_vocab(&mut self, word: &str) -> Result<bool> {
        let path = self.path(VOCAB_FILE);
        let mut map: WordMap = read_for_update(&path)?;
        if map.remove(word).is_none() {
            return Ok(false);
        }
        write_pretty(&path, &map)?;
        Ok(true)
    }

    fn clear(&mut self) -> Result<()> {
        for file in [VOCAB_FILE, HISTORY_FILE, FLASHCARDS_FILE] {
            let path = self.path(file);
            match std::fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(e).with_context(|| format!("failed to remove {}", path.display()))
                }
            }
        }
        Ok(())
    }

    fn load_vocab(&self) -> Result<Vec<VocabEntry>> {
        let map: WordMap = read_or_empty(&self.path(VOCAB_FILE));
        Ok(map.into_iter().map(|(w, m)| VocabEntry::new(w, m)).collect())
    }

    fn load_history(&self) -> Result<Vec<ChatRecord>> {
        Ok(read_or_empty(&self.path(HISTORY_FILE)))
    }

    fn load_flashcards(&self) -> Result<Vec<FlashcardEntry>> {
        let map: WordMap = read_or_empty(&self.path(FLASHCARDS_FILE));
        Ok(map
            .into_iter()
            .map(|(w, m)| FlashcardEntry::new(w, m))
            .collect())
    }

    fn backend(&self) -> &'static str {
        "json"
    }

    fn restore_history(&mut self, record: &ChatRecord) -> Result<()> {
        self.push_history(record)
    }
}
