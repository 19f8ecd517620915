//! SQLite-backed [`RecordStore`].
//!
//! Each operation is a single autocommit statement, so every write is durable
//! when the call returns and no transaction spans two operations.

use anyhow::Result;
use rusqlite::{params, Connection};
use std::path::Path;

use super::types::{ChatRecord, FlashcardEntry, VocabEntry};
use super::RecordStore;
use crate::db;

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = db::open_database(path)?;
        Ok(Self { conn })
    }

    /// In-memory store, for tests and dry runs.
    pub fn in_memory() -> Result<Self> {
        Ok(Self {
            conn: db::open_memory_database()?,
        })
    }

    /// Wrap an already-initialized connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// History records for a single topic, oldest first.
    pub fn load_history_for_topic(&self, topic: &str) -> Result<Vec<ChatRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT timestamp, topic, user_message, sensei_response \
             FROM chat_history WHERE topic = ?1 ORDER BY id",
        )?;
        let records = stmt
            .query_map(params![topic], row_to_chat_record)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    fn insert_history(&self, record: &ChatRecord) -> Result<()> {
        self.conn.execute(
            "INSERT INTO chat_history (timestamp, topic, user_message, sensei_response) \
             VALUES (?1, ?2, ?3, ?4)",
            params![
                record.timestamp,
                record.topic,
                record.user_message,
                record.sensei_response
            ],
        )?;
        Ok(())
    }
}

fn row_to_chat_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<ChatRecord> {
    Ok(ChatRecord {
        timestamp: row.get(0)?,
        topic: row.get(1)?,
        user_message: row.get(2)?,
        sensei_response: row.get(3)?,
    })
}

impl RecordStore for SqliteStore {
    fn upsert_vocab(&mut self, word: &str, meaning: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO vocab (word, meaning) VALUES (?1, ?2) \
             ON CONFLICT(word) DO UPDATE SET meaning = excluded.meaning",
            params![word, meaning],
        )?;
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
        self.insert_history(&record)?;
        tracing::debug!(topic, timestamp = %record.timestamp, "history appended");
        Ok(record)
    }

    fn upsert_flashcard(&mut self, word: &str, meaning: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO flashcards (word, meaning) VALUES (?1, ?2) \
             ON CONFLICT(word) DO UPDATE SET meaning = excluded.meaning",
            params![word, meaning],
        )?;
        tracing::debug!(word, "flashcard upserted");
        Ok(())
    }

    fn delete_vocab(&mut self, word: &str) -> Result<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM vocab WHERE word = ?1", params![word])?;
        Ok(rows > 0)
    }

    fn clear(&mut self) -> Result<()> {
        self.conn.execute_batch(
            "DELETE FROM vocab;
             DELETE FROM chat_history;
             DELETE FROM flashcards;",
        )?;
        Ok(())
    }

    fn load_vocab(&self) -> Result<Vec<VocabEntry>> {
        let mut stmt = self
            .conn
            .prepare("SELECT word, meaning FROM vocab ORDER BY word")?;
        let entries = stmt
            .query_map([], |row| {
                Ok(VocabEntry::new(
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    fn load_history(&self) -> Result<Vec<ChatRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT timestamp, topic, user_message, sensei_response \
             FROM chat_history ORDER BY id",
        )?;
        let records = stmt
            .query_map([], row_to_chat_record)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    fn load_flashcards(&self) -> Result<Vec<FlashcardEntry>> {
        let mut stmt = self
            .conn
            .prepare("SELECT word, meaning FROM flashcards ORDER BY word")?;
        let cards = stmt
            .query_map([], |row| {
                Ok(FlashcardEntry::new(row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(cards)
    }

    fn backend(&self) -> &'static str {
        "sqlite"
    }

    fn restore_history(&mut self, record: &ChatRecord) -> Result<()> {
        self.insert_history(record)
    }
}
