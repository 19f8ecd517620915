//! Record type definitions.
//!
//! [`VocabEntry`] and [`FlashcardEntry`] are keyed by word; [`ChatRecord`] is
//! append-only and identified only by its position in the history.

use serde::{Deserialize, Serialize};

/// Timestamp layout for [`ChatRecord::timestamp`] (local wall-clock time).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A word/meaning pair detected in chat text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabEntry {
    /// Japanese word, unique within the vocabulary.
    pub word: String,
    /// English meaning, overwritten on every re-detection.
    pub meaning: String,
}

impl VocabEntry {
    pub fn new(word: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            meaning: meaning.into(),
        }
    }
}

/// One completed exchange with the sensei.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRecord {
    /// Local time the exchange was recorded, as [`TIMESTAMP_FORMAT`].
    pub timestamp: String,
    pub topic: String,
    pub user_message: String,
    pub sensei_response: String,
}

impl ChatRecord {
    /// Build a record stamped with the current local time.
    pub fn now(topic: &str, user_message: &str, sensei_response: &str) -> Self {
        Self {
            timestamp: chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
            topic: topic.to_string(),
            user_message: user_message.to_string(),
            sensei_response: sensei_response.to_string(),
        }
    }
}

/// A vocabulary entry promoted for review. Lives independently of the vocab
/// table once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashcardEntry {
    pub word: String,
    pub meaning: String,
}

impl FlashcardEntry {
    pub fn new(word: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            meaning: meaning.into(),
        }
    }
}

impl From<VocabEntry> for FlashcardEntry {
    fn from(entry: VocabEntry) -> Self {
        Self {
            word: entry.word,
            meaning: entry.meaning,
        }
    }
}
