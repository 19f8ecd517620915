//! One chat session: the current topic and the on-screen transcript.
//!
//! [`ChatSession::exchange`] runs the full write path for a message:
//! ask the sensei → log the exchange → harvest vocabulary from both sides.

use anyhow::Result;
use std::fmt;

use crate::error::SenseiError;
use crate::extract::extract_vocab;
use crate::records::types::VocabEntry;
use crate::records::RecordStore;
use crate::sensei::SenseiProvider;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    You,
    Sensei,
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::You => f.write_str("You"),
            Self::Sensei => f.write_str("Sensei"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
}

/// Result of a completed exchange.
#[derive(Debug, Clone)]
pub struct ExchangeOutcome {
    pub response: String,
    /// Vocabulary saved by this exchange, user message first, in match order.
    pub saved_vocab: Vec<VocabEntry>,
}

#[derive(Debug, Default)]
pub struct ChatSession {
    topic: String,
    transcript: Vec<Turn>,
}

impl ChatSession {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            transcript: Vec::new(),
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Change the topic. The transcript is kept.
    pub fn set_topic(&mut self, topic: impl Into<String>) {
        self.topic = topic.into();
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    /// Send `message` to the sensei and persist the result.
    ///
    /// Blank topic or message is refused before anything is sent. If the
    /// provider fails, its error is returned and nothing is persisted; the user
    /// turn stays in the transcript.
    pub async fn exchange(
        &mut self,
        provider: &dyn SenseiProvider,
        store: &mut dyn RecordStore,
        message: &str,
    ) -> Result<ExchangeOutcome> {
        if self.topic.trim().is_empty() {
            return Err(SenseiError::MissingTopic.into());
        }
        if message.trim().is_empty() {
            return Err(SenseiError::EmptyMessage.into());
        }

        self.transcript.push(Turn {
            speaker: Speaker::You,
            text: message.to_string(),
        });

        let response = provider.reply(&self.topic, message).await?;
        self.transcript.push(Turn {
            speaker: Speaker::Sensei,
            text: response.clone(),
        });

        store.append_history(&self.topic, message, &response)?;

        let mut saved_vocab = Vec::new();
        for text in [message, response.as_str()] {
            for entry in extract_vocab(text) {
                store.upsert_vocab(&entry.word, &entry.meaning)?;
                tracing::info!(word = %entry.word, meaning = %entry.meaning, "auto-saved vocab");
                saved_vocab.push(entry);
            }
        }

        tracing::debug!(
            topic = %self.topic,
            model = provider.model(),
            saved = saved_vocab.len(),
            "exchange complete"
        );

        Ok(ExchangeOutcome {
            response,
            saved_vocab,
        })
    }
}
