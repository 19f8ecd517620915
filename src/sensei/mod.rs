//! The sensei: the language-model dependency behind each chat exchange.
//!
//! [`SenseiProvider`] is the seam; [`openai::OpenAiProvider`] talks to any
//! OpenAI-compatible `chat/completions` endpoint.

pub mod openai;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::SenseiConfig;

/// Sends one user message under a topic and returns the sensei's reply.
///
/// Failures are not retried; they propagate to the caller as-is.
#[async_trait]
pub trait SenseiProvider: Send + Sync {
    async fn reply(&self, topic: &str, message: &str) -> Result<String>;

    /// Model identifier, for logging.
    fn model(&self) -> &str;
}

/// Persona instruction sent as the system message for every exchange.
pub fn persona_prompt(topic: &str) -> String {
    format!(
        "You are my Japanese sensei. We're discussing {topic}. Use Japanese and English, \
         and introduce new vocabulary in the format 'Japanese (romaji) - English' \
         (e.g., きゅうり (kyuuri) - cucumber)."
    )
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// The two-message conversation sent for each exchange: persona, then user.
pub fn build_messages(topic: &str, message: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage {
            role: Role::System,
            content: persona_prompt(topic),
        },
        ChatMessage {
            role: Role::User,
            content: message.to_string(),
        },
    ]
}

/// Create the configured provider. Fails with
/// [`SenseiError::MissingApiKey`](crate::error::SenseiError::MissingApiKey)
/// when no credential is set.
pub fn create_provider(config: &SenseiConfig) -> Result<Box<dyn SenseiProvider>> {
    let api_key = config.require_api_key()?;
    let provider = openai::OpenAiProvider::new(api_key.to_string(), &config.sensei);
    Ok(Box::new(provider))
}
