//! Domain conditions callers branch on. Everything else travels as `anyhow::Error`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SenseiError {
    #[error("OPENAI_API_KEY not set. Please configure it.")]
    MissingApiKey,

    #[error("access denied: wrong access secret")]
    AccessDenied,

    #[error("a topic is required before chatting")]
    MissingTopic,

    #[error("message must not be empty")]
    EmptyMessage,

    #[error("'{0}' is not in the vocabulary")]
    NotInVocabulary(String),

    #[error("unknown storage backend: {0}. Supported: sqlite, json")]
    UnknownBackend(String),
}
