//! Chat with a Japanese sensei and keep the vocabulary it teaches.
//!
//! Every message goes to a language model playing a Japanese teacher who is
//! asked to annotate new words as `Japanese (romaji) - English`. Those
//! annotations are picked out of both sides of the conversation and saved as
//! vocabulary; any vocabulary entry can be promoted to a flashcard.
//!
//! | Record | Key | Lifecycle |
//! |--------|-----|-----------|
//! | **Vocab** | word | Upserted on every detection, last write wins |
//! | **Chat history** | insertion order | Append-only, one per exchange |
//! | **Flashcard** | word | Copied from vocab on request, independent afterwards |
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from TOML files and environment variables
//! - [`db`]: SQLite initialization, schema, and health checks
//! - [`extract`]: Vocabulary annotation detection
//! - [`records`]: The [`RecordStore`](records::RecordStore) trait and its SQLite and JSON backends
//! - [`sensei`]: The language-model provider
//! - [`session`]: A chat session and the per-exchange write path

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod records;
pub mod sensei;
pub mod session;
