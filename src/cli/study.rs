//! CLI study views: Chat history, vocabulary, and flashcards.

use anyhow::Result;

use chatsensei::config::SenseiConfig;
use chatsensei::records::sqlite::SqliteStore;
use chatsensei::records::types::ChatRecord;
use chatsensei::records::{self, RecordStore};

/// Print all three study sections, as the study zone shows them.
pub fn study(config: &SenseiConfig) -> Result<()> {
    let store = records::open_store(config)?;

    println!("Study Zone");
    println!("{}", "=".repeat(40));
    println!();
    println!("Chat History");
    print_history(&store.load_history()?);
    println!();
    println!("Vocabulary");
    print_vocab(store.as_ref())?;
    println!();
    println!("Flashcards");
    print_flashcards(store.as_ref())?;

    Ok(())
}

pub fn vocab(config: &SenseiConfig) -> Result<()> {
    let store = records::open_store(config)?;
    print_vocab(store.as_ref())
}

pub fn flashcards(config: &SenseiConfig) -> Result<()> {
    let store = records::open_store(config)?;
    print_flashcards(store.as_ref())
}

/// Print the history, optionally narrowed to one topic.
pub fn history(config: &SenseiConfig, topic: Option<&str>) -> Result<()> {
    let records = match (config.storage.backend.as_str(), topic) {
        // indexed lookup when the backend supports it
        ("sqlite", Some(t)) => {
            SqliteStore::open(config.resolved_db_path())?.load_history_for_topic(t)?
        }
        (_, Some(t)) => records::open_store(config)?
            .load_history()?
            .into_iter()
            .filter(|r| r.topic == t)
            .collect(),
        (_, None) => records::open_store(config)?.load_history()?,
    };
    print_history(&records);
    Ok(())
}

fn print_history(records: &[ChatRecord]) {
    if records.is_empty() {
        println!("No chat history yet.");
        return;
    }
    for entry in records {
        println!("[{}] Topic: {}", entry.timestamp, entry.topic);
        println!("You: {}", entry.user_message);
        println!("Sensei: {}", entry.sensei_response);
        println!("---");
    }
}

fn print_vocab(store: &dyn RecordStore) -> Result<()> {
    let vocab = store.load_vocab()?;
    if vocab.is_empty() {
        println!("No vocabulary saved yet.");
        return Ok(());
    }
    for entry in &vocab {
        println!("{}: {}", entry.word, entry.meaning);
    }
    println!("(add one to your flashcards with `chatsensei flashcard <word>`)");
    Ok(())
}

fn print_flashcards(store: &dyn RecordStore) -> Result<()> {
    let cards = store.load_flashcards()?;
    if cards.is_empty() {
        println!("No flashcards yet.");
        return Ok(());
    }
    for card in &cards {
        println!("{}", card.word);
        println!("  Meaning: {}", card.meaning);
    }
    Ok(())
}
