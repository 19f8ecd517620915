//! CLI `flashcard` and `forget` commands.

use anyhow::Result;

use chatsensei::config::SenseiConfig;
use chatsensei::error::SenseiError;
use chatsensei::records;

/// Copy a vocabulary entry into the flashcards.
pub fn promote(config: &SenseiConfig, word: &str) -> Result<()> {
    let mut store = records::open_store(config)?;

    match records::promote_to_flashcard(store.as_mut(), word) {
        Ok(card) => {
            println!("Added {} to flashcards! ({})", card.word, card.meaning);
            Ok(())
        }
        Err(e) => match e.downcast_ref::<SenseiError>() {
            Some(SenseiError::NotInVocabulary(_)) => {
                println!("{e}");
                Ok(())
            }
            _ => Err(e),
        },
    }
}

/// Remove a word from the vocabulary. An existing flashcard for it survives.
pub fn forget(config: &SenseiConfig, word: &str) -> Result<()> {
    let mut store = records::open_store(config)?;

    if store.delete_vocab(word)? {
        println!("Removed {word} from vocabulary.");
    } else {
        println!("{}", SenseiError::NotInVocabulary(word.to_string()));
    }
    Ok(())
}
