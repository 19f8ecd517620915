use anyhow::Result;

use chatsensei::config::SenseiConfig;
use chatsensei::records;

/// Display record counts in the terminal.
pub fn stats(config: &SenseiConfig) -> Result<()> {
    let store = records::open_store(config)?;
    let response = records::record_stats(store.as_ref())?;

    println!("Study Statistics");
    println!("{}", "=".repeat(40));
    println!("  Backend:             {}", response.backend);
    println!("  Vocabulary:          {}", response.vocab_entries);
    println!("  Chat exchanges:      {}", response.history_records);
    println!("  Flashcards:          {}", response.flashcards);

    if let Some(ref first) = response.first_exchange {
        println!("  First exchange:      {first}");
    }
    if let Some(ref last) = response.last_exchange {
        println!("  Last exchange:       {last}");
    }

    Ok(())
}
