pub mod chat;
pub mod doctor;
pub mod export;
pub mod flashcard;
pub mod import;
pub mod reset;
pub mod stats;
pub mod study;

use anyhow::Result;
use std::io::{BufRead, Write};

/// Print `label`, then read one line from stdin. Returns `None` on EOF.
pub fn prompt(label: &str) -> Result<Option<String>> {
    print!("{label}");
    std::io::stdout().flush()?;

    let mut input = String::new();
    let read = std::io::stdin().lock().read_line(&mut input)?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim_end_matches(['\r', '\n']).to_string()))
}
