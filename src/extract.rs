//! Vocabulary detection in chat text.
//!
//! The sensei is asked to introduce words as `Japanese (romaji) - English`, e.g.
//! `きゅうり (kyuuri) - cucumber`. [`extract_vocab`] finds every such annotation
//! and returns the word with its meaning. The romaji is matched but not kept.

use regex::Regex;
use std::sync::LazyLock;

use crate::records::types::VocabEntry;

/// Hiragana ぁ-ん, katakana ァ-ン, CJK 一-龯, then `(reading)`, `-`, meaning.
/// The meaning may begin on the line after the dash, but it ends at the next
/// line break so each annotated line is its own entry.
static VOCAB_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([ぁ-んァ-ン一-龯]+)\s*\(([\w-]+)\)\s*-\s*([\w \t]+)")
        .expect("vocabulary pattern is valid")
});

/// Extract every `word (reading) - meaning` annotation from `text`, in order of
/// appearance. Text without annotations yields an empty vector.
pub fn extract_vocab(text: &str) -> Vec<VocabEntry> {
    VOCAB_PATTERN
        .captures_iter(text)
        .filter_map(|caps| {
            let word = caps.get(1)?.as_str();
            // caps[2] is the romaji reading; it is dropped here.
            let meaning = caps.get(3)?.as_str().trim();
            if meaning.is_empty() {
                return None;
            }
            Some(VocabEntry::new(word, meaning))
        })
        .collect()
}
