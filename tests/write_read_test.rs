mod helpers;

use chatsensei::records::types::{FlashcardEntry, VocabEntry};
use chatsensei::records::{record_stats, RecordStore};
use helpers::{json_store, sqlite_store};

fn upsert_keeps_latest_meaning(store: &mut dyn RecordStore) {
    store.upsert_vocab("はし", "chopsticks").unwrap();
    store.upsert_vocab("はし", "bridge").unwrap();

    let vocab = store.load_vocab().unwrap();
    assert_eq!(vocab, vec![VocabEntry::new("はし", "bridge")]);
}

fn history_loads_in_insertion_order(store: &mut dyn RecordStore) {
    let topics = ["food", "travel", "food", "weather", "family"];
    for (i, topic) in topics.iter().enumerate() {
        store
            .append_history(topic, &format!("message {i}"), &format!("reply {i}"))
            .unwrap();
    }

    let history = store.load_history().unwrap();
    assert_eq!(history.len(), topics.len());
    for (i, record) in history.iter().enumerate() {
        assert_eq!(record.topic, topics[i]);
        assert_eq!(record.user_message, format!("message {i}"));
        assert_eq!(record.sensei_response, format!("reply {i}"));
        assert!(!record.timestamp.is_empty());
    }
}

fn round_trip_has_no_duplicates(store: &mut dyn RecordStore) {
    let writes = [
        ("きゅうり", "cucumber"),
        ("トマト", "tomato"),
        ("きゅうり", "cucumbers"),
        ("野菜", "vegetable"),
        ("トマト", "tomatoes"),
    ];
    for (word, meaning) in writes {
        store.upsert_vocab(word, meaning).unwrap();
        store.upsert_flashcard(word, meaning).unwrap();
    }

    let vocab = store.load_vocab().unwrap();
    assert_eq!(vocab.len(), 3);
    let meaning_of = |w: &str| {
        vocab
            .iter()
            .find(|v| v.word == w)
            .map(|v| v.meaning.clone())
    };
    assert_eq!(meaning_of("きゅうり").as_deref(), Some("cucumbers"));
    assert_eq!(meaning_of("トマト").as_deref(), Some("tomatoes"));
    assert_eq!(meaning_of("野菜").as_deref(), Some("vegetable"));

    let cards = store.load_flashcards().unwrap();
    assert_eq!(cards.len(), 3);
    assert!(cards.contains(&FlashcardEntry::new("トマト", "tomatoes")));
}

fn empty_store_loads_empty(store: &mut dyn RecordStore) {
    assert!(store.load_vocab().unwrap().is_empty());
    assert!(store.load_history().unwrap().is_empty());
    assert!(store.load_flashcards().unwrap().is_empty());
}

fn clear_removes_everything(store: &mut dyn RecordStore) {
    store.upsert_vocab("猫", "cat").unwrap();
    store.append_history("pets", "neko?", "猫 (neko) - cat").unwrap();
    store.upsert_flashcard("猫", "cat").unwrap();

    store.clear().unwrap();

    let stats = record_stats(store).unwrap();
    assert_eq!(stats.vocab_entries, 0);
    assert_eq!(stats.history_records, 0);
    assert_eq!(stats.flashcards, 0);
}

#[test]
fn sqlite_upsert_keeps_latest_meaning() {
    upsert_keeps_latest_meaning(&mut sqlite_store());
}

#[test]
fn json_upsert_keeps_latest_meaning() {
    let (_tmp, mut store) = json_store();
    upsert_keeps_latest_meaning(&mut store);
}

#[test]
fn sqlite_history_loads_in_insertion_order() {
    history_loads_in_insertion_order(&mut sqlite_store());
}

#[test]
fn json_history_loads_in_insertion_order() {
    let (_tmp, mut store) = json_store();
    history_loads_in_insertion_order(&mut store);
}

#[test]
fn sqlite_round_trip_has_no_duplicates() {
    round_trip_has_no_duplicates(&mut sqlite_store());
}

#[test]
fn json_round_trip_has_no_duplicates() {
    let (_tmp, mut store) = json_store();
    round_trip_has_no_duplicates(&mut store);
}

#[test]
fn sqlite_empty_store_loads_empty() {
    empty_store_loads_empty(&mut sqlite_store());
}

#[test]
fn json_empty_store_loads_empty() {
    let (_tmp, mut store) = json_store();
    empty_store_loads_empty(&mut store);
}

#[test]
fn sqlite_clear_removes_everything() {
    clear_removes_everything(&mut sqlite_store());
}

#[test]
fn json_clear_removes_everything() {
    let (_tmp, mut store) = json_store();
    clear_removes_everything(&mut store);
}

#[test]
fn sqlite_writes_survive_reopen() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("sensei.db");

    {
        let mut store = chatsensei::records::sqlite::SqliteStore::open(&path).unwrap();
        store.upsert_vocab("水", "water").unwrap();
        store.append_history("drinks", "water?", "水 (mizu) - water").unwrap();
        store.upsert_flashcard("水", "water").unwrap();
    }

    let store = chatsensei::records::sqlite::SqliteStore::open(&path).unwrap();
    assert_eq!(store.load_vocab().unwrap(), vec![VocabEntry::new("水", "water")]);
    assert_eq!(store.load_history().unwrap().len(), 1);
    assert_eq!(store.load_flashcards().unwrap().len(), 1);
}

#[test]
fn json_writes_survive_reopen() {
    let (tmp, mut store) = json_store();
    store.upsert_vocab("水", "water").unwrap();
    store.append_history("drinks", "water?", "水 (mizu) - water").unwrap();
    drop(store);

    let store = chatsensei::records::json::JsonStore::open(tmp.path()).unwrap();
    assert_eq!(store.load_vocab().unwrap(), vec![VocabEntry::new("水", "water")]);
    assert_eq!(store.load_history().unwrap()[0].topic, "drinks");
}
