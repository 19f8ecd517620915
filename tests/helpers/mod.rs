#![allow(dead_code)]

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chatsensei::db;
use chatsensei::records::json::JsonStore;
use chatsensei::records::sqlite::SqliteStore;
use chatsensei::sensei::SenseiProvider;
use rusqlite::Connection;
use std::collections::VecDeque;
use std::sync::Mutex;
use tempfile::TempDir;

/// Open a fresh in-memory database with the schema applied.
pub fn test_db() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::schema::init_schema(&conn).unwrap();
    conn
}

pub fn sqlite_store() -> SqliteStore {
    SqliteStore::from_connection(test_db())
}

/// A JSON store in a fresh temp dir. Keep the `TempDir` alive for the test.
pub fn json_store() -> (TempDir, JsonStore) {
    let tmp = TempDir::new().unwrap();
    let store = JsonStore::open(tmp.path()).unwrap();
    (tmp, store)
}

/// Provider double that returns canned replies in order and records every call.
pub struct ScriptedSensei {
    replies: Mutex<VecDeque<Result<String, String>>>,
    pub calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedSensei {
    pub fn new(replies: &[&str]) -> Self {
        Self {
            replies: Mutex::new(replies.iter().map(|r| Ok(r.to_string())).collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A provider whose next call fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            replies: Mutex::new(VecDeque::from([Err(message.to_string())])),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl SenseiProvider for ScriptedSensei {
    async fn reply(&self, topic: &str, message: &str) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((topic.to_string(), message.to_string()));
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(e)) => Err(anyhow!(e)),
            None => Err(anyhow!("no scripted reply left")),
        }
    }

    fn model(&self) -> &str {
        "scripted"
    }
}
