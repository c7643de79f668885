use eyre::Result;
use rusqlite::{Connection, OptionalExtension, params};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

use crate::logging;

/// Minimal key/value persistence seam. Values are structured JSON so the
/// durable SQLite store and the in-memory fake stay interchangeable.
pub trait Store {
    fn get(&self, key: &str) -> Result<Option<Value>>;
    fn set(&mut self, key: &str, value: &Value) -> Result<()>;
}

/// Durable store backed by a single kv table in SQLite.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(filepath: &Path) -> Result<Self> {
        if let Some(parent) = filepath.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(filepath)?;

        // Schema creation is idempotent, so opening an existing database
        // is safe and also repairs previously-created empty files.
        Self::init_db(&conn)?;

        Ok(Self { conn })
    }

    fn init_db(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS nav_state (
                key TEXT PRIMARY KEY,
                value TEXT
            );
            ",
        )?;
        Ok(())
    }
}

impl Store for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM nav_state WHERE key=?",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        match raw {
            Some(text) => match serde_json::from_str(&text) {
                Ok(value) => Ok(Some(value)),
                Err(err) => {
                    // An unparseable value reads as absent; the caller
                    // substitutes its empty default.
                    logging::warn(format!("discarding corrupt value for '{}': {}", key, err));
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    fn set(&mut self, key: &str, value: &Value) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO nav_state (key, value) VALUES (?, ?)",
            params![key, serde_json::to_string(value)?],
        )?;
        Ok(())
    }
}

/// Volatile store for tests and for running without a writable state dir.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values(values: HashMap<String, Value>) -> Self {
        Self { values }
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &Value) -> Result<()> {
        self.values.insert(key.to_string(), value.clone());
        Ok(())
    }
}
