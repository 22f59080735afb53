use std::path::Path;

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

const LAST_POSTED_KEY: &str = "last_posted_on";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("unreadable last-posted marker: {0:?}")]
    BadMarker(String),
}

#[derive(Debug, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    AlreadyPresent,
}

/// Durable set of every joke the bot has ever posted, plus the civil date
/// of the most recent successful post. The joke text is its own primary
/// key; rows are never updated or deleted.
pub struct JokeStore {
    conn: Connection,
}

impl JokeStore {
    /// Open (or create) the database at `path` and apply the schema.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS jokes (joke TEXT PRIMARY KEY);
             CREATE TABLE IF NOT EXISTS meta (key TEXT PRIMARY KEY, value TEXT NOT NULL);",
        )?;
        Ok(Self { conn })
    }

    pub fn contains(&self, joke: &str) -> Result<bool, StoreError> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM jokes WHERE joke = ?1",
            params![joke],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    pub fn insert(&self, joke: &str) -> Result<InsertOutcome, StoreError> {
        let changed = self.conn.execute(
            "INSERT OR IGNORE INTO jokes (joke) VALUES (?1)",
            params![joke],
        )?;
        Ok(if changed == 0 {
            InsertOutcome::AlreadyPresent
        } else {
            InsertOutcome::Inserted
        })
    }

    /// IST civil date of the last successful posting cycle, if any.
    pub fn last_posted_on(&self) -> Result<Option<NaiveDate>, StoreError> {
        let value: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM meta WHERE key = ?1",
                params![LAST_POSTED_KEY],
                |row| row.get(0),
            )
            .optional()?;
        match value {
            None => Ok(None),
            Some(raw) => raw
                .parse::<NaiveDate>()
                .map(Some)
                .map_err(|_| StoreError::BadMarker(raw)),
        }
    }

    pub fn mark_posted_on(&self, date: NaiveDate) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO meta (key, value) VALUES (?1, ?2)",
            params![LAST_POSTED_KEY, date.to_string()],
        )?;
        Ok(())
    }
}
