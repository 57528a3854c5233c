//! Database operations for flashcard collections
//!
//! Handles SQLite database initialization, per-owner card collection storage
//! and the simulated current date used for spaced repetition practice.

use super::CardStore;
use crate::error::StoreError;
use crate::models::Flashcard;
use chrono::{DateTime, Duration, Utc};
use rusqlite::{Connection, OptionalExtension, Result, params};
use std::path::Path;

/// Opens (or creates) the SQLite database at `path` with the required tables
pub fn init_database(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)?;
    init_schema(&conn)?;
    Ok(conn)
}

/// Creates tables for card collections and app state.
/// Sets current date to now if not already initialized.
pub fn init_schema(conn: &Connection) -> Result<()> {
    // One JSON document per owner
    conn.execute(
        "CREATE TABLE IF NOT EXISTS card_collections (
            owner_id TEXT PRIMARY KEY,
            cards TEXT NOT NULL,
            updated_at INTEGER NOT NULL
        )",
        (),
    )?;

    // Create app_state table for storing current date
    conn.execute(
        "CREATE TABLE IF NOT EXISTS app_state (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        (),
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO app_state (key, value) VALUES ('current_date', ?1)",
        params![Utc::now().timestamp().to_string()],
    )?;

    Ok(())
}

/// Retrieves current simulated date from database
pub fn get_current_date(conn: &Connection) -> std::result::Result<DateTime<Utc>, StoreError> {
    let timestamp: String = conn.query_row(
        "SELECT value FROM app_state WHERE key = 'current_date'",
        [],
        |row| row.get(0),
    )?;

    timestamp
        .parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .ok_or_else(|| StoreError::CorruptState(format!("current_date = {timestamp:?}")))
}

/// Advances current date by 24 hours (for practicing spaced repetition)
pub fn advance_day(conn: &Connection) -> std::result::Result<DateTime<Utc>, StoreError> {
    let next_day = get_current_date(conn)? + Duration::days(1);

    conn.execute(
        "UPDATE app_state SET value = ?1 WHERE key = 'current_date'",
        params![next_day.timestamp().to_string()],
    )?;

    Ok(next_day)
}

/// Loads an owner's card collection. Owners without a row get an empty one.
pub fn load_cards(owner_id: &str, conn: &Connection) -> std::result::Result<Vec<Flashcard>, StoreError> {
    let document: Option<String> = conn
        .query_row(
            "SELECT cards FROM card_collections WHERE owner_id = ?1",
            params![owner_id],
            |row| row.get(0),
        )
        .optional()?;

    match document {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(Vec::new()),
    }
}

/// Replaces an owner's card collection
pub fn save_cards(
    owner_id: &str,
    cards: &[Flashcard],
    conn: &Connection,
) -> std::result::Result<(), StoreError> {
    let json = serde_json::to_string(cards)?;

    conn.execute(
        "INSERT INTO card_collections (owner_id, cards, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(owner_id) DO UPDATE SET cards = excluded.cards, updated_at = excluded.updated_at",
        params![owner_id, json, Utc::now().timestamp()],
    )?;

    tracing::info!(owner_id, cards = cards.len(), "saved card collection");
    Ok(())
}

/// Retrieves all owner ids that have a stored collection
pub fn list_owners(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT owner_id FROM card_collections ORDER BY owner_id")?;
    let owners = stmt
        .query_map([], |row| row.get(0))?
        .collect::<Result<Vec<String>>>()?;
    Ok(owners)
}

/// [`CardStore`] backed by a SQLite connection.
pub struct SqliteCardStore {
    conn: Connection,
}

impl SqliteCardStore {
    pub fn open(path: &Path) -> std::result::Result<Self, StoreError> {
        Ok(Self {
            conn: init_database(path)?,
        })
    }

    pub fn in_memory() -> std::result::Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl CardStore for SqliteCardStore {
    fn load_cards(&self, owner_id: &str) -> std::result::Result<Vec<Flashcard>, StoreError> {
        load_cards(owner_id, &self.conn)
    }

    fn save_cards(&self, owner_id: &str, cards: &[Flashcard]) -> std::result::Result<(), StoreError> {
        save_cards(owner_id, cards, &self.conn)
    }
}
