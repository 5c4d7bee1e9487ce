use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use rusqlite::{params, Connection, Row};

use super::{Story, StoryId, StoryStore};
use crate::error::AppError;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS stories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL,
    text TEXT NOT NULL,
    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
);";

/// SQLite-backed story store. One connection, one writer at a time.
pub struct SqliteStoryStore {
    conn: Mutex<Connection>,
}

impl SqliteStoryStore {
    /// Opens (or creates) the database file and ensures the schema exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        tracing::info!(path = %path.display(), "Opening story database");

        let conn = Connection::open(path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        Self::from_connection(conn)
    }

    /// Ephemeral database, gone when the store is dropped.
    pub fn open_in_memory() -> Result<Self, AppError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, AppError> {
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.initialize()?;
        Ok(store)
    }

    /// Creates the `stories` table if missing. Existing rows are never touched,
    /// so this runs on every start.
    pub fn initialize(&self) -> Result<(), AppError> {
        self.lock()?.execute_batch(SCHEMA)?;
        tracing::debug!("Story schema ready");
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, AppError> {
        self.conn
            .lock()
            .map_err(|_| AppError::Storage("connection lock poisoned".into()))
    }
}

impl StoryStore for SqliteStoryStore {
    fn insert(&self, username: &str, text: &str) -> Result<StoryId, AppError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO stories (username, text) VALUES (?1, ?2)",
            params![username, text],
        )?;
        let id = conn.last_insert_rowid();
        tracing::info!(id, username, "Story saved");
        Ok(id)
    }

    fn list(&self, username: Option<&str>) -> Result<Vec<Story>, AppError> {
        let conn = self.lock()?;

        let stories = match username {
            Some(username) => {
                let mut stmt = conn.prepare(
                    "SELECT id, text, created_at FROM stories
                     WHERE username = ?1
                     ORDER BY created_at DESC, id DESC",
                )?;
                let rows = stmt.query_map([username], |row| story_from_row(row, false))?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
            None => {
                let mut stmt = conn.prepare(
                    "SELECT id, text, created_at, username FROM stories
                     ORDER BY created_at DESC, id DESC",
                )?;
                let rows = stmt.query_map([], |row| story_from_row(row, true))?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
        };

        Ok(stories)
    }
}

fn story_from_row(row: &Row<'_>, with_username: bool) -> rusqlite::Result<Story> {
    Ok(Story {
        id: row.get("id")?,
        username: if with_username {
            Some(row.get("username")?)
        } else {
            None
        },
        text: row.get("text")?,
        created_at: row.get("created_at")?,
    })
}
