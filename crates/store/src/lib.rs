//! # Sketch Store
//!
//! Relational persistence for the Sketchdeck backend: file-tree metadata
//! records and user accounts/sessions, backed by SQLite.
//!
//! The adapters here are deliberately thin: CRUD over a table each, no tree
//! logic. Orchestration across metadata and content blobs belongs to the
//! coordinator in `sketch-core`.
//!
//! ## Connection model
//!
//! One process-wide connection guarded by a mutex, shared by every store
//! handle cloned from the same [`Database`]. Store calls are synchronous and
//! may block the calling worker; concurrency is bounded by this single
//! connection.

mod metadata;
mod users;

pub use metadata::MetadataStore;
pub use users::{Session, UserStore};

use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Errors surfaced by the relational stores.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No row matched the given identifier.
    #[error("record not found")]
    NotFound,

    /// A uniqueness constraint was violated (duplicate id or email).
    #[error("record already exists")]
    Conflict,

    /// Any other database failure.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Maps constraint violations onto [`StoreError::Conflict`].
fn map_sqlite_error(err: rusqlite::Error) -> StoreError {
    if let rusqlite::Error::SqliteFailure(code, _) = &err {
        if code.code == rusqlite::ErrorCode::ConstraintViolation {
            return StoreError::Conflict;
        }
    }
    StoreError::Database(err)
}

/// An open handle to the relational database.
///
/// Owns the single pooled connection and runs schema migrations on open.
/// Clone-cheap: handles share the connection.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").finish_non_exhaustive()
    }
}

impl Database {
    /// Opens (creating if necessary) the database at `path` and applies the
    /// schema.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        let db = Self::from_connection(conn)?;
        tracing::info!(path = %path.display(), "opened metadata database");
        Ok(db)
    }

    /// Opens an in-memory database. Used by tests and ephemeral setups.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;

             CREATE TABLE IF NOT EXISTS files (
                id            TEXT PRIMARY KEY NOT NULL,
                name          TEXT NOT NULL,
                is_folder     INTEGER NOT NULL,
                parent_id     TEXT NOT NULL DEFAULT '',
                storage_path  TEXT NOT NULL,
                path          TEXT NOT NULL,
                content_type  TEXT NOT NULL,
                size          INTEGER NOT NULL DEFAULT 0,
                last_modified TEXT NOT NULL,
                created_at    TEXT NOT NULL,
                updated_at    TEXT NOT NULL,
                deleted_at    TEXT
             );
             CREATE INDEX IF NOT EXISTS idx_files_parent_id ON files(parent_id);

             CREATE TABLE IF NOT EXISTS users (
                id            TEXT PRIMARY KEY NOT NULL,
                name          TEXT NOT NULL,
                email         TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                kind          TEXT NOT NULL,
                last_activity TEXT NOT NULL,
                created_at    TEXT NOT NULL,
                updated_at    TEXT NOT NULL,
                deleted_at    TEXT
             );

             CREATE TABLE IF NOT EXISTS sessions (
                token      TEXT PRIMARY KEY NOT NULL,
                user_id    TEXT NOT NULL,
                issued_at  TEXT NOT NULL,
                expires_at TEXT NOT NULL,
                FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
             );",
        )?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Returns a metadata store handle over this database.
    pub fn metadata(&self) -> MetadataStore {
        MetadataStore::new(self.conn.clone())
    }

    /// Returns a user store handle over this database.
    pub fn users(&self) -> UserStore {
        UserStore::new(self.conn.clone())
    }
}
