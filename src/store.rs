//! `SQLite`-based storage for accounts and tasks.
//!
//! All state lives in a single `SQLite` file (by default `todo.db`) holding
//! two tables, `users` and `tasks`. The account and task services are
//! implemented on [`SqliteStore`] in their own modules.

use crate::error::Result;
use rusqlite::{Connection, ErrorCode};
use std::path::{Path, PathBuf};

/// Schema for both tables. Safe to run on every startup.
const SCHEMA: &str = r"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT UNIQUE,
        password TEXT
    );

    CREATE TABLE IF NOT EXISTS tasks (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER,
        title TEXT,
        completed INTEGER DEFAULT 0,
        FOREIGN KEY (user_id) REFERENCES users(id)
    );
";

/// SQLite-based store.
///
/// Each operation opens a new connection to the database file, runs inside
/// a transaction and closes the connection again. Nothing is cached between
/// operations, so every read sees the current committed state of the file.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    /// Path to the database file.
    db_path: PathBuf,
}

impl SqliteStore {
    /// Open (creating if needed) the database at `db_path` and ensure the
    /// schema exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be created or initialized.
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self> {
        let store = Self { db_path: db_path.as_ref().to_path_buf() };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Get the database path.
    #[must_use]
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Create both tables if they are absent. Never drops or alters data.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema statements fail.
    pub fn ensure_schema(&self) -> Result<()> {
        self.with_transaction(|conn| {
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
    }

    /// Open a connection to the database.
    fn open(&self) -> Result<Connection> {
        if let Some(parent) = self.db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(&self.db_path)?;
        Ok(conn)
    }

    /// Run `f` as one unit of work.
    ///
    /// Opens a connection, begins a transaction, and commits if `f` returns
    /// `Ok`. On any error the transaction is dropped un-committed (rolling
    /// it back) and the connection is closed.
    ///
    /// # Errors
    ///
    /// Returns the error from opening, from `f`, or from committing.
    pub fn with_transaction<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let mut conn = self.open()?;
        let tx = conn.transaction()?;
        let value = f(&tx)?;
        tx.commit()?;
        Ok(value)
    }
}

/// Returns true if `err` is a UNIQUE constraint violation.
pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == ErrorCode::ConstraintViolation
                && e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}
