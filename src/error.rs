//! Error types for `todo_accounts`.

/// Errors that can occur while managing accounts and tasks.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error occurred.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A `SQLite` database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Registration collided with an existing username.
    #[error("username already exists: {0}")]
    DuplicateUsername(String),

    /// Malformed user input, rejected before reaching the store.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Returns true if this error came from the underlying persistence layer.
    #[must_use]
    pub const fn is_storage_fault(&self) -> bool {
        matches!(self, Self::Database(_) | Self::Io(_))
    }
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
