//! Repository Module
//!
//! CRUD and aggregate queries over the SQLite tables. Functions take
//! `impl SqliteExecutor` so callers can pass either the pool or an open
//! transaction (the lifecycle services re-validate aggregate state
//! inside the transaction that performs the write).

pub mod audit_log;
pub mod location;
pub mod request;
pub mod time_entry;
pub mod user;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepoError::Duplicate(db.message().to_string())
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
