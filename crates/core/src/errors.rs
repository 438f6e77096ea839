//! Core error types for the WealthJournal application.
//!
//! This module defines storage-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage layer.

use std::time::Duration;
use thiserror::Error;

use crate::journal::JournalError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the journal application.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("{0}")]
    Journal(#[from] JournalError),

    #[error("Failed to serialize data: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    /// Returns true when the error should be shown to the user as an inline
    /// message rather than treated as an internal failure.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Error::Journal(e) if e.is_user_facing())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<AnalyzerError> for Error {
    fn from(err: AnalyzerError) -> Self {
        Error::Journal(JournalError::Analysis(err))
    }
}

/// Storage-agnostic error type for persistence operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert storage-specific errors into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    #[error("Database query failed: {0}")]
    QueryFailed(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Failure arm of the analyzer contract.
///
/// The analyzer either yields a complete [`crate::journal::EntryAnalysis`]
/// or one of these. Callers never attempt partial recovery.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyzerError {
    #[error("Analyzer request failed: {0}")]
    Request(String),

    #[error("Analyzer did not respond within {} seconds", .0.as_secs())]
    Timeout(Duration),

    #[error("Analyzer response could not be parsed: {0}")]
    MalformedResponse(String),

    #[error("Missing analyzer credential: {0}")]
    MissingCredential(String),
}
