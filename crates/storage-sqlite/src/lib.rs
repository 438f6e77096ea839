//! SQLite storage implementation for WealthJournal.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the storage trait defined in `wealthjournal-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - The key-value slot repository
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! The core crate is database-agnostic and works with `KeyValueStorageTrait`.
//!
//! ```text
//!       core (domain)
//!             │
//!             ▼
//!  storage-sqlite (this crate)
//!             │
//!             ▼
//!         SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;
pub mod storage;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use storage::SqliteKeyValueStorage;

// Re-export from wealthjournal-core for convenience
pub use wealthjournal_core::errors::{DatabaseError, Error, Result};
