//! WealthJournal Core - Domain entities, services, and traits.
//!
//! This crate contains the journal's business logic: the entry store,
//! the ingestion pipeline and the dashboard and feed projections.
//! It is storage- and network-agnostic and defines traits that are
//! implemented by the `storage-sqlite` and `ai` crates.

pub mod constants;
pub mod dashboard;
pub mod errors;
pub mod events;
pub mod feed;
pub mod journal;
pub mod storage;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
