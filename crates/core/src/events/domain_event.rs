//! Domain event types.

use serde::{Deserialize, Serialize};

/// Why the store replaced its whole collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetReason {
    /// Nothing was persisted yet.
    FirstRun,
    /// The persisted blob could not be decoded and was discarded.
    CorruptData,
}

/// Domain events emitted by the entry store after successful mutations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// A new entry was appended and persisted.
    EntryAppended { entry_id: String },

    /// An entry was removed and the collection persisted.
    EntryRemoved { entry_id: String },

    /// The collection was initialized with the seed entry.
    CollectionReset {
        reason: ResetReason,
        entry_count: usize,
    },
}

impl DomainEvent {
    pub fn entry_appended(entry_id: impl Into<String>) -> Self {
        Self::EntryAppended {
            entry_id: entry_id.into(),
        }
    }

    pub fn entry_removed(entry_id: impl Into<String>) -> Self {
        Self::EntryRemoved {
            entry_id: entry_id.into(),
        }
    }

    pub fn collection_reset(reason: ResetReason, entry_count: usize) -> Self {
        Self::CollectionReset {
            reason,
            entry_count,
        }
    }
}
