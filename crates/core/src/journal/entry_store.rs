use async_trait::async_trait;
use log::{debug, error, info, warn};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};
use tokio::sync::Mutex;

use crate::errors::Result;
use crate::events::{DomainEvent, DomainEventSink, NoOpDomainEventSink, ResetReason};
use crate::journal::journal_errors::JournalError;
use crate::journal::journal_model::JournalEntry;
use crate::journal::journal_traits::EntryStoreTrait;
use crate::journal::seed::seed_entry;
use crate::storage::KeyValueStorageTrait;

/// How [`EntryStore::load`] obtained its collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The persisted collection was decoded.
    Restored { entry_count: usize },
    /// Nothing was persisted; the seed entry was installed.
    Seeded,
    /// The persisted blob was corrupt; it was replaced by the seed entry.
    RecoveredFromCorruption,
}

/// Ordered collection of journal entries, mirrored to one storage slot.
///
/// Every mutation serializes the complete next collection, writes it, and
/// only then publishes it in memory, so the persisted state and the
/// in-memory state never diverge after a failed write.
pub struct EntryStore {
    storage: Arc<dyn KeyValueStorageTrait>,
    storage_key: String,
    entries: RwLock<Vec<JournalEntry>>,
    // Serializes mutations so concurrent writers cannot drop each other's entries.
    write_lock: Mutex<()>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl EntryStore {
    /// Creates an empty store. Call [`EntryStore::load`] before use.
    pub fn new(storage: Arc<dyn KeyValueStorageTrait>, storage_key: impl Into<String>) -> Self {
        Self {
            storage,
            storage_key: storage_key.into(),
            entries: RwLock::new(Vec::new()),
            write_lock: Mutex::new(()),
            event_sink: Arc::new(NoOpDomainEventSink),
        }
    }

    pub fn with_event_sink(mut self, event_sink: Arc<dyn DomainEventSink>) -> Self {
        self.event_sink = event_sink;
        self
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Reads the persisted collection.
    ///
    /// A missing or undecodable slot is replaced by a collection holding
    /// only the seed entry. Storage read failures are returned as errors.
    pub async fn load(&self) -> Result<LoadOutcome> {
        let _guard = self.write_lock.lock().await;

        let raw = self.storage.read(&self.storage_key)?;
        let (entries, outcome) = match raw {
            Some(blob) => match decode_entries(&blob) {
                Ok(entries) => {
                    let entry_count = entries.len();
                    info!(
                        "Loaded {} journal entries from '{}'",
                        entry_count, self.storage_key
                    );
                    (entries, LoadOutcome::Restored { entry_count })
                }
                Err(err) => {
                    warn!("{}. Reinitializing with the seed entry.", err);
                    (vec![seed_entry()], LoadOutcome::RecoveredFromCorruption)
                }
            },
            None => {
                info!(
                    "No journal found under '{}', starting from the seed entry",
                    self.storage_key
                );
                (vec![seed_entry()], LoadOutcome::Seeded)
            }
        };

        if !matches!(outcome, LoadOutcome::Restored { .. }) {
            // The seed is deterministic, so an unpersisted seed reloads identically.
            if let Err(err) = self.persist(&entries).await {
                error!("Failed to persist the seed journal: {}", err);
            }
        }

        let entry_count = entries.len();
        *self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner) = entries;

        match outcome {
            LoadOutcome::Seeded => self.event_sink.emit(DomainEvent::collection_reset(
                ResetReason::FirstRun,
                entry_count,
            )),
            LoadOutcome::RecoveredFromCorruption => self.event_sink.emit(
                DomainEvent::collection_reset(ResetReason::CorruptData, entry_count),
            ),
            LoadOutcome::Restored { .. } => {}
        }

        Ok(outcome)
    }

    fn read_entries(&self) -> RwLockReadGuard<'_, Vec<JournalEntry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    async fn persist(&self, entries: &[JournalEntry]) -> Result<()> {
        let blob = serde_json::to_string(entries)?;
        debug!(
            "Persisting {} journal entries ({} bytes) to '{}'",
            entries.len(),
            blob.len(),
            self.storage_key
        );
        self.storage.write(&self.storage_key, &blob).await
    }

    /// Persists `next` and then publishes it as the current collection.
    async fn commit(&self, next: Vec<JournalEntry>) -> Result<()> {
        self.persist(&next).await?;
        *self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner) = next;
        Ok(())
    }
}

/// Decodes a persisted collection blob.
pub fn decode_entries(blob: &str) -> std::result::Result<Vec<JournalEntry>, JournalError> {
    serde_json::from_str::<Vec<JournalEntry>>(blob)
        .map_err(|e| JournalError::StorageCorruption(e.to_string()))
}

#[async_trait]
impl EntryStoreTrait for EntryStore {
    fn all(&self) -> Vec<JournalEntry> {
        self.read_entries().clone()
    }

    fn get(&self, entry_id: &str) -> Option<JournalEntry> {
        self.read_entries()
            .iter()
            .find(|entry| entry.id == entry_id)
            .cloned()
    }

    fn len(&self) -> usize {
        self.read_entries().len()
    }

    async fn append(&self, entry: JournalEntry) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut next = self.all();
        if next.iter().any(|existing| existing.id == entry.id) {
            return Err(JournalError::DuplicateEntry(entry.id).into());
        }
        let entry_id = entry.id.clone();
        next.push(entry);

        self.commit(next).await?;
        debug!("Appended journal entry {}", entry_id);
        self.event_sink.emit(DomainEvent::entry_appended(entry_id));
        Ok(())
    }

    async fn remove(&self, entry_id: &str) -> Result<JournalEntry> {
        let _guard = self.write_lock.lock().await;

        let mut next = self.all();
        let position = next
            .iter()
            .position(|entry| entry.id == entry_id)
            .ok_or_else(|| JournalError::EntryNotFound(entry_id.to_string()))?;
        let removed = next.remove(position);

        self.commit(next).await?;
        info!("Removed journal entry {}", entry_id);
        self.event_sink.emit(DomainEvent::entry_removed(entry_id));
        Ok(removed)
    }
}
