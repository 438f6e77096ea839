//! Storage traits.

use async_trait::async_trait;

use crate::errors::Result;

/// A set of named slots, each holding one serialized blob.
///
/// Reads and writes always cover a whole slot; there are no partial writes
/// and no transactions spanning slots.
#[async_trait]
pub trait KeyValueStorageTrait: Send + Sync {
    /// Returns the slot's content, or `None` if it was never written.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the slot's content.
    async fn write(&self, key: &str, value: &str) -> Result<()>;
}
