use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use super::KeyValueStorageTrait;
use crate::errors::Result;

/// Process-local storage, used for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    slots: RwLock<HashMap<String, String>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates storage with one slot already written.
    pub fn with_slot(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage
            .slots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        storage
    }
}

#[async_trait]
impl KeyValueStorageTrait for InMemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned())
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        self.slots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
