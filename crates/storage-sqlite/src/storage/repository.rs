use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use log::debug;
use std::sync::Arc;

use super::model::AppStorageDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::app_storage::dsl::*;
use wealthjournal_core::errors::Result;
use wealthjournal_core::storage::KeyValueStorageTrait;

/// Key-value slots backed by the `app_storage` table.
///
/// Every write replaces the whole slot value in a single statement.
pub struct SqliteKeyValueStorage {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SqliteKeyValueStorage {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        SqliteKeyValueStorage { pool, writer }
    }
}

#[async_trait]
impl KeyValueStorageTrait for SqliteKeyValueStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let mut conn = get_connection(&self.pool)?;
        app_storage
            .filter(storage_key.eq(key))
            .select(storage_value)
            .first::<String>(&mut conn)
            .optional()
            .into_core()
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        let row = AppStorageDB {
            storage_key: key.to_string(),
            storage_value: value.to_string(),
            updated_at: Utc::now().to_rfc3339(),
        };
        debug!(
            "Writing storage slot '{}' ({} bytes)",
            row.storage_key,
            row.storage_value.len()
        );

        self.writer
            .exec(move |conn| {
                diesel::replace_into(app_storage)
                    .values(&row)
                    .execute(conn)
                    .into_core()?;
                Ok(())
            })
            .await
    }
}
