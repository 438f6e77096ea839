//! Database model for named storage slots.

use diesel::prelude::*;

/// One named slot holding a serialized blob.
#[derive(Queryable, Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::app_storage)]
pub struct AppStorageDB {
    pub storage_key: String,
    pub storage_value: String,
    /// RFC 3339 timestamp of the last write.
    pub updated_at: String,
}
