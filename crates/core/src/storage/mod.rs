//! Key-value storage contract for whole-collection persistence.

mod memory_storage;
mod storage_traits;

pub use memory_storage::InMemoryStorage;
pub use storage_traits::KeyValueStorageTrait;
