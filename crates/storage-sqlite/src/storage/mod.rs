mod model;
mod repository;

pub use model::AppStorageDB;
pub use repository::SqliteKeyValueStorage;
