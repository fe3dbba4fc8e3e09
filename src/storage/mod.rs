use crate::error::Result;
use async_trait::async_trait;

#[cfg(feature = "file-storage")]
pub mod file_storage;
pub mod memory_storage;

#[cfg(feature = "sqlite-storage")]
pub mod sqlite_storage;

#[cfg(feature = "file-storage")]
pub use file_storage::FileStorage;
pub use memory_storage::MemoryStorage;

#[cfg(feature = "sqlite-storage")]
pub use sqlite_storage::SqliteStorage;

/// Key under which the counter list is stored as a JSON array
pub const COUNTERS_KEY: &str = "multi-counters";

/// Key under which the current counter id is stored (empty string for none)
pub const CURRENT_COUNTER_KEY: &str = "current-counter-id";

/// String key-value storage backing the counter collection
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads a value, `None` if the key was never written
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes a value, replacing any previous one
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes a key. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}
