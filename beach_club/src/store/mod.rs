//! Persisted string stores.
//!
//! The browser's local storage, reduced to what the event calendar and the
//! bags tournament need: string values under string keys. Stores are shared
//! behind `Arc<dyn KeyValueStore>` so tests can swap in [`MemoryStore`].

pub mod errors;
pub mod file;
pub mod memory;

pub use errors::{StoreError, StoreResult};
pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// Generic string key-value store
pub trait KeyValueStore: Send + Sync {
    /// Value under `key`, if any
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Insert or overwrite `key`
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Delete `key`; missing keys are not an error
    fn remove(&self, key: &str) -> StoreResult<()>;
}
