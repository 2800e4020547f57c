//! # Key-Value Store
//!
//! String-keyed, string-valued storage with interchangeable backends.
//!
//! ## Backends
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         KeyValueStore                                   │
//! │                get(key) -> Option<String>                               │
//! │                set(key, value)                                          │
//! │                remove(key)                                              │
//! │                                                                         │
//! │   ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────┐        │
//! │   │  SqliteStore    │  │  JsonFileStore  │  │  MemoryStore    │        │
//! │   │  kv_store table │  │  one JSON object│  │  HashMap        │        │
//! │   │  (default)      │  │  per file       │  │  (tests)        │        │
//! │   └─────────────────┘  └─────────────────┘  └─────────────────┘        │
//! │                                                                         │
//! │   AnyStore: runtime choice between the three (config-driven)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Values are opaque strings. Encoding is the caller's job; see
//! [`crate::repository::CartRepository`].

use std::future::Future;

use crate::error::DbResult;

mod json_file;
mod memory;
mod sqlite;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Async string key-value storage.
pub trait KeyValueStore: Send + Sync {
    /// Reads the value under `key`. A missing key is `Ok(None)`.
    fn get(&self, key: &str) -> impl Future<Output = DbResult<Option<String>>> + Send;

    /// Writes `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> impl Future<Output = DbResult<()>> + Send;

    /// Deletes `key`. Missing keys are not an error.
    fn remove(&self, key: &str) -> impl Future<Output = DbResult<()>> + Send;
}

/// A store whose backend is picked at runtime.
#[derive(Debug, Clone)]
pub enum AnyStore {
    Sqlite(SqliteStore),
    JsonFile(JsonFileStore),
    Memory(MemoryStore),
}

impl AnyStore {
    /// Backend name as used in configuration.
    pub fn backend_name(&self) -> &'static str {
        match self {
            AnyStore::Sqlite(_) => "sqlite",
            AnyStore::JsonFile(_) => "json_file",
            AnyStore::Memory(_) => "memory",
        }
    }
}

impl KeyValueStore for AnyStore {
    async fn get(&self, key: &str) -> DbResult<Option<String>> {
        match self {
            AnyStore::Sqlite(store) => store.get(key).await,
            AnyStore::JsonFile(store) => store.get(key).await,
            AnyStore::Memory(store) => store.get(key).await,
        }
    }

    async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        match self {
            AnyStore::Sqlite(store) => store.set(key, value).await,
            AnyStore::JsonFile(store) => store.set(key, value).await,
            AnyStore::Memory(store) => store.set(key, value).await,
        }
    }

    async fn remove(&self, key: &str) -> DbResult<()> {
        match self {
            AnyStore::Sqlite(store) => store.remove(key).await,
            AnyStore::JsonFile(store) => store.remove(key).await,
            AnyStore::Memory(store) => store.remove(key).await,
        }
    }
}

impl From<SqliteStore> for AnyStore {
    fn from(store: SqliteStore) -> Self {
        AnyStore::Sqlite(store)
    }
}

impl From<JsonFileStore> for AnyStore {
    fn from(store: JsonFileStore) -> Self {
        AnyStore::JsonFile(store)
    }
}

impl From<MemoryStore> for AnyStore {
    fn from(store: MemoryStore) -> Self {
        AnyStore::Memory(store)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
