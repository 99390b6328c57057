//! # storefront-storage: Durable Key-Value Store
//!
//! Persistence for client-side state. The cart store saves its whole cart as
//! one serialized blob under a fixed key and reads it back once at startup,
//! the same contract a browser's local storage offers.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Persistence Data Flow                              │
//! │                                                                         │
//! │  CartState::restore ──► get("@storefront:cart")                         │
//! │  CartState (commit) ──► set("@storefront:cart", "[{...}]")              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 storefront-storage (THIS CRATE)                 │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────────────┐   ┌──────────────┐   ┌────────────────┐  │   │
//! │  │   │  KeyValueStore  │   │ SqliteStore  │   │  MemoryStore   │  │   │
//! │  │   │  (trait)        │◄──│ (sqlite.rs)  │   │  (memory.rs)   │  │   │
//! │  │   │  get/set/remove │◄──┼──────────────┼───│  tests, demos  │  │   │
//! │  │   └─────────────────┘   └──────────────┘   └────────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  local_storage table (key, value, updated_at)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storefront_storage::{KeyValueStore, SqliteStore, StorageConfig};
//!
//! let store = SqliteStore::open(StorageConfig::new("./storefront.db")).await?;
//! store.set("@storefront:cart", "[]").await?;
//! assert_eq!(store.get("@storefront:cart").await?.as_deref(), Some("[]"));
//! ```

pub mod error;
pub mod memory;
pub mod migrations;
pub mod sqlite;

pub use error::{StorageError, StorageResult};
pub use memory::MemoryStore;
pub use sqlite::{SqliteStore, StorageConfig};

use async_trait::async_trait;

/// A durable string-to-string store.
///
/// ## Contract
/// - `set` overwrites any previous value under the key
/// - `get` returns `None` when nothing was stored
/// - Implementations must be `Send + Sync`; the cart store shares one
///   instance behind an `Arc`
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`.
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Stores `value` under `key`.
    async fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Deletes `key`. Returns true if a value existed.
    async fn remove(&self, key: &str) -> StorageResult<bool>;
}
