//! Key-value store abstraction and its backends.

#[cfg(feature = "couch-store")]
pub mod couchdb;
mod memory;
#[cfg(feature = "mongo-store")]
pub mod mongodb;

use std::fmt;

use futures::future::BoxFuture;
use serde_json::Value;

use crate::dao::storage::StorageResult;

pub use self::memory::MemoryStore;

/// Top-level keys holding the persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKey {
    /// Array of players.
    Players,
    /// Array of game sessions.
    GameData,
}

impl CollectionKey {
    /// Name of the key inside the store.
    pub const fn as_str(self) -> &'static str {
        match self {
            CollectionKey::Players => "players",
            CollectionKey::GameData => "gameData",
        }
    }
}

impl fmt::Display for CollectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Abstraction over a store holding one opaque JSON value per key.
///
/// `get` returns the whole value and `set` replaces it whole. Implementations do not cache
/// and offer no compare-and-swap, so a read followed by a write is not atomic.
pub trait KeyValueStore: Send + Sync {
    /// Value stored under `key`, or `None` when the key was never written.
    fn get(&self, key: CollectionKey) -> BoxFuture<'static, StorageResult<Option<Value>>>;
    /// Replace the value under `key`.
    fn set(&self, key: CollectionKey, value: Value) -> BoxFuture<'static, StorageResult<()>>;
    /// Cheap round trip proving the backend is reachable.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
    /// Re-establish the backend connection after a failed health check.
    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>>;
}
