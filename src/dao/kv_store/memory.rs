use std::sync::Arc;

use dashmap::DashMap;
use futures::future::BoxFuture;
use serde_json::Value;

use super::{CollectionKey, KeyValueStore};
use crate::dao::storage::StorageResult;

/// Process-local store. Contents are lost on restart.
#[derive(Clone, Default)]
pub struct MemoryStore {
    values: Arc<DashMap<CollectionKey, Value>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: CollectionKey) -> BoxFuture<'static, StorageResult<Option<Value>>> {
        let value = self.values.get(&key).map(|entry| entry.value().clone());
        Box::pin(async move { Ok(value) })
    }

    fn set(&self, key: CollectionKey, value: Value) -> BoxFuture<'static, StorageResult<()>> {
        self.values.insert(key, value);
        Box::pin(async { Ok(()) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }
}
