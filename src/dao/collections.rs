//! Typed read and write of the `players` and `gameData` collections.
//!
//! The store treats each collection as one opaque JSON value; this module decodes it into
//! records on the way out and encodes the full list on the way in.

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::dao::{
    kv_store::{CollectionKey, KeyValueStore},
    models::{GameSessionEntity, PlayerEntity},
    storage::{StorageError, StorageResult},
};

/// Read the whole collection under `key`. An absent key reads as an empty list.
pub async fn load<T>(store: &dyn KeyValueStore, key: CollectionKey) -> StorageResult<Vec<T>>
where
    T: DeserializeOwned,
{
    match store.get(key).await? {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value) => serde_json::from_value(value).map_err(|source| StorageError::InvalidValue {
            key: key.as_str(),
            source,
        }),
    }
}

/// Replace the whole collection under `key`.
pub async fn save<T>(store: &dyn KeyValueStore, key: CollectionKey, items: &[T]) -> StorageResult<()>
where
    T: Serialize,
{
    let value = serde_json::to_value(items).map_err(|source| StorageError::InvalidValue {
        key: key.as_str(),
        source,
    })?;
    store.set(key, value).await
}

/// Read all players.
pub async fn load_players(store: &dyn KeyValueStore) -> StorageResult<Vec<PlayerEntity>> {
    load(store, CollectionKey::Players).await
}

/// Replace all players.
pub async fn save_players(store: &dyn KeyValueStore, players: &[PlayerEntity]) -> StorageResult<()> {
    save(store, CollectionKey::Players, players).await
}

/// Read all game sessions.
pub async fn load_games(store: &dyn KeyValueStore) -> StorageResult<Vec<GameSessionEntity>> {
    load(store, CollectionKey::GameData).await
}

/// Replace all game sessions.
pub async fn save_games(
    store: &dyn KeyValueStore,
    games: &[GameSessionEntity],
) -> StorageResult<()> {
    save(store, CollectionKey::GameData, games).await
}
