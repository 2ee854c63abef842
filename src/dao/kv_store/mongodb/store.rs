use std::sync::Arc;

use futures::future::BoxFuture;
use mongodb::{Client, Collection, Database, bson::doc};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::{
    config::MongoConfig,
    error::{MongoDaoError, MongoResult},
    models::{MongoValueDocument, doc_id},
};
use crate::dao::{
    kv_store::{CollectionKey, KeyValueStore},
    retry::{Backoff, MAX_ATTEMPTS},
    storage::StorageResult,
};

const KV_COLLECTION_NAME: &str = "kv";

/// MongoDB-backed key-value store keeping each collection in a single document.
#[derive(Clone)]
pub struct MongoKvStore {
    inner: Arc<MongoInner>,
}

struct MongoInner {
    state: RwLock<MongoState>,
    config: MongoConfig,
}

struct MongoState {
    // Kept alive alongside the database handle it produced.
    #[allow(dead_code)]
    client: Client,
    database: Database,
}

impl MongoState {
    /// Build a client for `config` and wait until the database answers a ping.
    async fn open(config: &MongoConfig) -> MongoResult<Self> {
        let client = Client::with_options(config.options.clone())
            .map_err(|source| MongoDaoError::ClientConstruction { source })?;
        let database = client.database(&config.database_name);

        let mut backoff = Backoff::default();
        let mut attempt = 1;
        loop {
            match database.run_command(doc! { "ping": 1 }).await {
                Ok(_) => {
                    debug!(database = %config.database_name, attempt, "MongoDB answered ping");
                    return Ok(Self { client, database });
                }
                Err(source) if attempt >= MAX_ATTEMPTS => {
                    return Err(MongoDaoError::InitialPing {
                        attempts: attempt,
                        source,
                    });
                }
                Err(err) => {
                    warn!(attempt, error = %err, "MongoDB ping failed; retrying");
                    backoff.wait().await;
                    attempt += 1;
                }
            }
        }
    }
}

impl MongoInner {
    async fn ping(&self) -> MongoResult<()> {
        let database = {
            let guard = self.state.read().await;
            guard.database.clone()
        };

        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|source| MongoDaoError::HealthPing { source })?;
        Ok(())
    }

    async fn reconnect(&self) -> MongoResult<()> {
        let fresh = MongoState::open(&self.config).await?;
        *self.state.write().await = fresh;
        Ok(())
    }
}

impl MongoKvStore {
    /// Establish a connection to MongoDB.
    pub async fn connect(config: MongoConfig) -> MongoResult<Self> {
        let state = MongoState::open(&config).await?;
        let inner = Arc::new(MongoInner {
            state: RwLock::new(state),
            config,
        });

        Ok(Self { inner })
    }

    async fn collection(&self) -> Collection<MongoValueDocument> {
        let guard = self.inner.state.read().await;
        guard
            .database
            .collection::<MongoValueDocument>(KV_COLLECTION_NAME)
    }

    async fn load(&self, key: CollectionKey) -> MongoResult<Option<Value>> {
        let collection = self.collection().await;

        let document = collection
            .find_one(doc_id(key))
            .await
            .map_err(|source| MongoDaoError::LoadValue {
                key: key.as_str(),
                source,
            })?;

        Ok(document.map(|doc| doc.value))
    }

    async fn save(&self, key: CollectionKey, value: Value) -> MongoResult<()> {
        let collection = self.collection().await;
        let document = MongoValueDocument::new(key, value);

        collection
            .replace_one(doc_id(key), &document)
            .upsert(true)
            .await
            .map_err(|source| MongoDaoError::SaveValue {
                key: key.as_str(),
                source,
            })?;

        Ok(())
    }
}

impl KeyValueStore for MongoKvStore {
    fn get(&self, key: CollectionKey) -> BoxFuture<'static, StorageResult<Option<Value>>> {
        let store = self.clone();
        Box::pin(async move { store.load(key).await.map_err(Into::into) })
    }

    fn set(&self, key: CollectionKey, value: Value) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.save(key, value).await.map_err(Into::into) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.inner.ping().await.map_err(Into::into) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.inner.reconnect().await.map_err(Into::into) })
    }
}
