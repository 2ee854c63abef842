use std::sync::Arc;

use futures::future::BoxFuture;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::dao::{
    kv_store::{CollectionKey, KeyValueStore},
    retry::MAX_ATTEMPTS,
    storage::StorageResult,
};

use super::{
    config::{CouchConfig, CouchCredentials},
    error::{CouchDaoError, CouchResult},
    models::CouchValueDocument,
};

/// CouchDB-backed key-value store: one document per collection key.
#[derive(Clone)]
pub struct CouchKvStore {
    client: Client,
    database: Arc<str>,
    database_url: Arc<str>,
    credentials: Option<Arc<CouchCredentials>>,
}

impl CouchKvStore {
    /// Build the client and create the database when it does not exist yet.
    pub async fn connect(config: CouchConfig) -> CouchResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|source| CouchDaoError::Client { source })?;

        let store = Self {
            client,
            database_url: config.database_url().into(),
            database: config.database.into(),
            credentials: config.credentials.map(Arc::new),
        };
        store.ensure_database().await?;
        Ok(store)
    }

    fn send_as(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.credentials.as_deref() {
            Some(credentials) => {
                builder.basic_auth(&credentials.username, Some(&credentials.password))
            }
            None => builder,
        }
    }

    fn document(&self, method: Method, key: CollectionKey) -> RequestBuilder {
        let url = format!("{}/{}", self.database_url, key);
        self.send_as(self.client.request(method, url))
    }

    fn database(&self, method: Method) -> RequestBuilder {
        self.send_as(self.client.request(method, self.database_url.as_ref()))
    }

    fn database_error(&self, status: StatusCode) -> CouchDaoError {
        CouchDaoError::DatabaseStatus {
            database: self.database.to_string(),
            status,
        }
    }

    async fn database_status(&self, method: Method) -> CouchResult<StatusCode> {
        let response =
            self.database(method)
                .send()
                .await
                .map_err(|source| CouchDaoError::Unreachable {
                    database: self.database.to_string(),
                    source,
                })?;
        Ok(response.status())
    }

    async fn ensure_database(&self) -> CouchResult<()> {
        match self.database_status(Method::HEAD).await? {
            status if status.is_success() => Ok(()),
            StatusCode::NOT_FOUND => match self.database_status(Method::PUT).await? {
                // 412: created concurrently by another instance.
                status if status.is_success() || status == StatusCode::PRECONDITION_FAILED => {
                    debug!(database = %self.database, "CouchDB database ready");
                    Ok(())
                }
                other => Err(self.database_error(other)),
            },
            other => Err(self.database_error(other)),
        }
    }

    async fn ping(&self) -> CouchResult<()> {
        match self.database_status(Method::HEAD).await? {
            status if status.is_success() => Ok(()),
            other => Err(self.database_error(other)),
        }
    }

    async fn fetch(&self, key: CollectionKey) -> CouchResult<Option<CouchValueDocument>> {
        let request_failed = |source| CouchDaoError::Request {
            key: key.as_str(),
            source,
        };

        let response = self
            .document(Method::GET, key)
            .send()
            .await
            .map_err(request_failed)?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => response
                .json::<CouchValueDocument>()
                .await
                .map(Some)
                .map_err(request_failed),
            status => Err(CouchDaoError::Status {
                key: key.as_str(),
                status,
            }),
        }
    }

    /// Replace the document for `key`, refetching the revision when another writer got there
    /// first.
    async fn save(&self, key: CollectionKey, value: Value) -> CouchResult<()> {
        for attempt in 1..=MAX_ATTEMPTS {
            let rev = self.fetch(key).await?.and_then(|existing| existing.rev);
            let document = CouchValueDocument::from((key, value.clone(), rev));

            let response = self
                .document(Method::PUT, key)
                .json(&document)
                .send()
                .await
                .map_err(|source| CouchDaoError::Request {
                    key: key.as_str(),
                    source,
                })?;

            match response.status() {
                status if status.is_success() => return Ok(()),
                StatusCode::CONFLICT => {
                    debug!(%key, attempt, "CouchDB revision moved; retrying write");
                }
                status => {
                    return Err(CouchDaoError::Status {
                        key: key.as_str(),
                        status,
                    });
                }
            }
        }

        Err(CouchDaoError::Conflict {
            key: key.as_str(),
            attempts: MAX_ATTEMPTS,
        })
    }
}

impl KeyValueStore for CouchKvStore {
    fn get(&self, key: CollectionKey) -> BoxFuture<'static, StorageResult<Option<Value>>> {
        let store = self.clone();
        Box::pin(async move {
            let document = store.fetch(key).await?;
            Ok(document.map(|doc| doc.value))
        })
    }

    fn set(&self, key: CollectionKey, value: Value) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.save(key, value).await.map_err(Into::into) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.ping().await.map_err(Into::into) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.ensure_database().await.map_err(Into::into) })
    }
}
