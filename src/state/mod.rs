//! Shared runtime state: the current store, degraded flag and write gate.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock, watch};

use crate::{config::AppConfig, dao::kv_store::KeyValueStore, error::ServiceError};

/// Handle shared between handlers and background tasks.
pub type SharedState = Arc<AppState>;

/// Central application state holding the store handle and runtime configuration.
pub struct AppState {
    store: RwLock<Option<Arc<dyn KeyValueStore>>>,
    degraded: watch::Sender<bool>,
    write_gate: Mutex<()>,
    config: AppConfig,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// The application starts in degraded mode until a store is installed.
    pub fn new(config: AppConfig) -> SharedState {
        let (degraded_tx, _rx) = watch::channel(true);
        Arc::new(Self {
            store: RwLock::new(None),
            degraded: degraded_tx,
            write_gate: Mutex::new(()),
            config,
        })
    }

    /// Construct a state with `store` already installed.
    pub async fn with_store(config: AppConfig, store: Arc<dyn KeyValueStore>) -> SharedState {
        let state = Self::new(config);
        state.set_store(store).await;
        state
    }

    /// Obtain a handle to the current store, if one is installed.
    pub async fn store(&self) -> Option<Arc<dyn KeyValueStore>> {
        let guard = self.store.read().await;
        guard.as_ref().cloned()
    }

    /// Obtain the current store or fail with [`ServiceError::Degraded`].
    pub async fn require_store(&self) -> Result<Arc<dyn KeyValueStore>, ServiceError> {
        let degraded = *self.degraded.borrow();
        if degraded {
            return Err(ServiceError::Degraded);
        }
        self.store().await.ok_or(ServiceError::Degraded)
    }

    /// Install a new store implementation and leave degraded mode.
    pub async fn set_store(&self, store: Arc<dyn KeyValueStore>) {
        {
            let mut guard = self.store.write().await;
            *guard = Some(store);
        }
        self.update_degraded(false).await;
    }

    /// Remove the current store and enter degraded mode.
    pub async fn clear_store(&self) {
        {
            let mut guard = self.store.write().await;
            guard.take();
        }
        self.update_degraded(true).await;
    }

    /// Current degraded flag.
    pub async fn is_degraded(&self) -> bool {
        let flagged = *self.degraded.borrow();
        flagged || self.store.read().await.is_none()
    }

    /// Update the degraded flag when the value changes.
    pub async fn update_degraded(&self, value: bool) {
        self.degraded.send_if_modified(|current| {
            if *current == value {
                return false;
            }
            *current = value;
            true
        });
    }

    /// Subscribe to degraded mode updates.
    pub fn degraded_watcher(&self) -> watch::Receiver<bool> {
        self.degraded.subscribe()
    }

    /// Serializes read-modify-write cycles issued by this process.
    pub fn write_gate(&self) -> &Mutex<()> {
        &self.write_gate
    }

    /// Runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
