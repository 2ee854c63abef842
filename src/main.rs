//! Game tracker binary entrypoint wiring the REST API, storage supervisor, and HTML page.

use std::{env, net::SocketAddr, sync::Arc};

use anyhow::{Context, bail};
use axum::Router;
use game_tracker_back::{
    config::AppConfig,
    dao::{
        kv_store::{KeyValueStore, MemoryStore},
        storage::StorageError,
    },
    routes,
    services::storage_supervisor,
    state::{AppState, SharedState},
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Storage backend selected through `STORE_BACKEND`.
enum Backend {
    Memory,
    #[cfg(feature = "mongo-store")]
    Mongo,
    #[cfg(feature = "couch-store")]
    Couch,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let backend = select_backend()?;
    let app_state = AppState::new(config);

    spawn_supervisor(app_state.clone(), backend);
    // Build the HTTP router once the shared state is ready.
    let app = build_router(app_state);

    let port = env::var("PORT")
        .or_else(|_| env::var("SERVER_PORT"))
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

fn select_backend() -> anyhow::Result<Backend> {
    let name = env::var("STORE_BACKEND").unwrap_or_else(|_| "memory".into());
    match name.trim().to_ascii_lowercase().as_str() {
        "memory" => {
            warn!("using in-memory store; data is lost on restart");
            Ok(Backend::Memory)
        }
        #[cfg(feature = "mongo-store")]
        "mongo" | "mongodb" => Ok(Backend::Mongo),
        #[cfg(feature = "couch-store")]
        "couch" | "couchdb" => Ok(Backend::Couch),
        other => bail!("unsupported STORE_BACKEND `{other}`"),
    }
}

/// Run the storage supervisor for `backend` in the background.
fn spawn_supervisor(state: SharedState, backend: Backend) {
    match backend {
        Backend::Memory => {
            let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
            tokio::spawn(storage_supervisor::run(state, move || {
                let store = store.clone();
                async move { Ok::<_, StorageError>(store) }
            }));
        }
        #[cfg(feature = "mongo-store")]
        Backend::Mongo => {
            use game_tracker_back::dao::kv_store::mongodb::{MongoConfig, MongoKvStore};

            tokio::spawn(storage_supervisor::run(state, || async {
                let config = MongoConfig::from_env().await?;
                let store = MongoKvStore::connect(config).await?;
                Ok::<_, StorageError>(Arc::new(store) as Arc<dyn KeyValueStore>)
            }));
        }
        #[cfg(feature = "couch-store")]
        Backend::Couch => {
            use game_tracker_back::dao::kv_store::couchdb::{CouchConfig, CouchKvStore};

            tokio::spawn(storage_supervisor::run(state, || async {
                let config = CouchConfig::from_env()?;
                let store = CouchKvStore::connect(config).await?;
                Ok::<_, StorageError>(Arc::new(store) as Arc<dyn KeyValueStore>)
            }));
        }
    }
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: SharedState) -> Router<()> {
    routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut term = signal(SignalKind::terminate()).expect("install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
