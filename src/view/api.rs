//! Network seam between the client view and the collection endpoints.

use futures::future::BoxFuture;
use thiserror::Error;

use crate::{
    dto::{game::GameSession, player::Player},
    error::ServiceError,
    services::collection_service,
    state::SharedState,
};

/// Result alias for client calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Failure of a client call. The view swallows these after logging.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server address cannot have paths appended to it.
    #[error("invalid server address `{url}`: {reason}")]
    BaseUrl {
        /// Address as given.
        url: String,
        /// Why it was rejected.
        reason: String,
    },
    /// The HTTP client could not be built.
    #[cfg(feature = "http-client")]
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),
    /// The request could not be sent or its body could not be read.
    #[cfg(feature = "http-client")]
    #[error("request to `{path}` failed")]
    Request {
        /// Request path.
        path: String,
        /// Transport or decode error.
        #[source]
        source: reqwest::Error,
    },
    /// The server answered with a non-success status.
    #[error("unexpected status {status} from `{path}`")]
    Status {
        /// Request path.
        path: String,
        /// HTTP status code.
        status: u16,
    },
    /// The in-process service failed.
    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// Operations the client view needs from the backend. Every call returns the full collection.
pub trait TrackerApi: Send + Sync {
    /// Every stored player.
    fn list_players(&self) -> BoxFuture<'static, ApiResult<Vec<Player>>>;
    /// Append a player.
    fn add_player(&self, player: Player) -> BoxFuture<'static, ApiResult<Vec<Player>>>;
    /// Remove every player with `id`.
    fn remove_player(&self, id: String) -> BoxFuture<'static, ApiResult<Vec<Player>>>;
    /// Every stored session.
    fn list_games(&self) -> BoxFuture<'static, ApiResult<Vec<GameSession>>>;
    /// Append a session.
    fn add_game(&self, game: GameSession) -> BoxFuture<'static, ApiResult<Vec<GameSession>>>;
}

/// Calls the collection service directly, bypassing HTTP.
#[derive(Clone)]
pub struct LocalTrackerApi {
    state: SharedState,
}

impl LocalTrackerApi {
    /// Wrap the shared application state.
    pub fn new(state: SharedState) -> Self {
        Self { state }
    }
}

impl TrackerApi for LocalTrackerApi {
    fn list_players(&self) -> BoxFuture<'static, ApiResult<Vec<Player>>> {
        let state = self.state.clone();
        Box::pin(async move { Ok(collection_service::list_players(&state).await?) })
    }

    fn add_player(&self, player: Player) -> BoxFuture<'static, ApiResult<Vec<Player>>> {
        let state = self.state.clone();
        Box::pin(async move { Ok(collection_service::add_player(&state, player).await?) })
    }

    fn remove_player(&self, id: String) -> BoxFuture<'static, ApiResult<Vec<Player>>> {
        let state = self.state.clone();
        Box::pin(async move { Ok(collection_service::remove_player(&state, &id).await?) })
    }

    fn list_games(&self) -> BoxFuture<'static, ApiResult<Vec<GameSession>>> {
        let state = self.state.clone();
        Box::pin(async move { Ok(collection_service::list_games(&state).await?) })
    }

    fn add_game(&self, game: GameSession) -> BoxFuture<'static, ApiResult<Vec<GameSession>>> {
        let state = self.state.clone();
        Box::pin(async move { Ok(collection_service::add_game(&state, game).await?) })
    }
}
