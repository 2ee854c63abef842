//! reqwest implementation of the tracker API.

use futures::future::BoxFuture;
use reqwest::{Client, Method, Url};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    dto::{game::GameSession, player::Player},
    view::api::{ApiError, ApiResult, TrackerApi},
};

/// [`TrackerApi`] over HTTP against a running server.
#[derive(Clone)]
pub struct HttpTrackerApi {
    client: Client,
    base_url: Url,
}

impl HttpTrackerApi {
    /// Target the server at `base_url`, e.g. `http://localhost:8080`.
    pub fn new(base_url: &str) -> ApiResult<Self> {
        let invalid = |reason: String| ApiError::BaseUrl {
            url: base_url.to_owned(),
            reason,
        };
        let parsed = Url::parse(base_url).map_err(|err| invalid(err.to_string()))?;
        if parsed.cannot_be_a_base() {
            return Err(invalid("not a hierarchical URL".into()));
        }

        let client = Client::builder().build().map_err(ApiError::Client)?;
        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// `segments` appended to the base URL, each one percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked hierarchical in `new`.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn call<B, T>(&self, method: Method, segments: &[&str], body: Option<&B>) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments);
        let path = url.path().to_owned();
        let mut builder = self.client.request(method, url);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|source| ApiError::Request {
                path: path.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                path,
                status: status.as_u16(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| ApiError::Request { path, source })
    }
}

impl TrackerApi for HttpTrackerApi {
    fn list_players(&self) -> BoxFuture<'static, ApiResult<Vec<Player>>> {
        let api = self.clone();
        Box::pin(async move {
            api.call::<(), _>(Method::GET, &["api", "players"], None)
                .await
        })
    }

    fn add_player(&self, player: Player) -> BoxFuture<'static, ApiResult<Vec<Player>>> {
        let api = self.clone();
        Box::pin(async move {
            api.call(Method::POST, &["api", "players"], Some(&player))
                .await
        })
    }

    fn remove_player(&self, id: String) -> BoxFuture<'static, ApiResult<Vec<Player>>> {
        let api = self.clone();
        Box::pin(async move {
            api.call::<(), _>(Method::DELETE, &["api", "players", id.as_str()], None)
                .await
        })
    }

    fn list_games(&self) -> BoxFuture<'static, ApiResult<Vec<GameSession>>> {
        let api = self.clone();
        Box::pin(async move {
            api.call::<(), _>(Method::GET, &["api", "game-data"], None)
                .await
        })
    }

    fn add_game(&self, game: GameSession) -> BoxFuture<'static, ApiResult<Vec<GameSession>>> {
        let api = self.clone();
        Box::pin(async move {
            api.call(Method::POST, &["api", "game-data"], Some(&game))
                .await
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use time::macros::date;
    use tokio::net::TcpListener;

    use super::*;
    use crate::{
        config::AppConfig,
        dao::kv_store::MemoryStore,
        routes,
        services::collection_service,
        state::{AppState, SharedState},
        view::{TrackerView, ViewPhase},
    };

    /// Serve the full router on an ephemeral port and return a client pointed at it.
    async fn serve(state: SharedState) -> HttpTrackerApi {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, routes::router(state)).await.unwrap();
        });
        HttpTrackerApi::new(&format!("http://{addr}")).unwrap()
    }

    async fn memory_state() -> SharedState {
        AppState::with_store(AppConfig::default(), Arc::new(MemoryStore::new())).await
    }

    #[test]
    fn segments_are_percent_encoded() {
        let api = HttpTrackerApi::new("http://localhost:8080/").unwrap();
        let url = api.endpoint(&["api", "players", "a b/Vũ"]);
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/players/a%20b%2FV%C5%A9"
        );
    }

    #[test]
    fn non_hierarchical_base_is_rejected() {
        assert!(matches!(
            HttpTrackerApi::new("mailto:someone@example.com"),
            Err(ApiError::BaseUrl { .. })
        ));
        assert!(matches!(
            HttpTrackerApi::new("not a url"),
            Err(ApiError::BaseUrl { .. })
        ));
    }

    #[tokio::test]
    async fn view_round_trips_through_the_server() {
        let state = memory_state().await;
        collection_service::add_player(
            &state,
            Player {
                id: "1".into(),
                name: "Nhật".into(),
            },
        )
        .await
        .unwrap();
        let api = serve(state.clone()).await;
        let mut view = TrackerView::new(api, Vec::new(), date!(2024 - 06 - 15));

        view.mount().await;
        assert_eq!(view.phase(), ViewPhase::Ready);
        assert_eq!(view.players().len(), 1);

        assert!(view.add_player().await);
        let added = view.players()[1].clone();
        assert_eq!(added.name, "A2");

        view.form_mut().set_player_checked("1", true);
        view.form_mut().set_player_checked(&added.id, true);
        view.form_mut().set_amount("90000");
        assert!(view.add_game().await);

        let stored = collection_service::list_games(&state).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].date, "2024-06-15");
        assert_eq!(stored[0].amount, 90000.0);
        assert_eq!(stored[0].participants, vec!["1".to_owned(), added.id.clone()]);

        assert!(view.remove_player(&added.id).await);
        let players = collection_service::list_players(&state).await.unwrap();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].id, "1");
        assert_eq!(view.totals()["1"], 90000.0);
    }

    #[tokio::test]
    async fn ids_needing_escapes_reach_the_right_route() {
        let state = memory_state().await;
        let api = serve(state.clone()).await;
        let odd = Player {
            id: "a b/c".into(),
            name: "Dung".into(),
        };

        api.add_player(odd.clone()).await.unwrap();
        let remaining = api.remove_player(odd.id).await.unwrap();

        assert!(remaining.is_empty());
        assert!(collection_service::list_players(&state).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn degraded_server_maps_to_status_error() {
        let api = serve(AppState::new(AppConfig::default())).await;

        match api.list_games().await {
            Err(ApiError::Status { path, status }) => {
                assert_eq!(status, 503);
                assert_eq!(path, "/api/game-data");
            }
            other => panic!("expected a status error, got {other:?}"),
        }
    }
}
