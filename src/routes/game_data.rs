//! `/api/game-data` handlers.

use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::game::GameSession, error::AppError, services::collection_service, state::SharedState,
};

/// Routes over the `gameData` collection.
pub fn router() -> Router<SharedState> {
    Router::new().route("/game-data", get(list_games).post(add_game))
}

/// List every recorded session.
#[utoipa::path(
    get,
    path = "/api/game-data",
    tag = "game-data",
    responses(
        (status = 200, description = "Stored sessions, empty when none", body = [GameSession]),
        (status = 503, description = "Store unavailable")
    )
)]
pub async fn list_games(
    State(state): State<SharedState>,
) -> Result<Json<Vec<GameSession>>, AppError> {
    let games = collection_service::list_games(&state).await?;
    Ok(Json(games))
}

/// Append a session and return the full updated list.
#[utoipa::path(
    post,
    path = "/api/game-data",
    tag = "game-data",
    request_body = GameSession,
    responses(
        (status = 200, description = "Updated sessions", body = [GameSession]),
        (status = 503, description = "Store unavailable")
    )
)]
pub async fn add_game(
    State(state): State<SharedState>,
    Json(game): Json<GameSession>,
) -> Result<Json<Vec<GameSession>>, AppError> {
    let games = collection_service::add_game(&state, game).await?;
    Ok(Json(games))
}
