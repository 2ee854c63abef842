//! `/api/players` handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get},
};

use crate::{
    dto::player::Player, error::AppError, services::collection_service, state::SharedState,
};

/// Routes over the `players` collection.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/players", get(list_players).post(add_player))
        .route("/players/{id}", delete(remove_player))
}

/// List every stored player.
#[utoipa::path(
    get,
    path = "/api/players",
    tag = "players",
    responses(
        (status = 200, description = "Stored players, empty when none", body = [Player]),
        (status = 503, description = "Store unavailable")
    )
)]
pub async fn list_players(
    State(state): State<SharedState>,
) -> Result<Json<Vec<Player>>, AppError> {
    let players = collection_service::list_players(&state).await?;
    Ok(Json(players))
}

/// Append a player and return the full updated list.
#[utoipa::path(
    post,
    path = "/api/players",
    tag = "players",
    request_body = Player,
    responses(
        (status = 200, description = "Updated players", body = [Player]),
        (status = 503, description = "Store unavailable")
    )
)]
pub async fn add_player(
    State(state): State<SharedState>,
    Json(player): Json<Player>,
) -> Result<Json<Vec<Player>>, AppError> {
    let players = collection_service::add_player(&state, player).await?;
    Ok(Json(players))
}

/// Remove every player with the given id and return the full updated list.
#[utoipa::path(
    delete,
    path = "/api/players/{id}",
    tag = "players",
    params(("id" = String, Path, description = "Identifier of the player to remove")),
    responses(
        (status = 200, description = "Updated players; unchanged when the id is unknown", body = [Player]),
        (status = 503, description = "Store unavailable")
    )
)]
pub async fn remove_player(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Player>>, AppError> {
    let players = collection_service::remove_player(&state, &id).await?;
    Ok(Json(players))
}
