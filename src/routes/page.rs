//! Server-rendered index page.

use axum::{Router, extract::State, response::Html, routing::get};

use crate::{
    error::AppError, services::collection_service, state::SharedState, view::render,
};

/// Server-rendered tracker page.
pub fn router() -> Router<SharedState> {
    Router::new().route("/", get(index))
}

/// Render the players and sessions tables from the stored collections.
pub async fn index(State(state): State<SharedState>) -> Result<Html<String>, AppError> {
    let players = collection_service::list_players(&state).await?;
    let games = collection_service::list_games(&state).await?;
    let html = render::page(&players, &games)
        .map_err(|err| AppError::Internal(format!("page rendering failed: {err}")))?;
    Ok(Html(html))
}
