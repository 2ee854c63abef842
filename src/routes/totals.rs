//! `/api/totals` handler.

use axum::{Json, Router, extract::State, routing::get};
use indexmap::IndexMap;

use crate::{
    error::AppError,
    services::{collection_service, totals::compute_totals},
    state::SharedState,
};

/// Derived totals route.
pub fn router() -> Router<SharedState> {
    Router::new().route("/totals", get(totals))
}

/// Accumulated share per player id across all stored sessions.
#[utoipa::path(
    get,
    path = "/api/totals",
    tag = "totals",
    responses(
        (status = 200, description = "Total per player id; players without sessions are absent", body = HashMap<String, f64>),
        (status = 503, description = "Store unavailable")
    )
)]
pub async fn totals(
    State(state): State<SharedState>,
) -> Result<Json<IndexMap<String, f64>>, AppError> {
    let games = collection_service::list_games(&state).await?;
    Ok(Json(compute_totals(&games)))
}
