//! HTTP routes.

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{services::documentation::ApiDoc, state::SharedState};

pub mod game_data;
pub mod health;
pub mod page;
pub mod players;
pub mod totals;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = Router::new()
        .merge(players::router())
        .merge(game_data::router())
        .merge(totals::router());

    Router::new()
        .nest("/api", api_router)
        .merge(health::router())
        .merge(page::router())
        .merge(docs_router())
        .with_state(state)
}

/// Swagger UI at `/docs` backed by the document served at `/api-doc/openapi.json`.
fn docs_router() -> Router<SharedState> {
    SwaggerUi::new("/docs")
        .url("/api-doc/openapi.json", ApiDoc::openapi())
        .into()
}
