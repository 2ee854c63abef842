use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI document for the game tracker.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::players::list_players,
        crate::routes::players::add_player,
        crate::routes::players::remove_player,
        crate::routes::game_data::list_games,
        crate::routes::game_data::add_game,
        crate::routes::totals::totals,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::health::HealthStatus,
            crate::dto::player::Player,
            crate::dto::game::GameSession,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "players", description = "Player collection"),
        (name = "game-data", description = "Game session collection"),
        (name = "totals", description = "Per-player cost totals"),
    )
)]
pub struct ApiDoc;
