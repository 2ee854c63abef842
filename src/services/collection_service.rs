//! Read-modify-write operations over the `players` and `gameData` collections.
//!
//! Each mutation reads the full collection, changes it in memory and writes it back. Mutations
//! issued through one [`AppState`](crate::state::AppState) are serialized by its write gate;
//! writers in other processes sharing the store can still overwrite each other.

use tracing::{debug, info, warn};

use crate::{
    dao::{
        collections,
        kv_store::CollectionKey,
        models::{GameSessionEntity, PlayerEntity},
    },
    dto::{game::GameSession, player::Player},
    error::ServiceError,
    state::SharedState,
};

/// Return every stored player, or an empty list when none were ever stored.
pub async fn list_players(state: &SharedState) -> Result<Vec<Player>, ServiceError> {
    let store = state.require_store().await?;
    let players = collections::load_players(store.as_ref()).await?;
    Ok(players.into_iter().map(Into::into).collect())
}

/// Append `player` to the stored list and return the updated list.
///
/// Ids are not checked for uniqueness.
pub async fn add_player(state: &SharedState, player: Player) -> Result<Vec<Player>, ServiceError> {
    let store = state.require_store().await?;
    let _gate = state.write_gate().lock().await;

    let mut players = collections::load_players(store.as_ref()).await?;
    debug!(id = %player.id, "appending player");
    players.push(player.into());
    collections::save_players(store.as_ref(), &players).await?;

    Ok(players.into_iter().map(Into::into).collect())
}

/// Remove every player whose id equals `id` and return the updated list.
///
/// An unknown id leaves the list unchanged. Sessions are only rewritten when the
/// `cascade_player_removal` option is enabled; they are read before anything is written, so an
/// unreadable `gameData` aborts the removal. A failed session write after the players were
/// saved is logged and does not fail the call.
pub async fn remove_player(state: &SharedState, id: &str) -> Result<Vec<Player>, ServiceError> {
    let store = state.require_store().await?;
    let _gate = state.write_gate().lock().await;

    let mut players = collections::load_players(store.as_ref()).await?;
    let games = if state.config().cascade_player_removal() {
        Some(collections::load_games(store.as_ref()).await?)
    } else {
        None
    };

    let before = players.len();
    players.retain(|player| player.id != id);
    collections::save_players(store.as_ref(), &players).await?;
    debug!(id, removed = before - players.len(), "removed player");

    if let Some(mut games) = games {
        let touched = games
            .iter_mut()
            .map(|game| game.strip_participant(id))
            .filter(|changed| *changed)
            .count();
        if touched > 0 {
            match collections::save_games(store.as_ref(), &games).await {
                Ok(()) => info!(id, sessions = touched, "stripped removed player from sessions"),
                Err(err) => warn!(
                    id,
                    error = %err,
                    "player removed but sessions still reference it"
                ),
            }
        }
    }

    Ok(players.into_iter().map(Into::into).collect())
}

/// Return every stored session, or an empty list when none were ever stored.
pub async fn list_games(state: &SharedState) -> Result<Vec<GameSession>, ServiceError> {
    let store = state.require_store().await?;
    let games = collections::load_games(store.as_ref()).await?;
    Ok(games.into_iter().map(Into::into).collect())
}

/// Append `game` to the stored list and return the updated list.
///
/// The amount must be finite; the date and participant ids are not validated.
pub async fn add_game(
    state: &SharedState,
    game: GameSession,
) -> Result<Vec<GameSession>, ServiceError> {
    if !game.amount.is_finite() {
        return Err(ServiceError::InvalidInput(format!(
            "session `{}` has no finite amount",
            game.id
        )));
    }
    let store = state.require_store().await?;
    let _gate = state.write_gate().lock().await;

    let mut games = collections::load_games(store.as_ref()).await?;
    debug!(id = %game.id, participants = game.participants.len(), "appending session");
    games.push(GameSessionEntity::from(game));
    collections::save_games(store.as_ref(), &games).await?;

    Ok(games.into_iter().map(Into::into).collect())
}

/// Write the configured roster when the `players` key has never been set.
///
/// Returns `true` when the roster was written.
pub async fn seed_players(state: &SharedState) -> Result<bool, ServiceError> {
    let roster = state.config().seed_players();
    if roster.is_empty() {
        return Ok(false);
    }

    let store = state.require_store().await?;
    let _gate = state.write_gate().lock().await;

    if store.get(CollectionKey::Players).await?.is_some() {
        return Ok(false);
    }

    collections::save_players(store.as_ref(), roster).await?;
    info!(count = roster.len(), "seeded players collection");
    Ok(true)
}
