//! Identifier generation for records created by the client.

use uuid::Uuid;

/// Fresh identifier for a player.
pub fn new_player_id() -> String {
    Uuid::new_v4().to_string()
}

/// Fresh identifier for a game session.
pub fn new_session_id() -> String {
    Uuid::new_v4().to_string()
}

/// Display name given to the `n`-th player added from the client, e.g. `A9`.
pub fn default_player_name(existing: usize) -> String {
    format!("A{}", existing + 1)
}
