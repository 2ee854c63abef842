//! Player wire type.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::dao::models::PlayerEntity;

/// A member of the game group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Player {
    /// Caller-assigned identifier.
    pub id: String,
    /// Display name.
    pub name: String,
}

impl From<PlayerEntity> for Player {
    fn from(entity: PlayerEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
        }
    }
}

impl From<Player> for PlayerEntity {
    fn from(player: Player) -> Self {
        Self {
            id: player.id,
            name: player.name,
        }
    }
}
