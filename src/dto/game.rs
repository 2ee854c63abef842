//! Game session wire type.

use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use serde_with::{DeserializeAs, DisplayFromStr, PickFirst, Same};
use utoipa::ToSchema;

use crate::dao::models::GameSessionEntity;

/// One recorded game with its cost and participants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GameSession {
    /// Identifier of the session.
    pub id: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Ids of the players who took part, in selection order.
    pub participants: Vec<String>,
    /// Total cost. Accepts a finite JSON number or numeric string; `null` marks an unknown
    /// amount on older records and is refused when adding a session.
    #[serde(deserialize_with = "amount_field")]
    #[schema(value_type = f64)]
    pub amount: f64,
}

/// Number or numeric string, rejecting `NaN` and infinities that JSON cannot store.
fn amount_field<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let amount: Option<f64> =
        Option::<PickFirst<(Same, DisplayFromStr)>>::deserialize_as(deserializer)?;
    match amount {
        None => Ok(f64::NAN),
        Some(amount) if amount.is_finite() => Ok(amount),
        Some(_) => Err(D::Error::custom("amount must be a finite number")),
    }
}

impl From<GameSessionEntity> for GameSession {
    fn from(entity: GameSessionEntity) -> Self {
        Self {
            id: entity.id,
            date: entity.date,
            participants: entity.participants,
            amount: entity.amount,
        }
    }
}

impl From<GameSession> for GameSessionEntity {
    fn from(session: GameSession) -> Self {
        Self {
            id: session.id,
            date: session.date,
            participants: session.participants,
            amount: session.amount,
        }
    }
}
