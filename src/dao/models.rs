use serde::{Deserialize, Deserializer, Serialize};

/// Player record as stored under the `players` key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerEntity {
    /// Caller-assigned identifier. Uniqueness is not enforced.
    pub id: String,
    /// Display name.
    pub name: String,
}

/// Game session record as stored under the `gameData` key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameSessionEntity {
    /// Identifier of the session.
    pub id: String,
    /// ISO calendar date (`YYYY-MM-DD`), kept as provided.
    pub date: String,
    /// Ordered ids of the participating players.
    pub participants: Vec<String>,
    /// Total cost of the session, split evenly between participants.
    ///
    /// A stored `null` or missing amount reads as `NaN` so one bad record does not make the
    /// whole collection unreadable.
    #[serde(default = "unknown_amount", deserialize_with = "amount_or_nan")]
    pub amount: f64,
}

fn unknown_amount() -> f64 {
    f64::NAN
}

fn amount_or_nan<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

impl GameSessionEntity {
    /// Drop every occurrence of `player_id` from the participants list.
    ///
    /// Returns `true` when the list changed.
    pub fn strip_participant(&mut self, player_id: &str) -> bool {
        let before = self.participants.len();
        self.participants.retain(|id| id != player_id);
        before != self.participants.len()
    }
}
