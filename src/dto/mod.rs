//! Wire representations exchanged over HTTP.

pub mod game;
pub mod health;
pub mod player;
