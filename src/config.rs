//! Application-level configuration loading: seed roster and removal behavior.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use crate::dao::models::PlayerEntity;

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "GAME_TRACKER_CONFIG_PATH";

#[derive(Debug, Clone, Default)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    seed_players: Vec<PlayerEntity>,
    cascade_player_removal: bool,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match Self::from_json(&contents) {
                Ok(app_config) => {
                    info!(
                        path = %path.display(),
                        seed_players = app_config.seed_players.len(),
                        cascade_player_removal = app_config.cascade_player_removal,
                        "loaded config"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Parse a configuration document.
    pub fn from_json(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<RawConfig>(contents).map(Into::into)
    }

    /// Roster written to the `players` key when it has never been set.
    pub fn seed_players(&self) -> &[PlayerEntity] {
        &self.seed_players
    }

    /// Whether removing a player also strips it from every stored session.
    pub fn cascade_player_removal(&self) -> bool {
        self.cascade_player_removal
    }

    /// Builder used by tests and embedders to toggle the removal cascade.
    pub fn with_cascade_player_removal(mut self, enabled: bool) -> Self {
        self.cascade_player_removal = enabled;
        self
    }

    /// Builder used by tests and embedders to set the seed roster.
    pub fn with_seed_players(mut self, players: Vec<PlayerEntity>) -> Self {
        self.seed_players = players;
        self
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    #[serde(default)]
    seed_players: Vec<RawPlayer>,
    #[serde(default)]
    cascade_player_removal: bool,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        Self {
            seed_players: value.seed_players.into_iter().map(Into::into).collect(),
            cascade_player_removal: value.cascade_player_removal,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawPlayer {
    id: String,
    name: String,
}

impl From<RawPlayer> for PlayerEntity {
    fn from(value: RawPlayer) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
