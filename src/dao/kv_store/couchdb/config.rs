use super::error::{CouchDaoError, CouchResult};

const DEFAULT_DATABASE: &str = "game_tracker";

/// Basic-auth credentials sent with every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouchCredentials {
    /// User name.
    pub username: String,
    /// Password.
    pub password: String,
}

/// Where the collection documents live.
#[derive(Debug, Clone)]
pub struct CouchConfig {
    /// Server root, stored without a trailing slash.
    pub base_url: String,
    /// Database holding one document per collection key.
    pub database: String,
    /// Optional basic auth.
    pub credentials: Option<CouchCredentials>,
}

impl CouchConfig {
    /// Target `database` on the server at `base_url`, without credentials.
    pub fn new(base_url: impl Into<String>, database: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self {
            base_url,
            database: database.into(),
            credentials: None,
        }
    }

    /// Send `username`/`password` as basic auth.
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials = Some(CouchCredentials {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    /// Read `COUCH_BASE_URL` (required), `COUCH_DB` (defaults to `game_tracker`) and the
    /// optional `COUCH_USERNAME`/`COUCH_PASSWORD` pair.
    pub fn from_env() -> CouchResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> CouchResult<Self> {
        let base_url = lookup("COUCH_BASE_URL").ok_or(CouchDaoError::MissingEnvVar {
            var: "COUCH_BASE_URL",
        })?;
        let database = lookup("COUCH_DB").unwrap_or_else(|| DEFAULT_DATABASE.to_owned());
        let config = Self::new(base_url, database);

        Ok(match (lookup("COUCH_USERNAME"), lookup("COUCH_PASSWORD")) {
            (Some(username), Some(password)) => config.with_credentials(username, password),
            _ => config,
        })
    }

    /// URL of the database itself.
    pub fn database_url(&self) -> String {
        format!("{}/{}", self.base_url, self.database)
    }
}
