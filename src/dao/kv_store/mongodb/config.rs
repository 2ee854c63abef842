use mongodb::options::ClientOptions;

use super::error::{MongoDaoError, MongoResult};

const DEFAULT_DATABASE: &str = "game_tracker";

/// Connection settings for the MongoDB backend.
#[derive(Clone)]
pub struct MongoConfig {
    /// Parsed driver options.
    pub options: ClientOptions,
    /// Database holding the `kv` collection.
    pub database_name: String,
}

impl MongoConfig {
    /// Parse a connection URI, defaulting the database name when none is given.
    pub async fn from_uri(uri: &str, db_name: Option<&str>) -> MongoResult<Self> {
        let database_name = db_name.unwrap_or(DEFAULT_DATABASE).to_owned();
        let options =
            ClientOptions::parse(uri)
                .await
                .map_err(|source| MongoDaoError::InvalidUri {
                    uri: uri.to_owned(),
                    source,
                })?;

        Ok(Self {
            options,
            database_name,
        })
    }

    /// Read `MONGO_URI` (required) and `MONGO_DB` (optional).
    pub async fn from_env() -> MongoResult<Self> {
        let uri = std::env::var("MONGO_URI")
            .map_err(|_| MongoDaoError::MissingEnvVar { var: "MONGO_URI" })?;
        let db = std::env::var("MONGO_DB").ok();
        Self::from_uri(&uri, db.as_deref()).await
    }
}
