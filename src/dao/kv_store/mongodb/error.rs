use mongodb::error::Error as MongoError;
use thiserror::Error;

/// Result alias for MongoDB key-value operations.
pub type MongoResult<T> = std::result::Result<T, MongoDaoError>;

/// Failures that can occur while talking to MongoDB.
#[derive(Debug, Error)]
pub enum MongoDaoError {
    /// A required environment variable is not set.
    #[error("missing MongoDB environment variable `{var}`")]
    MissingEnvVar {
        /// Name of the variable.
        var: &'static str,
    },
    /// The connection URI could not be parsed.
    #[error("failed to parse MongoDB connection URI `{uri}`")]
    InvalidUri {
        /// URI as configured.
        uri: String,
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// The driver rejected the client options.
    #[error("failed to build MongoDB client from options")]
    ClientConstruction {
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// The server never answered a ping while connecting.
    #[error("MongoDB ping failed during initial connection after {attempts} attempt(s)")]
    InitialPing {
        /// Pings sent before giving up.
        attempts: u32,
        /// Last driver error.
        #[source]
        source: MongoError,
    },
    /// A periodic ping failed.
    #[error("MongoDB ping health check failed")]
    HealthPing {
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// Reading the document for a key failed.
    #[error("failed to load value for key `{key}`")]
    LoadValue {
        /// Collection key.
        key: &'static str,
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// Upserting the document for a key failed.
    #[error("failed to save value for key `{key}`")]
    SaveValue {
        /// Collection key.
        key: &'static str,
        /// Driver error.
        #[source]
        source: MongoError,
    },
}
