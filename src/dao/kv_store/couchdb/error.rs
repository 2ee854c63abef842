use reqwest::StatusCode;
use thiserror::Error;

/// Result alias for CouchDB key-value operations.
pub type CouchResult<T> = Result<T, CouchDaoError>;

/// Failures raised by the CouchDB key-value store.
#[derive(Debug, Error)]
pub enum CouchDaoError {
    /// A required environment variable is not set.
    #[error("missing CouchDB environment variable `{var}`")]
    MissingEnvVar {
        /// Name of the variable.
        var: &'static str,
    },
    /// The HTTP client could not be built.
    #[error("failed to build CouchDB client")]
    Client {
        /// Client builder error.
        #[source]
        source: reqwest::Error,
    },
    /// The database endpoint could not be reached.
    #[error("CouchDB database `{database}` is unreachable")]
    Unreachable {
        /// Database name.
        database: String,
        /// Transport error.
        #[source]
        source: reqwest::Error,
    },
    /// The database endpoint answered with an unexpected status.
    #[error("CouchDB database `{database}` answered {status}")]
    DatabaseStatus {
        /// Database name.
        database: String,
        /// Status returned.
        status: StatusCode,
    },
    /// Sending a document request for a key, or decoding its reply, failed.
    #[error("CouchDB request for key `{key}` failed")]
    Request {
        /// Collection key.
        key: &'static str,
        /// Transport or decode error.
        #[source]
        source: reqwest::Error,
    },
    /// The document endpoint for a key answered with an unexpected status.
    #[error("CouchDB answered {status} for key `{key}`")]
    Status {
        /// Collection key.
        key: &'static str,
        /// Status returned.
        status: StatusCode,
    },
    /// Another writer kept replacing the document between our read and our write.
    #[error("CouchDB document for key `{key}` kept changing after {attempts} attempt(s)")]
    Conflict {
        /// Collection key.
        key: &'static str,
        /// Writes attempted.
        attempts: u32,
    },
}
