use std::error::Error;
use thiserror::Error;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by storage backends regardless of the underlying database.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend could not be reached or rejected the operation.
    #[error("storage unavailable: {message}")]
    Unavailable {
        /// Backend description of the failure.
        message: String,
        /// Backend error.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// The value stored under a key could not be decoded into the expected collection.
    #[error("stored value under `{key}` is invalid")]
    InvalidValue {
        /// Store key holding the value.
        key: &'static str,
        /// Decode or encode failure.
        #[source]
        source: serde_json::Error,
    },
}

impl StorageError {
    /// Construct an unavailable error from any backend failure.
    pub fn unavailable(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Unavailable {
            message,
            source: Box::new(source),
        }
    }
}
