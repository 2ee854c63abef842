//! CouchDB backend: one document per collection key.

mod config;
mod error;
mod models;
mod store;

pub use config::{CouchConfig, CouchCredentials};
pub use error::CouchDaoError;
pub use store::CouchKvStore;

use crate::dao::storage::StorageError;

impl From<CouchDaoError> for StorageError {
    fn from(err: CouchDaoError) -> Self {
        StorageError::unavailable(err.to_string(), err)
    }
}
