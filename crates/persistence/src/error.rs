//! Persistence errors

use thiserror::Error;

/// Persistence errors
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Connection error: {0}")]
    Connection(#[from] scylla::transport::errors::NewSessionError),

    #[error("Query error: {0}")]
    Query(#[from] scylla::transport::errors::QueryError),

    #[error("Schema error: {0}")]
    SchemaError(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<PersistenceError> for copilot_core::Error {
    fn from(err: PersistenceError) -> Self {
        copilot_core::Error::Directory(err.to_string())
    }
}
