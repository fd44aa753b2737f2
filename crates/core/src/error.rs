//! Shared error types

use thiserror::Error;

/// Top-level error for collaborator calls
///
/// Collaborators return this from their trait methods; the orchestrator's
/// policy is degrade-never-propagate, so these errors are logged at the
/// orchestration boundary and replaced with empty/default results.
#[derive(Error, Debug)]
pub enum Error {
    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Retrieval error: {0}")]
    Retrieval(String),

    #[error("Directory error: {0}")]
    Directory(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Result alias using the shared error type
pub type Result<T> = std::result::Result<T, Error>;
