//! Plan-partitioned policy retrieval and answering
//!
//! Features:
//! - Plan context normalization into knowledge-partition names
//! - Dense similarity search via Qdrant, one collection per partition
//! - OpenAI-compatible embeddings client
//! - Two answering strategies behind `KnowledgeAnswerer`: an in-process
//!   retrieve-and-summarize path and a richer remote agent, selected at
//!   construction time

pub mod answerer;
pub mod embeddings;
pub mod json_answer;
pub mod partition;
pub mod vector_store;

pub use answerer::{build_answerer, RemoteAgentAnswerer, SimpleRagAnswerer};
pub use embeddings::{EmbeddingClient, EmbeddingConfig};
pub use partition::{
    knowledge_partition, normalize_contract_type, normalize_plan_tier, normalize_state,
};
pub use vector_store::PolicyVectorStore;

use thiserror::Error;

/// RAG errors
#[derive(Error, Debug)]
pub enum RagError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Search error: {0}")]
    Search(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Missing plan context")]
    MissingPlanContext,
}

impl From<reqwest::Error> for RagError {
    fn from(err: reqwest::Error) -> Self {
        RagError::Connection(err.to_string())
    }
}

impl From<RagError> for copilot_core::Error {
    fn from(err: RagError) -> Self {
        copilot_core::Error::Retrieval(err.to_string())
    }
}
