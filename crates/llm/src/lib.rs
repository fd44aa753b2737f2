//! LLM integration for the live call copilot
//!
//! Provides the OpenAI-compatible chat backend and the three LLM-backed
//! collaborators the orchestrator sequences:
//! - Intent classification over the transcript window
//! - Customer question extraction (max 3 per call)
//! - CSR suggestion drafting (1-3 cards)
//!
//! All collaborators parse model output defensively: markdown fences are
//! stripped and an embedded JSON object is recovered before parsing, and
//! unparseable output degrades to a documented default rather than an error.

pub mod backend;
pub mod classifier;
pub mod drafter;
pub mod extractor;
pub mod json;
pub mod prompt;

pub use backend::{ChatBackend, ChatRequest, OpenAIBackend, OpenAIConfig};
pub use classifier::LlmIntentClassifier;
pub use drafter::LlmSuggestionDrafter;
pub use extractor::LlmQuestionExtractor;
pub use prompt::{Message, Role};

use thiserror::Error;

/// LLM errors
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        LlmError::Network(err.to_string())
    }
}

impl From<LlmError> for copilot_core::Error {
    fn from(err: LlmError) -> Self {
        copilot_core::Error::Llm(err.to_string())
    }
}
