//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::{endpoints, session};
use crate::ConfigError;

/// LLM settings for the classifier/extractor/drafter calls
///
/// Model identifiers are pass-through: the engine never interprets them, it
/// only routes them to the chat backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// OpenAI-compatible chat endpoint
    #[serde(default = "default_llm_endpoint")]
    pub endpoint: String,

    /// API key, defaulting from OPENAI_API_KEY
    #[serde(default = "default_api_key")]
    pub api_key: String,

    /// Model used for intent classification
    #[serde(default = "default_model_intent")]
    pub model_intent: String,

    /// Model used for question extraction and suggestion drafting
    #[serde(default = "default_model_suggest")]
    pub model_suggest: String,

    /// Request timeout in seconds
    #[serde(default = "default_llm_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_llm_endpoint() -> String {
    std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| endpoints::OPENAI_DEFAULT.to_string())
}

fn default_api_key() -> String {
    std::env::var("OPENAI_API_KEY").unwrap_or_default()
}

fn default_model_intent() -> String {
    std::env::var("COPILOT_MODEL_INTENT").unwrap_or_else(|_| "gpt-4o".to_string())
}

fn default_model_suggest() -> String {
    std::env::var("COPILOT_MODEL_SUGGEST").unwrap_or_else(|_| "gpt-4o".to_string())
}

fn default_llm_timeout_secs() -> u64 {
    30
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            endpoint: default_llm_endpoint(),
            api_key: default_api_key(),
            model_intent: default_model_intent(),
            model_suggest: default_model_suggest(),
            timeout_secs: default_llm_timeout_secs(),
        }
    }
}

/// Retrieval settings (vector store + embeddings)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalSettings {
    /// Qdrant endpoint
    #[serde(default = "default_qdrant_endpoint")]
    pub qdrant_endpoint: String,

    /// Qdrant API key (optional)
    #[serde(default)]
    pub qdrant_api_key: Option<String>,

    /// Embedding model identifier
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,
}

fn default_qdrant_endpoint() -> String {
    std::env::var("QDRANT_URL").unwrap_or_else(|_| endpoints::QDRANT_DEFAULT.to_string())
}

fn default_embedding_model() -> String {
    "text-embedding-ada-002".to_string()
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            qdrant_endpoint: default_qdrant_endpoint(),
            qdrant_api_key: None,
            embedding_model: default_embedding_model(),
        }
    }
}

/// Knowledge-answering strategy selection
///
/// When `agent_endpoint` is set, the richer remote agent is used for
/// answering; otherwise the in-process simple RAG path is selected at
/// construction time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswererSettings {
    /// Endpoint of the richer agent service, when deployed
    #[serde(default = "default_agent_endpoint")]
    pub agent_endpoint: Option<String>,
}

fn default_agent_endpoint() -> Option<String> {
    std::env::var("COPILOT_AGENT_ENDPOINT")
        .ok()
        .filter(|s| !s.trim().is_empty())
}

impl Default for AnswererSettings {
    fn default() -> Self {
        Self {
            agent_endpoint: default_agent_endpoint(),
        }
    }
}

/// Customer directory settings (ScyllaDB)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectorySettings {
    /// Scylla host addresses
    #[serde(default = "default_scylla_hosts")]
    pub scylla_hosts: Vec<String>,

    /// Keyspace holding the customers table
    #[serde(default = "default_scylla_keyspace")]
    pub keyspace: String,

    /// Replication factor when creating the keyspace
    #[serde(default = "default_replication_factor")]
    pub replication_factor: u8,
}

fn default_scylla_hosts() -> Vec<String> {
    std::env::var("SCYLLA_HOSTS")
        .map(|s| s.split(',').map(|h| h.trim().to_string()).collect())
        .unwrap_or_else(|_| vec![endpoints::SCYLLA_DEFAULT.to_string()])
}

fn default_scylla_keyspace() -> String {
    std::env::var("SCYLLA_KEYSPACE").unwrap_or_else(|_| "copilot".to_string())
}

fn default_replication_factor() -> u8 {
    1
}

impl Default for DirectorySettings {
    fn default() -> Self {
        Self {
            scylla_hosts: default_scylla_hosts(),
            keyspace: default_scylla_keyspace(),
            replication_factor: default_replication_factor(),
        }
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Verification prompts allowed per session
    #[serde(default = "default_max_verification_asks")]
    pub max_verification_asks: u32,

    /// LLM configuration
    #[serde(default)]
    pub llm: LlmSettings,

    /// Retrieval configuration
    #[serde(default)]
    pub retrieval: RetrievalSettings,

    /// Answering strategy configuration
    #[serde(default)]
    pub answerer: AnswererSettings,

    /// Customer directory configuration
    #[serde(default)]
    pub directory: DirectorySettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_verification_asks: default_max_verification_asks(),
            llm: LlmSettings::default(),
            retrieval: RetrievalSettings::default(),
            answerer: AnswererSettings::default(),
            directory: DirectorySettings::default(),
        }
    }
}

fn default_max_verification_asks() -> u32 {
    std::env::var("COPILOT_MAX_VERIFICATION_ASKS")
        .ok()
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(session::DEFAULT_MAX_VERIFICATION_ASKS)
}

impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_verification_asks == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_verification_asks".to_string(),
                message: "must be positive".to_string(),
            });
        }
        if self.llm.endpoint.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "llm.endpoint".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Load settings from files and environment
///
/// File layering: `config/default` then `config/{env}` when given, both
/// optional. Environment variables with the COPILOT_ prefix override file
/// values (`COPILOT_LLM__MODEL_INTENT=...`).
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    builder = builder.add_source(File::with_name("config/default").required(false));

    if let Some(env_name) = env {
        builder =
            builder.add_source(File::with_name(&format!("config/{}", env_name)).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix("COPILOT")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.max_verification_asks, 2);
        assert_eq!(settings.llm.model_intent, "gpt-4o");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_zero_budget() {
        let settings = Settings {
            max_verification_asks: 0,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }
}
