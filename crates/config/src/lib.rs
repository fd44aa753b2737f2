//! Configuration management for the live call copilot
//!
//! Supports loading configuration from:
//! - TOML files (config/default, config/{env})
//! - Environment variables (COPILOT_ prefix, plus legacy unprefixed vars for
//!   credentials like OPENAI_API_KEY)
//! - Runtime overrides via `Settings` construction in tests

pub mod constants;
pub mod settings;

pub use settings::{
    load_settings, AnswererSettings, DirectorySettings, LlmSettings, RetrievalSettings, Settings,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Environment error: {0}")]
    Environment(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
