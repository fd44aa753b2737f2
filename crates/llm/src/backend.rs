//! OpenAI-compatible chat backend
//!
//! Works with OpenAI, Azure OpenAI and local servers exposing the
//! `/chat/completions` shape. Non-streaming: every copilot call wants one
//! JSON blob back, so streaming buys nothing here.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::prompt::{Message, Role};
use crate::LlmError;

/// Backend configuration
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// API endpoint (base URL, without `/chat/completions`)
    pub endpoint: String,
    /// API key
    pub api_key: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1".to_string(),
            api_key: String::new(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl From<&copilot_config::LlmSettings> for OpenAIConfig {
    fn from(settings: &copilot_config::LlmSettings) -> Self {
        Self {
            endpoint: settings.endpoint.clone(),
            api_key: settings.api_key.clone(),
            timeout: Duration::from_secs(settings.timeout_secs),
        }
    }
}

/// One chat completion request
///
/// The model is chosen per request: the classifier and the drafter are
/// configured with different (pass-through) model identifiers.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f32,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>, messages: Vec<Message>, temperature: f32) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature,
        }
    }
}

/// Chat backend trait
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Run one completion and return the raw assistant text
    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct OpenAIChatRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAIChatResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
}

/// OpenAI-compatible backend
pub struct OpenAIBackend {
    config: OpenAIConfig,
    client: Client,
}

impl OpenAIBackend {
    pub fn new(config: OpenAIConfig) -> Result<Self, LlmError> {
        if config.api_key.is_empty() && !config.endpoint.starts_with("http://localhost") {
            return Err(LlmError::Configuration(
                "API key required for remote endpoints".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::Network(e.to_string()))?;

        Ok(Self { config, client })
    }

    fn chat_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.endpoint.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl ChatBackend for OpenAIBackend {
    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError> {
        let messages: Vec<OpenAIMessage> = request
            .messages
            .iter()
            .map(|m| OpenAIMessage {
                role: match m.role {
                    Role::System => "system".to_string(),
                    Role::User => "user".to_string(),
                    Role::Assistant => "assistant".to_string(),
                },
                content: m.content.clone(),
            })
            .collect();

        let body = OpenAIChatRequest {
            model: request.model.clone(),
            messages,
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(self.chat_url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(LlmError::Api(format!("HTTP {}: {}", status, error_text)));
        }

        let response: OpenAIChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::InvalidResponse("No choices in response".to_string()))?;

        Ok(choice.message.content)
    }
}
