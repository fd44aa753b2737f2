//! OpenAI-compatible embeddings client

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::RagError;

/// Embedding configuration
#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    /// API endpoint (base URL, without `/embeddings`)
    pub endpoint: String,
    /// API key
    pub api_key: String,
    /// Model name
    pub model: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1".to_string(),
            api_key: String::new(),
            model: "text-embedding-ada-002".to_string(),
            timeout: Duration::from_secs(15),
        }
    }
}

#[derive(Debug, Serialize)]
struct EmbedRequest {
    model: String,
    input: String,
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    data: Vec<EmbedData>,
}

#[derive(Debug, Deserialize)]
struct EmbedData {
    embedding: Vec<f32>,
}

/// Embeddings client
pub struct EmbeddingClient {
    client: Client,
    config: EmbeddingConfig,
}

impl EmbeddingClient {
    pub fn new(config: EmbeddingConfig) -> Result<Self, RagError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RagError::Connection(e.to_string()))?;
        Ok(Self { client, config })
    }

    /// Embed a single query string
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>, RagError> {
        let request = EmbedRequest {
            model: self.config.model.clone(),
            input: text.to_string(),
        };

        let response = self
            .client
            .post(format!(
                "{}/embeddings",
                self.config.endpoint.trim_end_matches('/')
            ))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(RagError::Embedding(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let parsed: EmbedResponse = response
            .json()
            .await
            .map_err(|e| RagError::Embedding(e.to_string()))?;

        parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| RagError::Embedding("empty embedding response".to_string()))
    }
}
