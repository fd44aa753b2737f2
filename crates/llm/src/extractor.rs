//! LLM-backed question extractor

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use copilot_config::constants::cycle;
use copilot_core::{QuestionExtractor, Result};

use crate::backend::{ChatBackend, ChatRequest};
use crate::json::extract_json_object;
use crate::prompt::{question_extraction_prompt, Message};

#[derive(Debug, Deserialize)]
struct ExtractedQuestions {
    #[serde(default)]
    questions: Vec<String>,
}

/// Extracts customer-intent questions from the transcript window
pub struct LlmQuestionExtractor {
    backend: Arc<dyn ChatBackend>,
    model: String,
}

impl LlmQuestionExtractor {
    pub fn new(backend: Arc<dyn ChatBackend>, model: impl Into<String>) -> Self {
        Self {
            backend,
            model: model.into(),
        }
    }
}

#[async_trait]
impl QuestionExtractor for LlmQuestionExtractor {
    async fn extract(&self, transcript_window: &str) -> Result<Vec<String>> {
        let request = ChatRequest::new(
            &self.model,
            vec![Message::user(question_extraction_prompt(transcript_window))],
            0.0,
        );
        let raw = self.backend.complete(&request).await.map_err(copilot_core::Error::from)?;

        let parsed = extract_json_object(&raw)
            .and_then(|json| serde_json::from_str::<ExtractedQuestions>(&json).ok());

        let questions = match parsed {
            Some(extracted) => extracted
                .questions
                .into_iter()
                .map(|q| q.trim().to_string())
                .filter(|q| !q.is_empty())
                .take(cycle::MAX_EXTRACTED_QUESTIONS)
                .collect(),
            None => {
                tracing::warn!("question extractor returned unparseable output");
                Vec::new()
            }
        };

        Ok(questions)
    }
}
