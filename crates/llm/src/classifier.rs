//! LLM-backed intent classifier

use std::sync::Arc;

use async_trait::async_trait;

use copilot_core::{IntentClassification, IntentClassifier, Result};

use crate::backend::{ChatBackend, ChatRequest};
use crate::json::extract_json_object;
use crate::prompt::{intent_prompt, Message};

/// Classifies the transcript window with a chat model
///
/// Network failures surface as errors (the orchestrator degrades them);
/// unparseable model output degrades here to the low-confidence fallback
/// classification, since a reply did arrive.
pub struct LlmIntentClassifier {
    backend: Arc<dyn ChatBackend>,
    model: String,
}

impl LlmIntentClassifier {
    pub fn new(backend: Arc<dyn ChatBackend>, model: impl Into<String>) -> Self {
        Self {
            backend,
            model: model.into(),
        }
    }
}

#[async_trait]
impl IntentClassifier for LlmIntentClassifier {
    async fn classify(&self, transcript_window: &str) -> Result<IntentClassification> {
        let request = ChatRequest::new(
            &self.model,
            vec![Message::user(intent_prompt(transcript_window))],
            0.0,
        );
        let raw = self.backend.complete(&request).await.map_err(copilot_core::Error::from)?;

        let parsed = extract_json_object(&raw)
            .and_then(|json| serde_json::from_str::<IntentClassification>(&json).ok());

        Ok(match parsed {
            Some(classification) => classification,
            None => {
                tracing::warn!(raw = %raw.chars().take(200).collect::<String>(),
                    "intent classifier returned unparseable output, using fallback");
                IntentClassification::fallback()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LlmError;

    struct CannedBackend(String);

    #[async_trait]
    impl ChatBackend for CannedBackend {
        async fn complete(&self, _request: &ChatRequest) -> std::result::Result<String, LlmError> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn parses_well_formed_classification() {
        let backend = Arc::new(CannedBackend(
            r#"{"intent": "INQUIRY", "confidence": 0.85, "requiresVerification": true,
                "evidenceQuote": "is my water heater covered?"}"#
                .to_string(),
        ));
        let classifier = LlmIntentClassifier::new(backend, "test-model");
        let result = classifier.classify("customer: is it covered?").await.unwrap();
        assert_eq!(result.intent, copilot_core::CallIntent::Inquiry);
        assert!(result.requires_verification);
    }

    #[tokio::test]
    async fn unparseable_output_degrades_to_fallback() {
        let backend = Arc::new(CannedBackend("I cannot answer that".to_string()));
        let classifier = LlmIntentClassifier::new(backend, "test-model");
        let result = classifier.classify("customer: hello").await.unwrap();
        assert_eq!(result.intent, copilot_core::CallIntent::Other);
        assert!((result.confidence - 0.2).abs() < f32::EPSILON);
    }
}
