//! LLM-backed suggestion drafter

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use copilot_core::{
    CallIntent, CustomerContext, Result, SuggestionCard, SuggestionDrafter, ToolResultSnapshot,
};

use crate::backend::{ChatBackend, ChatRequest};
use crate::json::extract_json_object;
use crate::prompt::{suggestion_prompt, Message};

/// Cards accepted from a single draft
const MAX_CARDS: usize = 3;

#[derive(Debug, Deserialize)]
struct DraftedCards {
    #[serde(default)]
    cards: Vec<SuggestionCard>,
}

/// Drafts CSR scripts from the intent, customer context and tool results
///
/// Unparseable or empty output degrades to a single generic fallback card so
/// the CSR is never left without a next step. Evidence back-fill for cards
/// that omit it is the orchestrator's job, which owns the evidence quote.
pub struct LlmSuggestionDrafter {
    backend: Arc<dyn ChatBackend>,
    model: String,
}

impl LlmSuggestionDrafter {
    pub fn new(backend: Arc<dyn ChatBackend>, model: impl Into<String>) -> Self {
        Self {
            backend,
            model: model.into(),
        }
    }
}

#[async_trait]
impl SuggestionDrafter for LlmSuggestionDrafter {
    async fn draft(
        &self,
        intent: CallIntent,
        customer: &CustomerContext,
        snapshot: &ToolResultSnapshot,
        transcript_window: &str,
    ) -> Result<Vec<SuggestionCard>> {
        let customer_json = serde_json::to_string(customer)?;
        let snapshot_json = serde_json::to_string(snapshot)?;

        let request = ChatRequest::new(
            &self.model,
            vec![Message::user(suggestion_prompt(
                intent.as_str(),
                &customer_json,
                &snapshot_json,
                transcript_window,
            ))],
            0.2,
        );
        let raw = self.backend.complete(&request).await.map_err(copilot_core::Error::from)?;

        let parsed = extract_json_object(&raw)
            .and_then(|json| serde_json::from_str::<DraftedCards>(&json).ok());

        let cards: Vec<SuggestionCard> = match parsed {
            Some(drafted) if !drafted.cards.is_empty() => {
                drafted.cards.into_iter().take(MAX_CARDS).collect()
            }
            _ => {
                tracing::warn!("suggestion drafter returned no usable cards, using fallback");
                vec![SuggestionCard::fallback("")]
            }
        };

        Ok(cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LlmError;
    use copilot_core::PlanContext;

    struct CannedBackend(String);

    #[async_trait]
    impl ChatBackend for CannedBackend {
        async fn complete(&self, _request: &ChatRequest) -> std::result::Result<String, LlmError> {
            Ok(self.0.clone())
        }
    }

    fn snapshot() -> ToolResultSnapshot {
        ToolResultSnapshot::new(false, PlanContext::default())
    }

    #[tokio::test]
    async fn parses_cards_and_caps_at_three() {
        let backend = Arc::new(CannedBackend(
            r#"{"cards": [
                {"title": "a", "csrScript": "s", "evidence": "", "priority": "high"},
                {"title": "b", "csrScript": "s", "evidence": "", "priority": "low"},
                {"title": "c", "csrScript": "s", "evidence": "", "priority": "medium"},
                {"title": "d", "csrScript": "s", "evidence": "", "priority": "medium"}
            ]}"#
            .to_string(),
        ));
        let drafter = LlmSuggestionDrafter::new(backend, "test-model");
        let cards = drafter
            .draft(
                CallIntent::Inquiry,
                &CustomerContext::default(),
                &snapshot(),
                "",
            )
            .await
            .unwrap();
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[0].title, "a");
    }

    #[tokio::test]
    async fn garbage_output_yields_fallback_card() {
        let backend = Arc::new(CannedBackend("hmm".to_string()));
        let drafter = LlmSuggestionDrafter::new(backend, "test-model");
        let cards = drafter
            .draft(
                CallIntent::Other,
                &CustomerContext::default(),
                &snapshot(),
                "",
            )
            .await
            .unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].title, "Next step");
    }
}
