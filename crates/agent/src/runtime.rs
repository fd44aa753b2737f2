//! Composition root
//!
//! Wires the real collaborators (LLM classifier/extractor/drafter, the
//! configured answering strategy, the ScyllaDB customer directory) into a
//! ready orchestrator from loaded settings.

use std::sync::Arc;

use copilot_config::Settings;
use copilot_core::Result;
use copilot_llm::{ChatBackend, LlmIntentClassifier, LlmQuestionExtractor, LlmSuggestionDrafter};
use copilot_llm::{OpenAIBackend, OpenAIConfig};
use copilot_persistence::ScyllaConfig;

use crate::orchestrator::CopilotOrchestrator;

/// Build the orchestrator with production collaborators
pub async fn build_orchestrator(settings: &Settings) -> Result<CopilotOrchestrator> {
    let backend: Arc<dyn ChatBackend> = Arc::new(
        OpenAIBackend::new(OpenAIConfig::from(&settings.llm)).map_err(copilot_core::Error::from)?,
    );

    let classifier = Arc::new(LlmIntentClassifier::new(
        backend.clone(),
        settings.llm.model_intent.clone(),
    ));
    let extractor = Arc::new(LlmQuestionExtractor::new(
        backend.clone(),
        settings.llm.model_suggest.clone(),
    ));
    let drafter = Arc::new(LlmSuggestionDrafter::new(
        backend.clone(),
        settings.llm.model_suggest.clone(),
    ));

    let answerer = copilot_rag::build_answerer(settings, backend)?;

    let directory = Arc::new(
        copilot_persistence::init(ScyllaConfig::from(&settings.directory))
            .await
            .map_err(copilot_core::Error::from)?,
    );

    Ok(CopilotOrchestrator::new(
        classifier,
        extractor,
        answerer,
        drafter,
        directory,
        settings.max_verification_asks,
    ))
}
