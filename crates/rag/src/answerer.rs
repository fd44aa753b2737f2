//! Knowledge answering strategies
//!
//! Two implementations of `KnowledgeAnswerer` sit behind one interface:
//!
//! - [`SimpleRagAnswerer`]: in-process similarity search over the plan's
//!   partition, summarized by an LLM constrained to the retrieved chunks.
//! - [`RemoteAgentAnswerer`]: a richer external agent service that does its
//!   own retrieval and reasoning.
//!
//! The strategy is selected once at construction from configuration
//! ([`build_answerer`]), not probed on every call. A failing answer leaves
//! the question pending so a later cycle can retry it.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use copilot_config::constants::retrieval;
use copilot_core::{KnowledgeAnswerer, PlanContext, QuestionAnswer, Result};
use copilot_llm::{ChatBackend, ChatRequest, Message};

use crate::embeddings::EmbeddingClient;
use crate::json_answer::parse_rag_answer;
use crate::partition::knowledge_partition;
use crate::vector_store::PolicyVectorStore;
use crate::RagError;

/// In-process retrieve-and-summarize answerer
pub struct SimpleRagAnswerer {
    store: Arc<PolicyVectorStore>,
    embedder: Arc<EmbeddingClient>,
    backend: Arc<dyn ChatBackend>,
    model: String,
}

impl SimpleRagAnswerer {
    pub fn new(
        store: Arc<PolicyVectorStore>,
        embedder: Arc<EmbeddingClient>,
        backend: Arc<dyn ChatBackend>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            store,
            embedder,
            backend,
            model: model.into(),
        }
    }
}

#[async_trait]
impl KnowledgeAnswerer for SimpleRagAnswerer {
    async fn answer(&self, question: &str, plan: &PlanContext) -> Result<QuestionAnswer> {
        let partition =
            knowledge_partition(plan).ok_or(RagError::MissingPlanContext).map_err(copilot_core::Error::from)?;

        let embedding = self.embedder.embed(question).await.map_err(copilot_core::Error::from)?;
        let chunks = self
            .store
            .search_chunks(&partition, embedding, retrieval::DEFAULT_TOP_K)
            .await
            .map_err(copilot_core::Error::from)?;

        if chunks.is_empty() {
            return Ok(QuestionAnswer {
                answer: "I couldn't find relevant policy language for that question.".to_string(),
                cited_evidence: Vec::new(),
            });
        }

        let prompt = copilot_llm::prompt::rag_answer_prompt(question, &chunks.join("\n\n"));
        let request = ChatRequest::new(&self.model, vec![Message::user(prompt)], 0.0);
        let raw = self.backend.complete(&request).await.map_err(copilot_core::Error::from)?;

        Ok(parse_rag_answer(&raw, &chunks))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AgentRequest<'a> {
    question: &'a str,
    contract_type: &'a str,
    selected_plan: &'a str,
    selected_state: &'a str,
    transcript_context: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AgentResponse {
    #[serde(default)]
    answer: String,
    #[serde(default)]
    relevant_chunks: Vec<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Remote agent answerer
///
/// Calls a richer agent service that runs its own retrieval and query
/// breakdown. Errors from the service surface as retrieval errors; the
/// orchestrator keeps the question pending for a later retry.
pub struct RemoteAgentAnswerer {
    client: reqwest::Client,
    endpoint: String,
}

impl RemoteAgentAnswerer {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| copilot_core::Error::Retrieval(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl KnowledgeAnswerer for RemoteAgentAnswerer {
    async fn answer(&self, question: &str, plan: &PlanContext) -> Result<QuestionAnswer> {
        let request = AgentRequest {
            question,
            contract_type: &plan.contract_type,
            selected_plan: &plan.plan,
            selected_state: &plan.state,
            transcript_context: "",
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| copilot_core::Error::Retrieval(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(copilot_core::Error::Retrieval(format!(
                "agent service HTTP {status}"
            )));
        }

        let parsed: AgentResponse = response
            .json()
            .await
            .map_err(|e| copilot_core::Error::Retrieval(e.to_string()))?;

        if let Some(error) = parsed.error {
            return Err(copilot_core::Error::Retrieval(error));
        }
        if parsed.answer.trim().is_empty() {
            return Err(copilot_core::Error::Retrieval(
                "agent service returned empty answer".to_string(),
            ));
        }

        Ok(QuestionAnswer {
            answer: parsed.answer,
            cited_evidence: parsed
                .relevant_chunks
                .into_iter()
                .take(retrieval::MAX_AGENT_CITED_CHUNKS)
                .collect(),
        })
    }
}

/// Select the answering strategy from configuration
///
/// A configured agent endpoint selects the remote strategy; otherwise the
/// in-process RAG path is built from the retrieval settings.
pub fn build_answerer(
    settings: &copilot_config::Settings,
    backend: Arc<dyn ChatBackend>,
) -> Result<Arc<dyn KnowledgeAnswerer>> {
    if let Some(endpoint) = settings
        .answerer
        .agent_endpoint
        .as_deref()
        .filter(|e| !e.trim().is_empty())
    {
        tracing::info!(endpoint, "using remote agent answerer");
        return Ok(Arc::new(RemoteAgentAnswerer::new(endpoint)?));
    }

    tracing::info!("using in-process RAG answerer");
    let store = PolicyVectorStore::new(crate::vector_store::VectorStoreConfig {
        endpoint: settings.retrieval.qdrant_endpoint.clone(),
        api_key: settings.retrieval.qdrant_api_key.clone(),
    })
    .map_err(copilot_core::Error::from)?;

    let embedder = EmbeddingClient::new(crate::embeddings::EmbeddingConfig {
        endpoint: settings.llm.endpoint.clone(),
        api_key: settings.llm.api_key.clone(),
        model: settings.retrieval.embedding_model.clone(),
        ..Default::default()
    })
    .map_err(copilot_core::Error::from)?;

    Ok(Arc::new(SimpleRagAnswerer::new(
        Arc::new(store),
        Arc::new(embedder),
        backend,
        settings.llm.model_suggest.clone(),
    )))
}
