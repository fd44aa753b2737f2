//! Collaborator traits
//!
//! The orchestrator treats classification, extraction, retrieval, drafting
//! and directory lookup as opaque collaborators behind these traits. Every
//! method returns an explicit `Result`; the orchestrator applies the
//! fail-soft policy (degrade to an empty/default result, never propagate)
//! at its own boundary, so implementations are free to surface real errors.

use async_trait::async_trait;

use crate::customer::{CustomerContext, CustomerRecord, PlanContext};
use crate::error::Result;
use crate::intent::{CallIntent, IntentClassification};
use crate::snapshot::{QuestionAnswer, ToolResultSnapshot};
use crate::suggestion::SuggestionCard;

/// Classifies intent over a rendered transcript window
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    async fn classify(&self, transcript_window: &str) -> Result<IntentClassification>;
}

/// Extracts customer-intent questions from a transcript window (max 3)
#[async_trait]
pub trait QuestionExtractor: Send + Sync {
    async fn extract(&self, transcript_window: &str) -> Result<Vec<String>>;
}

/// Answers a policy question against a resolved plan context
#[async_trait]
pub trait KnowledgeAnswerer: Send + Sync {
    async fn answer(&self, question: &str, plan: &PlanContext) -> Result<QuestionAnswer>;
}

/// Drafts 1-3 suggestion cards for the CSR
#[async_trait]
pub trait SuggestionDrafter: Send + Sync {
    async fn draft(
        &self,
        intent: CallIntent,
        customer: &CustomerContext,
        snapshot: &ToolResultSnapshot,
        transcript_window: &str,
    ) -> Result<Vec<SuggestionCard>>;
}

/// Looks up a customer by exact match across phone-number candidates
#[async_trait]
pub trait CustomerDirectory: Send + Sync {
    async fn lookup_by_phone(&self, candidates: &[String]) -> Result<Option<CustomerRecord>>;
}
