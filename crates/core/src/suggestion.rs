//! Outbound suggestion payload types
//!
//! Shape consumed by the live-transcript UI. Field names match the wire
//! contract (`csrScript`, `createdAt` as epoch seconds in a string).

use serde::{Deserialize, Serialize};

use crate::customer::CustomerContext;
use crate::intent::CallIntent;

/// Urgency of a suggestion card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CardPriority {
    High,
    #[default]
    Medium,
    Low,
}

/// One script the CSR can read to the customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionCard {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub csr_script: String,
    /// Verbatim customer quote that triggered this card
    #[serde(default)]
    pub evidence: String,
    #[serde(default)]
    pub priority: CardPriority,
}

impl SuggestionCard {
    /// Generic card emitted when the drafter fails or returns nothing usable
    pub fn fallback(evidence: impl Into<String>) -> Self {
        Self {
            title: "Next step".to_string(),
            csr_script: "I can help. Could you tell me a bit more about what happened \
                         and what you're trying to get resolved today?"
                .to_string(),
            evidence: evidence.into(),
            priority: CardPriority::Medium,
        }
    }
}

/// Suggestion emitted to the CSR, or suppressed entirely for a cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionPayload {
    pub session_id: String,
    pub intent: CallIntent,
    pub confidence: f32,
    pub customer: CustomerContext,
    pub cards: Vec<SuggestionCard>,
    /// Epoch seconds as a string, per the UI contract
    pub created_at: String,
}
