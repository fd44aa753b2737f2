//! Inbound transcript event types
//!
//! One event per finalized utterance, delivered by the transcript transport
//! (e.g. a contact-center webhook). Plan-context fields ride along on the
//! event when the UI or telephony platform knows them.

use serde::{Deserialize, Serialize};

/// Who spoke an utterance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Speaker {
    /// The human support agent on the call
    Csr,
    /// The customer
    Customer,
    /// Anything else the transport sends (conference participants, unknown)
    Other(String),
}

impl Default for Speaker {
    fn default() -> Self {
        Speaker::Other(String::new())
    }
}

impl From<String> for Speaker {
    fn from(raw: String) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "csr" | "agent" => Speaker::Csr,
            "customer" => Speaker::Customer,
            other => Speaker::Other(other.to_string()),
        }
    }
}

impl From<Speaker> for String {
    fn from(speaker: Speaker) -> Self {
        speaker.as_str().to_string()
    }
}

impl Speaker {
    pub fn as_str(&self) -> &str {
        match self {
            Speaker::Csr => "csr",
            Speaker::Customer => "customer",
            Speaker::Other(s) if !s.is_empty() => s,
            Speaker::Other(_) => "unknown",
        }
    }
}

/// A single finalized or partial transcript fragment
///
/// `is_partial` defaults to true when absent: a fragment is only processed
/// once the transport explicitly marks it final.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptEvent {
    pub session_id: String,

    #[serde(default)]
    pub speaker: Speaker,

    pub text: String,

    #[serde(default = "default_partial")]
    pub is_partial: bool,

    /// Contract type for the caller's plan (RE, DTC), when known
    #[serde(default)]
    pub contract_type: Option<String>,

    /// Plan name, when known (ShieldPlus, ShieldGold, ...)
    #[serde(default, alias = "selectedPlan")]
    pub plan: Option<String>,

    /// Plan state, when known (Texas, TX, ...)
    #[serde(default, alias = "selectedState")]
    pub state: Option<String>,

    /// Customer phone number, when the channel already knows it
    #[serde(default, alias = "phone")]
    pub phone_number: Option<String>,
}

fn default_partial() -> bool {
    true
}

impl TranscriptEvent {
    /// Build a minimal finalized event (test and demo helper)
    pub fn finalized(
        session_id: impl Into<String>,
        speaker: Speaker,
        text: impl Into<String>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            speaker,
            text: text.into(),
            is_partial: false,
            contract_type: None,
            plan: None,
            state: None,
            phone_number: None,
        }
    }
}
