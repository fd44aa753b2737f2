//! Intent taxonomy for live support calls

use serde::{Deserialize, Serialize};

/// Classified intent of the most recent transcript window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CallIntent {
    /// Phone number exchange / identity establishment
    CustomerIdentification,
    /// Coverage, plan, policy or terms question
    Inquiry,
    /// Malfunction or issue report ("not working", "leaking")
    Problem,
    /// Status/ETA/scheduling of an existing claim
    ClaimStatus,
    /// Frustration, escalation request, threat to cancel
    Complaint,
    /// Greetings, thanks, off-topic chatter
    SmallTalk,
    #[default]
    #[serde(other)]
    Other,
}

impl CallIntent {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallIntent::CustomerIdentification => "CUSTOMER_IDENTIFICATION",
            CallIntent::Inquiry => "INQUIRY",
            CallIntent::Problem => "PROBLEM",
            CallIntent::ClaimStatus => "CLAIM_STATUS",
            CallIntent::Complaint => "COMPLAINT",
            CallIntent::SmallTalk => "SMALL_TALK",
            CallIntent::Other => "OTHER",
        }
    }
}

impl std::fmt::Display for CallIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Entities extracted alongside the intent
///
/// Empty string means "not present" to match the wire contract of the
/// classifier, which always emits every key.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct IntentEntities {
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub appliance: String,
    #[serde(default)]
    pub symptom: String,
    #[serde(default)]
    pub money_amount: String,
    #[serde(default)]
    pub timeline: String,
    #[serde(default, rename = "claimId")]
    pub claim_id: String,
    #[serde(default)]
    pub question: String,
}

/// Result of intent classification over a transcript window
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentClassification {
    #[serde(default)]
    pub intent: CallIntent,
    #[serde(default)]
    pub confidence: f32,
    #[serde(default)]
    pub entities: IntentEntities,
    #[serde(default)]
    pub requires_verification: bool,
    #[serde(default)]
    pub evidence_quote: String,
}

impl IntentClassification {
    /// Low-confidence fallback used when the classifier call fails or
    /// returns unparseable output
    pub fn fallback() -> Self {
        Self {
            intent: CallIntent::Other,
            confidence: 0.2,
            entities: IntentEntities::default(),
            requires_verification: false,
            evidence_quote: String::new(),
        }
    }

    /// Forced classification for the phone-verification fast path
    pub fn verification_request(confidence: f32, phone: Option<String>, evidence: String) -> Self {
        Self {
            intent: CallIntent::CustomerIdentification,
            confidence,
            entities: IntentEntities {
                phone: phone.unwrap_or_default(),
                ..IntentEntities::default()
            },
            requires_verification: true,
            evidence_quote: evidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intent_round_trips_wire_labels() {
        let json = serde_json::to_string(&CallIntent::ClaimStatus).unwrap();
        assert_eq!(json, "\"CLAIM_STATUS\"");
        let parsed: CallIntent = serde_json::from_str("\"SMALL_TALK\"").unwrap();
        assert_eq!(parsed, CallIntent::SmallTalk);
    }

    #[test]
    fn unknown_intent_label_maps_to_other() {
        let parsed: CallIntent = serde_json::from_str("\"SOMETHING_NEW\"").unwrap();
        assert_eq!(parsed, CallIntent::Other);
    }

    #[test]
    fn classification_parses_sparse_json() {
        let raw = r#"{"intent": "INQUIRY", "confidence": 0.8}"#;
        let parsed: IntentClassification = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.intent, CallIntent::Inquiry);
        assert!(!parsed.requires_verification);
        assert!(parsed.entities.phone.is_empty());
    }
}
