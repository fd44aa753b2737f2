//! Emission fingerprinting
//!
//! A payload's identity is the triple (intent, customer context, cards);
//! `session_id`, `confidence` and `created_at` are excluded so that a
//! re-drafted but substantively identical suggestion still dedupes.

use sha2::{Digest, Sha256};

use copilot_config::constants::emission;
use copilot_core::{CallIntent, CustomerContext, SuggestionCard};

/// Content fingerprint over the emission-relevant payload fields
pub fn emission_fingerprint(
    intent: CallIntent,
    customer: &CustomerContext,
    cards: &[SuggestionCard],
) -> String {
    let content = serde_json::json!({
        "intent": intent,
        "customer": customer,
        "cards": cards,
    });

    let mut hasher = Sha256::new();
    hasher.update(content.to_string().as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    digest[..emission::FINGERPRINT_HEX_LEN].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use copilot_core::CardPriority;

    fn card(title: &str) -> SuggestionCard {
        SuggestionCard {
            title: title.to_string(),
            csr_script: "Yes, that's covered.".to_string(),
            evidence: "is it covered?".to_string(),
            priority: CardPriority::High,
        }
    }

    #[test]
    fn stable_for_identical_input() {
        let customer = CustomerContext::default();
        let cards = vec![card("Coverage")];
        let a = emission_fingerprint(CallIntent::Inquiry, &customer, &cards);
        let b = emission_fingerprint(CallIntent::Inquiry, &customer, &cards);
        assert_eq!(a, b);
        assert_eq!(a.len(), emission::FINGERPRINT_HEX_LEN);
    }

    #[test]
    fn sensitive_to_card_changes() {
        let customer = CustomerContext::default();
        let a = emission_fingerprint(CallIntent::Inquiry, &customer, &[card("Coverage")]);
        let b = emission_fingerprint(CallIntent::Inquiry, &customer, &[card("Next step")]);
        assert_ne!(a, b);
    }

    #[test]
    fn sensitive_to_verification_flip() {
        let cards = vec![card("Coverage")];
        let unverified = CustomerContext::default();
        let verified = CustomerContext {
            verified: true,
            ..CustomerContext::default()
        };
        let a = emission_fingerprint(CallIntent::Inquiry, &unverified, &cards);
        let b = emission_fingerprint(CallIntent::Inquiry, &verified, &cards);
        assert_ne!(a, b);
    }
}
