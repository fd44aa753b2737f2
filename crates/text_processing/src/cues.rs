//! Heuristic cues over single utterances
//!
//! These gate the expensive LLM calls: the classifier is skipped entirely
//! when the CSR is clearly asking for a callback number, and question
//! extraction only runs when an utterance plausibly contains a coverage
//! question.

use crate::normalize::normalize_key;

/// Phrases a CSR uses when asking for the customer's phone number
const VERIFICATION_CUES: &[&str] = &[
    "phone",
    "mobile",
    "contact number",
    "callback number",
    "number to reach you",
    "best number",
];

/// Keywords suggesting a coverage/policy question even without a "?"
const COVERAGE_CUES: &[&str] = &[
    "covered",
    "cover",
    "limit",
    "deductible",
    "fee",
    "cost",
    "refund",
    "cancel",
    "renew",
    "service request",
];

/// True when the utterance reads like a phone-verification request
pub fn looks_like_verification_request(text: &str) -> bool {
    let normalized = normalize_key(text);
    if normalized.is_empty() {
        return false;
    }
    VERIFICATION_CUES.iter().any(|cue| normalized.contains(cue))
}

/// True when the utterance likely contains a policy/coverage question
pub fn looks_like_coverage_question(text: &str) -> bool {
    let normalized = normalize_key(text);
    if normalized.is_empty() {
        return false;
    }
    if text.contains('?') {
        return true;
    }
    COVERAGE_CUES.iter().any(|cue| normalized.contains(cue))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verification_cues_match() {
        assert!(looks_like_verification_request(
            "What's the best number to reach you at?"
        ));
        assert!(looks_like_verification_request("Can I get your phone?"));
        assert!(!looks_like_verification_request("Your water heater is covered"));
        assert!(!looks_like_verification_request(""));
    }

    #[test]
    fn question_mark_always_triggers() {
        assert!(looks_like_coverage_question("is my water heater covered?"));
        assert!(looks_like_coverage_question("really?"));
    }

    #[test]
    fn coverage_keywords_trigger_without_question_mark() {
        assert!(looks_like_coverage_question("I want to cancel my plan"));
        assert!(looks_like_coverage_question("what is the deductible"));
        assert!(!looks_like_coverage_question("thanks, that helps"));
    }
}
