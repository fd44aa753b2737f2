//! Phone-number candidate extraction
//!
//! Callers read numbers aloud in many shapes: "(512) 555-1234",
//! "512.555.1234", "+1 512 555 1234". The directory stores exact strings, so
//! each detected number is expanded into both a bare 10-digit form and an
//! E.164 `+1` form. Output is order-preserving deduped and capped to bound
//! per-event lookup cost.

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum candidates returned per utterance
const MAX_CANDIDATES: usize = 4;

static PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+?1\s*)?\(?\s*(\d{3})\s*\)?[\s.-]?(\d{3})[\s.-]?(\d{4})")
        .expect("valid regex")
});

static NON_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\D+").expect("valid regex"));

/// Extract phone-number candidates from free text
///
/// Returns both `NNNNNNNNNN` and `+1NNNNNNNNNN` forms for every detected
/// number, deduped in order of appearance, at most 4 entries.
pub fn extract_phone_candidates(text: &str) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let mut out: Vec<String> = Vec::new();

    for caps in PHONE.captures_iter(trimmed) {
        let digits = format!("{}{}{}", &caps[1], &caps[2], &caps[3]);
        if digits.len() == 10 {
            out.push(digits.clone());
            out.push(format!("+1{digits}"));
        }
    }

    // The whole utterance may itself be one number spelled with filler
    // punctuation the pattern above missed.
    let raw_digits = NON_DIGIT.replace_all(trimmed, "").to_string();
    if raw_digits.len() == 10 {
        out.push(raw_digits.clone());
        out.push(format!("+1{raw_digits}"));
    } else if raw_digits.len() == 11 && raw_digits.starts_with('1') {
        let bare = raw_digits[1..].to_string();
        out.push(bare.clone());
        out.push(format!("+1{bare}"));
    }

    let mut seen = std::collections::HashSet::new();
    let mut deduped = Vec::new();
    for candidate in out {
        if seen.insert(candidate.clone()) {
            deduped.push(candidate);
        }
        if deduped.len() == MAX_CANDIDATES {
            break;
        }
    }
    deduped
}
