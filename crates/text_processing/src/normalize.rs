//! Normalization keys
//!
//! Pending questions are keyed by whitespace-collapsed lower-cased text so
//! that trivially rephrased duplicates ("Is my  Water Heater covered?")
//! collapse onto one queue entry.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Collapse whitespace and lower-case, producing an identity key
pub fn normalize_key(text: &str) -> String {
    WHITESPACE
        .replace_all(text.trim(), " ")
        .to_lowercase()
}
