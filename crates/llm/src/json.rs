//! Defensive JSON recovery from model output
//!
//! Models wrap JSON in markdown fences or prepend chatter despite
//! instructions. Strip fences first, then fall back to grabbing the
//! outermost brace-delimited span.

use once_cell::sync::Lazy;
use regex::Regex;

static FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"```(?:json)?\n?").expect("valid regex"));
static OBJECT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\{.*\}").expect("valid regex"));

/// Recover a JSON object string from raw model output
pub fn extract_json_object(raw: &str) -> Option<String> {
    let cleaned = FENCE.replace_all(raw, "").trim().to_string();
    if cleaned.starts_with('{') {
        return Some(cleaned);
    }
    OBJECT
        .find(&cleaned)
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_through_bare_object() {
        let raw = r#"{"questions": []}"#;
        assert_eq!(extract_json_object(raw).unwrap(), raw);
    }

    #[test]
    fn strips_markdown_fences() {
        let raw = "```json\n{\"intent\": \"OTHER\"}\n```";
        assert_eq!(extract_json_object(raw).unwrap(), "{\"intent\": \"OTHER\"}");
    }

    #[test]
    fn recovers_embedded_object() {
        let raw = "Sure! Here is the JSON you asked for:\n{\"cards\": []}\nHope that helps.";
        assert_eq!(extract_json_object(raw).unwrap(), "{\"cards\": []}");
    }

    #[test]
    fn none_when_no_object_present() {
        assert!(extract_json_object("no json here").is_none());
    }
}
