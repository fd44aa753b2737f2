//! Defensive parsing of the RAG summarization response
//!
//! The summarizer is asked for `{"answer":"...","citedChunks":[...]}` but
//! model output drifts: markdown fences, prose around the JSON, or no JSON
//! at all. An unparseable response still carries the answer text, so the raw
//! output is used directly with the top retrieved chunk as its citation.

use serde::Deserialize;

use copilot_config::constants::retrieval;
use copilot_core::QuestionAnswer;
use copilot_llm::json::extract_json_object;

const RAW_ANSWER_MAX_LEN: usize = 1200;

#[derive(Debug, Deserialize)]
struct RagAnswerJson {
    #[serde(default)]
    answer: String,
    #[serde(default, rename = "citedChunks")]
    cited_chunks: Vec<String>,
}

/// Parse a summarizer response into a `QuestionAnswer`
///
/// Citations are capped at `MAX_CITED_CHUNKS`. When no JSON object can be
/// recovered, the raw text becomes the answer with the first retrieved chunk
/// cited.
pub fn parse_rag_answer(raw: &str, chunks: &[String]) -> QuestionAnswer {
    if let Some(json) = extract_json_object(raw) {
        if let Ok(parsed) = serde_json::from_str::<RagAnswerJson>(&json) {
            if !parsed.answer.trim().is_empty() {
                return QuestionAnswer {
                    answer: parsed.answer.trim().to_string(),
                    cited_evidence: parsed
                        .cited_chunks
                        .into_iter()
                        .map(|c| c.trim().to_string())
                        .filter(|c| !c.is_empty())
                        .take(retrieval::MAX_CITED_CHUNKS)
                        .collect(),
                };
            }
        }
    }

    QuestionAnswer {
        answer: truncate_chars(raw.trim(), RAW_ANSWER_MAX_LEN),
        cited_evidence: chunks.iter().take(1).cloned().collect(),
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    text.chars().take(max_chars).collect()
}
