//! Tool-result snapshot passed to the suggestion drafter
//!
//! Assembled fresh every cycle so the drafter always sees session plan
//! context, the pending-question backlog and any answers produced this
//! cycle, regardless of which sub-steps actually ran.

use serde::{Deserialize, Serialize};

use crate::customer::PlanContext;

/// Whether the customer identity has been established
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotMode {
    Verified,
    Unverified,
}

/// Answer to a single policy question
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct QuestionAnswer {
    #[serde(default)]
    pub answer: String,
    /// Policy chunks backing the answer, capped by the answerer
    #[serde(default, rename = "citedChunks")]
    pub cited_evidence: Vec<String>,
}

impl QuestionAnswer {
    /// True when retrieval found nothing to cite and produced no answer text
    pub fn is_empty(&self) -> bool {
        self.answer.trim().is_empty()
    }
}

/// A question answered during the current cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnsweredQuestion {
    pub question: String,
    pub result: QuestionAnswer,
}

/// Verification prompts decided this cycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct VerificationFlags {
    /// Identity is still needed for the resolved intent or pending questions
    pub needs_phone: bool,
    /// The CSR should actually ask for the phone this cycle (budgeted)
    pub ask_for_phone: bool,
}

/// Snapshot of session/tool state fed to the suggestion drafter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResultSnapshot {
    pub mode: SnapshotMode,
    pub session_context: PlanContext,
    pub pending_questions: Vec<String>,
    pub answered_count: usize,
    pub new_answers: Vec<AnsweredQuestion>,
    pub verification: VerificationFlags,
}

impl ToolResultSnapshot {
    /// Empty snapshot for a session with the given plan context
    pub fn new(verified: bool, session_context: PlanContext) -> Self {
        Self {
            mode: if verified {
                SnapshotMode::Verified
            } else {
                SnapshotMode::Unverified
            },
            session_context,
            pending_questions: Vec::new(),
            answered_count: 0,
            new_answers: Vec::new(),
            verification: VerificationFlags::default(),
        }
    }
}
