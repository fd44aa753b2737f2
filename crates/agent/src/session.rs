//! Per-call session state
//!
//! One `SessionState` per active call. All bounds come from
//! `copilot_config::constants::session`:
//! - transcript buffer is FIFO-bounded; the rendered window sent to
//!   collaborators covers the most recent utterances only
//! - the pending-question queue is bounded with oldest-first eviction and
//!   keyed by normalized text, so rephrased duplicates collapse
//! - `answered` is append-only: a key present there is never re-queued
//! - `customer.verified` is monotone within the session
//!
//! Mutation happens only under the per-session lock held by the
//! orchestrator, one event at a time.

use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, Utc};
use tokio::time::Instant;

use copilot_config::constants::session as bounds;
use copilot_core::{
    CallIntent, CustomerContext, CustomerRecord, PlanContext, QuestionAnswer, Speaker,
    TranscriptEvent,
};
use copilot_text_processing::normalize_key;

/// One buffered utterance
#[derive(Debug, Clone)]
pub struct Utterance {
    pub speaker: String,
    pub text: String,
    pub at: DateTime<Utc>,
}

/// One queued customer question
#[derive(Debug, Clone)]
pub struct PendingQuestion {
    pub key: String,
    pub text: String,
    pub at: DateTime<Utc>,
}

/// Resolved answer, kept for the lifetime of the session
#[derive(Debug, Clone)]
pub struct AnsweredRecord {
    pub result: QuestionAnswer,
    pub at: DateTime<Utc>,
}

/// State for one call
#[derive(Default)]
pub struct SessionState {
    // Plan context supplied out-of-band, filled only when previously empty
    pub contract_type: String,
    pub plan: String,
    pub state: String,
    pub phone: String,

    pub customer: Option<CustomerContext>,

    transcript: VecDeque<Utterance>,
    pending: VecDeque<PendingQuestion>,
    answered: HashMap<String, AnsweredRecord>,

    pub verification_asks: u32,
    pub last_intent: CallIntent,
    pub last_suggested_at: Option<Instant>,
    pub last_emit_fingerprint: Option<String>,
}

fn fill_if_empty(slot: &mut String, value: Option<&str>) {
    if !slot.trim().is_empty() {
        return;
    }
    if let Some(value) = value {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            *slot = trimmed.to_string();
        }
    }
}

impl SessionState {
    /// Merge plan-context fields riding on an event (fill-when-empty only)
    pub fn merge_event_context(&mut self, event: &TranscriptEvent) {
        fill_if_empty(&mut self.contract_type, event.contract_type.as_deref());
        fill_if_empty(&mut self.plan, event.plan.as_deref());
        fill_if_empty(&mut self.state, event.state.as_deref());
        fill_if_empty(&mut self.phone, event.phone_number.as_deref());
    }

    /// Upgrade to verified when the channel supplied phone plus complete
    /// plan context. Returns true only on the transition.
    pub fn try_channel_verify(&mut self) -> bool {
        if self.customer.is_some() {
            return false;
        }
        if self.phone.trim().is_empty() || !self.plan_context().is_complete() {
            return false;
        }
        self.customer = Some(CustomerContext {
            verified: true,
            name: "Customer".to_string(),
            plan: self.plan.clone(),
            contract_type: self.contract_type.clone(),
            state: self.state.clone(),
            phone: self.phone.clone(),
        });
        true
    }

    /// Record a directory match: mark verified and back-fill empty
    /// plan-context fields from the matched record
    pub fn apply_directory_match(&mut self, record: CustomerRecord, matched_phone: &str) {
        fill_if_empty(&mut self.contract_type, Some(&record.contract_type));
        fill_if_empty(&mut self.plan, Some(&record.plan));
        fill_if_empty(&mut self.state, Some(&record.state));
        fill_if_empty(&mut self.phone, Some(matched_phone));
        self.customer = Some(record.into_verified_context(matched_phone));
    }

    pub fn is_verified(&self) -> bool {
        self.customer.as_ref().map(|c| c.verified).unwrap_or(false)
    }

    /// Append an utterance, evicting the oldest beyond capacity
    pub fn push_utterance(&mut self, speaker: &Speaker, text: &str) {
        self.transcript.push_back(Utterance {
            speaker: speaker.as_str().to_string(),
            text: text.to_string(),
            at: Utc::now(),
        });
        while self.transcript.len() > bounds::TRANSCRIPT_BUFFER_CAPACITY {
            self.transcript.pop_front();
        }
    }

    /// Render the recent window as `speaker: text` lines, oldest first
    pub fn transcript_window(&self) -> String {
        let skip = self.transcript.len().saturating_sub(bounds::TRANSCRIPT_WINDOW);
        self.transcript
            .iter()
            .skip(skip)
            .map(|u| format!("{}: {}", u.speaker, u.text))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Queue a question by normalized key; idempotent against both the queue
    /// and the answered record. Returns true only on a fresh insert.
    pub fn queue_question(&mut self, text: &str) -> bool {
        let key = normalize_key(text);
        if key.is_empty() {
            return false;
        }
        if self.answered.contains_key(&key) {
            return false;
        }
        if self.pending.iter().any(|q| q.key == key) {
            return false;
        }
        self.pending.push_back(PendingQuestion {
            key,
            text: text.trim().to_string(),
            at: Utc::now(),
        });
        while self.pending.len() > bounds::PENDING_QUESTION_CAPACITY {
            self.pending.pop_front();
        }
        true
    }

    pub fn has_pending_questions(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn pending_texts(&self) -> Vec<String> {
        self.pending.iter().map(|q| q.text.clone()).collect()
    }

    /// Oldest `n` queued questions as (key, text) pairs
    pub fn pending_batch(&self, n: usize) -> Vec<(String, String)> {
        self.pending
            .iter()
            .take(n)
            .map(|q| (q.key.clone(), q.text.clone()))
            .collect()
    }

    pub fn is_answered(&self, key: &str) -> bool {
        self.answered.contains_key(key)
    }

    /// Move a question from pending to answered
    pub fn resolve_question(&mut self, key: &str, result: QuestionAnswer) {
        self.pending.retain(|q| q.key != key);
        self.answered.insert(
            key.to_string(),
            AnsweredRecord {
                result,
                at: Utc::now(),
            },
        );
    }

    pub fn answered_count(&self) -> usize {
        self.answered.len()
    }

    /// Session-level plan context (post back-fill)
    pub fn plan_context(&self) -> PlanContext {
        PlanContext {
            contract_type: self.contract_type.clone(),
            plan: self.plan.clone(),
            state: self.state.clone(),
        }
    }

    /// Customer context for the outbound payload; unverified sessions get a
    /// synthesized profile from session-level fields so the payload shape is
    /// always complete. The name is the "Customer" placeholder until a
    /// directory match supplies a real one.
    pub fn customer_context(&self) -> CustomerContext {
        match &self.customer {
            Some(customer) => customer.clone(),
            None => CustomerContext {
                verified: false,
                name: "Customer".to_string(),
                plan: self.plan.clone(),
                contract_type: self.contract_type.clone(),
                state: self.state.clone(),
                phone: self.phone.clone(),
            },
        }
    }

    /// Record a successful emission
    pub fn record_emission(&mut self, fingerprint: String, intent: CallIntent) {
        self.last_emit_fingerprint = Some(fingerprint);
        self.last_suggested_at = Some(Instant::now());
        self.last_intent = intent;
    }
}
