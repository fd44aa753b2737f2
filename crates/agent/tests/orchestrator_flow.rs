//! End-to-end orchestrator cycles with mock collaborators
//!
//! Time is paused (tokio test-util) so cooldown behavior is deterministic:
//! `advance` past the cooldown where a cycle should emit, and stay inside it
//! where suppression is under test.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::time::advance;

use copilot_agent::CopilotOrchestrator;
use copilot_core::{
    CallIntent, CardPriority, CustomerContext, CustomerDirectory, CustomerRecord, Error,
    IntentClassification, IntentClassifier, KnowledgeAnswerer, PlanContext, QuestionAnswer,
    QuestionExtractor, Result, Speaker, SuggestionCard, SuggestionDrafter, ToolResultSnapshot,
    TranscriptEvent,
};

struct StaticClassifier(IntentClassification);

#[async_trait]
impl IntentClassifier for StaticClassifier {
    async fn classify(&self, _window: &str) -> Result<IntentClassification> {
        Ok(self.0.clone())
    }
}

/// Extracts the last customer utterance of the window as the question
struct EchoExtractor;

#[async_trait]
impl QuestionExtractor for EchoExtractor {
    async fn extract(&self, window: &str) -> Result<Vec<String>> {
        let question = window
            .lines()
            .last()
            .and_then(|line| line.strip_prefix("customer: "))
            .map(str::to_string);
        Ok(question.into_iter().collect())
    }
}

struct RecordingAnswerer {
    calls: AtomicUsize,
    failures_remaining: AtomicUsize,
}

impl RecordingAnswerer {
    fn new(failures: usize) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            failures_remaining: AtomicUsize::new(failures),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KnowledgeAnswerer for RecordingAnswerer {
    async fn answer(&self, _question: &str, _plan: &PlanContext) -> Result<QuestionAnswer> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self
            .failures_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(Error::Retrieval("vector store unavailable".to_string()));
        }
        Ok(QuestionAnswer {
            answer: "Covered up to $500 per contract term.".to_string(),
            cited_evidence: vec!["Section 9: Plumbing".to_string()],
        })
    }
}

struct CapturingDrafter {
    snapshots: Mutex<Vec<ToolResultSnapshot>>,
    calls: AtomicUsize,
    vary: bool,
}

impl CapturingDrafter {
    fn new(vary: bool) -> Self {
        Self {
            snapshots: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            vary,
        }
    }

    fn snapshots(&self) -> Vec<ToolResultSnapshot> {
        self.snapshots.lock().clone()
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SuggestionDrafter for CapturingDrafter {
    async fn draft(
        &self,
        _intent: CallIntent,
        _customer: &CustomerContext,
        snapshot: &ToolResultSnapshot,
        _window: &str,
    ) -> Result<Vec<SuggestionCard>> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.snapshots.lock().push(snapshot.clone());
        let (title, evidence) = if self.vary {
            (format!("Suggestion {n}"), String::new())
        } else {
            ("Coverage".to_string(), "policy language".to_string())
        };
        Ok(vec![SuggestionCard {
            title,
            csr_script: "Yes, that's covered under your plan.".to_string(),
            evidence,
            priority: CardPriority::High,
        }])
    }
}

struct MemoryDirectory {
    records: HashMap<String, CustomerRecord>,
}

#[async_trait]
impl CustomerDirectory for MemoryDirectory {
    async fn lookup_by_phone(&self, candidates: &[String]) -> Result<Option<CustomerRecord>> {
        Ok(candidates
            .iter()
            .find_map(|candidate| self.records.get(candidate))
            .cloned())
    }
}

fn inquiry() -> IntentClassification {
    IntentClassification {
        intent: CallIntent::Inquiry,
        confidence: 0.8,
        ..IntentClassification::fallback()
    }
}

struct Harness {
    orchestrator: CopilotOrchestrator,
    drafter: Arc<CapturingDrafter>,
    answerer: Arc<RecordingAnswerer>,
}

fn harness(vary_cards: bool, answer_failures: usize, max_asks: u32) -> Harness {
    harness_with_directory(vary_cards, answer_failures, max_asks, HashMap::new())
}

fn harness_with_directory(
    vary_cards: bool,
    answer_failures: usize,
    max_asks: u32,
    records: HashMap<String, CustomerRecord>,
) -> Harness {
    let drafter = Arc::new(CapturingDrafter::new(vary_cards));
    let answerer = Arc::new(RecordingAnswerer::new(answer_failures));
    let orchestrator = CopilotOrchestrator::new(
        Arc::new(StaticClassifier(inquiry())),
        Arc::new(EchoExtractor),
        answerer.clone(),
        drafter.clone(),
        Arc::new(MemoryDirectory { records }),
        max_asks,
    );
    Harness {
        orchestrator,
        drafter,
        answerer,
    }
}

fn customer_says(text: &str) -> TranscriptEvent {
    TranscriptEvent::finalized("call-1", Speaker::Customer, text)
}

fn csr_says(text: &str) -> TranscriptEvent {
    TranscriptEvent::finalized("call-1", Speaker::Csr, text)
}

fn with_plan_context(mut event: TranscriptEvent) -> TranscriptEvent {
    event.contract_type = Some("RE".to_string());
    event.plan = Some("ShieldPlus".to_string());
    event.state = Some("Texas".to_string());
    event
}

#[tokio::test(start_paused = true)]
async fn partial_and_blank_events_yield_nothing() {
    let h = harness(true, 0, 2);

    let mut partial = customer_says("is my water heater covered?");
    partial.is_partial = true;
    assert!(h.orchestrator.handle_transcript_event(partial).await.is_none());

    assert!(h
        .orchestrator
        .handle_transcript_event(customer_says("   "))
        .await
        .is_none());

    let mut no_session = customer_says("hello");
    no_session.session_id = String::new();
    assert!(h
        .orchestrator
        .handle_transcript_event(no_session)
        .await
        .is_none());

    assert_eq!(h.drafter.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn question_without_plan_context_queues_and_flags_verification() {
    let h = harness(true, 0, 2);

    let payload = h
        .orchestrator
        .handle_transcript_event(customer_says("is my water heater covered?"))
        .await
        .expect("new question is a meaningful change");

    assert!(!payload.customer.verified);
    assert_eq!(payload.customer.name, "Customer");
    let snapshots = h.drafter.snapshots();
    assert_eq!(snapshots.len(), 1);
    assert_eq!(
        snapshots[0].pending_questions,
        vec!["is my water heater covered?".to_string()]
    );
    assert!(snapshots[0].verification.needs_phone);
    assert!(snapshots[0].verification.ask_for_phone);
    assert!(snapshots[0].new_answers.is_empty());
    // No retrieval without plan context
    assert_eq!(h.answerer.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn queued_question_is_answered_once_plan_context_completes() {
    let h = harness(true, 0, 2);

    h.orchestrator
        .handle_transcript_event(customer_says("is my water heater covered?"))
        .await
        .expect("question queued");
    advance(Duration::from_secs(2)).await;

    // Plan context arrives on a later event; no verification needed
    h.orchestrator
        .handle_transcript_event(with_plan_context(csr_says(
            "I can see your plan details now.",
        )))
        .await
        .expect("new answer is a meaningful change");

    let snapshots = h.drafter.snapshots();
    assert_eq!(snapshots[1].new_answers.len(), 1);
    assert_eq!(
        snapshots[1].new_answers[0].question,
        "is my water heater covered?"
    );
    assert!(snapshots[1].pending_questions.is_empty());
    assert_eq!(snapshots[1].answered_count, 1);
    assert_eq!(h.answerer.calls(), 1);

    // Asking the same question again never re-queues or re-answers it
    advance(Duration::from_secs(2)).await;
    let _ = h
        .orchestrator
        .handle_transcript_event(customer_says("is my water heater covered?"))
        .await;
    let snapshots = h.drafter.snapshots();
    let last = snapshots.last().unwrap();
    assert!(last.pending_questions.is_empty());
    assert!(last.new_answers.is_empty());
    assert_eq!(h.answerer.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn verification_ask_budget_is_bounded() {
    let h = harness(true, 0, 2);

    h.orchestrator
        .handle_transcript_event(customer_says("is my water heater covered?"))
        .await
        .expect("question queued");

    for _ in 0..4 {
        advance(Duration::from_secs(2)).await;
        let _ = h
            .orchestrator
            .handle_transcript_event(csr_says("let me check on that for you"))
            .await;
    }

    let snapshots = h.drafter.snapshots();
    assert!(snapshots.len() >= 3);
    let asks = snapshots
        .iter()
        .filter(|s| s.verification.ask_for_phone)
        .count();
    assert_eq!(asks, 2);
    // Still flagged as needing identity, just no longer prompting
    assert!(snapshots.last().unwrap().verification.needs_phone);
    assert!(!snapshots.last().unwrap().verification.ask_for_phone);
}

#[tokio::test(start_paused = true)]
async fn cooldown_suppresses_cycles_without_meaningful_change() {
    let h = harness(true, 0, 2);

    h.orchestrator
        .handle_transcript_event(customer_says("is my water heater covered?"))
        .await
        .expect("first cycle emits");

    // Inside the cooldown window, nothing changed
    let suppressed = h
        .orchestrator
        .handle_transcript_event(csr_says("one moment please"))
        .await;
    assert!(suppressed.is_none());
    assert_eq!(h.drafter.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn meaningful_change_bypasses_cooldown() {
    let h = harness(false, 0, 2);

    h.orchestrator
        .handle_transcript_event(customer_says("is my water heater covered?"))
        .await
        .expect("first cycle emits");

    // Immediately afterwards a second question arrives
    let payload = h
        .orchestrator
        .handle_transcript_event(customer_says("what is the deductible?"))
        .await;
    assert!(payload.is_some());
    assert_eq!(h.drafter.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn unchanged_payload_is_fingerprint_suppressed_after_cooldown() {
    let h = harness(false, 0, 2);

    h.orchestrator
        .handle_transcript_event(customer_says("is my water heater covered?"))
        .await
        .expect("first cycle emits");

    advance(Duration::from_secs(2)).await;
    // Same intent, same customer, same cards: suppressed even past cooldown
    let suppressed = h
        .orchestrator
        .handle_transcript_event(csr_says("one moment please"))
        .await;
    assert!(suppressed.is_none());
}

#[tokio::test(start_paused = true)]
async fn channel_context_auto_verifies() {
    let h = harness(true, 0, 2);

    let mut event = with_plan_context(customer_says("hi, I'm calling about my plan"));
    event.phone_number = Some("5125551234".to_string());

    let payload = h
        .orchestrator
        .handle_transcript_event(event)
        .await
        .expect("verification is a meaningful change");
    assert!(payload.customer.verified);
    assert_eq!(payload.customer.name, "Customer");
    assert_eq!(payload.customer.plan, "ShieldPlus");
    assert_eq!(payload.customer.phone, "5125551234");
}

#[tokio::test(start_paused = true)]
async fn payload_phone_without_plan_context_verifies_via_directory() {
    let mut records = HashMap::new();
    records.insert(
        "5125551234".to_string(),
        CustomerRecord {
            phone: "5125551234".to_string(),
            name: "Dana Reyes".to_string(),
            plan: "ShieldGold".to_string(),
            contract_type: "DTC".to_string(),
            state: "Texas".to_string(),
        },
    );
    let h = harness_with_directory(true, 0, 2, records);

    // Phone rides on the event, not the utterance, and plan context is
    // still unknown: the directory supplies both identity and plan
    let mut event = customer_says("hi, I'm calling about my water heater");
    event.phone_number = Some("5125551234".to_string());

    let payload = h
        .orchestrator
        .handle_transcript_event(event)
        .await
        .expect("directory match is a meaningful change");
    assert!(payload.customer.verified);
    assert_eq!(payload.customer.name, "Dana Reyes");
    assert_eq!(payload.customer.plan, "ShieldGold");
    assert_eq!(payload.customer.state, "Texas");
}

#[tokio::test(start_paused = true)]
async fn phone_mention_verifies_via_directory_and_backfills_plan() {
    let mut records = HashMap::new();
    records.insert(
        "5125551234".to_string(),
        CustomerRecord {
            phone: "5125551234".to_string(),
            name: "Dana Reyes".to_string(),
            plan: "ShieldGold".to_string(),
            contract_type: "DTC".to_string(),
            state: "Texas".to_string(),
        },
    );
    let h = harness_with_directory(true, 0, 2, records);

    let payload = h
        .orchestrator
        .handle_transcript_event(customer_says("you can call me at (512) 555-1234"))
        .await
        .expect("directory match is a meaningful change");

    // Fast path forced the verification intent, no classifier involved
    assert_eq!(payload.intent, CallIntent::CustomerIdentification);
    assert!(payload.customer.verified);
    assert_eq!(payload.customer.name, "Dana Reyes");

    // Back-filled plan context lets the next question be answered directly
    advance(Duration::from_secs(2)).await;
    h.orchestrator
        .handle_transcript_event(customer_says("does my plan cover a broken dishwasher?"))
        .await
        .expect("answer emitted");
    let snapshots = h.drafter.snapshots();
    assert_eq!(snapshots.last().unwrap().new_answers.len(), 1);
    assert_eq!(h.answerer.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn failed_retrieval_keeps_question_pending_for_retry() {
    let h = harness(true, 1, 2);

    h.orchestrator
        .handle_transcript_event(with_plan_context(customer_says(
            "is my water heater covered?",
        )))
        .await
        .expect("question queued despite failed answer");

    let snapshots = h.drafter.snapshots();
    assert!(snapshots[0].new_answers.is_empty());
    assert_eq!(snapshots[0].pending_questions.len(), 1);

    // Next event retries the same question and succeeds
    advance(Duration::from_secs(2)).await;
    h.orchestrator
        .handle_transcript_event(csr_says("bear with me a second"))
        .await
        .expect("retried answer is a meaningful change");

    let snapshots = h.drafter.snapshots();
    assert_eq!(snapshots[1].new_answers.len(), 1);
    assert!(snapshots[1].pending_questions.is_empty());
    assert_eq!(h.answerer.calls(), 2);
}
