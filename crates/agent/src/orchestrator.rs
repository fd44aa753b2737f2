//! Session orchestrator
//!
//! Sequences one processing cycle per finalized transcript event:
//!
//! 1. merge event plan context, channel auto-verification
//! 2. transcript buffer append
//! 3. intent resolution (fast path or classifier)
//! 4. directory lookup on phone mention
//! 5. question extraction and queueing
//! 6. verification gating against the per-session ask budget
//! 7. conditional answering (plan context required, verification not)
//! 8. cooldown gate, bypassed by meaningful change
//! 9. suggestion drafting
//! 10. fingerprint dedup, then emit
//!
//! Collaborator failures never propagate: each degrades to an empty or
//! default result for its own step, logged, and the cycle continues. A
//! question whose retrieval failed stays pending so a later event retries
//! it. The caller only ever sees `Some(payload)` or `None`.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use copilot_config::constants::{cycle, emission, session as bounds};
use copilot_core::{
    AnsweredQuestion, CustomerDirectory, IntentClassification, IntentClassifier,
    KnowledgeAnswerer, QuestionExtractor, SnapshotMode, Speaker, SuggestionCard,
    SuggestionDrafter, SuggestionPayload, ToolResultSnapshot, TranscriptEvent, VerificationFlags,
};
use copilot_text_processing::{
    extract_phone_candidates, looks_like_coverage_question, looks_like_verification_request,
};

use crate::fingerprint::emission_fingerprint;
use crate::session::SessionState;
use crate::store::SessionStore;

/// Per-call orchestration engine
pub struct CopilotOrchestrator {
    classifier: Arc<dyn IntentClassifier>,
    extractor: Arc<dyn QuestionExtractor>,
    answerer: Arc<dyn KnowledgeAnswerer>,
    drafter: Arc<dyn SuggestionDrafter>,
    directory: Arc<dyn CustomerDirectory>,
    sessions: SessionStore,
    max_verification_asks: u32,
    cooldown: Duration,
}

impl CopilotOrchestrator {
    pub fn new(
        classifier: Arc<dyn IntentClassifier>,
        extractor: Arc<dyn QuestionExtractor>,
        answerer: Arc<dyn KnowledgeAnswerer>,
        drafter: Arc<dyn SuggestionDrafter>,
        directory: Arc<dyn CustomerDirectory>,
        max_verification_asks: u32,
    ) -> Self {
        Self {
            classifier,
            extractor,
            answerer,
            drafter,
            directory,
            sessions: SessionStore::new(),
            max_verification_asks,
            cooldown: Duration::from_secs(emission::COOLDOWN_SECONDS),
        }
    }

    /// Drop sessions idle longer than `max_idle`; callers own the schedule
    pub fn evict_idle_sessions(&self, max_idle: Duration) -> usize {
        self.sessions.evict_idle(max_idle)
    }

    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }

    /// Process one transcript event, returning a suggestion or nothing
    pub async fn handle_transcript_event(
        &self,
        event: TranscriptEvent,
    ) -> Option<SuggestionPayload> {
        let text = event.text.trim().to_string();
        if event.session_id.trim().is_empty() || text.is_empty() {
            return None;
        }
        if event.is_partial {
            return None;
        }

        let handle = self.sessions.get_or_create(&event.session_id);
        let mut session = handle.state().await;
        let mut meaningful = false;

        // 1. Context refresh + channel auto-verification
        session.merge_event_context(&event);
        if session.try_channel_verify() {
            tracing::info!(session_id = %event.session_id, "session verified by channel context");
            meaningful = true;
        }

        // 2. Buffer append
        session.push_utterance(&event.speaker, &text);
        let window = session.transcript_window();

        // 3. Intent resolution
        let phone_candidates = extract_phone_candidates(&text);
        let classification = self
            .resolve_intent(&event.speaker, &text, &phone_candidates, &window)
            .await;

        // 4. Directory lookup on phone mention. Falls back to a
        // channel-supplied phone so a caller whose plan context is still
        // incomplete can be verified from the directory record.
        if session.customer.is_none() {
            let mut candidates = if !phone_candidates.is_empty() {
                phone_candidates.clone()
            } else {
                extract_phone_candidates(&classification.entities.phone)
            };
            if candidates.is_empty() {
                candidates = extract_phone_candidates(&session.phone);
            }
            if !candidates.is_empty() && self.verify_against_directory(&mut session, &candidates).await
            {
                meaningful = true;
            }
        }

        // 5. Question extraction
        if event.speaker == Speaker::Customer && looks_like_coverage_question(&text) {
            if self
                .queue_extracted_questions(&mut session, &window, &classification)
                .await
            {
                meaningful = true;
            }
        }

        // 6. Verification gating. The ask budget is spent here even if the
        // cycle is later suppressed; queued questions are unaffected.
        let needs_phone = !session.is_verified()
            && (classification.requires_verification || session.has_pending_questions());
        let ask_for_phone = needs_phone && session.verification_asks < self.max_verification_asks;
        if ask_for_phone {
            session.verification_asks += 1;
        }
        let verification = VerificationFlags {
            needs_phone,
            ask_for_phone,
        };

        // 7. Conditional answering
        let plan = session.plan_context();
        let mut new_answers: Vec<AnsweredQuestion> = Vec::new();
        if plan.is_complete() {
            for (key, question) in session.pending_batch(cycle::MAX_ANSWERS_PER_CYCLE) {
                if session.is_answered(&key) {
                    continue;
                }
                match self.answerer.answer(&question, &plan).await {
                    Ok(result) => {
                        session.resolve_question(&key, result.clone());
                        new_answers.push(AnsweredQuestion { question, result });
                        meaningful = true;
                    }
                    Err(error) => {
                        // Stays pending; the next event retries it
                        tracing::warn!(%error, question = %question, "answering failed");
                    }
                }
            }
        }

        // 8. Cooldown gate
        if !meaningful {
            if let Some(last) = session.last_suggested_at {
                if last.elapsed() < self.cooldown {
                    tracing::debug!(session_id = %event.session_id, "suppressed by cooldown");
                    return None;
                }
            }
        }

        // 9. Suggestion drafting
        let customer = session.customer_context();
        let snapshot = ToolResultSnapshot {
            mode: if session.is_verified() {
                SnapshotMode::Verified
            } else {
                SnapshotMode::Unverified
            },
            session_context: plan,
            pending_questions: session.pending_texts(),
            answered_count: session.answered_count(),
            new_answers,
            verification,
        };
        let evidence = if classification.evidence_quote.trim().is_empty() {
            truncate_evidence(&text)
        } else {
            truncate_evidence(&classification.evidence_quote)
        };
        let cards = self
            .draft_cards(&classification, &customer, &snapshot, &window, &evidence)
            .await;

        // 10. Final fingerprint dedup
        let fingerprint = emission_fingerprint(classification.intent, &customer, &cards);
        if !meaningful && session.last_emit_fingerprint.as_deref() == Some(fingerprint.as_str()) {
            tracing::debug!(session_id = %event.session_id, "suppressed by fingerprint");
            return None;
        }

        session.record_emission(fingerprint, classification.intent);
        tracing::info!(
            session_id = %event.session_id,
            intent = %classification.intent,
            cards = cards.len(),
            "suggestion emitted"
        );

        Some(SuggestionPayload {
            session_id: event.session_id,
            intent: classification.intent,
            confidence: classification.confidence,
            customer,
            cards,
            created_at: Utc::now().timestamp().to_string(),
        })
    }

    /// Fast path skips the classifier for phone-verification turns
    async fn resolve_intent(
        &self,
        speaker: &Speaker,
        text: &str,
        phone_candidates: &[String],
        window: &str,
    ) -> IntentClassification {
        if *speaker == Speaker::Csr && looks_like_verification_request(text) {
            return IntentClassification::verification_request(
                0.9,
                None,
                truncate_evidence(text),
            );
        }
        if !phone_candidates.is_empty() {
            return IntentClassification::verification_request(
                0.95,
                phone_candidates.first().cloned(),
                truncate_evidence(text),
            );
        }

        match self.classifier.classify(window).await {
            Ok(classification) => classification,
            Err(error) => {
                tracing::warn!(%error, "intent classification failed, using fallback");
                IntentClassification::fallback()
            }
        }
    }

    /// Directory lookup across candidate formats; a match verifies the
    /// session. Lookup failure is "no match", never fatal.
    async fn verify_against_directory(
        &self,
        session: &mut SessionState,
        candidates: &[String],
    ) -> bool {
        let capped = &candidates[..candidates.len().min(cycle::MAX_PHONE_CANDIDATES)];
        match self.directory.lookup_by_phone(capped).await {
            Ok(Some(record)) => {
                let matched = capped.first().cloned().unwrap_or_default();
                session.apply_directory_match(record, &matched);
                tracing::info!("customer verified via directory match");
                true
            }
            Ok(None) => false,
            Err(error) => {
                tracing::warn!(%error, "directory lookup failed");
                false
            }
        }
    }

    /// Run extraction and merge results into the pending queue; falls back
    /// to the classifier's question entity when extraction yields nothing
    async fn queue_extracted_questions(
        &self,
        session: &mut SessionState,
        window: &str,
        classification: &IntentClassification,
    ) -> bool {
        let mut questions = match self.extractor.extract(window).await {
            Ok(questions) => questions,
            Err(error) => {
                tracing::warn!(%error, "question extraction failed");
                Vec::new()
            }
        };
        if questions.is_empty() && !classification.entities.question.trim().is_empty() {
            questions.push(classification.entities.question.clone());
        }

        let mut queued = false;
        for question in questions {
            if session.queue_question(&question) {
                tracing::debug!(question = %question, "question queued");
                queued = true;
            }
        }
        queued
    }

    /// Draft cards, degrading to the generic fallback and back-filling
    /// missing evidence with the triggering quote
    async fn draft_cards(
        &self,
        classification: &IntentClassification,
        customer: &copilot_core::CustomerContext,
        snapshot: &ToolResultSnapshot,
        window: &str,
        evidence: &str,
    ) -> Vec<SuggestionCard> {
        let mut cards = match self
            .drafter
            .draft(classification.intent, customer, snapshot, window)
            .await
        {
            Ok(cards) if !cards.is_empty() => cards,
            Ok(_) => vec![SuggestionCard::fallback(evidence)],
            Err(error) => {
                tracing::warn!(%error, "suggestion drafting failed, using fallback");
                vec![SuggestionCard::fallback(evidence)]
            }
        };
        for card in &mut cards {
            if card.evidence.trim().is_empty() {
                card.evidence = evidence.to_string();
            }
        }
        cards
    }
}

/// Cap an evidence quote, respecting char boundaries
fn truncate_evidence(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= bounds::EVIDENCE_QUOTE_MAX_LEN {
        return trimmed.to_string();
    }
    trimmed.chars().take(bounds::EVIDENCE_QUOTE_MAX_LEN).collect()
}
