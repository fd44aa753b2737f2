//! Prompt templates for the copilot's LLM calls

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One chat message
#[derive(Debug, Clone)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Intent classification prompt over the recent transcript
pub fn intent_prompt(transcript: &str) -> String {
    format!(
        r#"You are an intent classifier for a live insurance customer support call.
Return ONLY valid JSON in exactly this schema:
{{
  "intent": "CUSTOMER_IDENTIFICATION|INQUIRY|PROBLEM|CLAIM_STATUS|COMPLAINT|SMALL_TALK|OTHER",
  "confidence": 0.0,
  "entities": {{
    "phone": "string_or_empty",
    "appliance": "string_or_empty",
    "symptom": "string_or_empty",
    "money_amount": "string_or_empty",
    "timeline": "string_or_empty",
    "claimId": "string_or_empty",
    "question": "string_or_empty"
  }},
  "requiresVerification": true,
  "evidenceQuote": "verbatim quote from the customer"
}}

Rules:
- If you see a phone number, intent MUST be CUSTOMER_IDENTIFICATION with confidence >= 0.9 and entities.phone filled.
- CLAIM_STATUS means the customer asks about an existing claim status/ETA/scheduling.
- COMPLAINT means frustration, threats to cancel, anger, escalation requests.
- INQUIRY means coverage/plan/policy/terms questions.
- PROBLEM means a malfunction/issue report ("not working", "leaking", etc.).
- SMALL_TALK greetings/thanks/off-topic.
- requiresVerification should be true for CLAIM_STATUS and for plan-specific coverage confirmation.

Recent transcript (most recent last):
{transcript}
"#
    )
}

/// Question extraction prompt over the recent transcript
pub fn question_extraction_prompt(transcript: &str) -> String {
    format!(
        r#"You extract customer-intent questions from a live insurance support call.

Return ONLY valid JSON:
{{"questions":["q1","q2"]}}

Rules:
- Extract ONLY customer-intent questions (coverage, limits, exclusions, service steps/timeline/costs).
- If the customer described a problem but did not ask explicitly, infer a likely question.
- Each question must be specific (include appliance/system + issue) unless it's a general policy/process question.
- Max 3 questions.

Transcript (most recent last):
{transcript}
"#
    )
}

/// Suggestion drafting prompt
///
/// `customer_context` and `tool_result` are pre-serialized JSON.
pub fn suggestion_prompt(
    intent: &str,
    customer_context: &str,
    tool_result: &str,
    transcript: &str,
) -> String {
    format!(
        r#"You are a real-time copilot helping a CSR (Customer Service Representative) during a live home warranty insurance call.

Your role is to generate PROFESSIONAL, CALM, and CONCISE suggestions that the CSR can say directly to the customer.

OPERATING RULES:
- Use conversation context below (do not ignore earlier customer questions).
- Use tool_result + customer_context as your ground truth; do NOT invent coverage details.
- If plan context (contractType/plan/state) is missing, suggest asking CSR to confirm it before making commitments.
- If customer_context shows "verified": true, DO NOT ask for phone verification - the user is already verified!
- When user is verified, focus on answering their questions using newAnswers from tool_result.
- Do NOT re-answer questions already addressed; reference prior answer and suggest next step.
- Generate 1-3 suggestion cards focused on the customer's actual questions/issues.

CSR SCRIPT TONE REQUIREMENTS:
- Be CALM and reassuring - avoid alarming language
- Be CONCISE - 1-2 sentences maximum
- Be PROFESSIONAL - use polite, helpful language
- Be DIRECT about coverage decisions (Yes, covered / No, not covered / Partially covered)
- Include specific details when available (limits, fees, next steps)

Return ONLY valid JSON:
{{
  "cards": [
    {{
      "title": "Coverage Confirmation",
      "csrScript": "The calm, professional sentence CSR says to customer",
      "evidence": "Verbatim customer quote that triggered this",
      "priority": "high|medium|low"
    }}
  ]
}}

intent: {intent}
customer_context: {customer_context}
tool_result: {tool_result}

Conversation context (most recent last):
{transcript}
"#
    )
}

/// RAG summarization prompt constraining the answer to retrieved chunks
pub fn rag_answer_prompt(question: &str, chunks: &str) -> String {
    format!(
        r#"You are assisting a customer care executive.
Use ONLY the provided policy chunks to answer. If insufficient, say what is missing.
Be concise and professional.
Question:
{question}
Policy chunks:
{chunks}
Return ONLY JSON:
{{"answer":"...","citedChunks":["..."]}}
"#
    )
}
