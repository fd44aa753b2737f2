//! Centralized constants for the copilot
//!
//! Single source of truth for the session-engine bounds and emission policy.
//! These are deliberately constants rather than settings: they encode the
//! engine's latency/spam contract, not deployment-specific tuning.

/// Emission policy
pub mod emission {
    /// Minimum seconds between suggestion emissions without a meaningful change
    pub const COOLDOWN_SECONDS: u64 = 1;

    /// Fingerprint length in hex characters
    pub const FINGERPRINT_HEX_LEN: usize = 16;
}

/// Session state bounds
pub mod session {
    /// Transcript buffer capacity (FIFO eviction beyond this)
    pub const TRANSCRIPT_BUFFER_CAPACITY: usize = 30;

    /// Utterances rendered into the transcript window sent to collaborators
    pub const TRANSCRIPT_WINDOW: usize = 20;

    /// Pending-question queue capacity (oldest evicted first)
    pub const PENDING_QUESTION_CAPACITY: usize = 12;

    /// Default verification-ask budget per session
    pub const DEFAULT_MAX_VERIFICATION_ASKS: u32 = 2;

    /// Evidence quotes are truncated to this many bytes (char-boundary safe)
    pub const EVIDENCE_QUOTE_MAX_LEN: usize = 200;
}

/// Per-cycle work bounds
pub mod cycle {
    /// Questions answered per cycle, bounding per-event latency
    pub const MAX_ANSWERS_PER_CYCLE: usize = 2;

    /// Questions accepted from a single extraction
    pub const MAX_EXTRACTED_QUESTIONS: usize = 3;

    /// Phone candidates considered per event, bounding lookup cost
    pub const MAX_PHONE_CANDIDATES: usize = 4;
}

/// Retrieval defaults
pub mod retrieval {
    /// Policy chunks fetched per question
    pub const DEFAULT_TOP_K: usize = 6;

    /// Cited chunks retained from the simple RAG answerer
    pub const MAX_CITED_CHUNKS: usize = 2;

    /// Cited chunks retained from the remote agent answerer
    pub const MAX_AGENT_CITED_CHUNKS: usize = 3;
}

/// Default endpoints
pub mod endpoints {
    pub const OPENAI_DEFAULT: &str = "https://api.openai.com/v1";
    pub const QDRANT_DEFAULT: &str = "http://localhost:6334";
    pub const SCYLLA_DEFAULT: &str = "127.0.0.1:9042";
}
