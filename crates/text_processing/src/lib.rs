//! Text utilities for the live call copilot
//!
//! Pure, synchronous helpers shared by the orchestrator:
//! - Phone-number candidate extraction (US formats)
//! - Normalization keys for question deduplication
//! - Heuristic cues for verification requests and coverage questions

pub mod cues;
pub mod normalize;
pub mod phone;

pub use cues::{looks_like_coverage_question, looks_like_verification_request};
pub use normalize::normalize_key;
pub use phone::extract_phone_candidates;
