//! Core types and collaborator traits for the live call copilot
//!
//! This crate provides foundational types used across all other crates:
//! - Inbound transcript event and speaker types
//! - Intent taxonomy for live support calls
//! - Customer context and plan context types
//! - Outbound suggestion payload types
//! - Collaborator traits for pluggable backends (classifier, extractor,
//!   answerer, drafter, directory)
//! - Error types

pub mod customer;
pub mod error;
pub mod event;
pub mod intent;
pub mod snapshot;
pub mod suggestion;
pub mod traits;

pub use customer::{CustomerContext, CustomerRecord, PlanContext};
pub use error::{Error, Result};
pub use event::{Speaker, TranscriptEvent};
pub use intent::{CallIntent, IntentClassification, IntentEntities};
pub use snapshot::{
    AnsweredQuestion, QuestionAnswer, SnapshotMode, ToolResultSnapshot, VerificationFlags,
};
pub use suggestion::{CardPriority, SuggestionCard, SuggestionPayload};

pub use traits::{
    CustomerDirectory, IntentClassifier, KnowledgeAnswerer, QuestionExtractor, SuggestionDrafter,
};
