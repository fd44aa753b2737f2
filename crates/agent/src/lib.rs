//! Session orchestration for the live call copilot
//!
//! The core of the system: per-call session state, the processing cycle run
//! for every finalized transcript event, and the emission policy (cooldown,
//! meaningful-change bypass, fingerprint dedup) deciding when the CSR sees a
//! new suggestion.

pub mod fingerprint;
pub mod orchestrator;
pub mod runtime;
pub mod session;
pub mod store;

pub use fingerprint::emission_fingerprint;
pub use orchestrator::CopilotOrchestrator;
pub use runtime::build_orchestrator;
pub use session::SessionState;
pub use store::{SessionHandle, SessionStore};
