//! StackFlight core library.
//!
//! Concurrent stack-lifecycle orchestration: fan out one worker per stack to
//! create-or-update and wait for readiness, barrier, then fan out one worker
//! per stack to tear everything down, collecting per-stack outcomes.

pub mod error;
pub mod loader;
pub mod naming;
pub mod orchestrator;
pub mod provider;
pub mod types;

// Re-export commonly used items
pub use error::{FlightError, Result};
pub use orchestrator::{FlightConfig, FlightOrchestrator, FlightReport, MAX_STACK_COUNT};
pub use provider::{classify, AwsProvider, ErrorClass, ProviderError, ProviderResult, StackProvider};
pub use types::{
    resolve_capabilities, Capability, StackBlueprint, StackDescription, StackRequest,
    StackSummary, WorkerOutcome,
};
