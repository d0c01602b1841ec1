//! Stack domain types.

pub mod outcome;
pub mod stack;

pub use outcome::{StackDescription, WorkerOutcome};
pub use stack::{resolve_capabilities, Capability, StackBlueprint, StackRequest, StackSummary};
