//! Stack provider abstraction.
//!
//! The orchestrator talks to CloudFormation (or a test double) through the
//! `StackProvider` trait; a concrete client is constructed once and injected
//! into each run.

use crate::types::{StackDescription, StackRequest, StackSummary};
use async_trait::async_trait;
use thiserror::Error;

pub mod aws;

pub use aws::AwsProvider;

/// Result type alias for provider operations.
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// Error surfaced by a provider operation.
///
/// Carries the provider's error code when one is available and always a
/// human-readable message.
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct ProviderError {
    /// Provider error code (e.g. `ValidationError`), if reported
    pub code: Option<String>,

    /// Human-readable message
    pub message: String,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { code: None, message: message.into() }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self { code: Some(code.into()), message: message.into() }
    }
}

/// Message CloudFormation returns when an update computes an empty change set.
const NO_UPDATES_MESSAGE: &str = "No updates are to be performed.";

/// Classification of a provider error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Update was a no-op; the stack is already in the requested state.
    BenignNoOp,

    /// Real failure.
    Fatal,
}

/// Classify a provider error as benign or fatal.
///
/// The no-op update is only identifiable by its message text; this is the
/// single place that string match happens.
pub fn classify(err: &ProviderError) -> ErrorClass {
    if err.message == NO_UPDATES_MESSAGE {
        ErrorClass::BenignNoOp
    } else {
        ErrorClass::Fatal
    }
}

/// Stack provider trait.
///
/// All stack backends (the real CloudFormation client, test doubles) must
/// implement this trait. Waiters are long-running blocking calls and must not
/// serialize callers against each other.
#[async_trait]
pub trait StackProvider: Send + Sync {
    /// Create a new stack from the request.
    async fn create_stack(&self, request: &StackRequest) -> ProviderResult<()>;

    /// Update an existing stack in place from the request.
    ///
    /// A no-op update surfaces as an error; callers classify it via
    /// [`classify`].
    async fn update_stack(&self, request: &StackRequest) -> ProviderResult<()>;

    /// Issue deletion of a stack. Does not wait for the terminal state.
    async fn delete_stack(&self, name: &str) -> ProviderResult<()>;

    /// Fetch the current description of a named stack.
    async fn describe_stack(&self, name: &str) -> ProviderResult<StackDescription>;

    /// List all known stacks, including recently deleted ones.
    async fn list_stacks(&self) -> ProviderResult<Vec<StackSummary>>;

    /// Validate a template body without creating anything.
    async fn validate_template(&self, template_body: &str) -> ProviderResult<()>;

    /// Block until the named stack finishes creating.
    async fn wait_create_complete(&self, name: &str) -> ProviderResult<()>;

    /// Block until the named stack finishes updating.
    async fn wait_update_complete(&self, name: &str) -> ProviderResult<()>;

    /// Provider name (for logging).
    fn name(&self) -> &str;
}
