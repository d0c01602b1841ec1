//! Stack request types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Capability acknowledgment token required by the provider before it will
/// create resources with elevated permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Capability {
    /// Acknowledge creation of IAM resources
    Iam,

    /// Acknowledge creation of IAM resources with custom names
    NamedIam,

    /// Acknowledge macro/transform expansion
    AutoExpand,
}

impl Capability {
    /// Provider-native token string for this capability.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Iam => "CAPABILITY_IAM",
            Self::NamedIam => "CAPABILITY_NAMED_IAM",
            Self::AutoExpand => "CAPABILITY_AUTO_EXPAND",
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// Map the three capability flags to their tokens.
///
/// Deterministic and total; emission order is IAM, NAMED_IAM, AUTO_EXPAND.
/// The same set applies to every stack in a batch.
pub fn resolve_capabilities(iam: bool, named_iam: bool, auto_expand: bool) -> Vec<Capability> {
    let mut capabilities = Vec::new();
    if iam {
        capabilities.push(Capability::Iam);
    }
    if named_iam {
        capabilities.push(Capability::NamedIam);
    }
    if auto_expand {
        capabilities.push(Capability::AutoExpand);
    }
    capabilities
}

/// Shared template/parameter/capability set for one run.
///
/// Every worker in the batch launches from the same blueprint; only the stack
/// name differs per worker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackBlueprint {
    /// Template body, pre-validated against the provider
    pub template_body: String,

    /// Template parameters (key -> value)
    pub parameters: BTreeMap<String, String>,

    /// Capability tokens to declare on create/update
    pub capabilities: Vec<Capability>,
}

impl StackBlueprint {
    /// Build the API request for one named stack.
    pub fn request_for(&self, name: &str) -> StackRequest {
        StackRequest {
            name: name.to_string(),
            template_body: self.template_body.clone(),
            parameters: self.parameters.clone(),
            capabilities: self.capabilities.clone(),
        }
    }
}

/// Everything the provider needs to create or update one stack.
///
/// Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackRequest {
    /// Stack name, unique within the run
    pub name: String,

    /// Template body
    pub template_body: String,

    /// Template parameters (key -> value)
    pub parameters: BTreeMap<String, String>,

    /// Capability tokens
    pub capabilities: Vec<Capability>,
}

/// One entry from the provider's stack listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackSummary {
    /// Stack name
    pub name: String,

    /// Provider-native status string (e.g. `CREATE_COMPLETE`)
    pub status: String,
}

impl StackSummary {
    /// Whether this stack has reached the terminal deleted state.
    ///
    /// Deleted stacks linger in listings for a while; they do not count as
    /// existing for the create-or-update decision.
    pub fn is_delete_complete(&self) -> bool {
        self.status == "DELETE_COMPLETE"
    }
}
