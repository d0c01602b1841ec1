//! Worker outcome types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Snapshot of a described stack, as reported by the provider once the stack
/// is ready.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StackDescription {
    /// Stack name
    pub stack_name: String,

    /// Provider-assigned stack identifier
    pub stack_id: Option<String>,

    /// Current status (e.g. `CREATE_COMPLETE`)
    pub status: Option<String>,

    /// Reason attached to the current status, if any
    pub status_reason: Option<String>,

    /// Creation timestamp (RFC 3339)
    pub creation_time: Option<String>,

    /// Template outputs (key -> value)
    pub outputs: BTreeMap<String, String>,
}

/// Terminal result of one worker.
///
/// Exactly one outcome is produced per worker per phase; outcomes are the
/// only communication from worker back to orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum WorkerOutcome {
    /// Stack was created or updated and reached its ready state.
    Created { stack_name: String, description: StackDescription },

    /// Update was attempted but the provider had nothing to do. Not an error.
    NoChange { stack_name: String },

    /// Delete was issued for the stack.
    Deleted { stack_name: String },

    /// The provider reported an unrecoverable error for this stack.
    Failed { stack_name: String, message: String },
}

impl WorkerOutcome {
    /// Name of the stack this outcome belongs to.
    pub fn stack_name(&self) -> &str {
        match self {
            Self::Created { stack_name, .. }
            | Self::NoChange { stack_name }
            | Self::Deleted { stack_name }
            | Self::Failed { stack_name, .. } => stack_name,
        }
    }

    /// Short label for tables and log lines.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Created { .. } => "created",
            Self::NoChange { .. } => "no change",
            Self::Deleted { .. } => "deleted",
            Self::Failed { .. } => "failed",
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}
