//! Per-stack lifecycle workers.
//!
//! One create worker and one delete worker run per stack. Failures stay
//! local to the stack that hit them and surface as `Failed` outcomes.

use crate::provider::{classify, ErrorClass, ProviderError, StackProvider};
use crate::types::{StackDescription, StackRequest, WorkerOutcome};
use tracing::{info, warn};

/// Drive one stack through create-or-update, then block until it is ready.
pub async fn run_create(
    provider: &dyn StackProvider,
    request: &StackRequest,
) -> WorkerOutcome {
    match create_or_update(provider, request).await {
        Ok(Some(description)) => {
            info!(stack = %request.name, "stack ready");
            WorkerOutcome::Created { stack_name: request.name.clone(), description }
        }
        Ok(None) => {
            info!(stack = %request.name, "no changes");
            WorkerOutcome::NoChange { stack_name: request.name.clone() }
        }
        Err(err) => {
            warn!(stack = %request.name, error = %err, "create worker failed");
            WorkerOutcome::Failed { stack_name: request.name.clone(), message: err.message }
        }
    }
}

/// Create-or-update one stack. `None` means the provider reported a benign
/// no-op update; no description is fetched in that case.
async fn create_or_update(
    provider: &dyn StackProvider,
    request: &StackRequest,
) -> Result<Option<StackDescription>, ProviderError> {
    let waited = if stack_exists(provider, &request.name).await? {
        info!(stack = %request.name, "updating stack");
        match provider.update_stack(request).await {
            Ok(()) => {
                info!(stack = %request.name, "waiting for stack to be ready");
                provider.wait_update_complete(&request.name).await
            }
            Err(err) => Err(err),
        }
    } else {
        info!(stack = %request.name, "creating stack");
        match provider.create_stack(request).await {
            Ok(()) => {
                info!(stack = %request.name, "waiting for stack to be ready");
                provider.wait_create_complete(&request.name).await
            }
            Err(err) => Err(err),
        }
    };

    if let Err(err) = waited {
        return match classify(&err) {
            ErrorClass::BenignNoOp => Ok(None),
            ErrorClass::Fatal => Err(err),
        };
    }

    let description = provider.describe_stack(&request.name).await?;
    Ok(Some(description))
}

/// A stack exists if it is listed under this exact name in any status other
/// than delete-complete.
async fn stack_exists(provider: &dyn StackProvider, name: &str) -> Result<bool, ProviderError> {
    let stacks = provider.list_stacks().await?;
    Ok(stacks.iter().any(|s| !s.is_delete_complete() && s.name == name))
}

/// Issue deletion for one stack. Fire-and-forget: the delete phase only
/// waits for issuance, not for the stack to finish deleting.
pub async fn run_delete(provider: &dyn StackProvider, name: &str) -> WorkerOutcome {
    info!(stack = %name, "deleting stack");
    match provider.delete_stack(name).await {
        Ok(()) => WorkerOutcome::Deleted { stack_name: name.to_string() },
        Err(err) => {
            warn!(stack = %name, error = %err, "delete worker failed");
            WorkerOutcome::Failed { stack_name: name.to_string(), message: err.message }
        }
    }
}
