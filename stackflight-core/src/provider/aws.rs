//! CloudFormation-backed provider.

use crate::provider::{ProviderError, ProviderResult, StackProvider};
use crate::types::{StackDescription, StackRequest, StackSummary};
use async_trait::async_trait;
use aws_sdk_cloudformation::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_cloudformation::types::{Capability as SdkCapability, Parameter};
use aws_sdk_cloudformation::Client;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;

/// Poll cadence for the terminal-state waiters. Matches the service's own
/// waiter definitions (30s delay, 120 attempts, one hour total).
const WAIT_POLL_INTERVAL: Duration = Duration::from_secs(30);
const WAIT_MAX_ATTEMPTS: u32 = 120;

/// Which terminal state a waiter is polling for.
#[derive(Debug, Clone, Copy)]
enum WaitKind {
    Create,
    Update,
}

impl WaitKind {
    fn describe(&self) -> &'static str {
        match self {
            Self::Create => "create complete",
            Self::Update => "update complete",
        }
    }
}

/// One poll's verdict while waiting for a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WaitState {
    Done,
    Pending,
    Failed,
}

/// Assess a stack status against the waiter's target state.
fn assess(kind: WaitKind, status: &str) -> WaitState {
    match kind {
        WaitKind::Create => match status {
            "CREATE_COMPLETE" => WaitState::Done,
            "CREATE_IN_PROGRESS" | "ROLLBACK_IN_PROGRESS" => WaitState::Pending,
            _ => WaitState::Failed,
        },
        WaitKind::Update => match status {
            "UPDATE_COMPLETE" => WaitState::Done,
            "UPDATE_IN_PROGRESS"
            | "UPDATE_COMPLETE_CLEANUP_IN_PROGRESS"
            | "UPDATE_ROLLBACK_IN_PROGRESS"
            | "UPDATE_ROLLBACK_COMPLETE_CLEANUP_IN_PROGRESS" => WaitState::Pending,
            _ => WaitState::Failed,
        },
    }
}

/// CloudFormation provider.
///
/// Thin mapping from [`StackProvider`] onto the AWS SDK client; waiters are
/// describe-stacks poll loops.
#[derive(Debug, Clone)]
pub struct AwsProvider {
    client: Client,
}

impl AwsProvider {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn error<E>(err: SdkError<E>) -> ProviderError
    where
        E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    {
        let code = err.code().map(str::to_string);
        let message = err
            .message()
            .map(str::to_string)
            .unwrap_or_else(|| DisplayErrorContext(&err).to_string());
        ProviderError { code, message }
    }

    fn parameters(request: &StackRequest) -> Vec<Parameter> {
        request
            .parameters
            .iter()
            .map(|(key, value)| {
                Parameter::builder().parameter_key(key).parameter_value(value).build()
            })
            .collect()
    }

    fn capabilities(request: &StackRequest) -> Vec<SdkCapability> {
        request.capabilities.iter().map(|c| SdkCapability::from(c.token())).collect()
    }

    async fn wait_for(&self, name: &str, kind: WaitKind) -> ProviderResult<()> {
        for attempt in 1..=WAIT_MAX_ATTEMPTS {
            let description = self.describe_stack(name).await?;
            let status = description.status.as_deref().unwrap_or("");
            debug!(stack = %name, status, attempt, "waiter poll");

            match assess(kind, status) {
                WaitState::Done => return Ok(()),
                WaitState::Failed => {
                    return Err(ProviderError::new(format!(
                        "stack {name} entered {status} while waiting for {}",
                        kind.describe()
                    )));
                }
                WaitState::Pending => tokio::time::sleep(WAIT_POLL_INTERVAL).await,
            }
        }

        Err(ProviderError::new(format!(
            "timed out waiting for {} on stack {name}",
            kind.describe()
        )))
    }
}

#[async_trait]
impl StackProvider for AwsProvider {
    async fn create_stack(&self, request: &StackRequest) -> ProviderResult<()> {
        self.client
            .create_stack()
            .stack_name(&request.name)
            .template_body(&request.template_body)
            .set_parameters(Some(Self::parameters(request)))
            .set_capabilities(Some(Self::capabilities(request)))
            .send()
            .await
            .map_err(Self::error)?;
        Ok(())
    }

    async fn update_stack(&self, request: &StackRequest) -> ProviderResult<()> {
        self.client
            .update_stack()
            .stack_name(&request.name)
            .template_body(&request.template_body)
            .set_parameters(Some(Self::parameters(request)))
            .set_capabilities(Some(Self::capabilities(request)))
            .send()
            .await
            .map_err(Self::error)?;
        Ok(())
    }

    async fn delete_stack(&self, name: &str) -> ProviderResult<()> {
        self.client.delete_stack().stack_name(name).send().await.map_err(Self::error)?;
        Ok(())
    }

    async fn describe_stack(&self, name: &str) -> ProviderResult<StackDescription> {
        let output = self
            .client
            .describe_stacks()
            .stack_name(name)
            .send()
            .await
            .map_err(Self::error)?;

        let stack = output
            .stacks
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::new(format!("stack {name} not found")))?;

        let outputs: BTreeMap<String, String> = stack
            .outputs
            .unwrap_or_default()
            .into_iter()
            .filter_map(|o| Some((o.output_key?, o.output_value?)))
            .collect();

        Ok(StackDescription {
            stack_name: stack.stack_name.unwrap_or_else(|| name.to_string()),
            stack_id: stack.stack_id,
            status: stack.stack_status.map(|s| s.as_str().to_string()),
            status_reason: stack.stack_status_reason,
            creation_time: stack.creation_time.map(|t| t.to_string()),
            outputs,
        })
    }

    async fn list_stacks(&self) -> ProviderResult<Vec<StackSummary>> {
        let mut pages = self.client.list_stacks().into_paginator().send();
        let mut summaries = Vec::new();

        while let Some(page) = pages.next().await {
            let page = page.map_err(Self::error)?;
            for summary in page.stack_summaries.unwrap_or_default() {
                let Some(name) = summary.stack_name else { continue };
                let status =
                    summary.stack_status.map(|s| s.as_str().to_string()).unwrap_or_default();
                summaries.push(StackSummary { name, status });
            }
        }

        Ok(summaries)
    }

    async fn validate_template(&self, template_body: &str) -> ProviderResult<()> {
        self.client
            .validate_template()
            .template_body(template_body)
            .send()
            .await
            .map_err(Self::error)?;
        Ok(())
    }

    async fn wait_create_complete(&self, name: &str) -> ProviderResult<()> {
        self.wait_for(name, WaitKind::Create).await
    }

    async fn wait_update_complete(&self, name: &str) -> ProviderResult<()> {
        self.wait_for(name, WaitKind::Update).await
    }

    fn name(&self) -> &str {
        "cloudformation"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assess_create_states() {
        assert_eq!(assess(WaitKind::Create, "CREATE_COMPLETE"), WaitState::Done);
        assert_eq!(assess(WaitKind::Create, "CREATE_IN_PROGRESS"), WaitState::Pending);
        assert_eq!(assess(WaitKind::Create, "ROLLBACK_IN_PROGRESS"), WaitState::Pending);
        assert_eq!(assess(WaitKind::Create, "CREATE_FAILED"), WaitState::Failed);
        assert_eq!(assess(WaitKind::Create, "ROLLBACK_COMPLETE"), WaitState::Failed);
        assert_eq!(assess(WaitKind::Create, "DELETE_COMPLETE"), WaitState::Failed);
    }

    #[test]
    fn test_assess_update_states() {
        assert_eq!(assess(WaitKind::Update, "UPDATE_COMPLETE"), WaitState::Done);
        assert_eq!(assess(WaitKind::Update, "UPDATE_IN_PROGRESS"), WaitState::Pending);
        assert_eq!(
            assess(WaitKind::Update, "UPDATE_COMPLETE_CLEANUP_IN_PROGRESS"),
            WaitState::Pending
        );
        assert_eq!(assess(WaitKind::Update, "UPDATE_ROLLBACK_COMPLETE"), WaitState::Failed);
        assert_eq!(assess(WaitKind::Update, "UPDATE_ROLLBACK_FAILED"), WaitState::Failed);
    }
}
