//! Flight orchestration: fan out create workers, barrier, fan out delete
//! workers, barrier, drain outcomes.
//!
//! Workers share no mutable state; each reports exactly one [`WorkerOutcome`]
//! over the phase's channel. The two phases are strictly sequential: no
//! delete worker starts until every create worker has finished.

pub mod worker;

use crate::error::{FlightError, Result};
use crate::naming;
use crate::provider::StackProvider;
use crate::types::{StackBlueprint, WorkerOutcome};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Upper bound on stacks per run.
pub const MAX_STACK_COUNT: usize = 10;

/// Per-run orchestration settings.
#[derive(Debug, Clone)]
pub struct FlightConfig {
    /// Prefix for generated stack names
    pub name_prefix: String,

    /// Number of stacks to launch (1..=MAX_STACK_COUNT)
    pub stack_count: usize,

    /// Delay between worker spawns, to avoid a thundering-herd burst against
    /// the provider API
    pub stagger: Duration,
}

impl FlightConfig {
    pub fn new(name_prefix: impl Into<String>, stack_count: usize) -> Self {
        Self { name_prefix: name_prefix.into(), stack_count, stagger: Duration::from_secs(1) }
    }

    /// Override the spawn stagger delay.
    pub fn with_stagger(mut self, stagger: Duration) -> Self {
        self.stagger = stagger;
        self
    }

    /// Reject out-of-range stack counts before any worker is spawned.
    pub fn validate(&self) -> Result<()> {
        if self.stack_count < 1 || self.stack_count > MAX_STACK_COUNT {
            return Err(FlightError::StackCountOutOfRange {
                count: self.stack_count,
                max: MAX_STACK_COUNT,
            });
        }
        Ok(())
    }
}

/// Aggregated outcomes of one run, one collection per phase.
#[derive(Debug)]
pub struct FlightReport {
    /// Create-phase outcomes, in completion order
    pub create_results: Vec<WorkerOutcome>,

    /// Delete-phase outcomes, in completion order
    pub delete_results: Vec<WorkerOutcome>,
}

impl FlightReport {
    /// Number of failed outcomes across both phases.
    pub fn failure_count(&self) -> usize {
        self.create_results
            .iter()
            .chain(self.delete_results.iter())
            .filter(|o| o.is_failed())
            .count()
    }
}

/// Stack flight orchestrator.
///
/// Owns the provider handle and the run configuration; each `run` launches
/// `stack_count` fresh stacks and tears them all down.
pub struct FlightOrchestrator {
    provider: Arc<dyn StackProvider>,
    config: FlightConfig,
}

impl FlightOrchestrator {
    pub fn new(provider: Arc<dyn StackProvider>, config: FlightConfig) -> Self {
        Self { provider, config }
    }

    /// Run one full flight: create all stacks, wait for each to be ready,
    /// then delete all of them.
    pub async fn run(&self, blueprint: &StackBlueprint) -> Result<FlightReport> {
        self.config.validate()?;

        let names: Vec<String> = (0..self.config.stack_count)
            .map(|_| naming::stack_name(&self.config.name_prefix))
            .collect();

        info!(
            count = names.len(),
            provider = self.provider.name(),
            prefix = %self.config.name_prefix,
            "launching create wave"
        );

        let (tx, rx) = mpsc::unbounded_channel();
        let mut workers = JoinSet::new();
        for name in &names {
            let request = blueprint.request_for(name);
            let provider = Arc::clone(&self.provider);
            let tx = tx.clone();
            workers.spawn(async move {
                let outcome = worker::run_create(provider.as_ref(), &request).await;
                let _ = tx.send(outcome);
            });
            tokio::time::sleep(self.config.stagger).await;
        }
        drop(tx);
        Self::join_all(workers).await;
        let create_results = Self::drain(rx);

        info!("all stacks created, now let's delete");

        let (tx, rx) = mpsc::unbounded_channel();
        let mut workers = JoinSet::new();
        for name in &names {
            let name = name.clone();
            let provider = Arc::clone(&self.provider);
            let tx = tx.clone();
            workers.spawn(async move {
                let outcome = worker::run_delete(provider.as_ref(), &name).await;
                let _ = tx.send(outcome);
            });
            tokio::time::sleep(self.config.stagger).await;
        }
        drop(tx);
        Self::join_all(workers).await;
        let delete_results = Self::drain(rx);

        Ok(FlightReport { create_results, delete_results })
    }

    /// Phase barrier: wait for every spawned worker to terminate.
    async fn join_all(mut workers: JoinSet<()>) {
        while let Some(joined) = workers.join_next().await {
            if let Err(err) = joined {
                // A panicked worker forfeits its outcome; siblings and the
                // barrier are unaffected
                warn!(error = %err, "worker task did not run to completion");
            }
        }
    }

    /// Drain a phase's outcome channel after its barrier.
    fn drain(mut rx: mpsc::UnboundedReceiver<WorkerOutcome>) -> Vec<WorkerOutcome> {
        let mut results = Vec::new();
        while let Ok(outcome) = rx.try_recv() {
            results.push(outcome);
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validate_bounds() {
        assert!(FlightConfig::new("t", 1).validate().is_ok());
        assert!(FlightConfig::new("t", 10).validate().is_ok());
        assert!(matches!(
            FlightConfig::new("t", 0).validate(),
            Err(FlightError::StackCountOutOfRange { count: 0, max: 10 })
        ));
        assert!(matches!(
            FlightConfig::new("t", 11).validate(),
            Err(FlightError::StackCountOutOfRange { count: 11, max: 10 })
        ));
    }

    #[test]
    fn test_report_failure_count() {
        let report = FlightReport {
            create_results: vec![
                WorkerOutcome::NoChange { stack_name: "a".to_string() },
                WorkerOutcome::Failed { stack_name: "b".to_string(), message: "boom".to_string() },
            ],
            delete_results: vec![WorkerOutcome::Deleted { stack_name: "a".to_string() }],
        };
        assert_eq!(report.failure_count(), 1);
    }
}
