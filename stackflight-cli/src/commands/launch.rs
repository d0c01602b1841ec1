//! Launch command: the full create-wait-delete flight.

use anyhow::{Context, Result};
use colored::Colorize;
use stackflight_core::{
    loader, resolve_capabilities, AwsProvider, FlightConfig, FlightOrchestrator, FlightReport,
    StackBlueprint, StackProvider, WorkerOutcome,
};
use std::path::PathBuf;
use std::sync::Arc;
use tabled::{settings::Style, Table, Tabled};

pub struct LaunchArgs {
    pub stack_count: usize,
    pub stack_name_prefix: String,
    pub stack_file: PathBuf,
    pub stack_params_file: PathBuf,
    pub capability_iam: bool,
    pub capability_named_iam: bool,
    pub capability_auto_expand: bool,
}

pub async fn run(args: LaunchArgs) -> Result<()> {
    let config = FlightConfig::new(&args.stack_name_prefix, args.stack_count);
    config.validate()?;

    let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let provider: Arc<dyn StackProvider> =
        Arc::new(AwsProvider::new(aws_sdk_cloudformation::Client::new(&sdk_config)));

    let template_body = loader::load_template(provider.as_ref(), &args.stack_file)
        .await
        .context("Failed to load stack template")?;
    let parameters = loader::load_parameters(&args.stack_params_file)
        .context("Failed to load stack parameters")?;
    let capabilities = resolve_capabilities(
        args.capability_iam,
        args.capability_named_iam,
        args.capability_auto_expand,
    );

    println!(
        "{} Launching {} stack(s) with prefix {}",
        "→".cyan().bold(),
        args.stack_count,
        args.stack_name_prefix.bold()
    );

    let blueprint = StackBlueprint { template_body, parameters, capabilities };
    let orchestrator = FlightOrchestrator::new(provider, config);
    let report = orchestrator.run(&blueprint).await?;

    print_report(&report)?;

    if report.failure_count() > 0 {
        anyhow::bail!("{} stack(s) failed", report.failure_count());
    }

    println!("{} Flight complete", "✓".green().bold());
    Ok(())
}

/// Dump every queued create outcome, then every delete outcome, followed by
/// a summary table.
fn print_report(report: &FlightReport) -> Result<()> {
    for outcome in report.create_results.iter().chain(report.delete_results.iter()) {
        println!(
            "{}",
            serde_json::to_string_pretty(outcome).context("Failed to serialize outcome")?
        );
    }

    let rows: Vec<OutcomeRow> = report
        .create_results
        .iter()
        .map(|o| OutcomeRow::new("create", o))
        .chain(report.delete_results.iter().map(|o| OutcomeRow::new("delete", o)))
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
    Ok(())
}

#[derive(Tabled)]
struct OutcomeRow {
    #[tabled(rename = "STACK")]
    stack: String,
    #[tabled(rename = "PHASE")]
    phase: String,
    #[tabled(rename = "OUTCOME")]
    outcome: String,
}

impl OutcomeRow {
    fn new(phase: &str, outcome: &WorkerOutcome) -> Self {
        Self {
            stack: outcome.stack_name().to_string(),
            phase: phase.to_string(),
            outcome: colorize_outcome(outcome),
        }
    }
}

/// Colorize an outcome label based on its variant
fn colorize_outcome(outcome: &WorkerOutcome) -> String {
    match outcome {
        WorkerOutcome::Created { .. } | WorkerOutcome::Deleted { .. } => {
            outcome.label().green().to_string()
        }
        WorkerOutcome::NoChange { .. } => outcome.label().yellow().to_string(),
        WorkerOutcome::Failed { .. } => outcome.label().red().bold().to_string(),
    }
}
