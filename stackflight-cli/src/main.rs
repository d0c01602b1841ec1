use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "stackflight")]
#[command(about = "Launch and tear down CloudFormation stacks in parallel for load testing", long_about = None)]
struct Cli {
    /// Verbose logging
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch multiple stacks in parallel, wait for readiness, then delete them all
    Launch {
        /// Number of stacks to launch (1-10)
        #[arg(short = 'c', long, default_value_t = 1)]
        stack_count: usize,

        /// Prefix used for stack names; a unique suffix is appended
        #[arg(short = 'n', long, default_value = "stack-flight")]
        stack_name_prefix: String,

        /// Path to the stack template file
        #[arg(short = 't', long, default_value = "./tests/fixtures/test.cfn.yaml")]
        stack_file: PathBuf,

        /// Path to the stack parameters file (JSON)
        #[arg(short = 'p', long, default_value = "./tests/fixtures/params.test.json")]
        stack_params_file: PathBuf,

        /// Declare CAPABILITY_IAM on create/update
        #[arg(long)]
        capability_iam: bool,

        /// Declare CAPABILITY_NAMED_IAM on create/update
        #[arg(long)]
        capability_named_iam: bool,

        /// Declare CAPABILITY_AUTO_EXPAND on create/update
        #[arg(long)]
        capability_auto_expand: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Commands::Launch {
            stack_count,
            stack_name_prefix,
            stack_file,
            stack_params_file,
            capability_iam,
            capability_named_iam,
            capability_auto_expand,
        } => {
            commands::launch::run(commands::launch::LaunchArgs {
                stack_count,
                stack_name_prefix,
                stack_file,
                stack_params_file,
                capability_iam,
                capability_named_iam,
                capability_auto_expand,
            })
            .await
        }
    }
}
