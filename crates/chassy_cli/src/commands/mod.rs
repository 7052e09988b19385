//! CLI command definitions.

use clap::{Parser, Subcommand};

pub mod run;

/// Chassy workflow CLI - trigger a workflow and wait for it to finish
#[derive(Parser)]
#[command(name = "chassy")]
#[command(version, about = "Trigger a Chassy workflow and wait for it to finish")]
#[command(long_about = r#"
Triggers one execution of a previously defined Chassy workflow and, unless
--sync false is passed, polls its status until the execution and all of the
packages, releases and deployments it produced are resolved.

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Workflow execution failure
  4 - Polling timed out
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Trigger a workflow execution
    Run(run::RunArgs),
}
