//! Run command - trigger a workflow execution and wait for it.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Args};
use tracing::{debug, info};

use chassy_api::{ChassyClient, Environment, GithubData, RunRequest};
use chassy_core::{
    CancellationToken, ExecutionHandle, ExecutionPoller, HttpFetcher, PollerConfig,
};

use crate::github;
use crate::output;

#[derive(Args)]
pub struct RunArgs {
    /// Workflow to trigger
    #[arg(long, env = "CHASSY_WORKFLOW_ID")]
    pub workflow_id: String,

    /// Refresh token used to authenticate against the Chassy API
    #[arg(long, env = "CHASSY_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Extra workflow parameters as a JSON object
    #[arg(long, env = "CHASSY_PARAMETERS")]
    pub parameters: Option<String>,

    /// Target backend environment (PROD, STAGE or DEV)
    #[arg(long, env = "CHASSY_ENV", default_value = "PROD")]
    pub env: String,

    /// Wait for the execution and all of its sub-resources to finish
    #[arg(long, env = "CHASSY_SYNC", action = ArgAction::Set, default_value_t = true)]
    pub sync: bool,

    /// Give up polling after this many seconds
    #[arg(long, env = "CHASSY_TIMEOUT_SECONDS")]
    pub timeout_seconds: Option<u64>,
}

pub async fn execute(args: RunArgs) -> Result<()> {
    let env: Environment = args
        .env
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))
        .context("invalid environment")?;
    let parameters = parse_parameters(args.parameters.as_deref())?;

    let client = ChassyClient::new(env);
    let tokens = client
        .exchange_token(&args.token)
        .await
        .context("token exchange failed")?;

    let request = RunRequest {
        github_data: GithubData {
            env_context: env.to_string(),
            github_context: github::context_from_env(),
            parameters,
        },
    };

    info!("Triggering workflow {} on {}", args.workflow_id, env);
    let submitted = client
        .submit_run(&tokens.access_token, &args.workflow_id, &request)
        .await
        .context("workflow submission failed")?;
    debug!(
        "Execution graph has {} steps",
        submitted.graph.steps.len()
    );

    println!(
        "🚀 Triggered workflow {} (execution {})",
        args.workflow_id, submitted.id
    );
    println!(
        "   {}",
        env.execution_url(&args.workflow_id, &submitted.id)
    );
    output::set_output("executionId", &submitted.id)?;

    if !args.sync {
        info!("Sync disabled, not waiting for the execution to finish");
        return Ok(());
    }

    let handle = ExecutionHandle {
        access_token: tokens.access_token.clone(),
        execution_id: submitted.id.clone(),
        poll_url: client.workflow_run_url(&args.workflow_id),
    };
    let config = PollerConfig {
        timeout: args.timeout_seconds.map(Duration::from_secs),
        ..PollerConfig::default()
    };
    let poller = ExecutionPoller::with_config(HttpFetcher::new(client, handle), config);

    let cancel = CancellationToken::new();
    let tripper = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tripper.cancel();
        }
    });

    let execution = poller.wait_until_executed(&cancel).await?;

    println!("✅ Workflow execution {} completed", submitted.id);
    output::set_output(
        "workflowExecution",
        &serde_json::to_string(&execution).context("failed to serialize execution")?,
    )?;

    Ok(())
}

/// Parse the caller-supplied parameters input into a JSON object.
fn parse_parameters(input: Option<&str>) -> Result<Option<serde_json::Value>> {
    let Some(raw) = input else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let value: serde_json::Value =
        serde_json::from_str(trimmed).context("parameters must be valid JSON")?;
    anyhow::ensure!(value.is_object(), "parameters must be a JSON object");
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_or_empty_parameters_are_none() {
        assert!(parse_parameters(None).unwrap().is_none());
        assert!(parse_parameters(Some("")).unwrap().is_none());
        assert!(parse_parameters(Some("  ")).unwrap().is_none());
    }

    #[test]
    fn object_parameters_pass_through() {
        let value = parse_parameters(Some(r#"{"channel": "beta"}"#))
            .unwrap()
            .unwrap();
        assert_eq!(value["channel"], "beta");
    }

    #[test]
    fn non_object_parameters_are_rejected() {
        assert!(parse_parameters(Some("[1, 2]")).is_err());
        assert!(parse_parameters(Some("not json")).is_err());
    }
}
