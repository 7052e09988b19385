//! Classification of execution snapshots.
//!
//! Pure functions: each poll tick reclassifies a fresh snapshot, no state is
//! carried between ticks. The top-level status alone decides whether polling
//! continues; sub-resources are only consulted once it reports `SUCCESS`, to
//! decide whether that success is final or still settling.

use chassy_api::{
    Deployment, DeploymentStatus, Package, PackageStatus, WorkflowExecution, WorkflowStatus,
};

use crate::error::PollError;

/// Outcome of classifying one freshly fetched snapshot.
#[derive(Debug)]
pub enum TickOutcome {
    /// Terminal success: every present sub-resource is fully resolved.
    Complete,
    /// No terminal decision yet, schedule another tick.
    Pending,
    /// Terminal failure.
    Failed(PollError),
}

/// Classify a snapshot into a tick outcome.
pub fn classify(execution: &WorkflowExecution) -> TickOutcome {
    match execution.status {
        WorkflowStatus::ChassyError
        | WorkflowStatus::ConfigError
        | WorkflowStatus::ExecutionError => TickOutcome::Failed(PollError::RemoteExecutionError {
            status: execution.status,
            message: execution.error_message.clone().unwrap_or_default(),
        }),
        WorkflowStatus::InProgress => TickOutcome::Pending,
        WorkflowStatus::Success => classify_sub_resources(execution),
        // Statuses this client does not recognise never terminate a session.
        WorkflowStatus::Unknown => TickOutcome::Pending,
    }
}

/// Decide whether a `SUCCESS` snapshot is final.
///
/// Full scan each tick; the first failing sub-resource in scan order wins
/// (packages before deployments). Absent lists are vacuously complete.
fn classify_sub_resources(execution: &WorkflowExecution) -> TickOutcome {
    let mut complete = true;

    if let Some(packages) = &execution.packages {
        for pkg in packages {
            match pkg.status {
                PackageStatus::Available => {}
                PackageStatus::Pending | PackageStatus::Unknown => complete = false,
                PackageStatus::Failed => {
                    return TickOutcome::Failed(PollError::SubResourceFailed(
                        package_failure_message(pkg),
                    ));
                }
            }
        }
    }

    if let Some(deployments) = &execution.deployments {
        for deployment in deployments {
            match deployment.status {
                DeploymentStatus::Complete => {}
                DeploymentStatus::Pending | DeploymentStatus::InProgress => complete = false,
                DeploymentStatus::Canceled | DeploymentStatus::Failed => {
                    return TickOutcome::Failed(PollError::SubResourceFailed(
                        deployment_failure_message(deployment),
                    ));
                }
            }
        }
    }

    if complete {
        TickOutcome::Complete
    } else {
        TickOutcome::Pending
    }
}

fn package_failure_message(pkg: &Package) -> String {
    let access = pkg
        .access
        .map(|a| format!("{a} "))
        .unwrap_or_default();
    format!(
        "Failed to publish {access}{} package {} of type {}",
        pkg.package_class, pkg.name, pkg.package_type
    )
}

fn deployment_failure_message(deployment: &Deployment) -> String {
    let machine_count = deployment
        .machines
        .as_ref()
        .map_or(0, |machines| machines.len());
    format!(
        "Deployment of {} version {} to {} machines in fleet with ID {} {}",
        deployment.release.name,
        deployment.release.version_info,
        machine_count,
        deployment.fleet_id,
        deployment.status
    )
}
