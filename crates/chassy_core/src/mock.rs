//! Scripted execution fetcher for testing.
//!
//! Provides a configurable fake implementation of the [`ExecutionFetcher`]
//! trait so poller behaviour can be tested without a backend, plus builders
//! for the snapshot shapes the tests need.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chassy_api::{ApiError, ApiResult, WorkflowExecution};

use crate::fetch::ExecutionFetcher;

/// Fetcher that replays a scripted sequence of responses.
///
/// Each call pops the next scripted response; once the script is spent the
/// fallback snapshot (if any) is returned indefinitely. Calls are counted
/// for verification.
pub struct ScriptedFetcher {
    script: Mutex<VecDeque<ApiResult<WorkflowExecution>>>,
    fallback: Option<WorkflowExecution>,
    calls: AtomicUsize,
}

impl ScriptedFetcher {
    /// Replay the given responses in order.
    pub fn new(script: Vec<ApiResult<WorkflowExecution>>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            fallback: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Return the same snapshot on every call.
    pub fn repeating(snapshot: WorkflowExecution) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: Some(snapshot),
            calls: AtomicUsize::new(0),
        }
    }

    /// Serve the snapshot once the script is spent.
    pub fn with_fallback(mut self, snapshot: WorkflowExecution) -> Self {
        self.fallback = Some(snapshot);
        self
    }

    /// Number of fetches performed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ExecutionFetcher for ScriptedFetcher {
    async fn fetch(&self) -> ApiResult<WorkflowExecution> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let scripted = self
            .script
            .lock()
            .expect("scripted fetcher lock poisoned")
            .pop_front();
        match scripted {
            Some(response) => response,
            None => match &self.fallback {
                Some(snapshot) => Ok(snapshot.clone()),
                None => Err(ApiError::Decode(
                    "scripted fetcher ran out of responses".to_string(),
                )),
            },
        }
    }
}

/// Builders for snapshot shapes used across the test suites.
pub mod snapshots {
    use chassy_api::{
        Deployment, DeploymentStatus, Machine, Package, PackageClass, PackageStatus, PackageType,
        Release, WorkflowExecution, WorkflowStatus,
    };
    use chrono::{TimeZone, Utc};

    /// Snapshot with the given top-level status and no sub-resources.
    pub fn with_status(status: WorkflowStatus) -> WorkflowExecution {
        WorkflowExecution {
            status,
            error_message: None,
            packages: None,
            releases: None,
            deployments: None,
        }
    }

    /// Snapshot for one of the remote error statuses.
    pub fn with_error(status: WorkflowStatus, message: &str) -> WorkflowExecution {
        WorkflowExecution {
            error_message: Some(message.to_string()),
            ..with_status(status)
        }
    }

    /// An executable container package named `name`.
    pub fn package(name: &str, status: PackageStatus) -> Package {
        Package {
            id: format!("pkg-{name}"),
            sha256: "0".repeat(64),
            create_timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            name: name.to_string(),
            tags: None,
            package_type: PackageType::Container,
            package_class: PackageClass::Executable,
            access: None,
            status,
            access_uri: None,
        }
    }

    /// A two-machine deployment of `edge-release` 1.2.3 to the given fleet.
    pub fn deployment(fleet_id: &str, status: DeploymentStatus) -> Deployment {
        Deployment {
            id: format!("dep-{fleet_id}"),
            fleet_id: fleet_id.to_string(),
            release: Release {
                id: "rel-1".to_string(),
                create_timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 12, 5, 0).unwrap(),
                name: "edge-release".to_string(),
                manifest: None,
                manifest_ids: Some(vec!["pkg-agent".to_string()]),
                version_info: "1.2.3".to_string(),
            },
            machines: Some(vec![
                Machine {
                    id: "m-1".to_string(),
                    name: None,
                    address: None,
                    hostname: Some("edge-01".to_string()),
                },
                Machine {
                    id: "m-2".to_string(),
                    name: None,
                    address: None,
                    hostname: Some("edge-02".to_string()),
                },
            ]),
            expiry_timestamp: Utc.with_ymd_and_hms(2024, 3, 2, 12, 0, 0).unwrap(),
            status,
        }
    }
}
