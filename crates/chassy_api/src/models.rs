//! Wire types for the Chassy workflow API.
//!
//! Field names and enum literals mirror the JSON produced by the backend;
//! renames are applied per field rather than relying on a single container
//! attribute wherever the wire form is irregular (`RFSIMAGE`, `INPROGRESS`).

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top-level status of a workflow execution.
///
/// This is the sole authority for whether polling continues; sub-resource
/// statuses are only consulted once this is [`WorkflowStatus::Success`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkflowStatus {
    Success,
    InProgress,
    ConfigError,
    ChassyError,
    ExecutionError,
    /// Any status value this client does not recognise. Never terminal.
    #[serde(other)]
    Unknown,
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Success => "SUCCESS",
            Self::InProgress => "IN_PROGRESS",
            Self::ConfigError => "CONFIG_ERROR",
            Self::ChassyError => "CHASSY_ERROR",
            Self::ExecutionError => "EXECUTION_ERROR",
            Self::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

/// Status of a published package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PackageStatus {
    Pending,
    Available,
    Failed,
    #[serde(other)]
    Unknown,
}

/// Package artifact kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PackageType {
    #[serde(rename = "CONTAINER")]
    Container,
    #[serde(rename = "FILE")]
    File,
    #[serde(rename = "ARCHIVE")]
    Archive,
    #[serde(rename = "RFSIMAGE")]
    RfsImage,
    #[serde(rename = "FIRMWARE")]
    Firmware,
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Container => "CONTAINER",
            Self::File => "FILE",
            Self::Archive => "ARCHIVE",
            Self::RfsImage => "RFSIMAGE",
            Self::Firmware => "FIRMWARE",
        };
        f.write_str(s)
    }
}

/// Functional class of a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PackageClass {
    Executable,
    Config,
    Data,
}

impl fmt::Display for PackageClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Executable => "EXECUTABLE",
            Self::Config => "CONFIG",
            Self::Data => "DATA",
        };
        f.write_str(s)
    }
}

/// Visibility of a published package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PackageAccess {
    Public,
    Private,
}

impl fmt::Display for PackageAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Public => "PUBLIC",
            Self::Private => "PRIVATE",
        };
        f.write_str(s)
    }
}

/// Key/value tag attached to a package.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

/// A package produced by a workflow execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: String,
    pub sha256: String,
    pub create_timestamp: DateTime<Utc>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
    #[serde(rename = "type")]
    pub package_type: PackageType,
    pub package_class: PackageClass,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<PackageAccess>,
    pub status: PackageStatus,
    #[serde(
        rename = "accessURI",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub access_uri: Option<String>,
}

/// A release produced by a workflow execution.
///
/// Carries its manifest either embedded or by reference, never both.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    pub id: String,
    pub create_timestamp: DateTime<Utc>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest: Option<Vec<Package>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest_ids: Option<Vec<String>>,
    pub version_info: String,
}

/// Status of a fleet deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeploymentStatus {
    #[serde(rename = "PENDING")]
    Pending,
    #[serde(rename = "INPROGRESS")]
    InProgress,
    #[serde(rename = "CANCELED")]
    Canceled,
    #[serde(rename = "FAILED")]
    Failed,
    #[serde(rename = "COMPLETE")]
    Complete,
}

impl fmt::Display for DeploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "PENDING",
            Self::InProgress => "INPROGRESS",
            Self::Canceled => "CANCELED",
            Self::Failed => "FAILED",
            Self::Complete => "COMPLETE",
        };
        f.write_str(s)
    }
}

/// A machine targeted by a deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Machine {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
}

/// A deployment of a release to a fleet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    pub id: String,
    pub fleet_id: String,
    pub release: Release,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machines: Option<Vec<Machine>>,
    pub expiry_timestamp: DateTime<Utc>,
    pub status: DeploymentStatus,
}

/// One snapshot of a workflow execution, fetched per poll tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowExecution {
    pub status: WorkflowStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packages: Option<Vec<Package>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub releases: Option<Vec<Release>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployments: Option<Vec<Deployment>>,
}

/// Tokens returned by the refresh-token exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenData {
    pub access_token: String,
    pub id_token: String,
}

/// The execution graph attached to a submission response. Informational only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowGraph {
    #[serde(default)]
    pub steps: Vec<serde_json::Value>,
}

/// Response to a workflow run submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub id: String,
    pub workflow_id: String,
    pub graph: WorkflowGraph,
}

/// GitHub-side context shipped with a run submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GithubData {
    pub env_context: String,
    pub github_context: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
}

/// Body of a workflow run submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRequest {
    pub github_data: GithubData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execution_snapshot_deserializes_from_wire_json() {
        let json = r#"{
            "status": "SUCCESS",
            "packages": [{
                "id": "pkg-1",
                "sha256": "abc123",
                "createTimestamp": "2024-03-01T12:00:00Z",
                "name": "agent",
                "type": "CONTAINER",
                "packageClass": "EXECUTABLE",
                "access": "PUBLIC",
                "status": "AVAILABLE",
                "accessURI": "https://registry.chassy.io/agent"
            }],
            "deployments": [{
                "id": "dep-1",
                "fleetId": "fleet-9",
                "release": {
                    "id": "rel-1",
                    "createTimestamp": "2024-03-01T12:05:00Z",
                    "name": "agent-release",
                    "manifestIds": ["pkg-1"],
                    "versionInfo": "1.2.3"
                },
                "machines": [{"id": "m-1", "hostname": "edge-01"}],
                "expiryTimestamp": "2024-03-02T12:00:00Z",
                "status": "INPROGRESS"
            }]
        }"#;

        let execution: WorkflowExecution = serde_json::from_str(json).unwrap();
        assert_eq!(execution.status, WorkflowStatus::Success);

        let packages = execution.packages.as_ref().unwrap();
        assert_eq!(packages[0].package_type, PackageType::Container);
        assert_eq!(packages[0].package_class, PackageClass::Executable);
        assert_eq!(packages[0].status, PackageStatus::Available);
        assert_eq!(
            packages[0].access_uri.as_deref(),
            Some("https://registry.chassy.io/agent")
        );

        let deployments = execution.deployments.as_ref().unwrap();
        assert_eq!(deployments[0].status, DeploymentStatus::InProgress);
        assert_eq!(deployments[0].release.version_info, "1.2.3");
    }

    #[test]
    fn unrecognized_top_level_status_maps_to_unknown() {
        let execution: WorkflowExecution =
            serde_json::from_str(r#"{"status": "QUEUED"}"#).unwrap();
        assert_eq!(execution.status, WorkflowStatus::Unknown);
    }

    #[test]
    fn error_snapshot_carries_message() {
        let json = r#"{"status": "CONFIG_ERROR", "errorMessage": "bad manifest"}"#;
        let execution: WorkflowExecution = serde_json::from_str(json).unwrap();
        assert_eq!(execution.status, WorkflowStatus::ConfigError);
        assert_eq!(execution.error_message.as_deref(), Some("bad manifest"));
    }

    #[test]
    fn submit_response_exposes_id_and_graph_steps() {
        let json = r#"{
            "id": "exec-42",
            "workflowId": "wf-7",
            "graph": {"steps": [{"name": "build"}, {"name": "publish"}]}
        }"#;
        let response: SubmitResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.id, "exec-42");
        assert_eq!(response.workflow_id, "wf-7");
        assert_eq!(response.graph.steps.len(), 2);
    }

    #[test]
    fn token_data_uses_camel_case_wire_names() {
        let json = r#"{"accessToken": "at", "idToken": "it"}"#;
        let tokens: TokenData = serde_json::from_str(json).unwrap();
        assert_eq!(tokens.access_token, "at");
        assert_eq!(tokens.id_token, "it");
    }

    #[test]
    fn run_request_serializes_github_data_envelope() {
        let request = RunRequest {
            github_data: GithubData {
                env_context: "PROD".to_string(),
                github_context: serde_json::json!({"repository": "acme/edge"}),
                parameters: None,
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["githubData"]["envContext"], "PROD");
        assert!(value["githubData"].get("parameters").is_none());
    }

    #[test]
    fn status_display_matches_wire_literals() {
        assert_eq!(WorkflowStatus::InProgress.to_string(), "IN_PROGRESS");
        assert_eq!(DeploymentStatus::InProgress.to_string(), "INPROGRESS");
        assert_eq!(PackageType::RfsImage.to_string(), "RFSIMAGE");
        assert_eq!(PackageAccess::Public.to_string(), "PUBLIC");
    }
}
