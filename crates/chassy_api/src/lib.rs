//! Wire types and HTTP client for the Chassy workflow API.
//!
//! This crate is intentionally thin: it knows how to authenticate, submit a
//! workflow run, and fetch an execution snapshot. Deciding when an execution
//! is done lives in `chassy_core`.

pub mod client;
pub mod env;
pub mod error;
pub mod models;

pub use reqwest::StatusCode;

pub use client::ChassyClient;
pub use env::Environment;
pub use error::{ApiError, ApiResult};
pub use models::{
    Deployment, DeploymentStatus, GithubData, Machine, Package, PackageAccess, PackageClass,
    PackageStatus, PackageType, Release, RunRequest, SubmitResponse, Tag, TokenData,
    WorkflowExecution, WorkflowGraph, WorkflowStatus,
};
