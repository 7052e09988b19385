//! The fetch seam between the poller and the HTTP client.

use async_trait::async_trait;
use chassy_api::{ApiResult, ChassyClient, WorkflowExecution};

/// Everything the poller needs to observe one execution: produced by the
/// submitter, owned by the poller for the duration of a session.
#[derive(Debug, Clone)]
pub struct ExecutionHandle {
    /// Access token presented on every poll request.
    pub access_token: String,
    /// Identifier of the execution being observed.
    pub execution_id: String,
    /// Base URL polled for status, without the execution id.
    pub poll_url: String,
}

/// Source of execution snapshots.
///
/// The poller only depends on this trait, so tests can script snapshot
/// sequences without a network (see [`crate::mock::ScriptedFetcher`]).
#[async_trait]
pub trait ExecutionFetcher: Send + Sync {
    /// Fetch the current snapshot of the observed execution.
    async fn fetch(&self) -> ApiResult<WorkflowExecution>;
}

/// Fetches snapshots over HTTP with a [`ChassyClient`].
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: ChassyClient,
    handle: ExecutionHandle,
}

impl HttpFetcher {
    pub fn new(client: ChassyClient, handle: ExecutionHandle) -> Self {
        Self { client, handle }
    }

    /// The handle this fetcher polls.
    pub fn handle(&self) -> &ExecutionHandle {
        &self.handle
    }
}

#[async_trait]
impl ExecutionFetcher for HttpFetcher {
    async fn fetch(&self) -> ApiResult<WorkflowExecution> {
        self.client
            .fetch_execution(
                &self.handle.access_token,
                &self.handle.poll_url,
                &self.handle.execution_id,
            )
            .await
    }
}
