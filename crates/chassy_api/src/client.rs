//! Authenticated HTTP client for the Chassy API.

use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use crate::env::Environment;
use crate::error::{ApiError, ApiResult};
use crate::models::{RunRequest, SubmitResponse, TokenData, WorkflowExecution};

/// Client for the Chassy workflow API.
///
/// Holds a shared connection pool; cheap to clone.
#[derive(Debug, Clone)]
pub struct ChassyClient {
    http: reqwest::Client,
    api_base_url: String,
}

impl ChassyClient {
    /// Create a client targeting the given environment.
    pub fn new(env: Environment) -> Self {
        Self::with_base_url(env.api_base_url())
    }

    /// Create a client targeting an explicit API base URL.
    pub fn with_base_url(api_base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base_url: api_base_url.into(),
        }
    }

    /// The API base URL this client targets.
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Status poll URL for executions of a workflow.
    pub fn workflow_run_url(&self, workflow_id: &str) -> String {
        format!("{}/workflow/{}/run", self.api_base_url, workflow_id)
    }

    /// Exchange a refresh token for access and id tokens.
    pub async fn exchange_token(&self, refresh_token: &str) -> ApiResult<TokenData> {
        let url = format!("{}/token/user", self.api_base_url);
        debug!("Exchanging refresh token at {}", url);

        let response = self
            .http
            .post(&url)
            .json(&json!({ "token": refresh_token }))
            .send()
            .await?;
        decode(response).await
    }

    /// Submit one workflow run.
    ///
    /// Never retried: the remote side effect is not idempotent, so a failed
    /// submission fails the whole run outright.
    pub async fn submit_run(
        &self,
        access_token: &str,
        workflow_id: &str,
        request: &RunRequest,
    ) -> ApiResult<SubmitResponse> {
        let url = self.workflow_run_url(workflow_id);
        debug!("Submitting workflow run to {}", url);

        let response = self
            .http
            .post(&url)
            .header("Authorization", access_token)
            .json(request)
            .send()
            .await?;
        decode(response).await
    }

    /// Fetch the current snapshot of one execution.
    pub async fn fetch_execution(
        &self,
        access_token: &str,
        poll_url: &str,
        execution_id: &str,
    ) -> ApiResult<WorkflowExecution> {
        let url = format!("{poll_url}/{execution_id}");
        debug!("Fetching workflow execution from {}", url);

        let response = self
            .http
            .get(&url)
            .header("Authorization", access_token)
            .send()
            .await?;
        decode(response).await
    }
}

/// Check the HTTP status, then decode the JSON body.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::RequestFailed { status, body });
    }
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workflow_run_url_joins_base_and_id() {
        let client = ChassyClient::with_base_url("https://api.test.chassy.dev/v1");
        assert_eq!(
            client.workflow_run_url("wf-7"),
            "https://api.test.chassy.dev/v1/workflow/wf-7/run"
        );
    }

    #[test]
    fn client_defaults_to_the_environment_base_url() {
        let client = ChassyClient::new(Environment::Stage);
        assert_eq!(client.api_base_url(), "https://api.stage.chassy.dev/v1");
    }
}
