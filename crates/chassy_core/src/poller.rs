//! The polling state machine.
//!
//! A session is `POLLING` until one tick produces a terminal outcome, then it
//! resolves or rejects exactly once. Ticks run strictly sequentially inside a
//! single task, so the first terminal determination wins by construction and
//! no later tick can override it.

use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use chassy_api::{ApiError, WorkflowExecution};

use crate::backoff::{retry_with_backoff, RetryPolicy};
use crate::cancel::CancellationToken;
use crate::error::{PollError, PollResult};
use crate::fetch::ExecutionFetcher;
use crate::outcome::{classify, TickOutcome};

/// Fixed delay between poll ticks.
pub const RETRY_IN_SECONDS: u64 = 30;

/// Configuration for a polling session.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Delay between poll ticks. The first fetch happens one full interval
    /// after the session starts.
    pub interval: Duration,
    /// Backoff applied to transient fetch failures within a tick.
    pub retry: RetryPolicy,
    /// Maximum wall-clock duration for the whole session. `None` means the
    /// session is bounded only by the host's own timeout.
    pub timeout: Option<Duration>,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(RETRY_IN_SECONDS),
            retry: RetryPolicy::default(),
            timeout: None,
        }
    }
}

/// Hook observing each retried fetch attempt within a tick.
pub type RetryHook = Box<dyn Fn(u32, &ApiError, Duration) + Send + Sync>;

/// Polls one workflow execution until it reaches a terminal outcome.
pub struct ExecutionPoller<F> {
    fetcher: F,
    config: PollerConfig,
    on_retry: Option<RetryHook>,
}

impl<F: ExecutionFetcher> ExecutionPoller<F> {
    /// Create a poller with the default 30 s interval and no session timeout.
    pub fn new(fetcher: F) -> Self {
        Self::with_config(fetcher, PollerConfig::default())
    }

    pub fn with_config(fetcher: F, config: PollerConfig) -> Self {
        Self {
            fetcher,
            config,
            on_retry: None,
        }
    }

    /// Observe every retried fetch attempt, in addition to the built-in
    /// `tracing` output.
    pub fn on_retry(
        mut self,
        hook: impl Fn(u32, &ApiError, Duration) + Send + Sync + 'static,
    ) -> Self {
        self.on_retry = Some(Box::new(hook));
        self
    }

    /// Poll until the execution reaches a terminal outcome.
    ///
    /// Resolves with the final snapshot once the top-level status is
    /// `SUCCESS` and every present sub-resource is resolved; rejects on
    /// remote error statuses, failed sub-resources, exhausted fetch retries,
    /// cancellation, or the configured session timeout.
    pub async fn wait_until_executed(
        &self,
        cancel: &CancellationToken,
    ) -> PollResult<WorkflowExecution> {
        match self.config.timeout {
            Some(limit) => match tokio::time::timeout(limit, self.poll_loop(cancel)).await {
                Ok(outcome) => outcome,
                Err(_) => {
                    warn!("Polling session timed out after {:?}", limit);
                    Err(PollError::PollingTimedOut(limit))
                }
            },
            None => self.poll_loop(cancel).await,
        }
    }

    async fn poll_loop(&self, cancel: &CancellationToken) -> PollResult<WorkflowExecution> {
        let mut ticks = tokio::time::interval(self.config.interval);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick of a tokio interval completes immediately; consume
        // it so the first fetch waits a full period, like the original
        // fixed-rate schedule.
        ticks.tick().await;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("Polling session cancelled");
                    return Err(PollError::Cancelled);
                }
                _ = ticks.tick() => {}
            }

            let execution = self.fetch_with_backoff().await?;
            match classify(&execution) {
                TickOutcome::Complete => {
                    info!("Workflow execution completed");
                    return Ok(execution);
                }
                TickOutcome::Failed(err) => return Err(err),
                TickOutcome::Pending => {
                    info!("Workflow still in progress, please wait");
                }
            }
        }
    }

    /// One tick's fetch, with bounded exponential backoff on failure.
    async fn fetch_with_backoff(&self) -> PollResult<WorkflowExecution> {
        let fetcher = &self.fetcher;
        retry_with_backoff(
            &self.config.retry,
            || fetcher.fetch(),
            |attempt, err, delay| {
                debug!(
                    "Fetch attempt {} failed ({}), retrying in {:?}",
                    attempt, err, delay
                );
                if let Some(hook) = &self.on_retry {
                    hook(attempt, err, delay);
                }
            },
        )
        .await
        .map_err(|last_error| PollError::PollingExhausted {
            attempts: self.config.retry.max_attempts,
            last_error,
        })
    }
}
