//! Polling state machine for Chassy workflow executions.
//!
//! Given an [`ExecutionHandle`] produced by a submission, the
//! [`ExecutionPoller`] fetches the execution snapshot on a fixed interval,
//! retries transient fetch failures with bounded exponential backoff, and
//! reconciles the top-level and sub-resource statuses into one terminal
//! outcome: the final snapshot, or a [`PollError`].

pub mod backoff;
pub mod cancel;
pub mod error;
pub mod fetch;
pub mod mock;
pub mod outcome;
pub mod poller;

pub use backoff::{retry_with_backoff, RetryPolicy};
pub use cancel::CancellationToken;
pub use error::{PollError, PollResult};
pub use fetch::{ExecutionFetcher, ExecutionHandle, HttpFetcher};
pub use outcome::{classify, TickOutcome};
pub use poller::{ExecutionPoller, PollerConfig, RETRY_IN_SECONDS};
