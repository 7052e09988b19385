//! Error types for polling sessions.

use std::time::Duration;

use chassy_api::{ApiError, WorkflowStatus};
use thiserror::Error;

/// Result type alias for polling operations.
pub type PollResult<T> = Result<T, PollError>;

/// Ways a polling session can fail.
///
/// Each variant is terminal: none of these is retried past the backoff
/// budget already spent producing it.
#[derive(Debug, Error)]
pub enum PollError {
    /// Every backoff attempt within a tick failed.
    #[error("polling failed after {attempts} attempts: {last_error}")]
    PollingExhausted {
        attempts: u32,
        #[source]
        last_error: ApiError,
    },

    /// The execution reached one of the remote error statuses.
    #[error("workflow execution failed with status {status}: {message}")]
    RemoteExecutionError {
        status: WorkflowStatus,
        message: String,
    },

    /// A package or deployment ended in a failed state.
    #[error("{0}")]
    SubResourceFailed(String),

    /// The configured wall-clock limit elapsed before a terminal status.
    #[error("polling timed out after {0:?}")]
    PollingTimedOut(Duration),

    /// The session was cancelled through its cancellation token.
    #[error("polling session cancelled")]
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_message_names_status_and_reason() {
        let err = PollError::RemoteExecutionError {
            status: WorkflowStatus::ConfigError,
            message: "bad manifest".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "workflow execution failed with status CONFIG_ERROR: bad manifest"
        );
    }

    #[test]
    fn exhausted_error_keeps_the_underlying_cause() {
        let err = PollError::PollingExhausted {
            attempts: 6,
            last_error: ApiError::Decode("truncated body".to_string()),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("6 attempts"));
        assert!(rendered.contains("truncated body"));
    }
}
