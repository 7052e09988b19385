//! Error types for Chassy API calls.

use thiserror::Error;

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors that can occur while talking to the Chassy API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-success HTTP status.
    #[error("network response was not ok: {status}{}", format_body(.body))]
    RequestFailed {
        status: reqwest::StatusCode,
        body: String,
    },

    /// Transport-level failure before any response was received.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body could not be decoded into the expected shape.
    #[error("failed to decode response body: {0}")]
    Decode(String),
}

fn format_body(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(": {body}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_failed_message_names_the_status() {
        let err = ApiError::RequestFailed {
            status: reqwest::StatusCode::BAD_GATEWAY,
            body: String::new(),
        };
        assert_eq!(
            err.to_string(),
            "network response was not ok: 502 Bad Gateway"
        );
    }

    #[test]
    fn request_failed_message_includes_a_non_empty_body() {
        let err = ApiError::RequestFailed {
            status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
            body: "maintenance window".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "network response was not ok: 503 Service Unavailable: maintenance window"
        );
    }
}
