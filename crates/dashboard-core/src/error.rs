//! Gateway Errors
//!
//! Failure taxonomy for calls against the dashboard backend.

use thiserror::Error;

/// Common result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Errors surfaced by the remote gateways
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// Transport-level failure (unreachable host, connection reset, ...)
    #[error("network failure: {message}")]
    Network { message: String },
    /// The backend answered outside the 2xx range
    #[error("remote error {status}: {body}")]
    Remote { status: u16, body: String },
    /// The body could not be read or parsed into the expected shape
    #[error("malformed response: {message}")]
    Malformed { message: String },
    /// A required field was blank before the request was issued
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    /// The configured base URL is unusable
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),
}

impl GatewayError {
    /// Builds a `Remote` error from a status code and the raw body bytes.
    pub fn remote(status: u16, body: &[u8]) -> Self {
        let body = String::from_utf8_lossy(body).trim().to_string();
        GatewayError::Remote { status, body }
    }

    /// HTTP status for `Remote` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Short message suitable for a toast notification.
    pub fn user_message(&self) -> String {
        match self {
            GatewayError::Network { .. } => "Could not reach the server. Please try again.".to_string(),
            GatewayError::Remote { status, body } if body.is_empty() => {
                format!("Server responded with {}", status)
            }
            GatewayError::Remote { status, body } => format!("Server responded with {}: {}", status, body),
            GatewayError::Malformed { .. } => "The server sent an unexpected response.".to_string(),
            GatewayError::MissingField(field) => format!("{} is required", field),
            GatewayError::InvalidBaseUrl(url) => format!("Invalid API address: {}", url),
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            GatewayError::Malformed { message: error.to_string() }
        } else {
            GatewayError::Network { message: error.to_string() }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_keeps_server_body() {
        let error = GatewayError::remote(422, b"  title must not be empty\n");
        assert_eq!(error.status(), Some(422));
        assert_eq!(error.to_string(), "remote error 422: title must not be empty");
        assert!(error.user_message().contains("title must not be empty"));
    }

    #[test]
    fn empty_remote_body_still_reports_status() {
        let error = GatewayError::remote(500, b"");
        assert_eq!(error.user_message(), "Server responded with 500");
    }

    #[test]
    fn non_remote_errors_have_no_status() {
        assert_eq!(GatewayError::MissingField("title").status(), None);
    }
}
