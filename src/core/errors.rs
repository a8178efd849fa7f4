//! Error types for chat-completion calls

use std::fmt;
use thiserror::Error;

/// Coarse classification of a failed call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Rejected locally before any request was sent
    InvalidRequest,
    /// Connection or transport failure
    Network,
    /// Request exceeded the configured timeout
    Timeout,
    /// Credential rejected by the service
    Authentication,
    /// Service asked us to slow down
    RateLimit,
    /// Any other non-success status
    Api,
    /// Response could not be understood
    InvalidResponse,
    /// Startup configuration problem
    Config,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::InvalidRequest => "invalid_request",
            FailureKind::Network => "network",
            FailureKind::Timeout => "timeout",
            FailureKind::Authentication => "authentication",
            FailureKind::RateLimit => "rate_limit",
            FailureKind::Api => "api",
            FailureKind::InvalidResponse => "invalid_response",
            FailureKind::Config => "config",
        };
        write!(f, "{}", name)
    }
}

/// Failure of a chat-completion call
#[derive(Error, Debug)]
pub enum CompletionError {
    /// Request rejected before being sent
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// What was wrong with the input
        message: String,
    },

    /// Network error
    #[error("Network error: {message}")]
    NetworkError {
        /// Underlying transport message
        message: String,
    },

    /// Request timeout
    #[error("Request timeout")]
    TimeoutError,

    /// Credential missing or rejected
    #[error("Authentication failed: {status} - {message}")]
    AuthenticationError {
        /// HTTP status (401 or 403)
        status: u16,
        /// Response body
        message: String,
    },

    /// Rate limit exceeded
    #[error("Rate limit exceeded. Retry after {retry_after:?} seconds")]
    RateLimitError {
        /// Seconds from the `Retry-After` header
        retry_after: Option<u64>,
    },

    /// API request failed
    #[error("API error: {status} - {message}")]
    ApiError {
        /// HTTP status
        status: u16,
        /// Response body
        message: String,
    },

    /// Invalid response from API
    #[error("Invalid response: {message}")]
    InvalidResponseError {
        /// What could not be decoded
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// What is misconfigured
        message: String,
    },
}

impl CompletionError {
    /// Classify this error
    pub fn kind(&self) -> FailureKind {
        match self {
            CompletionError::InvalidRequest { .. } => FailureKind::InvalidRequest,
            CompletionError::NetworkError { .. } => FailureKind::Network,
            CompletionError::TimeoutError => FailureKind::Timeout,
            CompletionError::AuthenticationError { .. } => FailureKind::Authentication,
            CompletionError::RateLimitError { .. } => FailureKind::RateLimit,
            CompletionError::ApiError { .. } => FailureKind::Api,
            CompletionError::InvalidResponseError { .. } => FailureKind::InvalidResponse,
            CompletionError::ConfigError { .. } => FailureKind::Config,
        }
    }

    /// Whether a later identical call could plausibly succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self.kind(),
            FailureKind::Network | FailureKind::Timeout | FailureKind::RateLimit
        )
    }
}

impl From<reqwest::Error> for CompletionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CompletionError::TimeoutError
        } else if err.is_decode() {
            CompletionError::InvalidResponseError {
                message: err.to_string(),
            }
        } else {
            CompletionError::NetworkError {
                message: err.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for CompletionError {
    fn from(err: serde_json::Error) -> Self {
        CompletionError::InvalidResponseError {
            message: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for CompletionError {
    fn from(err: anyhow::Error) -> Self {
        CompletionError::ConfigError {
            message: err.to_string(),
        }
    }
}

/// Result type for chat-completion operations
pub type Result<T> = std::result::Result<T, CompletionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(CompletionError::TimeoutError.kind(), FailureKind::Timeout);
        assert_eq!(
            CompletionError::AuthenticationError {
                status: 401,
                message: "bad token".to_string(),
            }
            .kind(),
            FailureKind::Authentication
        );
        assert_eq!(
            CompletionError::RateLimitError { retry_after: Some(3) }.kind(),
            FailureKind::RateLimit
        );
    }

    #[test]
    fn test_transient_errors() {
        assert!(CompletionError::TimeoutError.is_transient());
        assert!(CompletionError::NetworkError {
            message: "connection reset".to_string(),
        }
        .is_transient());
        assert!(!CompletionError::AuthenticationError {
            status: 403,
            message: "forbidden".to_string(),
        }
        .is_transient());
        assert!(!CompletionError::InvalidResponseError {
            message: "no choices".to_string(),
        }
        .is_transient());
    }

    #[test]
    fn test_display() {
        let err = CompletionError::ApiError {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 500 - boom");
        assert_eq!(FailureKind::RateLimit.to_string(), "rate_limit");
    }

    #[test]
    fn test_json_error_is_invalid_response() {
        let err: CompletionError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert_eq!(err.kind(), FailureKind::InvalidResponse);
    }
}
