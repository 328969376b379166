//! Error types for ghlist
//!
//! Every fallible public API returns `Result<T, Error>` with the error
//! defined here. The pagination adapters are generic over the error type
//! and pass it through unchanged.

use crate::http::RateCategory;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// The main error type for ghlist
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Request Errors
    // ============================================================================
    #[error("Invalid argument '{name}': {message}")]
    InvalidArgument { name: String, message: String },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("GitHub API error {status}: {message}")]
    Api {
        status: u16,
        message: String,
        documentation_url: Option<String>,
    },

    #[error("Rate limited, retry after {retry_after_seconds}s")]
    RateLimited { retry_after_seconds: u64 },

    #[error("API rate limit for '{category}' exhausted until {reset}")]
    RateLimitExceeded {
        category: RateCategory,
        reset: DateTime<Utc>,
    },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Max retries ({max_retries}) exceeded")]
    MaxRetriesExceeded { max_retries: u32 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// HTTP status code carried by this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } | Error::Api { status, .. } => Some(*status),
            Error::RateLimited { .. } => Some(429),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if the server answered 404
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(_) | Error::RateLimited { .. } | Error::Timeout { .. } => true,
            Error::HttpStatus { status, .. } | Error::Api { status, .. } => {
                is_retryable_status(*status)
            }
            _ => false,
        }
    }
}

/// Check if an HTTP status code is worth retrying
///
/// Shared by [`Error::is_retryable`] and the transport's retry loop.
pub(crate) fn is_retryable_status(status: u16) -> bool {
    matches!(
        status,
        429 | 500 | 502 | 503 | 504 | 520 | 521 | 522 | 523 | 524
    )
}

/// Result type alias for ghlist
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::invalid_argument("owner", "must not be empty");
        assert_eq!(
            err.to_string(),
            "Invalid argument 'owner': must not be empty"
        );

        let err = Error::http_status(404, "Not found");
        assert_eq!(err.to_string(), "HTTP 404: Not found");

        let err = Error::Api {
            status: 422,
            message: "Validation Failed".to_string(),
            documentation_url: None,
        };
        assert_eq!(err.to_string(), "GitHub API error 422: Validation Failed");
    }

    #[test]
    fn test_rate_limit_exceeded_display() {
        let reset = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let err = Error::RateLimitExceeded {
            category: RateCategory::Search,
            reset,
        };
        let message = err.to_string();
        assert!(message.contains("'search'"));
        assert!(message.contains("2023-11-14"));
    }

    #[test]
    fn test_is_not_found() {
        assert!(Error::http_status(404, "").is_not_found());
        assert!(Error::Api {
            status: 404,
            message: "Not Found".to_string(),
            documentation_url: None,
        }
        .is_not_found());
        assert!(!Error::http_status(403, "").is_not_found());
        assert!(!Error::config("x").is_not_found());
    }

    #[test]
    fn test_is_retryable() {
        assert!(Error::RateLimited {
            retry_after_seconds: 60
        }
        .is_retryable());
        assert!(Error::Timeout { timeout_ms: 1000 }.is_retryable());
        assert!(Error::http_status(429, "").is_retryable());
        assert!(Error::http_status(500, "").is_retryable());
        assert!(Error::http_status(503, "").is_retryable());
        assert!(Error::http_status(522, "").is_retryable());
        assert!(Error::Api {
            status: 524,
            message: "A timeout occurred".to_string(),
            documentation_url: None,
        }
        .is_retryable());

        assert!(!Error::http_status(400, "").is_retryable());
        assert!(!Error::http_status(401, "").is_retryable());
        assert!(!Error::http_status(404, "").is_retryable());
        assert!(!Error::http_status(501, "").is_retryable());
        assert!(!Error::config("test").is_retryable());
        assert!(!Error::RateLimitExceeded {
            category: RateCategory::Core,
            reset: Utc::now(),
        }
        .is_retryable());
    }
}
