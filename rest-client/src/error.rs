//! Error types for the REST client

use thiserror::Error;

/// Errors that can occur while talking to the Web API
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network or connection level failure (DNS, refused connection, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success status code
    #[error("HTTP error: status {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body was not valid JSON
    #[error("JSON parsing error: {0}")]
    Parse(String),

    /// The request URL could not be constructed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl TransportError {
    /// Whether the request that produced this error may be retried
    ///
    /// Network failures are always retryable. HTTP failures are retryable for
    /// timeouts, rate limiting and transient server errors.
    pub fn is_retryable(&self) -> bool {
        match self {
            TransportError::Network(_) => true,
            TransportError::Http { status, .. } => {
                matches!(status, 408 | 413 | 429 | 500 | 502 | 503 | 504)
            }
            TransportError::Parse(_)
            | TransportError::InvalidUrl(_)
            | TransportError::Configuration(_) => false,
        }
    }

    /// HTTP status code, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        match error.status() {
            Some(status) => TransportError::Http {
                status: status.as_u16(),
                body: error.to_string(),
            },
            None => TransportError::Network(error.to_string()),
        }
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(error: serde_json::Error) -> Self {
        TransportError::Parse(error.to_string())
    }
}

impl From<url::ParseError> for TransportError {
    fn from(error: url::ParseError) -> Self {
        TransportError::InvalidUrl(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(408, true)]
    #[case(429, true)]
    #[case(500, true)]
    #[case(503, true)]
    #[case(400, false)]
    #[case(401, false)]
    #[case(404, false)]
    fn test_http_retryability(#[case] status: u16, #[case] retryable: bool) {
        let error = TransportError::Http {
            status,
            body: String::new(),
        };
        assert_eq!(error.is_retryable(), retryable);
        assert_eq!(error.status(), Some(status));
    }

    #[test]
    fn test_non_http_errors() {
        assert!(TransportError::Network("reset".to_string()).is_retryable());
        assert!(!TransportError::Parse("eof".to_string()).is_retryable());
        assert!(!TransportError::InvalidUrl("nope".to_string()).is_retryable());
        assert_eq!(TransportError::Network("reset".to_string()).status(), None);
    }

    #[test]
    fn test_error_display() {
        let error = TransportError::Http {
            status: 503,
            body: "unavailable".to_string(),
        };
        assert_eq!(error.to_string(), "HTTP error: status 503: unavailable");

        let error = TransportError::Network("connection refused".to_string());
        assert_eq!(error.to_string(), "Network error: connection refused");
    }
}
