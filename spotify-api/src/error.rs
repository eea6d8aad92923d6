use rest_client::TransportError;
use thiserror::Error;

/// Failure to obtain an OAuth bearer token
#[derive(Debug, Error)]
pub enum AuthError {
    /// The token supplier could not produce a token
    #[error("OAuth token unavailable: {0}")]
    TokenUnavailable(String),

    /// The token supplier refused to produce a token (revoked grant, missing scope)
    #[error("OAuth token rejected: {0}")]
    Rejected(String),
}

/// High-level API errors for Web API operations
///
/// Wraps the two opaque failure sources of every call (the transport and the
/// token supplier) together with the errors this crate raises itself.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network, HTTP or body decoding failure
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The OAuth token could not be obtained
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// The response body did not have the expected shape
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid parameter value
    ///
    /// Returned before any request is sent, e.g. for an empty track URI.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl ApiError {
    /// Whether this error is an authentication failure, either from the token
    /// supplier or from the API rejecting the token
    pub fn is_auth_failure(&self) -> bool {
        match self {
            ApiError::Auth(_) => true,
            ApiError::Transport(e) => e.status() == Some(401),
            _ => false,
        }
    }
}

/// Type alias for results that can return an ApiError
pub type Result<T> = std::result::Result<T, ApiError>;
