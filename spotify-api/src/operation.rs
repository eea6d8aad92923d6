//! Operation framework
//!
//! Every Web API call is described by a type implementing [`SpotifyOperation`]:
//! the HTTP method and path are associated constants, and the request and
//! response are strongly typed. [`SpotifyClient::execute`](crate::SpotifyClient::execute)
//! turns an operation into an actual request.

use rest_client::Method;
use serde_json::Value;

use crate::error::{ApiError, Result};

/// Base trait for all Web API operations
pub trait SpotifyOperation {
    /// The request data for this operation
    type Request;

    /// The typed response for this operation
    type Response;

    /// HTTP method used by this operation
    const METHOD: Method;

    /// Path relative to the API root, e.g. `/me/player`
    const PATH: &'static str;

    /// Reject invalid requests before anything is sent
    fn validate(_request: &Self::Request) -> Result<()> {
        Ok(())
    }

    /// Query string parameters
    fn query(_request: &Self::Request) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    /// JSON request body
    fn body(_request: &Self::Request) -> Option<Value> {
        None
    }

    /// Convert the (possibly empty) response body into the typed response
    fn parse_response(body: Option<Value>) -> Result<Self::Response>;
}

/// Ensure a required string parameter is non-empty
pub(crate) fn require_non_empty(parameter: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ApiError::InvalidParameter(format!(
            "Required parameter '{}' is empty",
            parameter
        )));
    }
    Ok(())
}
