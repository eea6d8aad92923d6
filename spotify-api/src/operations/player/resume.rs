//! Resume operation
//!
//! Resuming is a play request without a track list: the device continues
//! whatever was last active.

use rest_client::Method;
use serde_json::Value;

use crate::operation::require_non_empty;
use crate::{Result, SpotifyOperation};

/// `PUT /me/player/play` without a body
pub struct ResumeOperation;

#[derive(Debug, Clone)]
pub struct ResumeRequest {
    pub device_id: String,
}

impl SpotifyOperation for ResumeOperation {
    type Request = ResumeRequest;
    type Response = ();

    const METHOD: Method = Method::PUT;
    const PATH: &'static str = "/me/player/play";

    fn validate(request: &Self::Request) -> Result<()> {
        require_non_empty("device_id", &request.device_id)
    }

    fn query(request: &Self::Request) -> Vec<(&'static str, String)> {
        vec![("device_id", request.device_id.clone())]
    }

    fn parse_response(_body: Option<Value>) -> Result<Self::Response> {
        Ok(())
    }
}
