//! Play operation

use rest_client::Method;
use serde_json::{json, Value};

use crate::operation::require_non_empty;
use crate::{Result, SpotifyOperation};

/// `PUT /me/player/play` with a track list
pub struct PlayOperation;

/// Request for play operation
#[derive(Debug, Clone)]
pub struct PlayRequest {
    pub device_id: String,
    pub track_uri: String,
}

impl SpotifyOperation for PlayOperation {
    type Request = PlayRequest;
    type Response = ();

    const METHOD: Method = Method::PUT;
    const PATH: &'static str = "/me/player/play";

    fn validate(request: &Self::Request) -> Result<()> {
        require_non_empty("device_id", &request.device_id)?;
        require_non_empty("track_uri", &request.track_uri)
    }

    fn query(request: &Self::Request) -> Vec<(&'static str, String)> {
        vec![("device_id", request.device_id.clone())]
    }

    fn body(request: &Self::Request) -> Option<Value> {
        Some(json!({ "uris": [request.track_uri] }))
    }

    fn parse_response(_body: Option<Value>) -> Result<Self::Response> {
        // Play has no meaningful response data
        Ok(())
    }
}
