//! Get playback state operation

use rest_client::Method;
use serde_json::Value;

use crate::model::PlaybackStatus;
use crate::{ApiError, Result, SpotifyOperation};

/// `GET /me/player`
pub struct GetPlaybackStateOperation;

/// Request for the playback state
#[derive(Debug, Clone, Default)]
pub struct GetPlaybackStateRequest {
    /// Comma separated item types besides tracks, e.g. `episode`
    pub additional_types: Option<String>,
}

impl SpotifyOperation for GetPlaybackStateOperation {
    type Request = GetPlaybackStateRequest;
    /// `None` when nothing is playing (`204 No Content`)
    type Response = Option<PlaybackStatus>;

    const METHOD: Method = Method::GET;
    const PATH: &'static str = "/me/player";

    fn query(request: &Self::Request) -> Vec<(&'static str, String)> {
        request
            .additional_types
            .iter()
            .map(|types| ("additional_types", types.clone()))
            .collect()
    }

    fn parse_response(body: Option<Value>) -> Result<Self::Response> {
        match body {
            None => Ok(None),
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| ApiError::ParseError(format!("Invalid playback state: {}", e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_body_means_no_playback() {
        let response = GetPlaybackStateOperation::parse_response(None).unwrap();
        assert!(response.is_none());
    }

    #[test]
    fn test_parse_status() {
        let body = json!({
            "is_playing": true,
            "progress_ms": 1000,
            "item": { "uri": "spotify:track:1", "duration_ms": 5000 }
        });

        let status = GetPlaybackStateOperation::parse_response(Some(body))
            .unwrap()
            .unwrap();
        assert!(status.is_playing);
        assert_eq!(status.progress_ms, Some(1000));
        assert_eq!(status.duration_ms(), 5000);
    }

    #[test]
    fn test_parse_malformed_status() {
        let body = json!({ "is_playing": "yes" });
        let error = GetPlaybackStateOperation::parse_response(Some(body)).unwrap_err();
        assert!(matches!(error, ApiError::ParseError(_)));
    }

    #[test]
    fn test_query() {
        let request = GetPlaybackStateRequest {
            additional_types: Some("episode".to_string()),
        };
        assert_eq!(
            GetPlaybackStateOperation::query(&request),
            vec![("additional_types", "episode".to_string())]
        );
        assert!(GetPlaybackStateOperation::query(&GetPlaybackStateRequest::default()).is_empty());
    }
}
