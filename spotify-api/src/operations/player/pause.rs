//! Pause operation

use rest_client::Method;
use serde_json::Value;

use crate::operation::require_non_empty;
use crate::{Result, SpotifyOperation};

/// `PUT /me/player/pause`
pub struct PauseOperation;

#[derive(Debug, Clone)]
pub struct PauseRequest {
    pub device_id: String,
}

impl SpotifyOperation for PauseOperation {
    type Request = PauseRequest;
    type Response = ();

    const METHOD: Method = Method::PUT;
    const PATH: &'static str = "/me/player/pause";

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

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_pause_has_no_body() {
        let request = PauseRequest {
            device_id: "device-1".to_string(),
        };
        assert!(PauseOperation::body(&request).is_none());
        assert_eq!(
            PauseOperation::query(&request),
            vec![("device_id", "device-1".to_string())]
        );
    }

    #[rstest]
    #[case("", false)]
    #[case("   ", false)]
    #[case("device-1", true)]
    fn test_pause_requires_device(#[case] device_id: &str, #[case] valid: bool) {
        let request = PauseRequest {
            device_id: device_id.to_string(),
        };
        assert_eq!(PauseOperation::validate(&request).is_ok(), valid);
    }
}
