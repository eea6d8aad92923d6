use spotify_api::ApiError;
use spotify_stream::PollerError;
use thiserror::Error;

use crate::web_playback::WebPlaybackError;

#[derive(Error, Debug)]
pub enum SdkError {
    #[error("API error: {0}")]
    ApiError(#[from] ApiError),

    #[error("Polling error: {0}")]
    PollerError(#[from] PollerError),

    #[error("Web playback error: {0}")]
    WebPlayback(#[from] WebPlaybackError),

    #[error("Device id must not be empty")]
    MissingDeviceId,
}
