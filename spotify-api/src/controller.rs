//! Playback gateway
//!
//! Issues remote playback commands for a single device. The gateway keeps no
//! state: the effect of a command is only observed by the next status poll.

use crate::operations::player::{
    PauseOperation, PauseRequest, PlayOperation, PlayRequest, ResumeOperation, ResumeRequest,
};
use crate::{Result, SpotifyClient};

/// Remote playback commands bound to one device
#[derive(Debug, Clone)]
pub struct PlaybackGateway {
    client: SpotifyClient,
    device_id: String,
}

impl PlaybackGateway {
    pub fn new(client: SpotifyClient, device_id: impl Into<String>) -> Self {
        Self {
            client,
            device_id: device_id.into(),
        }
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn client(&self) -> &SpotifyClient {
        &self.client
    }

    /// Play the given track on this device
    pub async fn play(&self, track_uri: &str) -> Result<()> {
        tracing::debug!("Playing {} on device {}", track_uri, self.device_id);
        self.client
            .execute::<PlayOperation>(&PlayRequest {
                device_id: self.device_id.clone(),
                track_uri: track_uri.to_string(),
            })
            .await
    }

    /// Pause playback on this device
    pub async fn pause(&self) -> Result<()> {
        tracing::debug!("Pausing device {}", self.device_id);
        self.client
            .execute::<PauseOperation>(&PauseRequest {
                device_id: self.device_id.clone(),
            })
            .await
    }

    /// Resume whatever was last active on this device
    pub async fn resume(&self) -> Result<()> {
        tracing::debug!("Resuming device {}", self.device_id);
        self.client
            .execute::<ResumeOperation>(&ResumeRequest {
                device_id: self.device_id.clone(),
            })
            .await
    }
}
