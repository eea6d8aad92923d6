//! The status source the polling loop reads from

use std::sync::Arc;

use async_trait::async_trait;
use spotify_api::{ApiError, PlaybackStatus, SpotifyClient};

/// Fetches the current remote playback status
///
/// `Ok(None)` means the service reported no active playback. Errors cover both
/// token retrieval and transport failures.
#[async_trait]
pub trait StatusFetcher: Send + Sync {
    async fn fetch_status(&self) -> Result<Option<PlaybackStatus>, ApiError>;
}

#[async_trait]
impl StatusFetcher for SpotifyClient {
    async fn fetch_status(&self) -> Result<Option<PlaybackStatus>, ApiError> {
        self.playback_state().await
    }
}

#[async_trait]
impl<T: StatusFetcher + ?Sized> StatusFetcher for Arc<T> {
    async fn fetch_status(&self) -> Result<Option<PlaybackStatus>, ApiError> {
        (**self).fetch_status().await
    }
}
