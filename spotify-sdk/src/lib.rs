//! # Spotify SDK - playback control and change events
//!
//! Drives a Spotify Connect device over the Web API and reports what it is
//! doing:
//!
//! ```rust,no_run
//! use spotify_sdk::{SpotifyPlayer, StaticToken};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), spotify_sdk::SdkError> {
//!     let player = SpotifyPlayer::new("device-id", StaticToken::new("BQD..."))?;
//!
//!     player.on_is_playing_changed(|playing| println!("playing: {}", playing));
//!     player.on_track_finished(|status| println!("finished: {:?}", status.track_uri()));
//!
//!     player.play("spotify:track:4uLU6hMCjMI75M1A2tKUQC").await?;
//!     tokio::time::sleep(std::time::Duration::from_secs(30)).await;
//!     player.pause().await?;
//!
//!     player.shutdown().await
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! spotify-sdk (SpotifyPlayer, web playback bootstrap, logging)
//!     ↓
//! spotify-stream (polling state machine, change events)
//!     ↓
//! spotify-api (typed Web API operations, token suppliers)
//!     ↓
//! rest-client (HTTP transport with retries)
//! ```

pub use error::SdkError;
pub use player::{SpotifyPlayer, SpotifyPlayerBuilder};
pub use web_playback::{
    create, create_with_loader, PlayerOptions, SdkLoader, WebPlaybackError, WebPlaybackSdk,
    DEFAULT_VOLUME,
};

pub use spotify_api::{
    ApiError, AuthError, ClientConfig, PlaybackStatus, RetryPolicy, SharedTokenProvider,
    StaticToken, TokenProvider, Track,
};
pub use spotify_stream::{EventKind, HandlerId, PlaybackEvent, PollerConfig, PollerError};

mod error;
pub mod logging;
mod player;
pub mod web_playback;
