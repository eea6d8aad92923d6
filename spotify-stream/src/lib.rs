//! Playback state tracking for spotify-sdk
//!
//! This crate polls the remote playback status at a fixed cadence, diffs each
//! observation against the previous one and emits change events:
//!
//! - `new_playback_state` on every successful poll
//! - `is_playing_changed` when playback starts or pauses
//! - `progress_ms_changed` when the reported progress moves
//! - `track_finished` when a track is replaced, or when the predicted end of
//!   the current track passes without a newer poll
//!
//! # Example
//!
//! ```no_run
//! use spotify_api::{SpotifyClient, StaticToken};
//! use spotify_stream::{PlaybackEvent, PollerConfig, PollingStateMachine};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = SpotifyClient::new(StaticToken::new("token"))?;
//! let machine = PollingStateMachine::new(client, PollerConfig::default())?;
//! let mut events = machine.subscribe();
//! machine.start()?;
//!
//! while let Some(event) = events.recv().await {
//!     if let PlaybackEvent::TrackFinished(status) = event {
//!         println!("finished {:?}", status.track_uri());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod polling;

pub use config::{PollerConfig, DEFAULT_POLL_INTERVAL};
pub use error::{PollerError, PollerResult};
pub use events::{EventHandler, EventKind, EventRegistry, HandlerId, PlaybackEvent};
pub use polling::{
    detect_changes, next_wait, remaining_until_finish, PollingStateMachine, StatusFetcher,
    Transition,
};

pub use spotify_api::PlaybackStatus;
