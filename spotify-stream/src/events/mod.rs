//! Playback change events
//!
//! The poller emits four kinds of events. Each kind has a stable wire name
//! that can be used to register handlers by name.

mod registry;

pub use registry::{EventHandler, EventRegistry, HandlerId};

use std::fmt;
use std::str::FromStr;

use spotify_api::PlaybackStatus;

use crate::error::PollerError;

/// The four event kinds emitted by the poller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Every successful poll
    NewPlaybackState,
    /// `is_playing` differs from the previous observation
    IsPlayingChanged,
    /// `progress_ms` differs from the previous observation
    ProgressMsChanged,
    /// The current track ended (predicted) or was replaced
    TrackFinished,
}

impl EventKind {
    pub const ALL: [EventKind; 4] = [
        EventKind::NewPlaybackState,
        EventKind::IsPlayingChanged,
        EventKind::ProgressMsChanged,
        EventKind::TrackFinished,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::NewPlaybackState => "new_playback_state",
            EventKind::IsPlayingChanged => "is_playing_changed",
            EventKind::ProgressMsChanged => "progress_ms_changed",
            EventKind::TrackFinished => "track_finished",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = PollerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| PollerError::UnknownEvent(s.to_string()))
    }
}

/// An event together with its typed payload
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEvent {
    NewPlaybackState(PlaybackStatus),
    IsPlayingChanged(bool),
    ProgressMsChanged(Option<u64>),
    TrackFinished(PlaybackStatus),
}

impl PlaybackEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            PlaybackEvent::NewPlaybackState(_) => EventKind::NewPlaybackState,
            PlaybackEvent::IsPlayingChanged(_) => EventKind::IsPlayingChanged,
            PlaybackEvent::ProgressMsChanged(_) => EventKind::ProgressMsChanged,
            PlaybackEvent::TrackFinished(_) => EventKind::TrackFinished,
        }
    }
}
