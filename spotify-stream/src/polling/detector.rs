//! Change detection between two playback observations
//!
//! Pure diffing logic: given the last known status and a newly polled one,
//! decide which events to emit and what to do with the finish prediction.
//! Applying the result is the state machine's job.

use std::time::Duration;

use spotify_api::PlaybackStatus;

use super::finish_timer::remaining_until_finish;
use crate::events::PlaybackEvent;

/// Outcome of comparing a new observation against the last known one
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// Events to emit, in emission order
    pub events: Vec<PlaybackEvent>,
    /// Replace the finish prediction with one firing after this delay
    pub finish_in: Option<Duration>,
    /// The loaded item changed since the last known observation
    pub track_changed: bool,
}

/// Diff `current` against `previous`
///
/// - `new_playback_state` is always first
/// - `is_playing_changed` / `progress_ms_changed` fire when the value differs,
///   an absent previous observation counts as different
/// - any present progress (including 0) reschedules the finish prediction
/// - a different item URI with a known previous observation emits an
///   immediate `track_finished` carrying `current`
pub fn detect_changes(previous: Option<&PlaybackStatus>, current: &PlaybackStatus) -> Transition {
    let mut events = vec![PlaybackEvent::NewPlaybackState(current.clone())];

    if previous.map(|p| p.is_playing) != Some(current.is_playing) {
        events.push(PlaybackEvent::IsPlayingChanged(current.is_playing));
    }

    if previous.map(|p| p.progress_ms) != Some(current.progress_ms) {
        events.push(PlaybackEvent::ProgressMsChanged(current.progress_ms));
    }

    let finish_in = current
        .progress_ms
        .map(|_| remaining_until_finish(current));

    let track_changed = previous.map_or(false, |p| p.track_uri() != current.track_uri());
    if track_changed {
        events.push(PlaybackEvent::TrackFinished(current.clone()));
    }

    Transition {
        events,
        finish_in,
        track_changed,
    }
}
