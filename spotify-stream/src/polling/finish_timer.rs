//! One-shot "track finished" prediction timer
//!
//! Between two polls the poller predicts when the current track will end. The
//! prediction is a spawned task sleeping for the remaining duration; its
//! handle is owned by the state machine and aborted whenever a newer
//! prediction supersedes it.

use std::time::Duration;

use spotify_api::PlaybackStatus;
use tokio::task::JoinHandle;

/// Time left in the current item: `max(0, duration - progress)`
///
/// A status without an item counts as zero duration.
pub fn remaining_until_finish(status: &PlaybackStatus) -> Duration {
    let progress = status.progress_ms.unwrap_or(0);
    Duration::from_millis(status.duration_ms().saturating_sub(progress))
}

/// Handle to a scheduled prediction
///
/// The `generation` identifies the prediction: a timer task that wakes up
/// after being superseded finds a different generation in the state machine
/// and does nothing.
#[derive(Debug)]
pub(crate) struct FinishTimer {
    generation: u64,
    handle: JoinHandle<()>,
}

impl FinishTimer {
    pub(crate) fn new(generation: u64, handle: JoinHandle<()>) -> Self {
        Self { generation, handle }
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    /// Abort the timer task
    pub(crate) fn cancel(self) {
        self.handle.abort();
    }
}
