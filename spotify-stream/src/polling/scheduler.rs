//! The polling loop
//!
//! One cooperative task: fetch, diff and emit, then wait out the rest of the
//! interval. The wait compensates for the time spent fetching so that the
//! loop keeps a constant cadence between iteration starts.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use super::state_machine::Shared;
use crate::error::{PollerError, PollerResult};

/// Time to wait before the next iteration: `max(interval - elapsed, 0)`
pub fn next_wait(interval: Duration, elapsed: Duration) -> Duration {
    interval.saturating_sub(elapsed)
}

/// Run until the machine stops or the failure limit is reached
pub(crate) async fn run_polling_loop(shared: Arc<Shared>) -> PollerResult<()> {
    let interval = shared.config().poll_interval;
    let max_errors = shared.config().max_consecutive_errors;
    let mut consecutive_errors: u32 = 0;

    tracing::info!("Polling loop started with interval {:?}", interval);

    while shared.is_active() {
        let started = Instant::now();

        match shared.fetcher().fetch_status().await {
            Ok(Some(status)) => {
                consecutive_errors = 0;
                tracing::debug!(
                    "Polled playback status: playing={} progress={:?}",
                    status.is_playing,
                    status.progress_ms
                );
                if !shared.apply(status) {
                    tracing::debug!("Discarding playback status fetched after stop");
                    break;
                }
            }
            Ok(None) => {
                consecutive_errors = 0;
                tracing::trace!("No active playback reported");
            }
            Err(e) => {
                if !shared.is_active() {
                    tracing::debug!("Discarding fetch failure after stop: {}", e);
                    break;
                }
                consecutive_errors += 1;
                match max_errors {
                    Some(max) if consecutive_errors >= max => {
                        tracing::error!(
                            "Polling stopped after {} consecutive failures: {}",
                            consecutive_errors,
                            e
                        );
                        shared.mark_failed();
                        return Err(PollerError::Fetch {
                            consecutive_errors,
                            source: e,
                        });
                    }
                    _ => {
                        tracing::warn!(
                            "Failed to fetch playback status (attempt {}): {}",
                            consecutive_errors,
                            e
                        );
                    }
                }
            }
        }

        let wait = next_wait(interval, started.elapsed());
        tracing::trace!("Next poll in {:?}", wait);

        tokio::select! {
            _ = tokio::time::sleep(wait) => {}
            _ = shared.wake().notified() => {}
        }
    }

    tracing::info!("Polling loop stopped");
    Ok(())
}
