//! Configuration for the polling state machine

use std::time::Duration;

use crate::error::{PollerError, PollerResult};

/// Target time between the starts of two consecutive polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Configuration for the PollingStateMachine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollerConfig {
    /// Cadence of the polling loop (time between loop starts, not sleep time)
    /// Default: 1000 ms
    pub poll_interval: Duration,

    /// Number of consecutive failed polls after which the loop gives up.
    /// `None` keeps polling forever.
    /// Default: Some(5)
    pub max_consecutive_errors: Option<u32>,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_consecutive_errors: Some(5),
        }
    }
}

impl PollerConfig {
    /// Create a new PollerConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop polling on the first failed poll
    pub fn fail_fast() -> Self {
        Self {
            max_consecutive_errors: Some(1),
            ..Default::default()
        }
    }

    /// Never stop polling because of failures
    pub fn resilient() -> Self {
        Self {
            max_consecutive_errors: None,
            ..Default::default()
        }
    }

    /// Validate the configuration and return any issues
    pub fn validate(&self) -> PollerResult<()> {
        if self.poll_interval == Duration::ZERO {
            return Err(PollerError::Configuration(
                "Poll interval must be greater than 0".to_string(),
            ));
        }

        if self.max_consecutive_errors == Some(0) {
            return Err(PollerError::Configuration(
                "Max consecutive errors must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_max_consecutive_errors(mut self, max: Option<u32>) -> Self {
        self.max_consecutive_errors = max;
        self
    }
}
