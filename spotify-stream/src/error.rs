//! Error types for the spotify-stream crate.

use spotify_api::ApiError;

/// Errors from the polling state machine.
#[derive(Debug, thiserror::Error)]
pub enum PollerError {
    /// `start()` was called on a machine that is already polling
    #[error("Polling already started")]
    AlreadyStarted,

    /// The machine has been stopped and cannot be restarted
    #[error("Polling has been stopped")]
    Stopped,

    /// `start()` was called outside of a tokio runtime
    #[error("No tokio runtime available to run the polling loop")]
    NoRuntime,

    /// Invalid configuration provided
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An event name that does not exist
    #[error("Unknown event: {0}")]
    UnknownEvent(String),

    /// The loop gave up after too many consecutive failed polls
    #[error("Polling stopped after {consecutive_errors} consecutive failures: {source}")]
    Fetch {
        consecutive_errors: u32,
        #[source]
        source: ApiError,
    },

    /// The polling task panicked or was cancelled
    #[error("Polling task failed: {0}")]
    TaskJoin(String),
}

/// Convenience type alias for Results using PollerError.
pub type PollerResult<T> = std::result::Result<T, PollerError>;
