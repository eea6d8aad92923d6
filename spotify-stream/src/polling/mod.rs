//! Polling-driven change detection
//!
//! - [`detector`]: pure diffing of two observations
//! - [`finish_timer`]: the one-shot track end prediction
//! - [`scheduler`]: the fixed-cadence polling loop
//! - [`state_machine`]: ties the pieces together behind [`PollingStateMachine`]

pub mod detector;
pub mod fetcher;
pub mod finish_timer;
pub mod scheduler;
pub mod state_machine;

pub use detector::{detect_changes, Transition};
pub use fetcher::StatusFetcher;
pub use finish_timer::remaining_until_finish;
pub use scheduler::next_wait;
pub use state_machine::PollingStateMachine;
