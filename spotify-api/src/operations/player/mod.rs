//! Player operations
//!
//! Operations for reading and controlling playback on a device.

mod get_playback_state;
mod pause;
mod play;
mod resume;

pub use get_playback_state::{GetPlaybackStateOperation, GetPlaybackStateRequest};
pub use pause::{PauseOperation, PauseRequest};
pub use play::{PlayOperation, PlayRequest};
pub use resume::{ResumeOperation, ResumeRequest};
