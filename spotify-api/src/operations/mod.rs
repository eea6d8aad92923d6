//! Web API operations organized by API area

pub mod player;

// Re-export commonly used operations
pub use player::{GetPlaybackStateOperation, PauseOperation, PlayOperation, ResumeOperation};
