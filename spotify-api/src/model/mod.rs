//! Web API data model
//!
//! Only the fields the SDK relies on are mandatory; everything else the API
//! returns is either optional here or ignored during deserialization.

mod device;
mod playback_status;
mod track;

pub use device::Device;
pub use playback_status::{PlaybackStatus, RepeatState};
pub use track::{Artist, Track};
