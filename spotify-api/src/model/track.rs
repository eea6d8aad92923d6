//! Track descriptor type

use serde::{Deserialize, Serialize};

/// An artist credited on a track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub name: String,
    #[serde(default)]
    pub uri: Option<String>,
}

/// The item currently loaded on the player (track or episode)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Unique identifier, e.g. `spotify:track:4iV5W9uYEdYUVa79Axb7Rh`
    pub uri: String,
    /// Total duration in milliseconds
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub artists: Vec<Artist>,
}

impl Track {
    /// Create a track with only the fields the poller needs
    pub fn new(uri: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            uri: uri.into(),
            duration_ms,
            id: None,
            name: None,
            artists: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Comma separated artist names
    pub fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
