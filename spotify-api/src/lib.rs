//! Typed Web API for playback control
//!
//! This crate provides a type-safe, trait-based API over the music service's
//! Web API. It uses the private `rest-client` crate for HTTP communication.
//!
//! # Overview
//!
//! - [`SpotifyOperation`] describes one endpoint (method, path, typed request
//!   and response); the player operations live in [`operations::player`]
//! - [`SpotifyClient`] executes operations, fetching a bearer token from a
//!   [`TokenProvider`] before every request
//! - [`PlaybackGateway`] binds the play / pause / resume commands to one device
//!
//! ```rust,ignore
//! use spotify_api::{PlaybackGateway, SpotifyClient, StaticToken};
//!
//! let client = SpotifyClient::new(StaticToken::new("BQD..."))?;
//! let gateway = PlaybackGateway::new(client.clone(), "device-id");
//!
//! gateway.play("spotify:track:4iV5W9uYEdYUVa79Axb7Rh").await?;
//! if let Some(status) = client.playback_state().await? {
//!     println!("playing: {}", status.is_playing);
//! }
//! ```

pub mod auth;
pub mod client;
pub mod controller;
pub mod error;
pub mod model;
pub mod operation;
pub mod operations;

pub use auth::{SharedTokenProvider, StaticToken, TokenProvider};
pub use client::SpotifyClient;
pub use controller::PlaybackGateway;
pub use error::{ApiError, AuthError, Result};
pub use model::{Artist, Device, PlaybackStatus, RepeatState, Track};
pub use operation::SpotifyOperation;

pub use rest_client::{ClientConfig, RetryPolicy, TransportError};
