use std::sync::Arc;

use spotify_api::{
    ClientConfig, PlaybackGateway, PlaybackStatus, SharedTokenProvider, SpotifyClient,
    TokenProvider,
};
use spotify_stream::{EventKind, HandlerId, PlaybackEvent, PollerConfig, PollingStateMachine};
use tokio::sync::mpsc;

use crate::error::SdkError;
use crate::web_playback::{self, WebPlaybackSdk};

/// A Spotify Connect device: playback commands plus change events
///
/// Polling starts as soon as the player is built and runs until
/// [`destroy`](Self::destroy) or until the player is dropped.
#[derive(Debug)]
pub struct SpotifyPlayer {
    gateway: PlaybackGateway,
    machine: PollingStateMachine,
}

impl SpotifyPlayer {
    /// Build a polling player for `device_id` with default configuration
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(
        device_id: impl Into<String>,
        tokens: impl TokenProvider + 'static,
    ) -> Result<Self, SdkError> {
        Self::builder(device_id, tokens).build()
    }

    pub fn builder(
        device_id: impl Into<String>,
        tokens: impl TokenProvider + 'static,
    ) -> SpotifyPlayerBuilder {
        SpotifyPlayerBuilder::new(device_id, Arc::new(tokens))
    }

    /// Create a web playback device and start polling it
    ///
    /// Returns the player together with the SDK's player handle, which has to
    /// be kept alive for the device to stay connected.
    pub async fn connect<S: WebPlaybackSdk>(
        sdk: &S,
        tokens: SharedTokenProvider,
        name: &str,
        volume: Option<f32>,
    ) -> Result<(Self, S::Player), SdkError> {
        let (device_id, handle) =
            web_playback::create(sdk, Arc::clone(&tokens), name, volume).await?;
        let player = SpotifyPlayerBuilder::new(device_id, tokens).build()?;
        Ok((player, handle))
    }

    pub fn device_id(&self) -> &str {
        self.gateway.device_id()
    }

    /// Play a track on this device
    pub async fn play(&self, track_uri: &str) -> spotify_api::Result<()> {
        self.gateway.play(track_uri).await
    }

    pub async fn pause(&self) -> spotify_api::Result<()> {
        self.gateway.pause().await
    }

    /// Resume whatever was last playing
    pub async fn resume(&self) -> spotify_api::Result<()> {
        self.gateway.resume().await
    }

    /// Start polling for a player built with `start_polling(false)`
    pub fn start(&self) -> Result<(), SdkError> {
        Ok(self.machine.start()?)
    }

    pub fn on<F>(&self, kind: EventKind, handler: F) -> HandlerId
    where
        F: Fn(&PlaybackEvent) + Send + Sync + 'static,
    {
        self.machine.on(kind, handler)
    }

    /// Register a handler by event name (`"new_playback_state"`,
    /// `"is_playing_changed"`, `"progress_ms_changed"`, `"track_finished"`)
    pub fn on_named<F>(&self, name: &str, handler: F) -> Result<HandlerId, SdkError>
    where
        F: Fn(&PlaybackEvent) + Send + Sync + 'static,
    {
        Ok(self.machine.on_named(name, handler)?)
    }

    pub fn off(&self, id: HandlerId) -> bool {
        self.machine.off(id)
    }

    pub fn on_new_playback_state<F>(&self, handler: F) -> HandlerId
    where
        F: Fn(&PlaybackStatus) + Send + Sync + 'static,
    {
        self.machine.on_new_playback_state(handler)
    }

    pub fn on_is_playing_changed<F>(&self, handler: F) -> HandlerId
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.machine.on_is_playing_changed(handler)
    }

    pub fn on_progress_ms_changed<F>(&self, handler: F) -> HandlerId
    where
        F: Fn(Option<u64>) + Send + Sync + 'static,
    {
        self.machine.on_progress_ms_changed(handler)
    }

    pub fn on_track_finished<F>(&self, handler: F) -> HandlerId
    where
        F: Fn(&PlaybackStatus) + Send + Sync + 'static,
    {
        self.machine.on_track_finished(handler)
    }

    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<PlaybackEvent> {
        self.machine.subscribe()
    }

    pub fn last_known_state(&self) -> Option<PlaybackStatus> {
        self.machine.last_known_state()
    }

    pub fn is_polling(&self) -> bool {
        self.machine.is_active()
    }

    /// Stop polling; commands keep working
    pub fn destroy(&self) {
        self.machine.stop();
    }

    /// Stop polling and wait for the loop to exit
    pub async fn shutdown(&self) -> Result<(), SdkError> {
        Ok(self.machine.shutdown().await?)
    }

    pub fn state_machine(&self) -> &PollingStateMachine {
        &self.machine
    }
}

/// Builder for [`SpotifyPlayer`]
pub struct SpotifyPlayerBuilder {
    device_id: String,
    tokens: SharedTokenProvider,
    client_config: ClientConfig,
    poller_config: PollerConfig,
    start_polling: bool,
}

impl SpotifyPlayerBuilder {
    pub fn new(device_id: impl Into<String>, tokens: SharedTokenProvider) -> Self {
        Self {
            device_id: device_id.into(),
            tokens,
            client_config: ClientConfig::default(),
            poller_config: PollerConfig::default(),
            start_polling: true,
        }
    }

    pub fn with_client_config(mut self, config: ClientConfig) -> Self {
        self.client_config = config;
        self
    }

    pub fn with_poller_config(mut self, config: PollerConfig) -> Self {
        self.poller_config = config;
        self
    }

    /// Whether `build()` starts polling right away (default: true)
    ///
    /// Turning this off lets handlers be registered before the first poll.
    pub fn start_polling(mut self, start: bool) -> Self {
        self.start_polling = start;
        self
    }

    pub fn build(self) -> Result<SpotifyPlayer, SdkError> {
        if self.device_id.trim().is_empty() {
            return Err(SdkError::MissingDeviceId);
        }

        let client = SpotifyClient::with_config(self.client_config, self.tokens)?;
        let machine = PollingStateMachine::new(client.clone(), self.poller_config)?;

        if self.start_polling {
            machine.start()?;
        }

        tracing::info!("Created player for device {}", self.device_id);

        Ok(SpotifyPlayer {
            gateway: PlaybackGateway::new(client, self.device_id),
            machine,
        })
    }
}
