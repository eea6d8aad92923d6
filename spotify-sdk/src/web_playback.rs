//! Web playback SDK bootstrap
//!
//! Turns the host into a Spotify Connect device. The vendor SDK itself is
//! abstracted by [`WebPlaybackSdk`]; this module owns the process-wide,
//! load-once bookkeeping and the player creation handshake.

use std::fmt;
use std::sync::OnceLock;

use async_trait::async_trait;
use spotify_api::SharedTokenProvider;
use tokio::sync::OnceCell;

/// Volume used when the caller does not pick one
pub const DEFAULT_VOLUME: f32 = 1.0;

#[derive(Debug, thiserror::Error)]
pub enum WebPlaybackError {
    /// The SDK could not be loaded
    #[error("Failed to load web playback SDK: {0}")]
    Load(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The account cannot use web playback (e.g. not premium)
    #[error("Account error: {0}")]
    Account(String),

    #[error("Player initialization failed: {0}")]
    Initialization(String),

    #[error("Volume must be between 0.0 and 1.0, got {0}")]
    InvalidVolume(f32),
}

/// Options handed to the SDK when creating a player
#[derive(Clone)]
pub struct PlayerOptions {
    /// Name shown in Spotify Connect device lists
    pub name: String,
    /// Initial volume in `0.0..=1.0`
    pub volume: f32,
    /// Supplier the SDK calls whenever it needs a token
    pub tokens: SharedTokenProvider,
}

impl fmt::Debug for PlayerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlayerOptions")
            .field("name", &self.name)
            .field("volume", &self.volume)
            .finish_non_exhaustive()
    }
}

/// The vendor web playback SDK
#[async_trait]
pub trait WebPlaybackSdk: Send + Sync {
    /// Handle to a created player
    type Player: Send + Sync;

    /// Inject the SDK and wait until it reports readiness
    async fn load(&self) -> Result<(), WebPlaybackError>;

    async fn create_player(&self, options: PlayerOptions) -> Result<Self::Player, WebPlaybackError>;

    /// Connect the player and wait for its device id
    ///
    /// Fails with `Authentication`, `Account` or `Initialization` when the SDK
    /// reports the corresponding error before becoming ready.
    async fn connect(&self, player: &Self::Player) -> Result<String, WebPlaybackError>;
}

/// Runs the SDK's `load()` at most once
///
/// Concurrent callers wait for the same load. A successful load is cached;
/// a failed one is not, so the next caller tries again.
#[derive(Debug, Default)]
pub struct SdkLoader {
    ready: OnceCell<()>,
}

impl SdkLoader {
    pub fn new() -> Self {
        Self {
            ready: OnceCell::new(),
        }
    }

    /// The process-wide loader used by [`create`]
    pub fn global() -> &'static SdkLoader {
        static GLOBAL: OnceLock<SdkLoader> = OnceLock::new();
        GLOBAL.get_or_init(SdkLoader::new)
    }

    pub async fn ensure_loaded<S>(&self, sdk: &S) -> Result<(), WebPlaybackError>
    where
        S: WebPlaybackSdk + ?Sized,
    {
        self.ready
            .get_or_try_init(|| async {
                tracing::debug!("Loading web playback SDK");
                sdk.load().await
            })
            .await
            .map(|_| ())
    }

    pub fn is_loaded(&self) -> bool {
        self.ready.initialized()
    }
}

/// Create and connect a player, loading the SDK first if needed
///
/// Returns the device id the player registered as, together with the player.
pub async fn create<S: WebPlaybackSdk>(
    sdk: &S,
    tokens: SharedTokenProvider,
    name: &str,
    volume: Option<f32>,
) -> Result<(String, S::Player), WebPlaybackError> {
    create_with_loader(SdkLoader::global(), sdk, tokens, name, volume).await
}

/// [`create`] with an explicit loader instead of the global one
pub async fn create_with_loader<S: WebPlaybackSdk>(
    loader: &SdkLoader,
    sdk: &S,
    tokens: SharedTokenProvider,
    name: &str,
    volume: Option<f32>,
) -> Result<(String, S::Player), WebPlaybackError> {
    let volume = volume.unwrap_or(DEFAULT_VOLUME);
    if !(0.0..=1.0).contains(&volume) {
        return Err(WebPlaybackError::InvalidVolume(volume));
    }

    loader.ensure_loaded(sdk).await?;

    let player = sdk
        .create_player(PlayerOptions {
            name: name.to_string(),
            volume,
            tokens,
        })
        .await?;

    let device_id = sdk.connect(&player).await?;
    tracing::info!("Web playback player '{}' ready as device {}", name, device_id);

    Ok((device_id, player))
}

#[cfg(test)]
mod tests {
    use super::*;
    use spotify_api::{StaticToken, TokenProvider};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct FakeSdk {
        loads: AtomicUsize,
        fail_loads: AtomicUsize,
        connect_error: Option<&'static str>,
        created: Mutex<Vec<(String, f32)>>,
    }

    #[async_trait]
    impl WebPlaybackSdk for FakeSdk {
        type Player = String;

        async fn load(&self) -> Result<(), WebPlaybackError> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            if self.fail_loads.load(Ordering::SeqCst) > 0 {
                self.fail_loads.fetch_sub(1, Ordering::SeqCst);
                return Err(WebPlaybackError::Load("script blocked".to_string()));
            }
            Ok(())
        }

        async fn create_player(&self, options: PlayerOptions) -> Result<String, WebPlaybackError> {
            assert_eq!(options.tokens.oauth_token().await.unwrap(), "token");
            self.created
                .lock()
                .unwrap()
                .push((options.name.clone(), options.volume));
            Ok(options.name)
        }

        async fn connect(&self, player: &String) -> Result<String, WebPlaybackError> {
            match self.connect_error {
                Some(message) => Err(WebPlaybackError::Account(message.to_string())),
                None => Ok(format!("device-{}", player)),
            }
        }
    }

    fn tokens() -> SharedTokenProvider {
        Arc::new(StaticToken::new("token"))
    }

    #[tokio::test]
    async fn test_create_defaults_volume() {
        let loader = SdkLoader::new();
        let sdk = FakeSdk::default();

        let (device_id, player) = create_with_loader(&loader, &sdk, tokens(), "Kitchen", None)
            .await
            .unwrap();

        assert_eq!(device_id, "device-Kitchen");
        assert_eq!(player, "Kitchen");
        assert_eq!(*sdk.created.lock().unwrap(), vec![("Kitchen".to_string(), 1.0)]);
    }

    #[tokio::test]
    async fn test_sdk_loaded_once() {
        let loader = SdkLoader::new();
        let sdk = FakeSdk::default();
        assert!(!loader.is_loaded());

        for name in ["a", "b", "c"] {
            create_with_loader(&loader, &sdk, tokens(), name, Some(0.5))
                .await
                .unwrap();
        }

        assert!(loader.is_loaded());
        assert_eq!(sdk.loads.load(Ordering::SeqCst), 1);
        assert_eq!(sdk.created.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_concurrent_loads_share_one_attempt() {
        let loader = SdkLoader::new();
        let sdk = FakeSdk::default();

        let (first, second) = tokio::join!(loader.ensure_loaded(&sdk), loader.ensure_loaded(&sdk));
        assert!(first.is_ok() && second.is_ok());
        assert_eq!(sdk.loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_load_is_retried() {
        let loader = SdkLoader::new();
        let sdk = FakeSdk {
            fail_loads: AtomicUsize::new(1),
            ..Default::default()
        };

        let error = create_with_loader(&loader, &sdk, tokens(), "a", None)
            .await
            .unwrap_err();
        assert!(matches!(error, WebPlaybackError::Load(_)));
        assert!(!loader.is_loaded());

        create_with_loader(&loader, &sdk, tokens(), "a", None)
            .await
            .unwrap();
        assert_eq!(sdk.loads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalid_volume_rejected_before_loading() {
        let loader = SdkLoader::new();
        let sdk = FakeSdk::default();

        for volume in [-0.1, 1.5, f32::NAN] {
            let error = create_with_loader(&loader, &sdk, tokens(), "a", Some(volume))
                .await
                .unwrap_err();
            assert!(matches!(error, WebPlaybackError::InvalidVolume(_)));
        }
        assert_eq!(sdk.loads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_connect_error_is_returned() {
        let sdk = FakeSdk {
            connect_error: Some("premium required"),
            ..Default::default()
        };

        let error = create_with_loader(&SdkLoader::new(), &sdk, tokens(), "a", None)
            .await
            .unwrap_err();
        assert_eq!(error.to_string(), "Account error: premium required");
    }

    #[test]
    fn test_global_loader_is_shared() {
        assert!(std::ptr::eq(SdkLoader::global(), SdkLoader::global()));
    }

    #[test]
    fn test_player_options_debug_hides_tokens() {
        let options = PlayerOptions {
            name: "Kitchen".to_string(),
            volume: 0.3,
            tokens: tokens(),
        };
        let debug = format!("{:?}", options);
        assert!(debug.contains("Kitchen"));
        assert!(!debug.contains("tokens"));
    }
}
