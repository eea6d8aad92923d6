use std::sync::Arc;

use rest_client::{ClientConfig, RestClient, RestRequest};

use crate::auth::{SharedTokenProvider, TokenProvider};
use crate::model::PlaybackStatus;
use crate::operations::player::{GetPlaybackStateOperation, GetPlaybackStateRequest};
use crate::{Result, SpotifyOperation};

/// A client for executing Web API operations
///
/// This client bridges the stateless operation definitions and actual
/// network requests. A fresh bearer token is requested from the token
/// supplier before every request.
///
/// ```rust,ignore
/// use spotify_api::{SpotifyClient, StaticToken};
///
/// let client = SpotifyClient::new(StaticToken::new("BQD..."))?;
/// let status = client.playback_state().await?;
/// ```
#[derive(Clone)]
pub struct SpotifyClient {
    rest: RestClient,
    tokens: SharedTokenProvider,
}

impl SpotifyClient {
    /// Create a client with the default transport configuration
    pub fn new(tokens: impl TokenProvider + 'static) -> Result<Self> {
        Self::with_config(ClientConfig::default(), Arc::new(tokens))
    }

    /// Create a client with an explicit transport configuration
    pub fn with_config(config: ClientConfig, tokens: SharedTokenProvider) -> Result<Self> {
        Ok(Self {
            rest: RestClient::with_config(config)?,
            tokens,
        })
    }

    /// Create a client around an existing REST client (for advanced use cases)
    pub fn with_rest_client(rest: RestClient, tokens: SharedTokenProvider) -> Self {
        Self { rest, tokens }
    }

    /// Execute an operation
    ///
    /// The request is validated first, then a token is obtained, then the
    /// request is sent. Failures of any of these steps are returned as is.
    pub async fn execute<Op: SpotifyOperation>(
        &self,
        request: &Op::Request,
    ) -> Result<Op::Response> {
        Op::validate(request)?;

        let token = self.tokens.oauth_token().await?;

        let mut rest_request = RestRequest::new(Op::METHOD, Op::PATH, &token);
        rest_request.query = Op::query(request);
        rest_request.body = Op::body(request);

        let body = self.rest.send(rest_request).await?;
        Op::parse_response(body)
    }

    /// Current playback status, `None` when nothing is playing
    pub async fn playback_state(&self) -> Result<Option<PlaybackStatus>> {
        self.execute::<GetPlaybackStateOperation>(&GetPlaybackStateRequest::default())
            .await
    }

    pub fn rest_client(&self) -> &RestClient {
        &self.rest
    }
}

impl std::fmt::Debug for SpotifyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpotifyClient")
            .field("base_url", &self.rest.base_url())
            .finish_non_exhaustive()
    }
}
