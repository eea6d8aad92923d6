//! Private REST client for Web API communication
//!
//! This crate provides a minimal async HTTP client specifically designed for
//! the music service's JSON Web API: bearer authentication, JSON request
//! bodies, retries for transient failures, and `204 No Content` handling.

mod config;
mod error;

pub use config::{ClientConfig, RetryPolicy, DEFAULT_BASE_URL, MAX_RETRY_DELAY};
pub use error::TransportError;
pub use reqwest::Method;

use serde_json::Value;
use url::Url;

/// A single request against the Web API
#[derive(Debug, Clone)]
pub struct RestRequest<'a> {
    pub method: Method,
    /// Path relative to the base URL, e.g. `/me/player`
    pub path: &'a str,
    pub query: Vec<(&'static str, String)>,
    pub bearer_token: &'a str,
    pub body: Option<Value>,
}

impl<'a> RestRequest<'a> {
    pub fn new(method: Method, path: &'a str, bearer_token: &'a str) -> Self {
        Self {
            method,
            path,
            query: Vec::new(),
            bearer_token,
            body: None,
        }
    }

    pub fn with_query(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.query.push((key, value.into()));
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// A minimal REST client for the Web API
#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
    retry: RetryPolicy,
}

impl RestClient {
    /// Create a new REST client with default configuration
    pub fn new() -> Result<Self, TransportError> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a REST client from an explicit configuration
    pub fn with_config(config: ClientConfig) -> Result<Self, TransportError> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| TransportError::Configuration(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            retry: config.retry,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Send a request and return the decoded JSON body
    ///
    /// Returns `Ok(None)` when the server answers with an empty body
    /// (typically `204 No Content`). Retryable failures are retried according
    /// to the configured [`RetryPolicy`].
    pub async fn send(&self, request: RestRequest<'_>) -> Result<Option<Value>, TransportError> {
        let url = self.build_url(request.path, &request.query)?;
        let mut attempt = 0;

        loop {
            match self.send_once(&request, &url).await {
                Ok(body) => return Ok(body),
                Err(e) if e.is_retryable() && attempt < self.retry.max_retries => {
                    attempt += 1;
                    let delay = self.retry.delay_for_attempt(attempt);
                    tracing::warn!(
                        "{} {} failed (attempt {}), retrying in {:?}: {}",
                        request.method,
                        request.path,
                        attempt,
                        delay,
                        e
                    );
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn send_once(
        &self,
        request: &RestRequest<'_>,
        url: &Url,
    ) -> Result<Option<Value>, TransportError> {
        tracing::debug!("{} {}", request.method, url);

        let mut builder = self
            .http
            .request(request.method.clone(), url.clone())
            .bearer_auth(request.bearer_token);

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            return Err(TransportError::Http {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        parse_body(&bytes)
    }

    fn build_url(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<Url, TransportError> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, path))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }
}

fn parse_body(bytes: &[u8]) -> Result<Option<Value>, TransportError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    Ok(Some(serde_json::from_slice(bytes)?))
}
