//! OAuth bearer token suppliers
//!
//! Every request asks its [`TokenProvider`] for a token right before it is
//! sent, so suppliers are free to cache and refresh tokens however they like.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AuthError;

/// Source of OAuth bearer tokens
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Suspend until a valid bearer token is available
    async fn oauth_token(&self) -> Result<String, AuthError>;
}

/// Shared, type-erased token supplier
pub type SharedTokenProvider = Arc<dyn TokenProvider>;

/// Any async closure returning a token is a token supplier
#[async_trait]
impl<F, Fut> TokenProvider for F
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<String, AuthError>> + Send,
{
    async fn oauth_token(&self) -> Result<String, AuthError> {
        (self)().await
    }
}

/// A fixed token, useful for scripts and tests
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl std::fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("StaticToken").field(&"<redacted>").finish()
    }
}

#[async_trait]
impl TokenProvider for StaticToken {
    async fn oauth_token(&self) -> Result<String, AuthError> {
        if self.0.is_empty() {
            return Err(AuthError::TokenUnavailable("empty token".to_string()));
        }
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_static_token() {
        let provider = StaticToken::new("abc");
        assert_eq!(provider.oauth_token().await.unwrap(), "abc");
    }

    #[tokio::test]
    async fn test_empty_static_token_is_unavailable() {
        let provider = StaticToken::new("");
        assert!(matches!(
            provider.oauth_token().await,
            Err(AuthError::TokenUnavailable(_))
        ));
    }

    #[test]
    fn test_static_token_debug_is_redacted() {
        let provider = StaticToken::new("super-secret");
        assert!(!format!("{:?}", provider).contains("super-secret"));
    }

    #[tokio::test]
    async fn test_closure_provider_is_called_per_request() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let provider: SharedTokenProvider = Arc::new(move || {
            let counter = Arc::clone(&counter);
            async move {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                Ok::<_, AuthError>(format!("token-{}", n))
            }
        });

        assert_eq!(provider.oauth_token().await.unwrap(), "token-0");
        assert_eq!(provider.oauth_token().await.unwrap(), "token-1");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
