//! Transport configuration
//!
//! Controls where requests are sent, how long they may take and how
//! transient failures are retried.

use std::time::Duration;

use crate::TransportError;

/// Default Web API root
pub const DEFAULT_BASE_URL: &str = "https://api.spotify.com/v1";

/// Upper bound for a single backoff delay
pub const MAX_RETRY_DELAY: Duration = Duration::from_secs(60);

/// Retry policy for transient request failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts
    pub max_retries: u32,
    /// Base delay between retries
    pub base_delay: Duration,
    /// Whether to use exponential backoff
    pub exponential_backoff: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(100),
            exponential_backoff: true,
        }
    }
}

impl RetryPolicy {
    /// Create a retry policy with no retries
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
            exponential_backoff: false,
        }
    }

    /// Create a retry policy with fixed delays
    pub fn fixed(max_retries: u32, delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay: delay,
            exponential_backoff: false,
        }
    }

    /// Create a retry policy with exponential backoff
    pub fn exponential(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
            exponential_backoff: true,
        }
    }

    /// Calculate the delay for a given retry attempt
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 || attempt > self.max_retries {
            return Duration::ZERO;
        }

        if self.exponential_backoff {
            2_u32
                .checked_pow(attempt - 1)
                .and_then(|factor| self.base_delay.checked_mul(factor))
                .map_or(MAX_RETRY_DELAY, |delay| delay.min(MAX_RETRY_DELAY))
        } else {
            self.base_delay.min(MAX_RETRY_DELAY)
        }
    }
}

/// Configuration for the REST client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root that request paths are appended to
    /// Default: `https://api.spotify.com/v1`
    pub base_url: String,

    /// Total timeout for a single attempt
    /// Default: 10 seconds
    pub timeout: Duration,

    /// Timeout for establishing a connection
    /// Default: 5 seconds
    pub connect_timeout: Duration,

    /// Retry policy for transient failures
    /// Default: 3 retries, exponential backoff from 100ms
    pub retry: RetryPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(5),
            retry: RetryPolicy::default(),
        }
    }
}

impl ClientConfig {
    /// Create a new ClientConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration and return any issues
    pub fn validate(&self) -> Result<(), TransportError> {
        url::Url::parse(&self.base_url)?;

        if self.timeout == Duration::ZERO {
            return Err(TransportError::Configuration(
                "Request timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_policy_none() {
        let policy = RetryPolicy::none();
        assert_eq!(policy.max_retries, 0);
        assert_eq!(policy.delay_for_attempt(1), Duration::ZERO);
    }

    #[test]
    fn test_retry_policy_fixed() {
        let policy = RetryPolicy::fixed(3, Duration::from_millis(500));
        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(500));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_millis(500));
        assert_eq!(policy.delay_for_attempt(4), Duration::ZERO);
    }

    #[test]
    fn test_retry_policy_exponential() {
        let policy = RetryPolicy::exponential(3, Duration::from_millis(100));
        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(100));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(200));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_millis(400));
        assert_eq!(policy.delay_for_attempt(4), Duration::ZERO);
    }

    #[test]
    fn test_exponential_delay_is_capped() {
        let policy = RetryPolicy::exponential(40, Duration::from_millis(100));
        assert_eq!(policy.delay_for_attempt(10), Duration::from_millis(51_200));
        assert_eq!(policy.delay_for_attempt(11), MAX_RETRY_DELAY);
        assert_eq!(policy.delay_for_attempt(33), MAX_RETRY_DELAY);
        assert_eq!(policy.delay_for_attempt(40), MAX_RETRY_DELAY);
    }

    #[test]
    fn test_fixed_delay_is_capped() {
        let policy = RetryPolicy::fixed(1, Duration::from_secs(3600));
        assert_eq!(policy.delay_for_attempt(1), MAX_RETRY_DELAY);
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.retry.max_retries, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let config = ClientConfig::new().with_base_url("not a url");
        assert!(config.validate().is_err());

        let config = ClientConfig::new().with_timeout(Duration::ZERO);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_builder_pattern() {
        let config = ClientConfig::new()
            .with_base_url("http://127.0.0.1:8080")
            .with_timeout(Duration::from_secs(2))
            .with_retry(RetryPolicy::none());

        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.timeout, Duration::from_secs(2));
        assert_eq!(config.retry, RetryPolicy::none());
        assert!(config.validate().is_ok());
    }
}
