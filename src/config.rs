//! Executor configuration.
//!
//! [`ExecutorConfig`] is plain data. Validation (non-empty API key, parseable
//! base URL) happens when an [`crate::Executor`] is built from it.

use crate::{Error, Result};
use std::time::Duration;

/// The production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.rocketreach.co/api/v2";

/// Per-attempt request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Retries after the first attempt used when none is configured.
pub const DEFAULT_MAX_RETRIES: usize = 3;

/// Base of the exponential backoff used when none is configured.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "ROCKETREACH_API_KEY";
/// Environment variable overriding the base URL.
pub const ENV_BASE_URL: &str = "ROCKETREACH_BASE_URL";
/// Environment variable overriding the timeout, in milliseconds.
pub const ENV_TIMEOUT_MS: &str = "ROCKETREACH_TIMEOUT_MS";
/// Environment variable overriding the retry count.
pub const ENV_MAX_RETRIES: &str = "ROCKETREACH_MAX_RETRIES";
/// Environment variable overriding the backoff base, in milliseconds.
pub const ENV_RETRY_DELAY_MS: &str = "ROCKETREACH_RETRY_DELAY_MS";
/// Environment variable capping a rate-limit wait, in milliseconds.
pub const ENV_MAX_RATE_LIMIT_WAIT_MS: &str = "ROCKETREACH_MAX_RATE_LIMIT_WAIT_MS";

/// Settings for one [`crate::Executor`].
///
/// # Examples
///
/// ```
/// use rocketreach::ExecutorConfig;
/// use std::time::Duration;
///
/// let config = ExecutorConfig::builder("my-api-key")
///     .timeout(Duration::from_secs(10))
///     .max_retries(5)
///     .build();
///
/// assert_eq!(config.max_retries, 5);
/// assert_eq!(config.base_url, "https://api.rocketreach.co/api/v2");
/// ```
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// API root every request path is joined onto.
    pub base_url: String,

    /// Sent as the `Api-Key` header. Trimmed by the executor.
    pub api_key: String,

    /// Per-attempt timeout.
    pub timeout: Duration,

    /// Retries after the first attempt, so `3` permits four attempts total.
    pub max_retries: usize,

    /// Delay before the first retry of a transport failure. Doubles per
    /// attempt.
    pub base_retry_delay: Duration,

    /// Upper bound on one wait after a 429. `None` waits for exactly the
    /// server's `Retry-After`, however long that is.
    pub max_rate_limit_wait: Option<Duration>,
}

impl ExecutorConfig {
    /// Creates a config with default settings for the given key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            base_retry_delay: DEFAULT_RETRY_DELAY,
            max_rate_limit_wait: None,
        }
    }

    /// Creates a new builder seeded with defaults for the given key.
    pub fn builder(api_key: impl Into<String>) -> ExecutorConfigBuilder {
        ExecutorConfigBuilder {
            config: Self::new(api_key),
        }
    }

    /// Loads a config from `ROCKETREACH_*` environment variables.
    ///
    /// `ROCKETREACH_API_KEY` is required. The base URL, timeout, retry count
    /// and retry delay are optional overrides.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the key is missing or a numeric override
    /// does not parse.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup(ENV_API_KEY)
            .ok_or_else(|| Error::Config(format!("{} is not set", ENV_API_KEY)))?;

        let mut builder = Self::builder(api_key);
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            builder = builder.base_url(base_url);
        }
        if let Some(ms) = lookup(ENV_TIMEOUT_MS) {
            builder = builder.timeout(Duration::from_millis(parse_env(ENV_TIMEOUT_MS, &ms)?));
        }
        if let Some(retries) = lookup(ENV_MAX_RETRIES) {
            builder = builder.max_retries(parse_env(ENV_MAX_RETRIES, &retries)?);
        }
        if let Some(ms) = lookup(ENV_RETRY_DELAY_MS) {
            builder = builder
                .base_retry_delay(Duration::from_millis(parse_env(ENV_RETRY_DELAY_MS, &ms)?));
        }
        if let Some(ms) = lookup(ENV_MAX_RATE_LIMIT_WAIT_MS) {
            builder = builder.max_rate_limit_wait(Duration::from_millis(parse_env(
                ENV_MAX_RATE_LIMIT_WAIT_MS,
                &ms,
            )?));
        }
        Ok(builder.build())
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| Error::Config(format!("Invalid {}={:?}: {}", name, value, e)))
}

/// Builder for [`ExecutorConfig`].
#[derive(Debug, Clone)]
pub struct ExecutorConfigBuilder {
    config: ExecutorConfig,
}

impl ExecutorConfigBuilder {
    /// Sets the API root.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Sets the per-attempt timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Sets the number of retries after the first attempt.
    pub fn max_retries(mut self, max_retries: usize) -> Self {
        self.config.max_retries = max_retries;
        self
    }

    /// Sets the backoff base for transport failures.
    pub fn base_retry_delay(mut self, delay: Duration) -> Self {
        self.config.base_retry_delay = delay;
        self
    }

    /// Caps how long a single rate-limit wait may last.
    pub fn max_rate_limit_wait(mut self, max_wait: Duration) -> Self {
        self.config.max_rate_limit_wait = Some(max_wait);
        self
    }

    /// Builds the `ExecutorConfig`.
    pub fn build(self) -> ExecutorConfig {
        self.config
    }
}
