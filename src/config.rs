//! Client configuration
//!
//! A [`ClientConfig`] is built from defaults, optionally a JSON file, and
//! then the environment:
//!
//! ```json
//! {
//!   "api_url": "https://github.example.com/api/v3",
//!   "http": {
//!     "timeout_seconds": 60,
//!     "max_retries": 5,
//!     "retry_backoff": { "type": "exponential", "initial_ms": 200 },
//!     "rate_limit": { "requests_per_second": 5, "burst_size": 5 }
//!   }
//! }
//! ```
//!
//! `GITHUB_TOKEN` (or `GH_TOKEN`) supplies the token and `GITHUB_API_URL`
//! overrides the API root.

use crate::auth::AuthConfig;
use crate::error::{Error, Result};
use crate::github::{API_VERSION, DEFAULT_API_URL, MEDIA_TYPE};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::types::{BackoffType, LogLevel};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Environment variables read by [`ClientConfig::apply_env`], in priority order
pub const TOKEN_ENV_VARS: [&str; 2] = ["GITHUB_TOKEN", "GH_TOKEN"];

/// Environment variable overriding the API root
pub const API_URL_ENV_VAR: &str = "GITHUB_API_URL";

// ============================================================================
// Client Config
// ============================================================================

/// Complete client configuration
#[derive(Clone, Deserialize)]
pub struct ClientConfig {
    /// API root, e.g. `https://api.github.com`
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Token sent as a bearer credential
    #[serde(default)]
    pub token: Option<String>,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Transport settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Log level for the command-line tool
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            token: None,
            user_agent: None,
            http: HttpConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_url", &self.api_url)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("user_agent", &self.user_agent)
            .field("http", &self.http)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl ClientConfig {
    /// Load a configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
            .map_err(|e| Error::config(format!("{}: {e}", path.display())))
    }

    /// Parse a configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Defaults overridden by the process environment
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Apply `GITHUB_TOKEN`/`GH_TOKEN` and `GITHUB_API_URL` from the process environment
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Apply environment overrides read through `lookup`
    ///
    /// Empty values are ignored.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = TOKEN_ENV_VARS.iter().find_map(|&key| lookup(key)) {
            self.token = Some(token);
        }
        if let Some(url) = lookup(API_URL_ENV_VAR) {
            self.api_url = url;
        }
    }

    /// Set the token
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the API root
    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Check every value before a client is built from it
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.api_url)
            .map_err(|e| Error::invalid_config("api_url", e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_config(
                "api_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        if matches!(&self.token, Some(t) if t.trim().is_empty()) {
            return Err(Error::invalid_config("token", "must not be empty"));
        }

        self.http.validate()
    }

    /// Credentials derived from the token
    pub fn auth(&self) -> AuthConfig {
        match &self.token {
            Some(token) => AuthConfig::bearer(token.clone()),
            None => AuthConfig::None,
        }
    }

    /// Transport configuration with GitHub's default headers
    pub fn to_http_config(&self) -> HttpClientConfig {
        let backoff = &self.http.retry_backoff;
        let mut builder = HttpClientConfig::builder()
            .base_url(self.api_url.clone())
            .timeout(Duration::from_secs(self.http.timeout_seconds))
            .max_retries(self.http.max_retries)
            .backoff(
                backoff.backoff_type,
                Duration::from_millis(backoff.initial_ms),
                Duration::from_millis(backoff.max_ms),
            )
            .header("Accept", MEDIA_TYPE)
            .header("X-GitHub-Api-Version", API_VERSION)
            .auth(self.auth());

        builder = match &self.http.rate_limit {
            Some(rate_limit) => builder.rate_limit(rate_limit.clone()),
            None => builder.no_rate_limit(),
        };

        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent.clone());
        }

        builder.build()
    }
}

// ============================================================================
// HTTP Config
// ============================================================================

/// Transport settings
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Maximum number of retries
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Retry backoff configuration
    #[serde(default)]
    pub retry_backoff: BackoffConfig,

    /// Client-side throttling; `null` disables it
    #[serde(default = "default_rate_limit")]
    pub rate_limit: Option<RateLimiterConfig>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
            retry_backoff: BackoffConfig::default(),
            rate_limit: default_rate_limit(),
        }
    }
}

impl HttpConfig {
    fn validate(&self) -> Result<()> {
        if self.timeout_seconds == 0 {
            return Err(Error::invalid_config("http.timeout_seconds", "must be positive"));
        }
        if self.retry_backoff.initial_ms > self.retry_backoff.max_ms {
            return Err(Error::invalid_config(
                "http.retry_backoff",
                "initial_ms must not exceed max_ms",
            ));
        }
        if let Some(rate_limit) = &self.rate_limit {
            if rate_limit.requests_per_second == 0 {
                return Err(Error::invalid_config(
                    "http.rate_limit.requests_per_second",
                    "must be positive",
                ));
            }
        }
        Ok(())
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_rate_limit() -> Option<RateLimiterConfig> {
    Some(RateLimiterConfig::default())
}

/// Backoff configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BackoffConfig {
    /// Type of backoff
    #[serde(rename = "type", default)]
    pub backoff_type: BackoffType,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_ms")]
    pub initial_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_ms")]
    pub max_ms: u64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            backoff_type: BackoffType::Exponential,
            initial_ms: default_initial_ms(),
            max_ms: default_max_ms(),
        }
    }
}

fn default_initial_ms() -> u64 {
    100
}

fn default_max_ms() -> u64 {
    60000
}
