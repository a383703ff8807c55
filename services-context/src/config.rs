//! Configuration types for the Context7 client.

use std::env;
use std::fmt;
use std::time::Duration;

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "CONTEXT7_API_KEY";

/// Environment variable overriding the API base URL.
pub const BASE_URL_VAR: &str = "CONTEXT7_BASE_URL";

/// Default Context7 API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.context7.com";

/// Fixed per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the Context7 client.
#[derive(Clone)]
pub struct ContextSearchConfig {
    /// Bearer token. `None` disables the client without failing construction.
    pub api_key: Option<String>,
    /// Base URL that endpoint paths are appended to.
    pub base_url: String,
    /// Upper bound for every request.
    pub timeout: Duration,
}

impl Default for ContextSearchConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ContextSearchConfig {
    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `CONTEXT7_API_KEY`: API key (unset or empty disables the client)
    /// - `CONTEXT7_BASE_URL`: API base URL (default: https://api.context7.com)
    pub fn from_env() -> Self {
        let api_key = env::var(API_KEY_VAR).ok().filter(|key| !key.trim().is_empty());
        let base_url = env::var(BASE_URL_VAR)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self {
            api_key,
            base_url,
            ..Self::default()
        }
    }

    /// Set the API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether an API key is present.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

// Keeps the key out of logs.
impl fmt::Debug for ContextSearchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextSearchConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
