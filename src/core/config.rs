//! Endpoint configuration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "GITHUB_TOKEN";

/// Environment variable overriding the base address
pub const ENDPOINT_ENV: &str = "MODELS_ENDPOINT";

/// Environment variable overriding the request timeout
pub const TIMEOUT_ENV: &str = "REQUEST_TIMEOUT_MS";

/// Default inference endpoint
pub const DEFAULT_BASE_URL: &str = "https://models.inference.ai.azure.com";

/// Default request timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 30000;

/// Opaque API token; never shown by `Debug`
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    /// Wrap a raw token
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token, for building request headers
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// True for an empty or whitespace-only token
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "Credential(<empty>)")
        } else {
            write!(f, "Credential(***)")
        }
    }
}

/// Where and how to reach the chat-completion service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// API key sent as a bearer token
    #[serde(default)]
    pub api_key: Credential,
    /// Base address; `/chat/completions` is appended
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            api_key: Credential::default(),
            base_url: default_base_url(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl EndpointConfig {
    /// Configuration with the default timeout
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: Credential::new(api_key),
            base_url: base_url.into(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_ENV)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("{} environment variable is required", API_KEY_ENV))?;

        let base_url = lookup(ENDPOINT_ENV).unwrap_or_else(default_base_url);

        let timeout_ms = match lookup(TIMEOUT_ENV) {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|e| anyhow::anyhow!("invalid {}: {}", TIMEOUT_ENV, e))?,
            None => DEFAULT_TIMEOUT_MS,
        };

        let config = Self {
            api_key: Credential::new(api_key),
            base_url,
            timeout_ms,
        };
        config.validate()?;

        info!("Loaded endpoint configuration for {}", config.base_url);
        Ok(config)
    }

    /// Load from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let config = Self::read_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON file without validating it, so callers can fill gaps first
    pub fn read_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;

        debug!("Loaded endpoint configuration from {}", path.display());
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_key.is_empty() {
            return Err(anyhow::anyhow!("API key is required"));
        }

        if self.base_url.trim().is_empty() {
            return Err(anyhow::anyhow!("API endpoint is required"));
        }

        if self.timeout_ms == 0 {
            return Err(anyhow::anyhow!("timeout_ms must be greater than 0"));
        }

        Ok(())
    }

    /// Full URL of the chat-completions route
    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}
