//! Configuration structures
//!
//! Declarative configuration for the client, deserializable from JSON or
//! TOML. Loading (env probing, file fallback) lives in the client crate.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use crate::errors::{PeakFormError, Result};

/// Top-level client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Remote API settings
    pub api: ApiConfig,
}

/// Remote API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL for the backend (e.g., "https://api.peakform.app/v1")
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.peakform.app/v1".to_string(),
            timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { api: ApiConfig::default() }
    }
}

impl ClientConfig {
    /// Validate the configuration
    ///
    /// # Errors
    /// Returns `PeakFormError::Config` if the base URL is empty, is not
    /// http(s), or the timeout is zero.
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.is_empty() {
            return Err(PeakFormError::Config("API base URL must not be empty".to_string()));
        }
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://") {
            return Err(PeakFormError::Config(format!(
                "API base URL must be http(s): {}",
                self.api.base_url
            )));
        }
        if self.api.timeout_seconds == 0 {
            return Err(PeakFormError::Config("Request timeout must be non-zero".to_string()));
        }
        Ok(())
    }
}
