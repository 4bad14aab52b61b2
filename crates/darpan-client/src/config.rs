//! Client configuration.

use thiserror::Error;

/// Default service address — the port the original deployment serves on.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5001";

/// Default per-request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The base URL was empty.
    #[error("base URL must not be empty")]
    EmptyBaseUrl,
}

/// Configuration for a [`crate::DarpanClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the dashboard API (no trailing slash needed).
    pub base_url: String,
    /// Timeout applied to every request.
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Configuration for a given base URL with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Validate and normalize: non-empty base URL, trailing slash trimmed.
    pub fn normalized_base_url(&self) -> Result<String, ConfigError> {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        Ok(trimmed.to_string())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_service() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn normalization_trims_trailing_slash() {
        let config = ClientConfig::new("http://10.0.0.5:5001/");
        assert_eq!(
            config.normalized_base_url().unwrap(),
            "http://10.0.0.5:5001"
        );
    }

    #[test]
    fn empty_base_url_is_rejected() {
        assert_eq!(
            ClientConfig::new("  ").normalized_base_url(),
            Err(ConfigError::EmptyBaseUrl)
        );
    }
}
