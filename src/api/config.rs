//! HTTP client configuration and building logic.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;

use crate::config::Config;
use crate::error::{Error, Result};

/// Header carrying the API key on every request.
pub const API_KEY_HEADER: &str = "apikey";

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("AIHub-Rust-Client/", env!("CARGO_PKG_VERSION"));

/// Immutable settings a client is constructed from.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_key: String,
    pub base_url: String,
    /// Applied per request. Streaming downloads only fail when idle this long.
    pub timeout: Duration,
    pub download_dir: PathBuf,
}

impl ClientConfig {
    /// Settings for `api_key` with every other field at its default.
    pub fn new(api_key: impl Into<String>) -> Self {
        let defaults = Config::default();
        Self {
            api_key: api_key.into(),
            ..Self::from(&defaults)
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_download_dir(mut self, download_dir: impl Into<PathBuf>) -> Self {
        self.download_dir = download_dir.into();
        self
    }

    /// Builds the HTTP client with the API key and user agent installed.
    pub fn build_http_client(&self) -> Result<Client> {
        let mut api_key = HeaderValue::from_str(self.api_key.trim()).map_err(|_| {
            Error::ConfigValidation {
                field: "api_key".to_string(),
                message: "API key is not a valid HTTP header value".to_string(),
            }
        })?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, api_key);

        Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .connect_timeout(self.timeout)
            .read_timeout(self.timeout)
            .build()
            .map_err(|e| Error::Api(format!("Failed to create HTTP client: {}", e)))
    }
}

impl From<&Config> for ClientConfig {
    fn from(config: &Config) -> Self {
        Self {
            api_key: config.api.api_key.clone(),
            base_url: config.api.base_url.clone(),
            timeout: Duration::from_secs(config.api.timeout_secs),
            download_dir: config.download.directory.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_defaults() {
        let config = ClientConfig::new("key");
        assert_eq!(config.api_key, "key");
        assert_eq!(config.base_url, "https://api.aihub.or.kr");
        assert_eq!(config.timeout, Duration::from_secs(300));
        assert_eq!(config.download_dir, PathBuf::from("./downloads"));
    }

    #[test]
    fn test_from_config() {
        let mut config = Config::default();
        config.api.api_key = "k".into();
        config.api.timeout_secs = 12;
        config.download.directory = PathBuf::from("/tmp/out");

        let client_config = ClientConfig::from(&config);
        assert_eq!(client_config.timeout, Duration::from_secs(12));
        assert_eq!(client_config.download_dir, PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_build_http_client() {
        assert!(ClientConfig::new("abc").build_http_client().is_ok());
        assert!(ClientConfig::new("bad\nkey").build_http_client().is_err());
    }
}
