//! Configuration validation logic.

use std::sync::OnceLock;

use crate::config::loader::Config;
use crate::error::{Error, Result};
use regex::Regex;
use url::Url;

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_api_key(&config.api.api_key)?;
    validate_base_url(&config.api.base_url)?;
    validate_timeout(config.api.timeout_secs)?;

    Ok(())
}

/// Validate the API key.
pub fn validate_api_key(api_key: &str) -> Result<()> {
    let api_key = api_key.trim();
    if api_key.is_empty() {
        return Err(Error::MissingConfig(
            "api_key (set AIHUB_API_KEY or pass --api-key)".to_string(),
        ));
    }

    // Check for placeholder values
    let key_lower = api_key.to_lowercase();
    if key_lower.contains("replaceme") || key_lower.contains("your_api_key") {
        return Err(Error::ConfigValidation {
            field: "api_key".to_string(),
            message: "API key appears to be a placeholder. Please provide your AI-Hub API key."
                .to_string(),
        });
    }

    if api_key.chars().any(|c| c.is_control() || c.is_whitespace()) {
        return Err(Error::ConfigValidation {
            field: "api_key".to_string(),
            message: "API key must not contain whitespace or control characters".to_string(),
        });
    }

    Ok(())
}

/// Validate the base URL.
pub fn validate_base_url(base_url: &str) -> Result<()> {
    let url = Url::parse(base_url)?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(Error::ConfigValidation {
            field: "base_url".to_string(),
            message: format!("Unsupported scheme '{}'", url.scheme()),
        });
    }

    if url.cannot_be_a_base() {
        return Err(Error::ConfigValidation {
            field: "base_url".to_string(),
            message: format!("'{}' cannot be used as a base URL", base_url),
        });
    }

    Ok(())
}

/// Validate the request timeout.
pub fn validate_timeout(timeout_secs: u64) -> Result<()> {
    if timeout_secs == 0 {
        return Err(Error::ConfigValidation {
            field: "timeout_secs".to_string(),
            message: "Timeout must be at least 1 second".to_string(),
        });
    }
    Ok(())
}

fn dataset_key_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9._-]+$").unwrap())
}

/// Validate a dataset key before it is used as a URL segment and file name.
pub fn validate_dataset_key(dataset_key: &str) -> Result<()> {
    if dataset_key.trim().is_empty() {
        return Err(Error::MissingConfig("dataset_key".to_string()));
    }

    if dataset_key.contains("..") || !dataset_key_pattern().is_match(dataset_key) {
        return Err(Error::ConfigValidation {
            field: "dataset_key".to_string(),
            message: format!(
                "Dataset key '{}' contains invalid characters. Only alphanumeric characters, dots, hyphens and underscores are allowed.",
                dataset_key
            ),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key() {
        assert!(matches!(
            validate_api_key(""),
            Err(Error::MissingConfig(_))
        ));
        assert!(matches!(
            validate_api_key("   "),
            Err(Error::MissingConfig(_))
        ));
    }

    #[test]
    fn test_placeholder_api_key() {
        assert!(validate_api_key("REPLACEME").is_err());
        assert!(validate_api_key("abc def").is_err());
        assert!(validate_api_key("3F2A-91BC").is_ok());
    }

    #[test]
    fn test_base_url() {
        assert!(validate_base_url("https://api.aihub.or.kr").is_ok());
        assert!(validate_base_url("http://127.0.0.1:8080").is_ok());
        assert!(validate_base_url("ftp://api.aihub.or.kr").is_err());
        assert!(validate_base_url("not a url").is_err());
    }

    #[test]
    fn test_timeout() {
        assert!(validate_timeout(0).is_err());
        assert!(validate_timeout(1).is_ok());
    }

    #[test]
    fn test_dataset_key() {
        assert!(validate_dataset_key("123").is_ok());
        assert!(validate_dataset_key("71_abc-2").is_ok());
        assert!(validate_dataset_key("").is_err());
        assert!(validate_dataset_key("../etc").is_err());
        assert!(validate_dataset_key("a/b").is_err());
        assert!(validate_dataset_key("v1.2").is_ok());
    }

    #[test]
    fn test_validate_config() {
        let mut config = Config::default();
        assert!(validate_config(&config).is_err());
        config.api.api_key = "key".into();
        assert!(validate_config(&config).is_ok());
    }
}
