//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ROASTLINE_API_BASE_URL` - Base URL of the loyalty API
//!   (e.g., `https://shop.example.com/loyalty/`)
//!
//! ## Optional
//! - `ROASTLINE_DATA_DIR` - Directory for on-device state
//!   (default: `$HOME/.roastline`)
//! - `ROASTLINE_TIMEOUT_SECS` - Timeout in seconds for the short-deadline
//!   calls (favorites, comments, coupons, user lookup; default: 5)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default timeout for the short-deadline API calls.
const DEFAULT_SHORT_TIMEOUT_SECS: u64 = 5;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the loyalty API, without a trailing slash.
    pub base_url: String,
    /// Directory holding the persisted session and favorites records.
    pub data_dir: PathBuf,
    /// Timeout applied to the short-deadline calls.
    pub short_call_timeout: Duration,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or a value
    /// fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = validate_base_url(
            "ROASTLINE_API_BASE_URL",
            &get_required_env("ROASTLINE_API_BASE_URL")?,
        )?;

        let data_dir = std::env::var("ROASTLINE_DATA_DIR")
            .map_or_else(|_| default_data_dir(), PathBuf::from);

        let timeout_secs = match std::env::var("ROASTLINE_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|e| {
                ConfigError::InvalidEnvVar("ROASTLINE_TIMEOUT_SECS".to_owned(), e.to_string())
            })?,
            Err(_) => DEFAULT_SHORT_TIMEOUT_SECS,
        };

        Ok(Self {
            base_url,
            data_dir,
            short_call_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Build a configuration directly, validating the base URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `base_url` is not a valid
    /// absolute URL.
    pub fn new(base_url: &str, data_dir: PathBuf) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: validate_base_url("base_url", base_url)?,
            data_dir,
            short_call_timeout: Duration::from_secs(DEFAULT_SHORT_TIMEOUT_SECS),
        })
    }
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_owned()))
}

/// Validate a base URL and strip any trailing slash.
fn validate_base_url(name: &str, raw: &str) -> Result<String, ConfigError> {
    let url = Url::parse(raw)
        .map_err(|e| ConfigError::InvalidEnvVar(name.to_owned(), e.to_string()))?;
    if url.host_str().is_none() {
        return Err(ConfigError::InvalidEnvVar(
            name.to_owned(),
            "URL must have a host".to_owned(),
        ));
    }
    Ok(raw.trim_end_matches('/').to_owned())
}

/// Default on-device state directory: `$HOME/.roastline`, or the working
/// directory when no home is available.
fn default_data_dir() -> PathBuf {
    std::env::var_os("HOME").map_or_else(
        || PathBuf::from(".roastline"),
        |home| PathBuf::from(home).join(".roastline"),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_base_url_strips_trailing_slash() {
        let url = validate_base_url("TEST", "https://shop.example.com/loyalty/").unwrap();
        assert_eq!(url, "https://shop.example.com/loyalty");
    }

    #[test]
    fn test_validate_base_url_rejects_garbage() {
        assert!(validate_base_url("TEST", "not a url").is_err());
    }

    #[test]
    fn test_validate_base_url_requires_host() {
        assert!(validate_base_url("TEST", "file:///tmp/api").is_err());
    }

    #[test]
    fn test_new_applies_default_timeout() {
        let config =
            ClientConfig::new("https://shop.example.com/loyalty", PathBuf::from("/tmp/rl"))
                .unwrap();
        assert_eq!(config.short_call_timeout, Duration::from_secs(5));
    }
}
