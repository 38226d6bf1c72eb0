//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `DEPORTES_API_URL` - Backend base URL (default: `http://localhost:8000`)
//! - `DEPORTES_REDIRECT_DELAY_MS` - Delay before the login redirect fires
//!   after a session-expired notification (default: 1500)

use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Backend the original client was built against.
const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Delay between the session-expired notification and the login redirect,
/// long enough for the notification to render first.
const DEFAULT_REDIRECT_DELAY: Duration = Duration::from_millis(1500);

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),

    #[error("Invalid base URL {0}: {1}")]
    InvalidBaseUrl(String, String),
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the backend API. Normalized to end in `/` so resource
    /// paths join under any path prefix.
    pub base_url: Url,
    /// Delay before the scheduled login redirect fires.
    pub redirect_delay: Duration,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = get_env_or_default("DEPORTES_API_URL", DEFAULT_API_URL)
            .parse::<Url>()
            .map(with_trailing_slash)
            .map_err(|e| {
                ConfigError::InvalidEnvVar("DEPORTES_API_URL".to_owned(), e.to_string())
            })?;

        let redirect_delay = match std::env::var("DEPORTES_REDIRECT_DELAY_MS") {
            Ok(value) => Duration::from_millis(value.parse::<u64>().map_err(|e| {
                ConfigError::InvalidEnvVar("DEPORTES_REDIRECT_DELAY_MS".to_owned(), e.to_string())
            })?),
            Err(_) => DEFAULT_REDIRECT_DELAY,
        };

        Ok(Self {
            base_url,
            redirect_delay,
        })
    }

    /// Build a configuration against an explicit base URL, keeping the
    /// default redirect delay.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the URL does not parse.
    pub fn for_base_url(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: base_url
                .parse::<Url>()
                .map(with_trailing_slash)
                .map_err(|e| {
                    ConfigError::InvalidBaseUrl(base_url.to_owned(), e.to_string())
                })?,
            redirect_delay: DEFAULT_REDIRECT_DELAY,
        })
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// `Url::join` drops the final path segment of a base that does not end in
/// `/`, so a prefix like `http://host/api` must be normalized before
/// resource paths are joined onto it.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_for_base_url() {
        let config = ApiConfig::for_base_url("http://localhost:8000").unwrap();
        assert_eq!(config.base_url.as_str(), "http://localhost:8000/");
        assert_eq!(config.redirect_delay, DEFAULT_REDIRECT_DELAY);
    }

    #[test]
    fn test_for_base_url_rejects_garbage() {
        assert!(matches!(
            ApiConfig::for_base_url("not a url"),
            Err(ConfigError::InvalidBaseUrl(..))
        ));
    }

    #[test]
    fn test_path_prefix_gains_trailing_slash() {
        let config = ApiConfig::for_base_url("http://localhost:8000/api").unwrap();
        assert_eq!(config.base_url.as_str(), "http://localhost:8000/api/");

        let joined = config.base_url.join("open/products").unwrap();
        assert_eq!(joined.as_str(), "http://localhost:8000/api/open/products");
    }
}
