//! Startup configuration for the upload proxy.

use std::env;

use reqwest::Url;

use crate::BACKEND_GEOLOCATE_PATH;

/// Environment variable naming the geolocation service base URL.
pub const BACKEND_BASE_URL_ENV: &str = "BACKEND_BASE_URL";

/// Used when `BACKEND_BASE_URL` is unset or blank.
pub const DEFAULT_BACKEND_BASE_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid backend base url '{value}': {reason}")]
    InvalidUrl { value: String, reason: String },
    #[error("backend base url '{0}' must use http or https")]
    UnsupportedScheme(String),
    #[error("failed to build backend http client: {0}")]
    Client(String),
}

/// Immutable proxy settings, read once when the server starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    backend_base_url: Url,
    geolocate_url: Url,
}

impl ProxyConfig {
    pub fn new(backend_base_url: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidUrl {
            value: backend_base_url.to_string(),
            reason,
        };

        let base = Url::parse(backend_base_url.trim()).map_err(|e| invalid(e.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(backend_base_url.to_string()));
        }

        // join() would drop the last path segment of a base without a
        // trailing slash, so append by hand.
        let geolocate_url = format!(
            "{}{}",
            base.as_str().trim_end_matches('/'),
            BACKEND_GEOLOCATE_PATH
        );
        let geolocate_url = Url::parse(&geolocate_url).map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            backend_base_url: base,
            geolocate_url,
        })
    }

    /// Creates the configuration from `BACKEND_BASE_URL`, falling back to
    /// [`DEFAULT_BACKEND_BASE_URL`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let value = env::var(BACKEND_BASE_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_BASE_URL.to_string());
        Self::new(&value)
    }

    pub fn backend_base_url(&self) -> &Url {
        &self.backend_base_url
    }

    /// Full URL uploads are forwarded to.
    pub fn geolocate_url(&self) -> &Url {
        &self.geolocate_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_fixed_path_to_bare_host() {
        let config = ProxyConfig::new("http://inference:8000").unwrap();
        assert_eq!(config.geolocate_url().as_str(), "http://inference:8000/geolocate");
    }

    #[test]
    fn keeps_base_path_segments() {
        let with_slash = ProxyConfig::new("https://ml.internal/v2/").unwrap();
        let without_slash = ProxyConfig::new("https://ml.internal/v2").unwrap();
        assert_eq!(with_slash.geolocate_url().as_str(), "https://ml.internal/v2/geolocate");
        assert_eq!(without_slash.geolocate_url(), with_slash.geolocate_url());
    }

    #[test]
    fn rejects_unparsable_and_non_http_urls() {
        assert!(matches!(
            ProxyConfig::new("not a url"),
            Err(ConfigError::InvalidUrl { .. })
        ));
        assert_eq!(
            ProxyConfig::new("ftp://files.example"),
            Err(ConfigError::UnsupportedScheme("ftp://files.example".to_string()))
        );
    }

    #[test]
    fn default_base_url_is_valid() {
        let config = ProxyConfig::new(DEFAULT_BACKEND_BASE_URL).unwrap();
        assert_eq!(config.backend_base_url().as_str(), "http://127.0.0.1:8000/");
    }
}
