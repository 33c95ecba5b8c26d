//! Outbound client for the geolocation service.

use std::time::Duration;

use axum::body::Bytes;
use dioxus_logger::tracing::warn;
use reqwest::Url;

use super::config::ConfigError;
use super::config::ProxyConfig;
use super::error::ProxyError;
use crate::ErrorBody;
use crate::ImageUpload;

/// Upper bound for a single forwarded request, inference included.
const BACKEND_TIMEOUT: Duration = Duration::from_secs(60);

/// Forwards uploads to `<base>/geolocate`.
///
/// Holds one pooled `reqwest::Client`; no per-request state.
#[derive(Debug, Clone)]
pub struct Backend {
    client: reqwest::Client,
    geolocate_url: Url,
}

impl Backend {
    pub fn new(config: &ProxyConfig) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(BACKEND_TIMEOUT)
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;
        Ok(Self {
            client,
            geolocate_url: config.geolocate_url().clone(),
        })
    }

    pub fn geolocate_url(&self) -> &Url {
        &self.geolocate_url
    }

    /// Re-wraps `upload` and posts it. Returns the success body untouched.
    pub async fn forward(&self, upload: ImageUpload) -> Result<Bytes, ProxyError> {
        let form = upload.into_form()?;
        let response = self
            .client
            .post(self.geolocate_url.clone())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // an unreadable error body still leaves us the status code
            let raw = response.text().await.unwrap_or_default();
            let message = upstream_message(status, &raw);
            warn!("backend answered {}: {}", status, message);
            return Err(ProxyError::Upstream { status, message });
        }

        Ok(response.bytes().await?)
    }
}

/// Picks the message to relay for a failed backend call.
fn upstream_message(status: reqwest::StatusCode, raw: &str) -> String {
    if let Some(message) = ErrorBody::message_from_json(raw) {
        return message;
    }
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        format!("Backend returned {}", status)
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn json_error_field_wins() {
        assert_eq!(
            upstream_message(StatusCode::INTERNAL_SERVER_ERROR, r#"{"error":"model unavailable"}"#),
            "model unavailable"
        );
    }

    #[test]
    fn raw_text_is_relayed_trimmed() {
        assert_eq!(
            upstream_message(StatusCode::BAD_GATEWAY, "  upstream overloaded\n"),
            "upstream overloaded"
        );
    }

    #[test]
    fn empty_body_falls_back_to_status() {
        assert_eq!(
            upstream_message(StatusCode::SERVICE_UNAVAILABLE, ""),
            "Backend returned 503 Service Unavailable"
        );
    }
}
