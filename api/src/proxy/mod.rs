//! Server-side relay from the browser to the geolocation service.
//!
//! One route, no business logic: take the `file` field out of the incoming
//! multipart body, post it to the backend, and hand back whatever the backend
//! said.

pub mod backend;
pub mod config;
pub mod error;

use std::sync::Arc;

use axum::extract::multipart::MultipartRejection;
use axum::extract::DefaultBodyLimit;
use axum::extract::Multipart;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::post;
use axum::Router;
use dioxus_logger::tracing::error;
use dioxus_logger::tracing::info;

pub use backend::Backend;
pub use config::ConfigError;
pub use config::ProxyConfig;
pub use error::ProxyError;

use crate::ImageUpload;
use crate::GEOLOCATE_PATH;
use crate::MAX_UPLOAD_BYTES;
use crate::UPLOAD_FIELD;

/// Room for multipart boundaries and headers on top of the image itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// State shared by every request. Built once at startup, never mutated.
#[derive(Debug)]
pub struct ProxyState {
    backend: Backend,
}

impl ProxyState {
    pub fn new(config: ProxyConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            backend: Backend::new(&config)?,
        })
    }
}

/// Routes to merge into the app server.
pub fn router(state: ProxyState) -> Router {
    info!(
        "upload proxy forwarding {} to {}",
        GEOLOCATE_PATH,
        state.backend.geolocate_url()
    );
    Router::new()
        .route(GEOLOCATE_PATH, post(forward))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + MULTIPART_OVERHEAD))
        .with_state(Arc::new(state))
}

async fn forward(
    State(state): State<Arc<ProxyState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ProxyError> {
    let upload = read_upload(multipart?).await?;
    info!(
        "forwarding '{}' ({}, {} bytes)",
        upload.file_name,
        upload.content_type,
        upload.len()
    );

    match state.backend.forward(upload).await {
        Ok(body) => Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response()),
        Err(e) => {
            if let Some(detail) = e.detail() {
                error!("backend unreachable: {}", detail);
            }
            Err(e)
        }
    }
}

/// Returns the first `file` field; other fields are skipped.
async fn read_upload(mut multipart: Multipart) -> Result<ImageUpload, ProxyError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field.bytes().await?;
        if bytes.is_empty() {
            return Err(ProxyError::EmptyFile);
        }
        return Ok(ImageUpload::new(file_name, content_type, bytes.to_vec()));
    }
    Err(ProxyError::MissingFile)
}
