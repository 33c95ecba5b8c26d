//! Errors the upload proxy can answer with.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;

use crate::ErrorBody;

/// Message returned for any failure the end user cannot act on.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("No file uploaded")]
    MissingFile,

    #[error("Uploaded file is empty")]
    EmptyFile,

    /// The request body was not readable multipart data.
    #[error("{reason}")]
    Multipart { status: StatusCode, reason: String },

    /// The backend answered with a non-success status.
    #[error("{message}")]
    Upstream { status: StatusCode, message: String },

    /// The backend could not be reached or its reply could not be read.
    #[error("{}", INTERNAL_ERROR_MESSAGE)]
    Transport(#[from] reqwest::Error),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::MissingFile | ProxyError::EmptyFile => StatusCode::BAD_REQUEST,
            ProxyError::Multipart { status, .. } | ProxyError::Upstream { status, .. } => *status,
            ProxyError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Diagnostic text for operators, including the whole source chain.
    pub fn detail(&self) -> Option<String> {
        match self {
            ProxyError::Transport(e) => {
                let mut detail = e.to_string();
                let mut source = std::error::Error::source(e);
                while let Some(cause) = source {
                    detail.push_str(": ");
                    detail.push_str(&cause.to_string());
                    source = cause.source();
                }
                Some(detail)
            }
            _ => None,
        }
    }
}

impl From<axum::extract::multipart::MultipartError> for ProxyError {
    fn from(e: axum::extract::multipart::MultipartError) -> Self {
        ProxyError::Multipart {
            status: e.status(),
            reason: e.body_text(),
        }
    }
}

impl From<axum::extract::multipart::MultipartRejection> for ProxyError {
    fn from(e: axum::extract::multipart::MultipartRejection) -> Self {
        ProxyError::Multipart {
            status: e.status(),
            reason: e.body_text(),
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let mut body = ErrorBody::new(self.to_string());
        if let Some(detail) = self.detail() {
            body = body.with_detail(detail);
        }
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_mistakes_are_bad_requests() {
        assert_eq!(ProxyError::MissingFile.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ProxyError::EmptyFile.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ProxyError::MissingFile.to_string(), "No file uploaded");
        assert!(ProxyError::MissingFile.detail().is_none());
    }

    #[test]
    fn upstream_keeps_backend_status_and_message() {
        let e = ProxyError::Upstream {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: "model unavailable".to_string(),
        };
        assert_eq!(e.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(e.to_string(), "model unavailable");
        assert_eq!(e.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
