//! JSON body carried by every non-2xx response from the proxy.

use serde::Deserialize;
use serde::Serialize;

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Message meant for the end user.
    pub error: String,
    /// Diagnostic detail for operators. Never shown as the primary message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Pulls a usable message out of an arbitrary error body.
    ///
    /// Looks for a string `error` field first, then `detail` (the shape
    /// FastAPI-style backends emit). Blank strings count as absent.
    pub fn message_from_json(body: &str) -> Option<String> {
        let value: serde_json::Value = serde_json::from_str(body).ok()?;
        ["error", "detail"].iter().find_map(|key| {
            value
                .get(key)
                .and_then(|v| v.as_str())
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_is_omitted_when_absent() {
        let json = serde_json::to_string(&ErrorBody::new("No file uploaded")).unwrap();
        assert_eq!(json, r#"{"error":"No file uploaded"}"#);
    }

    #[test]
    fn detail_round_trips() {
        let body = ErrorBody::new("Internal server error").with_detail("connection refused");
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(serde_json::from_str::<ErrorBody>(&json).unwrap(), body);
    }

    #[test]
    fn message_prefers_error_then_detail() {
        assert_eq!(
            ErrorBody::message_from_json(r#"{"error":"model unavailable","detail":"x"}"#),
            Some("model unavailable".to_string())
        );
        assert_eq!(
            ErrorBody::message_from_json(r#"{"detail":"bad image"}"#),
            Some("bad image".to_string())
        );
    }

    #[test]
    fn message_ignores_blank_and_non_string_fields() {
        assert_eq!(ErrorBody::message_from_json(r#"{"error":"   "}"#), None);
        assert_eq!(ErrorBody::message_from_json(r#"{"detail":[{"loc":"file"}]}"#), None);
        assert_eq!(ErrorBody::message_from_json("<html>502</html>"), None);
    }
}
