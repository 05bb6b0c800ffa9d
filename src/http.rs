//! HTTP response helpers shared by the auth and card clients.

use serde::Deserialize;

/// Error body shapes the backend produces: FastAPI's `{"detail": ...}` and
/// the scan endpoint's `{"error": ...}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Extract the backend's error message from a non-2xx response.
///
/// Falls back to the raw body text, then to the status line, so callers
/// always get something human-readable to surface.
pub(crate) async fn backend_message(response: reqwest::Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(&body) {
        if let Some(message) = parsed.detail.or(parsed.error) {
            return message;
        }
    }
    if body.is_empty() {
        status.to_string()
    } else {
        body
    }
}
