//! Client Configuration
//!
//! Holds the backend base URL and per-request deadlines. The base URL is
//! deployment-specific and can be supplied via `CARDMATE_API_URL`.

use std::time::Duration;

/// Default backend URL for local development
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Default deadline for ordinary API requests
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Default deadline for OCR scan uploads (image transfer + recognition)
const DEFAULT_SCAN_TIMEOUT: Duration = Duration::from_secs(30);

/// Client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    base_url: String,
    request_timeout: Duration,
    scan_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        let base_url =
            std::env::var("CARDMATE_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self {
            base_url,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            scan_timeout: DEFAULT_SCAN_TIMEOUT,
        }
    }
}

impl Config {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration pointing at the given backend URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Override the deadline for ordinary requests
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Override the deadline for scan uploads
    pub fn scan_timeout(mut self, timeout: Duration) -> Self {
        self.scan_timeout = timeout;
        self
    }

    /// Get the full URL for an API endpoint
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn get_request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub fn get_scan_timeout(&self) -> Duration {
        self.scan_timeout
    }
}
