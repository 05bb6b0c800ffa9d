//! Shared test harness for client integration tests
//!
//! Spins up a wiremock backend and wires auth/card clients against it with
//! a temp-dir session store.

// not every test binary uses every helper
#![allow(dead_code)]

use cardmate::{AuthClient, CardClient, Config, SessionStore};
use std::path::PathBuf;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_TOKEN: &str = "tok-1";

pub struct TestHarness {
    pub server: MockServer,
    pub auth: AuthClient,
    pub cards: CardClient,
    session_path: PathBuf,
    _dir: tempfile::TempDir,
}

impl TestHarness {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().expect("create temp dir");
        let session_path = dir.path().join("session.json");
        let config = Config::with_base_url(server.uri()).request_timeout(Duration::from_secs(2));
        let auth =
            AuthClient::with_store(config.clone(), SessionStore::at_path(session_path.clone()));
        let cards = CardClient::new(config, auth.session());
        Self {
            server,
            auth,
            cards,
            session_path,
            _dir: dir,
        }
    }

    /// Whether a session file is on disk
    pub fn session_persisted(&self) -> bool {
        self.session_path.exists()
    }

    /// Path of the session file backing this harness
    pub fn session_path(&self) -> &std::path::Path {
        &self.session_path
    }

    /// Mount a /login mock and log in, so later requests carry `TEST_TOKEN`
    pub async fn log_in(&self) {
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(auth_response(TEST_TOKEN)))
            .mount(&self.server)
            .await;
        self.auth
            .login("jane@acme.com", "password123")
            .await
            .expect("test login");
    }
}

/// Clients pointed at an address whose listener has been closed, for
/// exercising the network-failure paths. Connections are refused, so these
/// hit the transport error branch rather than any HTTP status handling.
pub struct DeadBackend {
    pub auth: AuthClient,
    pub cards: CardClient,
    session_path: PathBuf,
    _dir: tempfile::TempDir,
}

impl DeadBackend {
    pub fn start() -> Self {
        // bind an ephemeral port, record it, and close the listener
        let url = {
            let listener =
                std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
            let addr = listener.local_addr().expect("listener addr");
            format!("http://{}", addr)
        };
        let dir = tempfile::tempdir().expect("create temp dir");
        let session_path = dir.path().join("session.json");
        let config = Config::with_base_url(url)
            .request_timeout(Duration::from_millis(500))
            .scan_timeout(Duration::from_millis(500));
        let auth =
            AuthClient::with_store(config.clone(), SessionStore::at_path(session_path.clone()));
        let cards = CardClient::new(config, auth.session());
        Self {
            auth,
            cards,
            session_path,
            _dir: dir,
        }
    }

    /// Whether a session file is on disk
    pub fn session_persisted(&self) -> bool {
        self.session_path.exists()
    }
}

/// Backend-shaped /login and /register response body
pub fn auth_response(token: &str) -> serde_json::Value {
    serde_json::json!({
        "access_token": token,
        "token_type": "bearer",
        "user": {"username": "jane", "email": "jane@acme.com"},
    })
}

/// Backend-shaped card record with sensible defaults
pub fn card_json(id: i64) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": "Jane Doe",
        "designation": "CTO",
        "company": "Acme",
        "phones": "[\"9876543210\"]",
        "emails": "[\"jane@acme.com\"]",
        "websites": "[]",
        "addresses": "[]",
        "is_owner": false,
        "is_favorite": false,
        "ocr_avg_confidence": 0.93,
        "created_at": "2026-08-01T12:00:00Z",
    })
}
