//! Auth client integration tests
//!
//! Exercise register/login/logout, session persistence, current-user
//! degradation, and account deletion against a mock backend.

mod common;

use common::{auth_response, TestHarness};
use cardmate::{AuthError, UserSettings};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_login_success_persists_session() {
    let h = TestHarness::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(serde_json::json!({
            "email": "jane@acme.com",
            "password": "password123",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_response("tok-login")))
        .mount(&h.server)
        .await;

    let session = h.auth.login("jane@acme.com", "password123").await.unwrap();

    assert_eq!(session.access_token, "tok-login");
    assert_eq!(session.user.email, "jane@acme.com");
    assert!(h.auth.session().is_authenticated());
    assert!(h.session_persisted());
}

#[tokio::test]
async fn test_login_wrong_password_surfaces_backend_detail() {
    let h = TestHarness::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({"detail": "Invalid email or password"})),
        )
        .mount(&h.server)
        .await;

    let error = h.auth.login("jane@acme.com", "wrong").await.unwrap_err();

    assert_eq!(
        error,
        AuthError::Rejected {
            message: "Invalid email or password".to_string()
        }
    );
    // no token persisted on a failed login
    assert!(!h.auth.session().is_authenticated());
    assert!(!h.session_persisted());
}

#[tokio::test]
async fn test_register_success_persists_session() {
    let h = TestHarness::start().await;
    Mock::given(method("POST"))
        .and(path("/register"))
        .and(body_json(serde_json::json!({
            "username": "jane",
            "email": "jane@acme.com",
            "password": "password123",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_response("tok-reg")))
        .mount(&h.server)
        .await;

    let session = h
        .auth
        .register("jane", "jane@acme.com", "password123")
        .await
        .unwrap();

    assert_eq!(session.user.username, "jane");
    assert!(h.session_persisted());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let h = TestHarness::start().await;
    Mock::given(method("POST"))
        .and(path("/register"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({"detail": "Email already registered"})),
        )
        .mount(&h.server)
        .await;

    let error = h
        .auth
        .register("jane", "jane@acme.com", "password123")
        .await
        .unwrap_err();

    assert_eq!(format!("{}", error), "Email already registered");
}

#[tokio::test]
async fn test_login_unreachable_backend_is_network_error() {
    let dead = common::DeadBackend::start();

    let error = dead
        .auth
        .login("jane@acme.com", "password123")
        .await
        .unwrap_err();

    assert_eq!(error, AuthError::Network);
    assert!(!dead.session_persisted());
}

#[tokio::test]
async fn test_logout_clears_session_locally() {
    let h = TestHarness::start().await;
    h.log_in().await;
    assert!(h.session_persisted());

    h.auth.logout();

    assert!(!h.auth.session().is_authenticated());
    assert!(h.auth.session().token().is_none());
    assert!(!h.session_persisted());
}

#[tokio::test]
async fn test_current_user_success() {
    let h = TestHarness::start().await;
    h.log_in().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .and(header("authorization", format!("Bearer {}", common::TEST_TOKEN)))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "username": "jane",
            "email": "jane@acme.com",
        })))
        .mount(&h.server)
        .await;

    let user = h.auth.current_user().await.unwrap();
    assert_eq!(user.username, "jane");
}

#[tokio::test]
async fn test_current_user_expired_token_degrades_to_none() {
    let h = TestHarness::start().await;
    h.log_in().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&h.server)
        .await;

    assert!(h.auth.current_user().await.is_none());
    // expired session is cleared, not surfaced as an error
    assert!(!h.auth.session().is_authenticated());
    assert!(!h.session_persisted());
}

#[tokio::test]
async fn test_current_user_without_session_is_none() {
    let h = TestHarness::start().await;
    assert!(h.auth.current_user().await.is_none());
}

#[tokio::test]
async fn test_delete_account_clears_session() {
    let h = TestHarness::start().await;
    h.log_in().await;
    Mock::given(method("DELETE"))
        .and(path("/users/me"))
        .and(header("authorization", format!("Bearer {}", common::TEST_TOKEN)))
        .respond_with(ResponseTemplate::new(204))
        .mount(&h.server)
        .await;

    h.auth.delete_account().await.unwrap();

    assert!(!h.auth.session().is_authenticated());
    assert!(!h.session_persisted());
}

#[tokio::test]
async fn test_update_settings_round_trips() {
    let h = TestHarness::start().await;
    h.log_in().await;
    Mock::given(method("PUT"))
        .and(path("/users/me/settings"))
        .and(body_json(serde_json::json!({"dark_mode": true})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"dark_mode": true})),
        )
        .mount(&h.server)
        .await;

    let mut settings = UserSettings::default();
    settings.set("dark_mode", serde_json::Value::Bool(true));
    let stored = h.auth.update_settings(&settings).await.unwrap();

    assert_eq!(stored.get("dark_mode"), Some(&serde_json::Value::Bool(true)));
}

#[tokio::test]
async fn test_session_restored_from_disk() {
    let h = TestHarness::start().await;
    h.log_in().await;

    // a second client over the same store picks up the persisted session
    let config = cardmate::Config::with_base_url(h.server.uri());
    let restored = cardmate::AuthClient::with_store(
        config,
        cardmate::SessionStore::at_path(h.session_path()),
    );

    assert!(restored.session().is_authenticated());
    assert_eq!(
        restored.session().token(),
        Some(common::TEST_TOKEN.to_string())
    );
}
