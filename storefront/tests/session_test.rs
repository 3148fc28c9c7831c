//! Session lifecycle: login, resume, logout, and profile refresh.

use std::sync::Arc;

use payloads::{APIClient, User, UserId, requests};
use storefront::session::Session;
use storefront::storage::{MemoryStorage, TokenStorage, UserStorage};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(address: String) -> APIClient {
    APIClient {
        address,
        inner_client: reqwest::Client::new(),
    }
}

fn sample_user() -> User {
    User {
        id: UserId(7),
        code: "CUST007".to_string(),
        name: "Siti Rahma".to_string(),
        email: "siti@example.com".to_string(),
        phone: "08123456789".to_string(),
        address: None,
        city: None,
        postal_code: None,
        email_verified_at: None,
        avatar: None,
        is_online_shop_customer: None,
    }
}

fn user_json() -> serde_json::Value {
    serde_json::to_value(sample_user()).unwrap()
}

fn login_request() -> requests::Login {
    requests::Login {
        email: "siti@example.com".to_string(),
        password: "hunter2".to_string(),
    }
}

#[tokio::test]
async fn login_stores_the_token_and_user() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/trdretail1/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": { "partner": user_json(), "token": "T1" }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let storage = Arc::new(MemoryStorage::new());
    let session = Session::new(test_client(mock_server.uri()), storage.clone());
    assert!(!session.is_authenticated());

    let user = session.login(&login_request()).await.unwrap();
    assert_eq!(user.name, "Siti Rahma");
    assert!(session.is_authenticated());
    assert_eq!(session.token().as_deref(), Some("T1"));
    assert_eq!(TokenStorage::get(storage.as_ref()).as_deref(), Some("T1"));
    assert_eq!(UserStorage::get(storage.as_ref()), Some(sample_user()));
}

#[tokio::test]
async fn session_resumes_only_when_token_and_user_are_both_stored() {
    let storage = Arc::new(MemoryStorage::new());
    TokenStorage::set(storage.as_ref(), "T1");
    UserStorage::set(storage.as_ref(), &sample_user());

    let session = Session::new(test_client(String::new()), storage.clone());
    assert!(session.is_authenticated());
    assert_eq!(session.user().map(|u| u.id), Some(UserId(7)));

    // A token with no user record is not a session.
    let partial = Arc::new(MemoryStorage::new());
    TokenStorage::set(partial.as_ref(), "T1");
    let session = Session::new(test_client(String::new()), partial);
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn logout_clears_state_even_when_the_server_call_fails() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/trdretail1/auth/logout"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "success": false,
            "message": "internal error"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let storage = Arc::new(MemoryStorage::new());
    TokenStorage::set(storage.as_ref(), "T1");
    UserStorage::set(storage.as_ref(), &sample_user());

    let session = Session::new(test_client(mock_server.uri()), storage.clone());
    assert!(session.is_authenticated());

    session.logout().await;
    assert!(!session.is_authenticated());
    assert_eq!(session.token(), None);
    assert_eq!(TokenStorage::get(storage.as_ref()), None);
    assert_eq!(UserStorage::get(storage.as_ref()), None);
}

#[tokio::test]
async fn logout_when_not_logged_in_skips_the_server() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/trdretail1/auth/logout"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let session = Session::new(
        test_client(mock_server.uri()),
        Arc::new(MemoryStorage::new()),
    );
    session.logout().await;
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn refresh_user_updates_the_cached_record() {
    let mock_server = MockServer::start().await;
    let mut renamed = user_json();
    renamed["name"] = serde_json::json!("Siti R. Putri");
    Mock::given(method("GET"))
        .and(path("/api/v1/trdretail1/auth/profile"))
        .and(header("authorization", "Bearer T1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": renamed
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let storage = Arc::new(MemoryStorage::new());
    TokenStorage::set(storage.as_ref(), "T1");
    UserStorage::set(storage.as_ref(), &sample_user());

    let session = Session::new(test_client(mock_server.uri()), storage.clone());
    session.refresh_user().await;

    assert_eq!(session.user().map(|u| u.name), Some("Siti R. Putri".to_string()));
    assert_eq!(
        UserStorage::get(storage.as_ref()).map(|u| u.name),
        Some("Siti R. Putri".to_string())
    );
}

#[tokio::test]
async fn failed_refresh_keeps_the_cached_user() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/trdretail1/auth/profile"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "success": false,
            "message": "Unauthenticated."
        })))
        .mount(&mock_server)
        .await;

    let storage = Arc::new(MemoryStorage::new());
    TokenStorage::set(storage.as_ref(), "T1");
    UserStorage::set(storage.as_ref(), &sample_user());

    let session = Session::new(test_client(mock_server.uri()), storage);
    session.refresh_user().await;
    assert_eq!(session.user(), Some(sample_user()));
}

#[tokio::test]
async fn register_logs_the_new_user_in() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/trdretail1/auth/register"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "success": true,
            "data": { "partner": user_json(), "token": "T2", "email_sent": true }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let storage: Arc<MemoryStorage> = Arc::new(MemoryStorage::new());
    let session = Session::new(test_client(mock_server.uri()), storage);
    let details = requests::Register {
        name: "Siti Rahma".to_string(),
        email: "siti@example.com".to_string(),
        password: "hunter2!".to_string(),
        password_confirmation: "hunter2!".to_string(),
        phone: "08123456789".to_string(),
        address: "Jl. Sudirman No. 1".to_string(),
        city: "Jakarta Selatan".to_string(),
        postal_code: "12230".to_string(),
    };

    let response = session.register(&details).await.unwrap();
    assert!(response.email_sent);
    assert!(session.is_authenticated());
    assert_eq!(session.token().as_deref(), Some("T2"));
}
