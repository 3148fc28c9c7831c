//! Transport behavior: envelope decoding, bearer auth, and the error
//! taxonomy.

use payloads::{APIClient, ApiError, error_message, requests};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(address: String) -> APIClient {
    APIClient {
        address,
        inner_client: reqwest::Client::new(),
    }
}

fn login_request() -> requests::Login {
    requests::Login {
        email: "siti@example.com".to_string(),
        password: "hunter2".to_string(),
    }
}

fn user_json() -> serde_json::Value {
    serde_json::json!({
        "id": 7,
        "code": "CUST007",
        "name": "Siti Rahma",
        "email": "siti@example.com",
        "phone": "08123456789"
    })
}

#[tokio::test]
async fn successful_login_returns_envelope_verbatim() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/trdretail1/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "message": "Login successful",
            "data": { "partner": user_json(), "token": "T1" }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(mock_server.uri());
    let response = client.login(&login_request()).await.unwrap();

    assert!(response.success);
    assert_eq!(response.message.as_deref(), Some("Login successful"));
    let data = response.data.unwrap();
    assert_eq!(data.token, "T1");
    assert_eq!(data.partner.name, "Siti Rahma");
}

#[tokio::test]
async fn bearer_token_is_sent_on_authenticated_calls() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/trdretail1/auth/profile"))
        .and(header("authorization", "Bearer T1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": user_json()
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(mock_server.uri());
    let response = client.user_profile("T1").await.unwrap();
    assert_eq!(response.data.unwrap().code, "CUST007");
}

#[tokio::test]
async fn validation_failure_carries_field_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/trdretail1/auth/login"))
        .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
            "success": false,
            "message": "The given data was invalid.",
            "errors": { "email": ["Email is required"] }
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(mock_server.uri());
    let error = client.login(&login_request()).await.unwrap_err();

    assert_eq!(error.status(), 422);
    let errors = error.field_errors().unwrap();
    assert_eq!(errors["email"], vec!["Email is required"]);
    // The first field error wins over the envelope message.
    assert_eq!(error_message(&error), "Email is required");
}

#[tokio::test]
async fn error_without_message_uses_fallback() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/trdretail1/banners/active"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(serde_json::json!({ "success": false })),
        )
        .mount(&mock_server)
        .await;

    let client = test_client(mock_server.uri());
    let error = client.active_banners().await.unwrap_err();

    assert_eq!(error.status(), 500);
    assert_eq!(error_message(&error), "API request failed");
}

#[tokio::test]
async fn connection_failure_is_a_network_error_with_status_zero() {
    // Nothing is listening here.
    let client = test_client("http://127.0.0.1:9".to_string());
    let error = client.active_banners().await.unwrap_err();

    assert!(matches!(error, ApiError::Network(_)));
    assert_eq!(error.status(), 0);
    // The message carries the underlying cause, not a canned string.
    let message = error_message(&error);
    assert!(message.starts_with("Network error: "), "got {message:?}");
    assert!(message.len() > "Network error: ".len());
}

#[tokio::test]
async fn malformed_body_is_a_network_error_even_on_success_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/trdretail1/banners/active"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let client = test_client(mock_server.uri());
    let error = client.active_banners().await.unwrap_err();
    assert!(matches!(error, ApiError::Network(_)));
}

#[tokio::test]
async fn payment_proof_uploads_as_multipart_form() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/trdretail1/payments"))
        .and(header("authorization", "Bearer T1"))
        .and(body_string_contains("name=\"payment_proof\""))
        .and(body_string_contains("filename=\"bukti.jpg\""))
        .and(body_string_contains("name=\"bank_name\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {
                "payment": { "id": 31, "status_code": "P" },
                "proof_url": "https://cdn.example.com/proofs/31.jpg"
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(mock_server.uri());
    let upload = requests::UploadPaymentProof {
        order_id: payloads::OrderId(19),
        partner_id: payloads::UserId(7),
        payment_method: "bank_transfer".to_string(),
        amount: rust_decimal::dec!(1500000),
        payment_proof: requests::ProofFile {
            filename: "bukti.jpg".to_string(),
            bytes: b"fake jpeg bytes".to_vec(),
        },
        bank_name: Some("BCA".to_string()),
        account_number: None,
        account_name: None,
        notes: None,
    };

    let response = client.upload_payment_proof(upload, "T1").await.unwrap();
    let data = response.data.unwrap();
    assert_eq!(data.proof_url, "https://cdn.example.com/proofs/31.jpg");
    assert_eq!(data.payment.id, Some(payloads::PaymentId(31)));
}
