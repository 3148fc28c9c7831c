//! Resource hooks against a mock backend.

use std::sync::Arc;

use payloads::{APIClient, MaterialId, requests};
use rust_decimal::dec;
use storefront::hooks;
use storefront::session::Session;
use storefront::storage::{MemoryStorage, TokenStorage, UserStorage};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(mock_server: &MockServer) -> APIClient {
    APIClient {
        address: mock_server.uri(),
        inner_client: reqwest::Client::new(),
    }
}

fn logged_in_session(mock_server: &MockServer) -> Session {
    let storage = Arc::new(MemoryStorage::new());
    TokenStorage::set(storage.as_ref(), "T1");
    UserStorage::set(
        storage.as_ref(),
        &payloads::User {
            id: payloads::UserId(7),
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
        },
    );
    Session::new(test_client(mock_server), storage)
}

fn ok_with(data: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_json(serde_json::json!({ "success": true, "data": data }))
}

fn cart_json(total_items: u32) -> serde_json::Value {
    serde_json::json!({
        "cart_id": 3,
        "items": [],
        "total_items": total_items,
        "total_amount": "0"
    })
}

#[tokio::test]
async fn active_banners_hook_loads_the_list() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/trdretail1/banners/active"))
        .respond_with(ok_with(serde_json::json!([{
            "id": 1,
            "title": "Mid-year sale",
            "description": "Up to 50% off",
            "image_url": "https://cdn.example.com/banners/1.jpg",
            "image_path": "banners/1.jpg",
            "start_date": "2026-08-01",
            "end_date": "2026-09-01",
            "is_active": true,
            "is_currently_active": true,
            "display_order": 1,
            "link_url": "/promotions",
            "materials_count": 12,
            "created_at": "2026-07-20T08:00:00Z"
        }])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetch = hooks::use_active_banners(test_client(&mock_server));
    let state = fetch.settled().await;
    let banners = state.data.unwrap();
    assert_eq!(banners.len(), 1);
    assert_eq!(banners[0].title, "Mid-year sale");
}

#[tokio::test]
async fn materials_hook_refetches_when_filters_change() {
    let mock_server = MockServer::start().await;
    let page = serde_json::json!({
        "data": [],
        "current_page": 1,
        "last_page": 1,
        "per_page": 12,
        "total": 0
    });
    Mock::given(method("GET"))
        .and(path("/api/v1/trdretail1/materials"))
        .and(query_param("category", "tablets"))
        .respond_with(ok_with(page.clone()))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/trdretail1/materials"))
        .and(query_param("category", "phones"))
        .respond_with(ok_with(page))
        .expect(1)
        .mount(&mock_server)
        .await;

    let filters = requests::MaterialFilters {
        category: Some("tablets".to_string()),
        ..Default::default()
    };
    let fetch = hooks::use_materials(test_client(&mock_server), filters.clone());
    fetch.settled().await;

    let mut changed = filters;
    changed.category = Some("phones".to_string());
    fetch.update_deps(changed);
    let state = fetch.settled().await;
    assert!(state.data.unwrap().data.is_empty());
}

#[tokio::test]
async fn cart_hook_without_a_login_resolves_empty_and_skips_the_server() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/trdretail1/cart"))
        .respond_with(ok_with(cart_json(0)))
        .expect(0)
        .mount(&mock_server)
        .await;

    let session = Session::new(test_client(&mock_server), Arc::new(MemoryStorage::new()));
    let cart = hooks::use_cart(session, None);
    let state = cart.fetch().settled().await;
    assert_eq!(state.data, Some(None));
    assert!(state.error.is_none());
}

#[tokio::test]
async fn cart_mutation_revalidates_the_cart() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/trdretail1/cart"))
        .respond_with(ok_with(cart_json(1)))
        .expect(2)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/trdretail1/cart/add"))
        .respond_with(ok_with(serde_json::json!({ "cart_dtl_id": 5, "qty": 2 })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let session = logged_in_session(&mock_server);
    let cart = hooks::use_cart(session, None);
    cart.fetch().settled().await;

    let added = cart
        .add(&requests::AddToCart {
            matl_id: MaterialId(42),
            qty: 2,
            price: dec!(1500000),
            notes: None,
        })
        .await
        .unwrap();
    assert_eq!(added.qty, 2);

    let state = cart.fetch().settled().await;
    assert_eq!(state.data.unwrap().unwrap().total_items, 1);
}

#[tokio::test]
async fn cart_count_hook_reads_the_badge_count() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/trdretail1/cart/count"))
        .respond_with(ok_with(serde_json::json!({ "count": 4 })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let session = logged_in_session(&mock_server);
    let fetch = hooks::use_cart_count(session);
    let state = fetch.settled().await;
    assert_eq!(state.data, Some(Some(4)));
}

#[tokio::test]
async fn cities_hook_stays_idle_until_a_province_is_chosen() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/trdretail1/shipping/cities"))
        .respond_with(ok_with(serde_json::json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let fetch = hooks::use_cities(test_client(&mock_server), None);
    let state = fetch.settled().await;
    assert_eq!(state.data, None);
    assert!(!state.is_loading);
}

#[tokio::test]
async fn orders_hook_without_a_login_resolves_empty() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/trdretail1/orders"))
        .respond_with(ok_with(serde_json::json!(null)))
        .expect(0)
        .mount(&mock_server)
        .await;

    let session = Session::new(test_client(&mock_server), Arc::new(MemoryStorage::new()));
    let fetch = hooks::use_orders(session, requests::OrderFilters::default());
    let state = fetch.settled().await;
    assert_eq!(state.data, Some(None));
}
