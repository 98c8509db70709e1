// tribe-client/tests/network.rs
// reqwest transport against a mock HTTP server

use std::sync::Arc;

use rust_decimal::Decimal;
use serde_json::json;
use shared::OrderRequest;
use tribe_client::{ClientConfig, ClientError, MemoryStore, TribeClient};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .and(body_partial_json(json!({ "username": "alice" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "jwt-abc",
            "user": { "id": 7, "username": "alice", "role": "USER" }
        })))
        .mount(server)
        .await;
}

fn client_for(server: &MockServer) -> TribeClient {
    TribeClient::new(
        ClientConfig::new(server.uri()).with_timeout(5),
        Arc::new(MemoryStore::new()),
    )
    .unwrap()
}

#[tokio::test]
async fn test_bearer_token_and_prefix() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/v1/clubs"))
        .and(header("authorization", "Bearer jwt-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Chess", "description": "Weekly games", "free": true, "price": 0, "memberCount": 12 }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.login("alice", "secret").await.unwrap();
    let clubs = client.load_clubs().await.unwrap();

    assert_eq!(clubs.len(), 1);
    assert_eq!(clubs[0].member_count, 12);
}

#[tokio::test]
async fn test_login_rejection_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "error": "Invalid credentials" })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .login("alice", "nope")
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::InvalidCredentials(ref m) if m == "Invalid credentials"));
}

#[tokio::test]
async fn test_401_over_the_wire_ends_session() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users/7/clubs"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.login("alice", "secret").await.unwrap();
    let err = client.load_my_clubs().await.unwrap_err();

    assert!(err.is_auth_expired());
    assert!(client.session().await.is_none());
}

#[tokio::test]
async fn test_create_order_query_and_body() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/v1/payments/create-order"))
        .and(query_param("userId", "7"))
        .and(body_partial_json(json!({ "currency": "INR", "clubId": 3 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "orderId": "order_9",
            "amount": 50000,
            "currency": "INR"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.login("alice", "secret").await.unwrap();
    let order = client
        .gateway()
        .create_order(
            7,
            &OrderRequest {
                amount: Decimal::from(500),
                currency: "INR".into(),
                club_id: 3,
            },
        )
        .await
        .unwrap();

    assert_eq!(order.order_id, "order_9");
    assert!(order.razorpay_key_id.is_none());
}

#[tokio::test]
async fn test_error_message_field_precedence() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/clubs/3/leave"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "Admins cannot leave",
            "error": "Bad Request"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.login("alice", "secret").await.unwrap();
    let err = client.gateway().leave_club(3).await.unwrap_err();

    assert_eq!(err.user_message(), "Admins cannot leave");
    assert!(client.session().await.is_some());
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let client = TribeClient::new(
        ClientConfig::new("http://127.0.0.1:9").with_timeout(2),
        Arc::new(MemoryStore::new()),
    )
    .unwrap();

    let err = client.login("alice", "secret").await.unwrap_err();

    assert!(matches!(err, ClientError::Network(_)));
}
