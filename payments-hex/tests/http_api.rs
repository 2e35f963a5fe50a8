//! Integration tests for the payments HTTP routes.
//!
//! These drive the full router (tracing, CORS and metrics layers included)
//! against the in-memory repository.

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use payments_hex::{PaymentService, inbound::HttpServer};
use payments_repo::MemoryRepo;
use serde_json::{Value, json};
use tower::ServiceExt;

fn app() -> Router {
    HttpServer::new(PaymentService::new(MemoryRepo::new())).router()
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Sends a request and returns the status with the parsed JSON body.
async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

async fn create(app: &Router, order_id: i64, amount: i64) -> Value {
    let (status, body) = send(
        app,
        json_request(
            Method::POST,
            "/api/payments",
            json!({ "orderId": order_id, "amount": amount }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body
}

#[tokio::test]
async fn test_health() {
    let app = app();

    let (status, body) = send(&app, empty_request(Method::GET, "/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_create_fetch_and_pay_scenario() {
    let app = app();

    let created = create(&app, 42, 100).await;
    assert_eq!(created["id"], 1);
    assert_eq!(created["orderId"], 42);
    assert_eq!(created["amount"], 100);
    assert_eq!(created["status"], "PENDING");

    let (status, fetched) = send(&app, empty_request(Method::GET, "/api/payments/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, updated) = send(
        &app,
        empty_request(Method::PUT, "/api/payments/admin/1/status?status=PAID"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], 1);
    assert_eq!(updated["orderId"], 42);
    assert_eq!(updated["status"], "PAID");
}

#[tokio::test]
async fn test_get_by_order_id() {
    let app = app();
    create(&app, 10, 100).await;
    let created = create(&app, 11, 250).await;

    let (status, body) = send(&app, empty_request(Method::GET, "/api/payments/order/11")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], created["id"]);
    assert_eq!(body["orderId"], 11);
}

#[tokio::test]
async fn test_unknown_ids_are_not_found() {
    let app = app();

    let (status, body) = send(&app, empty_request(Method::GET, "/api/payments/77")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 404);

    let (status, _) = send(&app, empty_request(Method::GET, "/api/payments/order/77")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        empty_request(Method::PUT, "/api/payments/admin/77/status?status=PAID"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_numeric_id_is_bad_request() {
    let app = app();

    let (status, body) = send(&app, empty_request(Method::GET, "/api/payments/abc")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
}

#[tokio::test]
async fn test_undecodable_path_segment_returns_json_error() {
    let app = app();

    for uri in [
        "/api/payments/%FF",
        "/api/payments/order/%FF",
        "/api/payments/admin/%FF/status?status=PAID",
    ] {
        let method = if uri.contains("/admin/") {
            Method::PUT
        } else {
            Method::GET
        };
        let (status, body) = send(&app, empty_request(method, uri)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["code"], 400, "{uri}");
        assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()), "{uri}");
    }
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let app = app();

    let (status, body) = send(
        &app,
        json_request(Method::POST, "/api/payments", json!({ "amount": 100 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("orderId"));
}

#[tokio::test]
async fn test_invalid_status_is_bad_request() {
    let app = app();
    create(&app, 42, 100).await;

    let (status, body) = send(
        &app,
        empty_request(Method::PUT, "/api/payments/admin/1/status?status=SHIPPED"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("SHIPPED"));

    let (status, _) = send(
        &app,
        empty_request(Method::PUT, "/api/payments/admin/1/status"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_illegal_transition_is_conflict() {
    let app = app();
    create(&app, 42, 100).await;

    let (status, _) = send(
        &app,
        empty_request(Method::PUT, "/api/payments/admin/1/status?status=REFUNDED"),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_repeated_status_update_is_idempotent() {
    let app = app();
    create(&app, 42, 100).await;

    let uri = "/api/payments/admin/1/status?status=PAID";
    let (_, first) = send(&app, empty_request(Method::PUT, uri)).await;
    let (status, second) = send(&app, empty_request(Method::PUT, uri)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_duplicate_order_is_conflict() {
    let app = app();
    create(&app, 42, 100).await;

    let (status, _) = send(
        &app,
        json_request(
            Method::POST,
            "/api/payments",
            json!({ "orderId": 42, "amount": 100 }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_list_all_payments() {
    let app = app();

    let (status, body) = send(&app, empty_request(Method::GET, "/api/payments/admin")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    for order in [3, 1, 2] {
        create(&app, order, 100).await;
    }

    let (status, body) = send(&app, empty_request(Method::GET, "/api/payments/admin")).await;
    assert_eq!(status, StatusCode::OK);

    let orders: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["orderId"].as_i64().unwrap())
        .collect();
    assert_eq!(orders, vec![3, 1, 2]);
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = app();

    let (status, body) = send(&app, empty_request(Method::GET, "/api-docs/openapi.json")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/payments/admin"].is_object());
}
