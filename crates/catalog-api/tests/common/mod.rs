//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use catalog_api::routes;
use catalog_api::state::AppState;
use catalog_products::domain::links::BaseUrl;
use catalog_store::pg_product_repository::PgProductRepository;
use catalog_store::pg_seller_repository::PgSellerRepository;
use catalog_test_support::RecordingNotifier;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

/// Public base URL the test app falls back to.
pub const BASE_URL: &str = "http://catalog.test";

/// Build the full app router over real Postgres repositories. Stock changes
/// are captured by the returned notifier.
pub fn build_test_app(pool: PgPool) -> (Router, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::new());
    let app_state = AppState::new(
        Arc::new(PgProductRepository::new(pool.clone())),
        Arc::new(PgSellerRepository::new(pool)),
        notifier.clone(),
        BaseUrl::parse(BASE_URL).unwrap(),
    );

    (
        routes::build_router(app_state, Duration::from_secs(5)),
        notifier,
    )
}

/// Insert a seller row directly and return its public UUID.
pub async fn seed_seller(pool: &PgPool, email: &str, phone: &str) -> Uuid {
    let uuid = Uuid::new_v4();
    sqlx::query("INSERT INTO seller (uuid, email, phone) VALUES ($1, $2, $3)")
        .bind(uuid)
        .bind(email)
        .bind(phone)
        .execute(pool)
        .await
        .unwrap();
    uuid
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body_bytes).unwrap_or(serde_json::Value::Null);

    (status, json)
}

fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(app, json_request("POST", uri, body)).await
}

/// Send a PUT request with a JSON body and return the response.
pub async fn put_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(app, json_request("PUT", uri, body)).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Send a DELETE request and return the response.
pub async fn delete(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}
