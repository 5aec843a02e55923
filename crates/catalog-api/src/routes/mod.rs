//! Route modules and router assembly.

pub mod health;
pub mod products;
pub mod sellers;

use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use tower_http::timeout::TimeoutLayer;

use crate::state::AppState;

/// Build the full application router.
///
/// Every request is bounded by `request_timeout`; when it elapses the
/// handler future is dropped, which cancels any in-flight query.
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .merge(health::router())
        .nest("/api/v1", products::v1_router().merge(sellers::router()))
        .nest("/api/v2", products::v2_router())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .with_state(state)
}
