// Each integration test file is a separate binary; helpers not used in every
// binary would otherwise trigger dead_code warnings from clippy.
#![allow(dead_code)]

use std::time::Duration;

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use portfolio_server::{
    og::{OgResolver, ResolverConfig},
    routes,
    state::AppState,
};

/// Outbound timeout for tests; short so a stalled resolver fails fast.
pub const TEST_FETCH_TIMEOUT: Duration = Duration::from_secs(3);

/// Build the full API router with a resolver tuned for tests.
pub fn create_test_app() -> Router {
    let resolver = OgResolver::new(&ResolverConfig {
        timeout: TEST_FETCH_TIMEOUT,
        ..ResolverConfig::default()
    })
    .expect("Failed to build test resolver");
    routes::api_router(AppState { resolver })
}

/// Percent-encode a target URL for the `url` query parameter.
pub fn og_uri(target: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(target.as_bytes()).collect();
    format!("/api/og?url={encoded}")
}

// ── Request helpers ──────────────────────────────────────────────────────────

pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, _, body) = get_with_headers(app, uri).await;
    (status, body)
}

pub async fn get_with_headers(app: Router, uri: &str) -> (StatusCode, HeaderMap, Value) {
    let req = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

pub async fn post_empty(app: Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = send(app, req).await;
    (status, body)
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, headers, json)
}
