mod common;

use std::time::{Duration, Instant};

use axum::http::{header, StatusCode};
use serde_json::json;

async fn assert_rejected(uri: &str, expected: &str) {
    let (status, body) = common::get(common::create_test_app(), uri).await;
    assert_eq!(
        status,
        StatusCode::BAD_REQUEST,
        "expected 400 for {uri}, got {status}: {body}"
    );
    assert_eq!(body, json!({ "error": expected }), "uri: {uri}");
}

#[tokio::test]
async fn og_requires_url_parameter() {
    assert_rejected("/api/og", "URL parameter is required").await;
    assert_rejected("/api/og?url=", "URL parameter is required").await;
    assert_rejected("/api/og?other=https%3A%2F%2Fexample.com", "URL parameter is required").await;
}

#[tokio::test]
async fn og_rejects_unparsable_url() {
    assert_rejected("/api/og?url=not-a-url", "Invalid URL").await;
    assert_rejected(&common::og_uri("http://"), "Invalid URL").await;
}

#[tokio::test]
async fn og_whitespace_url_is_invalid_not_missing() {
    assert_rejected("/api/og?url=%20%20", "Invalid URL").await;
    assert_rejected("/api/og?url=+++", "Invalid URL").await;
}

#[tokio::test]
async fn og_repeated_url_uses_first_value() {
    assert_rejected(
        "/api/og?url=ftp%3A%2F%2Fx.com&url=ftp%3A%2F%2Fy.com",
        "Only HTTP and HTTPS URLs are allowed",
    )
    .await;
    assert_rejected(
        "/api/og?url=ftp%3A%2F%2Fx.com&url=https%3A%2F%2Fexample.com",
        "Only HTTP and HTTPS URLs are allowed",
    )
    .await;
}

#[tokio::test]
async fn og_rejects_non_http_scheme() {
    let expected = "Only HTTP and HTTPS URLs are allowed";
    assert_rejected(&common::og_uri("ftp://x.com"), expected).await;
    assert_rejected(&common::og_uri("file:///etc/passwd"), expected).await;
    assert_rejected(&common::og_uri("data:text/html,<b>hi</b>"), expected).await;
}

#[tokio::test]
async fn og_rejects_blocked_hosts() {
    let expected = "Invalid or blocked hostname";
    for target in [
        "http://localhost/",
        "http://localhost:5173/portfolio",
        "http://127.0.0.1/",
        "http://0.0.0.0:8080/",
        "https://api.localhost.example.com/",
        "http://intranet/",
    ] {
        assert_rejected(&common::og_uri(target), expected).await;
    }
}

#[tokio::test]
async fn og_unreachable_host_reports_no_data() {
    let started = Instant::now();
    let (status, body) = common::get(
        common::create_test_app(),
        &common::og_uri("http://portfolio-og-test.invalid/page"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND, "got {status}: {body}");
    assert_eq!(body, json!({ "error": "No OG data found" }));
    assert!(started.elapsed() < common::TEST_FETCH_TIMEOUT + Duration::from_secs(2));
}

#[tokio::test]
async fn og_post_behaves_like_get() {
    let (status, body) = common::post_empty(
        common::create_test_app(),
        &common::og_uri("ftp://x.com"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Only HTTP and HTTPS URLs are allowed");

    let (status, body) = common::post_empty(common::create_test_app(), "/api/og").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "URL parameter is required");
}

#[tokio::test]
async fn og_errors_are_declared_as_json() {
    let (_, headers, _) =
        common::get_with_headers(common::create_test_app(), "/api/og").await;
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
}

#[tokio::test]
async fn og_rejection_is_stable_across_calls() {
    let uri = common::og_uri("http://localhost/");
    let first = common::get(common::create_test_app(), &uri).await;
    let second = common::get(common::create_test_app(), &uri).await;
    assert_eq!(first, second);
}
