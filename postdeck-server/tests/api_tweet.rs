//! Integration tests for the posting endpoint
//!
//! Exercises the router end to end with a mock provider, pinning the
//! HTTP contract: request shape, status codes, and response bodies.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use std::sync::Arc;
use tower::ServiceExt;

use libpostdeck::provider::mock::{MockHandles, MockProvider};
use postdeck_server::routes::{create_router, AppState};

fn router_with(provider: MockProvider) -> (axum::Router, MockHandles) {
    let handles = provider.handles();
    let state = AppState::new(Arc::new(provider), None);
    (create_router(state), handles)
}

fn tweet_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/tweet")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn post_tweet_success() {
    let (app, handles) = router_with(MockProvider::with_remote_id("123"));

    let response = app
        .oneshot(tweet_request(r#"{"tweetData":"hello world"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["tweet"]["id"], "123");
    assert_eq!(body["tweet"]["text"], "hello world");
    assert_eq!(body["message"], "Tweet posted successfully");

    assert_eq!(handles.publish_calls(), 1);
    assert_eq!(handles.published(), vec!["hello world".to_string()]);
}

#[tokio::test]
async fn missing_tweet_data_is_bad_request() {
    let (app, handles) = router_with(MockProvider::success());

    let response = app.oneshot(tweet_request(r#"{}"#)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Tweet data is required");
    assert_eq!(handles.publish_calls(), 0);
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let (app, handles) = router_with(MockProvider::success());

    let response = app.oneshot(tweet_request("this is not json")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Tweet data is required");
    assert_eq!(handles.publish_calls(), 0);
}

#[tokio::test]
async fn empty_text_is_rejected_without_provider_call() {
    let (app, handles) = router_with(MockProvider::success());

    let response = app
        .oneshot(tweet_request(r#"{"tweetData":"   "}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("empty"));
    assert_eq!(handles.publish_calls(), 0);
}

#[tokio::test]
async fn oversized_text_is_rejected_without_provider_call() {
    let (app, handles) = router_with(MockProvider::success());

    let text = "a".repeat(281);
    let request_body = serde_json::json!({ "tweetData": text }).to_string();
    let response = app.oneshot(tweet_request(&request_body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("character limit"));
    assert_eq!(handles.publish_calls(), 0);
}

#[tokio::test]
async fn text_at_the_cap_is_forwarded() {
    let (app, handles) = router_with(MockProvider::success());

    let text = "a".repeat(280);
    let request_body = serde_json::json!({ "tweetData": text }).to_string();
    let response = app.oneshot(tweet_request(&request_body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(handles.publish_calls(), 1);
}

#[tokio::test]
async fn provider_failure_is_internal_error_with_generic_message() {
    let (app, handles) = router_with(MockProvider::publish_failure("upstream exploded"));

    let response = app
        .oneshot(tweet_request(r#"{"tweetData":"hello"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Failed to post tweet");
    // The verbatim provider message stays in the server log
    assert!(!body["error"].as_str().unwrap().contains("upstream exploded"));
    assert_eq!(handles.publish_calls(), 1);
}

#[tokio::test]
async fn duplicate_submissions_both_reach_the_provider() {
    // Documented limitation: no idempotency key, so identical text
    // posts twice
    let (app, handles) = router_with(MockProvider::success());

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(tweet_request(r#"{"tweetData":"same text"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    assert_eq!(handles.publish_calls(), 2);
    assert_eq!(
        handles.published(),
        vec!["same text".to_string(), "same text".to_string()]
    );
}

#[tokio::test]
async fn health_check() {
    let (app, _handles) = router_with(MockProvider::success());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn dashboard_page_is_served() {
    let (app, _handles) = router_with(MockProvider::success());

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let page = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(page.contains("Postdeck"));
    assert!(page.contains("/api/tweet"));
}
