//! Integration tests for the session endpoints
//!
//! The session must only flip to connected after the provider verifies
//! the credentials, and a full connect/disconnect round trip must land
//! back on the initial state.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use std::sync::Arc;
use tower::ServiceExt;

use libpostdeck::provider::mock::MockProvider;
use postdeck_server::routes::{create_router, AppState};

fn router_with(provider: MockProvider) -> axum::Router {
    create_router(AppState::new(Arc::new(provider), None))
}

fn post(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn session_starts_disconnected() {
    let app = router_with(MockProvider::success());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/session")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["connected"], false);
    assert_eq!(body["display_name"], "");
}

#[tokio::test]
async fn connect_verifies_and_sets_display_name() {
    let provider = MockProvider::success();
    let handles = provider.handles();
    let app = router_with(provider);

    let response = app.oneshot(post("/api/session/connect")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["connected"], true);
    assert_eq!(body["display_name"], "@mock_user");
    assert_eq!(handles.verify_calls(), 1);
}

#[tokio::test]
async fn connect_then_disconnect_returns_to_initial_state() {
    let app = router_with(MockProvider::success());

    let response = app
        .clone()
        .oneshot(post("/api/session/connect"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(post("/api/session/disconnect"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["connected"], false);
    assert_eq!(body["display_name"], "");

    // And the stored state agrees
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/session")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["connected"], false);
}

#[tokio::test]
async fn failed_verification_is_unauthorized_and_leaves_session_disconnected() {
    let app = router_with(MockProvider::verify_failure("Bad token"));

    let response = app
        .clone()
        .oneshot(post("/api/session/connect"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("Bad token"));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/session")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["connected"], false);
}
