//! HTTP routes for the Postdeck server
//!
//! One page, one posting endpoint, and the session endpoints. All
//! errors are caught here and turned into structured JSON; nothing
//! propagates to the client as an uncaught fault.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, warn};

use libpostdeck::{Gateway, PostdeckError, Provider, Session, SessionHolder};

/// State shared across handlers
pub struct AppState {
    pub gateway: Gateway,
    pub session: SessionHolder,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    /// Build shared state around a provider
    pub fn new(provider: Arc<dyn Provider>, submit_timeout: Option<Duration>) -> SharedState {
        let gateway = match submit_timeout {
            Some(timeout) => Gateway::with_timeout(provider, timeout),
            None => Gateway::new(provider),
        };

        Arc::new(Self {
            gateway,
            session: SessionHolder::new(),
        })
    }
}

/// Create the server router
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        // Dashboard page
        .route("/", get(index))
        // Posting endpoint
        .route("/api/tweet", post(api_tweet))
        // Session endpoints
        .route("/api/session", get(api_session))
        .route("/api/session/connect", post(api_session_connect))
        .route("/api/session/disconnect", post(api_session_disconnect))
        // Health check
        .route("/health", get(health))
        .with_state(state)
}

/// Dashboard page
async fn index() -> impl IntoResponse {
    Html(include_str!("../static/dashboard.html"))
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    "OK"
}

// === API Endpoints ===

#[derive(Deserialize)]
pub struct TweetRequest {
    #[serde(rename = "tweetData")]
    pub tweet_data: Option<String>,
}

#[derive(Serialize)]
pub struct TweetPayload {
    pub id: String,
    pub text: String,
}

#[derive(Serialize)]
pub struct TweetResponse {
    pub success: bool,
    pub tweet: TweetPayload,
    pub message: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// POST /api/tweet - relay a draft to the provider
///
/// The extractor is optional so that a missing or malformed body gets
/// the same "Tweet data is required" answer as a missing field.
pub async fn api_tweet(
    State(state): State<SharedState>,
    body: Option<Json<TweetRequest>>,
) -> Response {
    let text = match body {
        Some(Json(TweetRequest {
            tweet_data: Some(text),
        })) => text,
        _ => return error_response(StatusCode::BAD_REQUEST, "Tweet data is required"),
    };

    match state.gateway.submit(&text).await {
        Ok(submission) => (
            StatusCode::OK,
            Json(TweetResponse {
                success: true,
                tweet: TweetPayload {
                    id: submission.remote_id,
                    text,
                },
                message: "Tweet posted successfully".to_string(),
            }),
        )
            .into_response(),
        Err(PostdeckError::InvalidInput(message)) => {
            error_response(StatusCode::BAD_REQUEST, &message)
        }
        Err(e) => {
            // Downstream detail goes to the log, not the client
            error!("Tweet submission failed: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to post tweet")
        }
    }
}

/// GET /api/session - current session state
pub async fn api_session(State(state): State<SharedState>) -> Json<Session> {
    Json(state.session.current().await)
}

/// POST /api/session/connect - verify credentials and connect
pub async fn api_session_connect(State(state): State<SharedState>) -> Response {
    match state.session.connect(state.gateway.provider()).await {
        Ok(session) => (StatusCode::OK, Json(session)).into_response(),
        Err(e) => {
            warn!("Session connect rejected: {}", e);
            error_response(StatusCode::UNAUTHORIZED, &e.to_string())
        }
    }
}

/// POST /api/session/disconnect - clear the session
pub async fn api_session_disconnect(State(state): State<SharedState>) -> Json<Session> {
    Json(state.session.disconnect().await)
}
