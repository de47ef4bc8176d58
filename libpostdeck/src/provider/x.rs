//! X (Twitter) provider implementation
//!
//! Talks to the X API v2 over reqwest: `GET /2/users/me` for credential
//! verification and `POST /2/tweets` for publishing. Every request is
//! signed with OAuth 1.0a user context using the four configured
//! secrets.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};

use crate::config::{ProviderConfig, XCredentials, DEFAULT_API_BASE};
use crate::error::{ProviderError, Result};
use crate::provider::{oauth, Identity, Provider};
use crate::validation::{code_unit_count, CHARACTER_LIMIT};

/// X API client
pub struct XProvider {
    http: reqwest::Client,
    credentials: XCredentials,
    api_base: String,
}

impl XProvider {
    /// Create a provider against the production API
    pub fn new(credentials: XCredentials) -> Self {
        Self::with_api_base(credentials, DEFAULT_API_BASE)
    }

    /// Create a provider against a specific API base URL
    ///
    /// Used by tests to point at a stub server, and by deployments that
    /// front the API with a proxy.
    pub fn with_api_base(credentials: XCredentials, api_base: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            credentials,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    /// Create a provider from configuration
    pub fn from_config(credentials: XCredentials, config: &ProviderConfig) -> Self {
        Self::with_api_base(credentials, &config.api_base)
    }
}

#[derive(Deserialize)]
struct UserEnvelope {
    data: UserData,
}

#[derive(Deserialize)]
struct UserData {
    id: String,
    name: String,
    username: String,
}

#[derive(Serialize)]
struct TweetRequestBody<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct TweetEnvelope {
    data: TweetData,
}

#[derive(Deserialize)]
struct TweetData {
    id: String,
}

#[async_trait]
impl Provider for XProvider {
    async fn verify_credentials(&self) -> Result<Identity> {
        let url = format!("{}/2/users/me", self.api_base);
        let auth = oauth::authorization_header("GET", &url, &[], &self.credentials)?;

        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, auth)
            .send()
            .await
            .map_err(|e| map_transport_error(e, "verify credentials"))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| map_transport_error(e, "verify credentials"))?;

        if !(200..300).contains(&status) {
            return Err(map_api_error(status, &body, "verify credentials").into());
        }

        let envelope: UserEnvelope = serde_json::from_str(&body).map_err(|e| {
            ProviderError::Posting(format!(
                "X response parse error (verify credentials): {}",
                e
            ))
        })?;

        Ok(Identity {
            id: envelope.data.id,
            username: envelope.data.username,
            name: envelope.data.name,
        })
    }

    async fn publish(&self, text: &str) -> Result<String> {
        self.validate_content(text)?;

        let url = format!("{}/2/tweets", self.api_base);
        // JSON bodies do not participate in the OAuth signature
        let auth = oauth::authorization_header("POST", &url, &[], &self.credentials)?;

        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, auth)
            .json(&TweetRequestBody { text })
            .send()
            .await
            .map_err(|e| map_transport_error(e, "publish"))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| map_transport_error(e, "publish"))?;

        if !(200..300).contains(&status) {
            return Err(map_api_error(status, &body, "publish").into());
        }

        let envelope: TweetEnvelope = serde_json::from_str(&body).map_err(|e| {
            ProviderError::Posting(format!("X response parse error (publish): {}", e))
        })?;

        Ok(envelope.data.id)
    }

    fn validate_content(&self, text: &str) -> Result<()> {
        if text.trim().is_empty() {
            return Err(ProviderError::Validation("Content cannot be empty".to_string()).into());
        }

        let units = code_unit_count(text);
        if units > CHARACTER_LIMIT {
            return Err(ProviderError::Validation(format!(
                "Content exceeds X's {} character limit (current: {} characters)",
                CHARACTER_LIMIT, units
            ))
            .into());
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "x"
    }

    fn character_limit(&self) -> Option<usize> {
        Some(CHARACTER_LIMIT)
    }

    fn is_configured(&self) -> bool {
        self.credentials.is_complete()
    }
}

fn map_transport_error(error: reqwest::Error, context: &str) -> ProviderError {
    if error.is_timeout() {
        ProviderError::Timeout(format!("X request timed out ({}): {}", context, error))
    } else {
        ProviderError::Network(format!("X request failed ({}): {}", context, error))
    }
}

/// Map an X API error response to a provider error
///
/// The response body is carried verbatim in the message so operators
/// can see exactly what the API said; it is never parsed beyond the
/// duplicate-content check.
fn map_api_error(status: u16, body: &str, context: &str) -> ProviderError {
    match status {
        401 => ProviderError::Authentication(format!(
            "X rejected the credentials ({}): {}. \
             Check that all four secrets are valid and the app has write access.",
            context, body
        )),
        403 => {
            // 403 covers both permission problems and duplicate-content
            // rejections
            if body.to_lowercase().contains("duplicate") {
                ProviderError::Posting(format!("X refused the post ({}): {}", context, body))
            } else {
                ProviderError::Authentication(format!(
                    "X denied the request ({}): {}. \
                     The tokens may lack write permission.",
                    context, body
                ))
            }
        }
        429 => ProviderError::RateLimit(format!(
            "X rate limit exceeded ({}): {}. Wait before retrying.",
            context, body
        )),
        500..=599 => ProviderError::Network(format!("X server error ({}): {}", context, body)),
        _ => ProviderError::Posting(format!("X error {} ({}): {}", status, context, body)),
    }
}
