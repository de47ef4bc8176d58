//! Mock provider implementation for testing
//!
//! A configurable test double that can simulate verification and
//! publishing successes, failures, and delays. Available to all builds
//! so the server integration tests can exercise the full HTTP stack
//! without provider credentials or network access.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::error::{ProviderError, Result};
use crate::provider::{Identity, Provider};
use crate::validation::{code_unit_count, CHARACTER_LIMIT};

/// Configuration for mock provider behavior
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Provider name reported by `name()`
    pub name: String,

    /// Whether credential verification should succeed
    pub verify_succeeds: bool,

    /// Whether publishing should succeed
    pub publish_succeeds: bool,

    /// Error message returned on verification failure
    pub verify_error: Option<String>,

    /// Error message returned on publish failure
    pub publish_error: Option<String>,

    /// Identity returned on successful verification
    pub identity: Identity,

    /// Fixed remote id to return; a fresh UUID-based id when `None`
    pub remote_id: Option<String>,

    /// Delay before completing operations (simulates network latency)
    pub delay: Duration,

    /// Whether the provider reports itself as configured
    pub is_configured: bool,

    /// Number of times verify_credentials has been called
    pub verify_call_count: Arc<Mutex<usize>>,

    /// Number of times publish has been called
    pub publish_call_count: Arc<Mutex<usize>>,

    /// Text that has been published (for verification)
    pub published_content: Arc<Mutex<Vec<String>>>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            name: "mock".to_string(),
            verify_succeeds: true,
            publish_succeeds: true,
            verify_error: None,
            publish_error: None,
            identity: Identity {
                id: "1".to_string(),
                username: "mock_user".to_string(),
                name: "Mock User".to_string(),
            },
            remote_id: None,
            delay: Duration::from_millis(0),
            is_configured: true,
            verify_call_count: Arc::new(Mutex::new(0)),
            publish_call_count: Arc::new(Mutex::new(0)),
            published_content: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

/// Mock provider for testing
pub struct MockProvider {
    config: MockConfig,
}

impl MockProvider {
    /// Create a new mock provider with the given configuration
    pub fn new(config: MockConfig) -> Self {
        Self { config }
    }

    /// Create a mock provider that always succeeds
    pub fn success() -> Self {
        Self::new(MockConfig::default())
    }

    /// Create a mock provider returning a fixed remote id
    pub fn with_remote_id(remote_id: &str) -> Self {
        Self::new(MockConfig {
            remote_id: Some(remote_id.to_string()),
            ..Default::default()
        })
    }

    /// Create a mock provider that fails credential verification
    pub fn verify_failure(error: &str) -> Self {
        Self::new(MockConfig {
            verify_succeeds: false,
            verify_error: Some(error.to_string()),
            ..Default::default()
        })
    }

    /// Create a mock provider that fails publishing
    pub fn publish_failure(error: &str) -> Self {
        Self::new(MockConfig {
            publish_succeeds: false,
            publish_error: Some(error.to_string()),
            ..Default::default()
        })
    }

    /// Create a mock provider with a delay on every operation
    pub fn with_delay(delay: Duration) -> Self {
        Self::new(MockConfig {
            delay,
            ..Default::default()
        })
    }

    /// Create a mock provider that is not configured
    pub fn not_configured() -> Self {
        Self::new(MockConfig {
            is_configured: false,
            ..Default::default()
        })
    }

    /// Get the number of times verify_credentials was called
    pub fn verify_call_count(&self) -> usize {
        *self.config.verify_call_count.lock().unwrap()
    }

    /// Get the number of times publish was called
    pub fn publish_call_count(&self) -> usize {
        *self.config.publish_call_count.lock().unwrap()
    }

    /// Get all text that was published
    pub fn published_content(&self) -> Vec<String> {
        self.config.published_content.lock().unwrap().clone()
    }

    /// Clone the shared counters/capture so a test can keep them after
    /// handing the provider to the gateway
    pub fn handles(&self) -> MockHandles {
        MockHandles {
            verify_call_count: Arc::clone(&self.config.verify_call_count),
            publish_call_count: Arc::clone(&self.config.publish_call_count),
            published_content: Arc::clone(&self.config.published_content),
        }
    }
}

/// Shared observation handles for a [`MockProvider`]
#[derive(Clone)]
pub struct MockHandles {
    pub verify_call_count: Arc<Mutex<usize>>,
    pub publish_call_count: Arc<Mutex<usize>>,
    pub published_content: Arc<Mutex<Vec<String>>>,
}

impl MockHandles {
    pub fn verify_calls(&self) -> usize {
        *self.verify_call_count.lock().unwrap()
    }

    pub fn publish_calls(&self) -> usize {
        *self.publish_call_count.lock().unwrap()
    }

    pub fn published(&self) -> Vec<String> {
        self.published_content.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn verify_credentials(&self) -> Result<Identity> {
        *self.config.verify_call_count.lock().unwrap() += 1;

        if !self.config.delay.is_zero() {
            sleep(self.config.delay).await;
        }

        if self.config.verify_succeeds {
            Ok(self.config.identity.clone())
        } else {
            let message = self
                .config
                .verify_error
                .clone()
                .unwrap_or_else(|| "Mock verification failed".to_string());
            Err(ProviderError::Authentication(message).into())
        }
    }

    async fn publish(&self, text: &str) -> Result<String> {
        *self.config.publish_call_count.lock().unwrap() += 1;

        if !self.config.delay.is_zero() {
            sleep(self.config.delay).await;
        }

        if self.config.publish_succeeds {
            self.config
                .published_content
                .lock()
                .unwrap()
                .push(text.to_string());

            let remote_id = self
                .config
                .remote_id
                .clone()
                .unwrap_or_else(|| format!("mock-{}", uuid::Uuid::new_v4()));
            Ok(remote_id)
        } else {
            let message = self
                .config
                .publish_error
                .clone()
                .unwrap_or_else(|| "Mock publishing failed".to_string());
            Err(ProviderError::Posting(message).into())
        }
    }

    fn validate_content(&self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Err(ProviderError::Validation("Content cannot be empty".to_string()).into());
        }

        if code_unit_count(text) > CHARACTER_LIMIT {
            return Err(ProviderError::Validation(format!(
                "Content exceeds {} character limit",
                CHARACTER_LIMIT
            ))
            .into());
        }

        Ok(())
    }

    fn name(&self) -> &str {
        &self.config.name
    }

    fn character_limit(&self) -> Option<usize> {
        Some(CHARACTER_LIMIT)
    }

    fn is_configured(&self) -> bool {
        self.config.is_configured
    }
}
