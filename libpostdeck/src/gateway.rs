//! Post submission gateway
//!
//! The gateway is the only component that contacts the external
//! provider. It validates a draft, then forwards it with exactly one
//! provider call per invocation.
//!
//! Known limitation, inherited from the original behavior and kept on
//! purpose: there is no retry and no idempotency key, so submitting the
//! same text twice creates duplicate posts.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::error::{ProviderError, Result};
use crate::provider::{Identity, Provider};
use crate::validation;

/// Result of a successful submission
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    /// Provider-assigned id of the published post
    pub remote_id: String,
}

/// Relay between the dashboard and the posting provider
pub struct Gateway {
    provider: Arc<dyn Provider>,
    timeout: Option<Duration>,
    // One submission in flight at a time; later callers wait their turn
    submit_lock: Mutex<()>,
}

impl Gateway {
    /// Create a gateway with no submit timeout
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self {
            provider,
            timeout: None,
            submit_lock: Mutex::new(()),
        }
    }

    /// Create a gateway that gives up waiting on the provider after
    /// `timeout`
    ///
    /// A timeout does NOT guarantee the remote side did not receive the
    /// post; the request may still have landed. Callers must treat a
    /// timeout as "outcome unknown".
    pub fn with_timeout(provider: Arc<dyn Provider>, timeout: Duration) -> Self {
        Self {
            provider,
            timeout: Some(timeout),
            submit_lock: Mutex::new(()),
        }
    }

    /// The provider this gateway relays to
    pub fn provider(&self) -> &dyn Provider {
        self.provider.as_ref()
    }

    /// Submit a draft to the provider
    ///
    /// Validates the draft first; invalid input never reaches the
    /// provider. A valid draft results in exactly one provider call.
    ///
    /// # Errors
    ///
    /// - `PostdeckError::InvalidInput` for an empty or oversized draft
    /// - `ProviderError::Timeout` if the configured timeout expires
    /// - any other `ProviderError` the provider reports, with its
    ///   message preserved verbatim
    pub async fn submit(&self, text: &str) -> Result<Submission> {
        validation::validate_draft(text)?;

        let _guard = self.submit_lock.lock().await;

        info!(provider = self.provider.name(), "Submitting post");
        let publish = self.provider.publish(text);

        let remote_id = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, publish).await {
                Ok(result) => result?,
                Err(_) => {
                    warn!(
                        provider = self.provider.name(),
                        "No provider response within {:?}; the post may still have been received",
                        limit
                    );
                    return Err(ProviderError::Timeout(format!(
                        "No response from {} within {}s. The post may or may not have been published.",
                        self.provider.name(),
                        limit.as_secs()
                    ))
                    .into());
                }
            },
            None => publish.await?,
        };

        info!(
            provider = self.provider.name(),
            %remote_id, "Post published"
        );
        Ok(Submission { remote_id })
    }

    /// Verify the gateway's credentials against the provider
    ///
    /// Exposed so the session routes can run the identity check through
    /// the same component that owns provider access.
    pub async fn connect(&self) -> Result<Identity> {
        self.provider.verify_credentials().await
    }
}
