//! Provider abstraction and implementations
//!
//! A provider is the external posting service the gateway relays to.
//! The trait covers the two capabilities the dashboard workflow needs:
//! verifying the configured credentials (identity check) and publishing
//! a post. `XProvider` talks to the real X API; `MockProvider` is a
//! configurable test double available to all builds so the server
//! integration tests can use it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub mod mock;
pub mod oauth;
pub mod x;

/// Identity of the account the credentials belong to
///
/// Returned by a successful credential verification; `username` is the
/// handle shown in the dashboard session indicator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub username: String,
    pub name: String,
}

/// Trait for external posting providers
///
/// All network operations are async. Implementations must be usable
/// behind an `Arc<dyn Provider>` shared across request handlers.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Verify the configured credentials against the provider
    ///
    /// Performs a real identity check; the session is only marked
    /// connected after this succeeds.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Authentication` if the provider rejects
    /// the credentials, or `ProviderError::Network` if it cannot be
    /// reached.
    async fn verify_credentials(&self) -> Result<Identity>;

    /// Publish a post and return the provider-assigned post id
    ///
    /// One invocation makes exactly one publish attempt. There is no
    /// retry and no idempotency key: calling this twice with identical
    /// text creates duplicate posts.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Authentication`, `Posting`, `RateLimit`,
    /// or `Network` depending on how the provider fails. The message is
    /// carried verbatim for display and logging, never parsed.
    async fn publish(&self, text: &str) -> Result<String>;

    /// Validate content against provider-specific requirements
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Validation` if the content fails.
    fn validate_content(&self, text: &str) -> Result<()>;

    /// Lowercase identifier for the provider (e.g. "x", "mock")
    fn name(&self) -> &str;

    /// Maximum post length, or `None` if the provider has no hard limit
    fn character_limit(&self) -> Option<usize>;

    /// Whether the provider has everything it needs to authenticate
    fn is_configured(&self) -> bool;
}
