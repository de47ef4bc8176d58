//! Credential session state
//!
//! The session records whether the configured credentials have been
//! verified against the provider and which account they belong to. It
//! lives in memory only; its lifetime is one server process.
//!
//! The session never flips to connected without a successful identity
//! check. Connecting is the only way in, disconnecting the only way
//! out, and a failed verification leaves the previous state untouched.

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::error::Result;
use crate::provider::Provider;

/// Connection state shown in the dashboard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub connected: bool,
    pub display_name: String,
}

impl Session {
    /// The initial, disconnected session
    pub fn disconnected() -> Self {
        Self {
            connected: false,
            display_name: String::new(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::disconnected()
    }
}

/// Holder for the current session, shared across request handlers
pub struct SessionHolder {
    session: RwLock<Session>,
}

impl SessionHolder {
    /// Create a holder starting in the disconnected state
    pub fn new() -> Self {
        Self {
            session: RwLock::new(Session::disconnected()),
        }
    }

    /// Snapshot of the current session
    pub async fn current(&self) -> Session {
        self.session.read().await.clone()
    }

    /// Verify credentials against the provider and mark the session
    /// connected on success
    ///
    /// # Errors
    ///
    /// Propagates the provider's verification error. The session is
    /// left unchanged on failure.
    pub async fn connect(&self, verifier: &dyn Provider) -> Result<Session> {
        let identity = match verifier.verify_credentials().await {
            Ok(identity) => identity,
            Err(e) => {
                warn!("Credential verification failed: {}", e);
                return Err(e);
            }
        };

        let session = Session {
            connected: true,
            display_name: format!("@{}", identity.username),
        };

        info!("Session connected as {}", session.display_name);
        *self.session.write().await = session.clone();
        Ok(session)
    }

    /// Clear the session back to the disconnected state
    pub async fn disconnect(&self) -> Session {
        let session = Session::disconnected();
        *self.session.write().await = session.clone();
        info!("Session disconnected");
        session
    }
}

impl Default for SessionHolder {
    fn default() -> Self {
        Self::new()
    }
}
