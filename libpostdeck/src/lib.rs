//! Postdeck - dashboard and posting gateway for X
//!
//! This library provides the core functionality behind the Postdeck
//! server: credential configuration, session state, draft validation,
//! and the submission gateway that relays posts to the provider.

pub mod config;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod provider;
pub mod session;
pub mod validation;

// Re-export commonly used types
pub use config::{Config, XCredentials};
pub use error::{PostdeckError, ProviderError, Result};
pub use gateway::{Gateway, Submission};
pub use provider::{Identity, Provider};
pub use session::{Session, SessionHolder};
