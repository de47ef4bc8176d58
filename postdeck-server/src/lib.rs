//! postdeck-server - dashboard and posting gateway for X
//!
//! Exposed as a library so the integration tests can build the router
//! against a mock provider.

pub mod routes;
