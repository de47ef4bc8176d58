//! Configuration management for Postdeck
//!
//! Server settings come from an optional TOML file; the four provider
//! secrets come from the environment and are fatal at startup when
//! missing, since the gateway cannot operate without them.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Default X API base URL (overridable for tests and proxies)
pub const DEFAULT_API_BASE: &str = "https://api.twitter.com";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub provider: ProviderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP server binds to
    pub bind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Base URL of the X API
    pub api_base: String,
    /// Seconds to wait for a provider response before surfacing a
    /// timeout. The remote side may still have received the post.
    pub submit_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            provider: ProviderConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            submit_timeout_secs: None,
        }
    }
}

impl Config {
    /// Load configuration from the default location, falling back to
    /// defaults when no config file exists
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path()?;
        if config_path.exists() {
            Self::load_from_path(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::ParseError)?;
        Ok(config)
    }
}

/// Resolve the configuration file path following XDG Base Directory spec
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("POSTDECK_CONFIG") {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("postdeck").join("config.toml"))
}

/// Credentials for the X API (OAuth 1.0a user context)
///
/// The environment variable names are the ones the posting route has
/// always consumed; they are kept for drop-in compatibility.
#[derive(Clone)]
pub struct XCredentials {
    pub api_key: SecretString,
    pub api_secret: SecretString,
    pub access_token: SecretString,
    pub access_token_secret: SecretString,
}

impl XCredentials {
    pub const ENV_API_KEY: &'static str = "TWITTER_API_KEY";
    pub const ENV_API_SECRET: &'static str = "TWITTER_API_SECRET";
    pub const ENV_ACCESS_TOKEN: &'static str = "TWITTER_ACCESS_TOKEN_KEY";
    pub const ENV_ACCESS_TOKEN_SECRET: &'static str = "TWITTER_ACCESS_TOKEN_SECRET";

    /// Read all four secrets from the environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingSecret` naming the first variable
    /// that is unset or empty. An empty value counts as missing.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_key: read_secret(Self::ENV_API_KEY)?,
            api_secret: read_secret(Self::ENV_API_SECRET)?,
            access_token: read_secret(Self::ENV_ACCESS_TOKEN)?,
            access_token_secret: read_secret(Self::ENV_ACCESS_TOKEN_SECRET)?,
        })
    }

    /// Build credentials from raw strings (used by tests)
    pub fn from_parts(
        api_key: &str,
        api_secret: &str,
        access_token: &str,
        access_token_secret: &str,
    ) -> Self {
        Self {
            api_key: SecretString::from(api_key.to_string()),
            api_secret: SecretString::from(api_secret.to_string()),
            access_token: SecretString::from(access_token.to_string()),
            access_token_secret: SecretString::from(access_token_secret.to_string()),
        }
    }

    /// Whether all four secrets are present and non-empty
    pub fn is_complete(&self) -> bool {
        !self.api_key.expose_secret().is_empty()
            && !self.api_secret.expose_secret().is_empty()
            && !self.access_token.expose_secret().is_empty()
            && !self.access_token_secret.expose_secret().is_empty()
    }
}

impl std::fmt::Debug for XCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print secret material
        f.debug_struct("XCredentials")
            .field("api_key", &"[REDACTED]")
            .field("api_secret", &"[REDACTED]")
            .field("access_token", &"[REDACTED]")
            .field("access_token_secret", &"[REDACTED]")
            .finish()
    }
}

fn read_secret(name: &str) -> Result<SecretString> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(SecretString::from(value)),
        _ => Err(ConfigError::MissingSecret(name.to_string()).into()),
    }
}
