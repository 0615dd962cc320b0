//! Process configuration read from the environment.

use std::env;

use crate::error::ConfigError;

/// Environment variable holding the Figma API token.
pub const TOKEN_VAR: &str = "FIGMA_ACCESS_TOKEN";

/// Environment variable forcing a full re-sync when set to `true`/`1`.
pub const FORCE_VAR: &str = "FORCE_UPDATE";

/// Resolved process configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Figma API access token.
    pub access_token: String,
    /// Re-sync all frames regardless of timestamps.
    pub force_update: bool,
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// A missing or empty token is fatal; the force flag defaults to off.
    pub fn from_env() -> Result<Self, ConfigError> {
        let access_token = env::var(TOKEN_VAR)
            .ok()
            .filter(|token| !token.is_empty())
            .ok_or(ConfigError::MissingToken)?;
        let force_update = env::var(FORCE_VAR)
            .map(|value| is_truthy(&value))
            .unwrap_or(false);
        Ok(Config {
            access_token,
            force_update,
        })
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim(), "true" | "1")
}
