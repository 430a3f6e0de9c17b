use std::env;
use std::time::Duration;

/// Audience claim stamped into every issued token; identifies the trust
/// domain whose services should accept tokens from this instance.
pub const TOKEN_AUDIENCE: &str = "agent-infrastructure";

/// Default token validity window in seconds.
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 300;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Validity window of issued tokens (expiry = issued-at + ttl).
    pub token_ttl: Duration,
    /// Audience claim for issued tokens.
    pub audience: String,
    pub version: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            token_ttl: Duration::from_secs(
                env::var("TOKEN_TTL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_TOKEN_TTL_SECS),
            ),
            audience: env::var("TOKEN_AUDIENCE").unwrap_or_else(|_| TOKEN_AUDIENCE.into()),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
