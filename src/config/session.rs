//! Session cookie configuration.

use super::{ConfigError, Environment};
use std::env;

/// Placeholder secret accepted only in development mode
pub const DEVELOPMENT_SECRET: &str = "dev-only-change-me";

/// Shortest secret accepted outside development
pub const MIN_SECRET_LENGTH: usize = 32;

/// Configuration for signed session cookies
#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub secret: String,
    pub cookie_name: String,
    pub max_age_seconds: i64,
    /// Mark the cookie `Secure` so browsers only send it over HTTPS
    pub secure_cookie: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: DEVELOPMENT_SECRET.to_string(),
            cookie_name: "session".to_string(),
            max_age_seconds: 86_400, // 1 day
            secure_cookie: false,
        }
    }
}

impl SessionConfig {
    /// Load configuration from environment variables
    ///
    /// In development a missing `SESSION_SECRET` falls back to a well-known
    /// placeholder. In production it is an error, as is a secret shorter than
    /// [`MIN_SECRET_LENGTH`].
    pub fn from_env(environment: Environment) -> Result<Self, ConfigError> {
        let supplied = env::var("SESSION_SECRET").ok().filter(|v| !v.is_empty());

        let secret = match (supplied, environment) {
            (Some(secret), Environment::Production) if secret.len() < MIN_SECRET_LENGTH => {
                return Err(ConfigError::WeakSessionSecret {
                    min_length: MIN_SECRET_LENGTH,
                });
            }
            (Some(secret), _) => secret,
            (None, Environment::Production) => return Err(ConfigError::MissingSessionSecret),
            (None, Environment::Development) => {
                tracing::warn!("SESSION_SECRET not set, using the development placeholder");
                DEVELOPMENT_SECRET.to_string()
            }
        };

        let cookie_name = env::var("SESSION_COOKIE_NAME")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| "session".to_string());

        let max_age_seconds = env::var("SESSION_MAX_AGE_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|v: &i64| *v > 0)
            .unwrap_or(86_400);

        Ok(Self {
            secret,
            cookie_name,
            max_age_seconds,
            secure_cookie: environment == Environment::Production,
        })
    }
}
