//! Login rate limiting configuration.

use std::{env, time::Duration};

/// Configuration for the per-client login attempt quota
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginRateLimitConfig {
    /// Attempts allowed inside the window before further attempts are refused
    pub max_attempts: usize,
    pub window_seconds: u64,
}

impl Default for LoginRateLimitConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            window_seconds: 60,
        }
    }
}

impl LoginRateLimitConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let max_attempts = env::var("LOGIN_RATE_LIMIT_MAX_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|v: &usize| *v > 0)
            .unwrap_or(defaults.max_attempts);

        let window_seconds = env::var("LOGIN_RATE_LIMIT_WINDOW_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|v: &u64| *v > 0)
            .unwrap_or(defaults.window_seconds);

        Self {
            max_attempts,
            window_seconds,
        }
    }

    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_seconds)
    }
}
