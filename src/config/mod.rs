//! Configuration structures and loading utilities.
//!
//! Each concern owns a struct with a `Default` and a `from_env()` loader.
//! [`AppConfig`] aggregates them and is the only loader that can fail, since
//! production mode refuses to start without a real session secret.

pub mod app;
pub mod metrics;
pub mod password;
pub mod rate_limit;
pub mod security;
pub mod session;

pub use app::*;
pub use metrics::*;
pub use password::*;
pub use rate_limit::*;
pub use security::*;
pub use session::*;

/// Errors raised while validating configuration at startup
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Unknown APP_ENV value: {0:?} (expected \"development\" or \"production\")")]
    UnknownEnvironment(String),

    #[error("SESSION_SECRET must be set in production")]
    MissingSessionSecret,

    #[error("SESSION_SECRET must be at least {min_length} bytes in production")]
    WeakSessionSecret { min_length: usize },
}
