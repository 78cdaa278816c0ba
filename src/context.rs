//! Shared services built once at startup.

use crate::{
    config::{AppConfig, Environment},
    error::StartupError,
    services::{
        AppMetrics, CredentialService, LoginRateLimiter, PasswordHashing, SessionManager, UserStore,
    },
};
use tracing::{info, warn};

/// Demo account created when `SEED_DEMO_USER` is enabled
pub const DEMO_USERNAME: &str = "admin";
pub const DEMO_PASSWORD: &str = "password123";

/// Services handed to every worker's `App`
///
/// Cloning shares the underlying state: all workers see the same rate
/// limiter history and metrics registry.
#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub credentials: CredentialService,
    pub sessions: SessionManager,
    pub metrics: AppMetrics,
}

impl AppContext {
    /// Prepare the user store and wire up services
    ///
    /// Fails if the database cannot be initialised, since nothing useful can
    /// be served without it.
    pub fn from_config(config: AppConfig) -> Result<Self, StartupError> {
        let store = UserStore::open(&config.database_path);
        store.initialize()?;
        info!(path = %store.path().display(), "User store ready");

        let hashing = PasswordHashing::new(&config.password)?;
        let limiter = LoginRateLimiter::new(config.rate_limit.clone());
        let credentials = CredentialService::new(store, hashing, limiter);

        if config.seed_demo_user {
            if config.environment == Environment::Production {
                warn!("SEED_DEMO_USER is enabled in production");
            }
            if credentials.seed_user(DEMO_USERNAME, DEMO_PASSWORD)? {
                info!(username = DEMO_USERNAME, "Seeded demo account");
            }
        }

        Ok(Self {
            sessions: SessionManager::new(config.session.clone()),
            metrics: AppMetrics::new()?,
            credentials,
            config,
        })
    }
}
