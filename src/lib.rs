//! Warded Login - a password login page with per-client rate limiting
//!
//! Built with Actix Web and Paperclip:
//! - Registration with Argon2id password hashing
//! - Login behind a sliding-window attempt limit per client address
//! - HMAC-signed session cookies
//! - Parameterized SQLite storage
//! - Security headers, request IDs, Prometheus metrics and audit logging
//!
//! An intentionally insecure page lives in [`insecure`] as a contrast and
//! ships as its own binary.
//!
//! ## Architecture
//!
//! - `config/` - Configuration structures and environment loading
//! - `services/` - Rate limiter, password hashing, user store, sessions, credential flow
//! - `models/` - Form bodies, JSON responses, audit events and the page view
//! - `handlers/` - HTTP request handlers and the app factory
//! - `middleware/` - Security headers, request IDs and metrics
//! - `utils/` - Request inspection and HMAC helpers
//!
//! ## Quick Start
//!
//! ```no_run
//! use warded_login::{AppConfig, AppContext, create_app};
//! use actix_web::HttpServer;
//!
//! #[actix_web::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::from_env()?;
//!     let bind_address = config.bind_address.clone();
//!     let ctx = AppContext::from_config(config)?;
//!     HttpServer::new(move || create_app(ctx.clone()))
//!         .bind(bind_address)?
//!         .run()
//!         .await?;
//!     Ok(())
//! }
//! ```

pub mod build_info;
pub mod config;
pub mod context;
pub mod error;
pub mod handlers;
pub mod insecure;
pub mod middleware;
pub mod models;
pub mod services;
pub mod telemetry;
pub mod utils;

// Re-export commonly used types and functions for convenience
pub use config::{
    AppConfig, ConfigError, Environment, LogFormat, LoginRateLimitConfig, MetricsConfig,
    PasswordConfig, SecurityHeadersConfig, SessionConfig,
};
pub use context::AppContext;
pub use error::{AppError, StartupError};
pub use handlers::{
    create_app, create_openapi_spec, get_metrics, health, index, login, logout, register, version,
};
pub use insecure::create_insecure_app;
pub use middleware::{MetricsMiddleware, RequestIdMiddleware, SecurityHeaders};
pub use models::{
    AuthAuditEvent, AuthEventOutcome, AuthEventType, CredentialsForm, HealthResponse, PageView,
    VersionResponse, render_page,
};
pub use services::{
    AppMetrics, AuthError, CredentialService, LoginRateLimiter, PasswordHashing, SessionManager,
    StoreError, UserStore,
};
pub use telemetry::init_tracing;
pub use utils::{extract_client_ip, extract_route_pattern, extract_user_agent};
