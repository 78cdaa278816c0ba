//! Top-level application configuration.

use super::{
    ConfigError, LoginRateLimitConfig, MetricsConfig, PasswordConfig, SecurityHeadersConfig,
    SessionConfig,
};
use std::{env, path::Path, path::PathBuf, str::FromStr};

/// Deployment mode
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(ConfigError::UnknownEnvironment(other.to_string())),
        }
    }
}

/// Output format for the tracing subscriber
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    /// `LOG_FORMAT` if set, otherwise JSON in production and pretty output elsewhere
    ///
    /// Readable before the rest of the configuration so that configuration
    /// errors themselves get logged.
    pub fn from_env() -> Self {
        match env::var("LOG_FORMAT").map(|v| v.to_lowercase()) {
            Ok(v) if v == "json" => LogFormat::Json,
            Ok(v) if v == "pretty" => LogFormat::Pretty,
            _ => match env::var("APP_ENV").map(|v| v.parse::<Environment>()) {
                Ok(Ok(Environment::Production)) => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        }
    }
}

/// Everything the secure login server needs to start
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub environment: Environment,
    pub bind_address: String,
    pub database_path: PathBuf,
    /// Take the client address from `X-Forwarded-For` and friends instead of the peer
    pub trust_proxy_headers: bool,
    /// Insert the `admin` demo account at startup if it does not exist
    pub seed_demo_user: bool,
    pub log_format: LogFormat,
    pub rate_limit: LoginRateLimitConfig,
    pub session: SessionConfig,
    pub password: PasswordConfig,
    pub security_headers: SecurityHeadersConfig,
    pub metrics: MetricsConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            bind_address: "127.0.0.1:8080".to_string(),
            database_path: PathBuf::from("db.sqlite3"),
            trust_proxy_headers: false,
            seed_demo_user: false,
            log_format: LogFormat::Pretty,
            rate_limit: LoginRateLimitConfig::default(),
            session: SessionConfig::default(),
            password: PasswordConfig::default(),
            security_headers: SecurityHeadersConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load and validate configuration from environment variables
    ///
    /// Fails when `APP_ENV` is not recognised or when production mode is
    /// missing required secrets.
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = match env::var("APP_ENV") {
            Ok(value) => value.parse()?,
            Err(_) => Environment::Development,
        };

        let database_path = env::var("DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("db.sqlite3"));

        Ok(Self {
            environment,
            bind_address: resolve_bind_address(
                env::var("BIND_ADDRESS").ok().as_deref(),
                is_container_environment(
                    env::var("KUBERNETES_SERVICE_HOST").ok().as_deref(),
                    env::var("DOCKER_CONTAINER").ok().as_deref(),
                    Path::new("/.dockerenv").exists(),
                ),
            ),
            database_path,
            trust_proxy_headers: flag("TRUST_PROXY_HEADERS"),
            seed_demo_user: flag("SEED_DEMO_USER"),
            log_format: LogFormat::from_env(),
            rate_limit: LoginRateLimitConfig::from_env(),
            session: SessionConfig::from_env(environment)?,
            password: PasswordConfig::from_env(),
            security_headers: SecurityHeadersConfig::from_env(),
            metrics: MetricsConfig::from_env(),
        })
    }
}

fn flag(name: &str) -> bool {
    env::var(name)
        .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(false)
}

/// Whether the process appears to run inside Kubernetes or Docker
pub fn is_container_environment(
    k8s_service_host: Option<&str>,
    docker_container: Option<&str>,
    dockerenv_exists: bool,
) -> bool {
    k8s_service_host.is_some() || docker_container.is_some() || dockerenv_exists
}

/// Pick the listen address: explicit override, then all interfaces in containers, else loopback
pub fn resolve_bind_address(bind_override: Option<&str>, in_container: bool) -> String {
    if let Some(bind) = bind_override.filter(|b| !b.trim().is_empty()) {
        return bind.to_string();
    }

    if in_container {
        "0.0.0.0:8080".to_string()
    } else {
        "127.0.0.1:8080".to_string()
    }
}
