//! Shared setup for the integration tests.
#![allow(dead_code)]

use actix_web::{cookie::Cookie, dev::ServiceResponse, test};
use std::net::SocketAddr;
use tempfile::TempDir;
use warded_login::{AppConfig, AppContext, LoginRateLimitConfig, PasswordConfig};

/// Keeps the temporary database alive for as long as the context is used
pub struct TestContext {
    pub ctx: AppContext,
    _dir: TempDir,
}

/// Config pointing at a fresh temp database with cheap Argon2 parameters
pub fn test_config(dir: &TempDir) -> AppConfig {
    AppConfig {
        database_path: dir.path().join("users.sqlite3"),
        password: PasswordConfig {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        },
        rate_limit: LoginRateLimitConfig {
            max_attempts: 5,
            window_seconds: 60,
        },
        ..AppConfig::default()
    }
}

pub fn test_context() -> TestContext {
    test_context_with(|_| {})
}

pub fn test_context_with(customize: impl FnOnce(&mut AppConfig)) -> TestContext {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let mut config = test_config(&dir);
    customize(&mut config);
    let ctx = AppContext::from_config(config).expect("Failed to build app context");
    TestContext { ctx, _dir: dir }
}

pub fn peer(ip: &str) -> SocketAddr {
    format!("{ip}:40000").parse().expect("Invalid test address")
}

/// Form POST from the given client address
pub fn form_post(uri: &str, ip: &str, username: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri(uri)
        .peer_addr(peer(ip))
        .set_form([("username", username), ("password", password)])
}

/// The session cookie set by a response, if any
pub fn session_cookie<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == "session")
        .map(|c| c.into_owned())
}

pub async fn body_string<B>(resp: ServiceResponse<B>) -> String
where
    B: actix_web::body::MessageBody,
{
    let body = test::read_body(resp).await;
    String::from_utf8(body.to_vec()).expect("Response body is not UTF-8")
}
