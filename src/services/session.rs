//! Signed-cookie sessions.
//!
//! The cookie carries only the username and the time it was issued:
//! `hex(username).issued_at.signature`. The signature is an HMAC over the
//! other two parts, so the server keeps no session table and a logout simply
//! tells the browser to drop the cookie.

use crate::{config::SessionConfig, utils::hmac};
use actix_web::{
    HttpRequest,
    cookie::{Cookie, SameSite, time::Duration as CookieDuration},
};
use std::time::{SystemTime, UNIX_EPOCH};

/// Issues, reads and clears session cookies
#[derive(Clone)]
pub struct SessionManager {
    config: SessionConfig,
}

impl SessionManager {
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }

    pub fn cookie_name(&self) -> &str {
        &self.config.cookie_name
    }

    /// Build a cookie that authenticates `username`
    pub fn issue(&self, username: &str) -> Result<Cookie<'static>, String> {
        self.issue_at(username, unix_now()?)
    }

    pub fn issue_at(&self, username: &str, issued_at: u64) -> Result<Cookie<'static>, String> {
        let encoded = hex::encode(username.as_bytes());
        let signature = hmac::generate_signature(&self.config.secret, &encoded, issued_at)?;

        Ok(Cookie::build(
            self.config.cookie_name.clone(),
            format!("{encoded}.{issued_at}.{signature}"),
        )
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(self.config.secure_cookie)
        .max_age(CookieDuration::seconds(self.config.max_age_seconds))
        .finish())
    }

    /// Username of the signed-in user, if the request carries a valid session
    pub fn current_user(&self, req: &HttpRequest) -> Option<String> {
        let cookie = req.cookie(&self.config.cookie_name)?;
        self.decode_at(cookie.value(), unix_now().ok()?)
    }

    /// Validate a raw cookie value at time `now`
    ///
    /// Anything malformed, tampered with, issued in the future or older than
    /// the configured max age yields `None`.
    pub fn decode_at(&self, value: &str, now: u64) -> Option<String> {
        let mut parts = value.splitn(3, '.');
        let encoded = parts.next()?;
        let issued_at: u64 = parts.next()?.parse().ok()?;
        let signature = parts.next()?;

        if !hmac::verify_signature(&self.config.secret, encoded, issued_at, signature) {
            return None;
        }

        let age = now.checked_sub(issued_at)?;
        if age > self.config.max_age_seconds.max(0) as u64 {
            return None;
        }

        let username = String::from_utf8(hex::decode(encoded).ok()?).ok()?;
        (!username.is_empty()).then_some(username)
    }

    /// Removal cookie that ends the session in the browser
    pub fn clear(&self) -> Cookie<'static> {
        let mut cookie = Cookie::build(self.config.cookie_name.clone(), "")
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.config.secure_cookie)
            .finish();
        cookie.make_removal();
        cookie
    }
}

fn unix_now() -> Result<u64, String> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|e| format!("System time error: {e}"))
}
