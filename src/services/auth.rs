//! Login and registration flows.

use super::{
    password::{PasswordError, PasswordHashing},
    rate_limit::LoginRateLimiter,
    store::{StoreError, UserStore},
};
use actix_web::http::StatusCode;

pub const MSG_MISSING_CREDENTIALS: &str = "Username and password required.";
pub const MSG_USERNAME_TAKEN: &str = "That username is taken.";
pub const MSG_INVALID_CREDENTIALS: &str = "Invalid username or password.";
pub const MSG_TOO_MANY_ATTEMPTS: &str = "Too many attempts. Try again soon.";
pub const MSG_ACCOUNT_CREATED: &str = "Account created. Now log in.";

/// Ways a login or registration can fail
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Username or password missing")]
    MissingCredentials,

    #[error("Username already registered")]
    UsernameTaken,

    #[error("Login attempt quota exhausted")]
    TooManyAttempts,

    /// Unknown user and wrong password both land here
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Storage failure: {0}")]
    Storage(#[source] rusqlite::Error),

    #[error(transparent)]
    Hashing(#[from] PasswordError),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UsernameTaken => AuthError::UsernameTaken,
            StoreError::Database(e) => AuthError::Storage(e),
        }
    }
}

impl AuthError {
    /// Message shown to the user
    ///
    /// Never reveals whether a username exists, how many attempts remain or
    /// anything about internal failures.
    pub fn user_message(&self) -> &'static str {
        match self {
            AuthError::MissingCredentials => MSG_MISSING_CREDENTIALS,
            AuthError::UsernameTaken => MSG_USERNAME_TAKEN,
            AuthError::TooManyAttempts => MSG_TOO_MANY_ATTEMPTS,
            AuthError::InvalidCredentials => MSG_INVALID_CREDENTIALS,
            AuthError::Storage(_) | AuthError::Hashing(_) => "Something went wrong. Try again later.",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingCredentials => StatusCode::BAD_REQUEST,
            AuthError::UsernameTaken => StatusCode::CONFLICT,
            AuthError::TooManyAttempts => StatusCode::TOO_MANY_REQUESTS,
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::Storage(_) | AuthError::Hashing(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Server-side failures that should surface as a 5xx rather than an inline message
    pub fn is_internal(&self) -> bool {
        matches!(self, AuthError::Storage(_) | AuthError::Hashing(_))
    }
}

/// Credential checks backed by the user store, password hasher and rate limiter
///
/// All methods block (SQLite and Argon2), so handlers run them on the
/// blocking thread pool.
#[derive(Clone)]
pub struct CredentialService {
    store: UserStore,
    hashing: PasswordHashing,
    limiter: LoginRateLimiter,
}

impl CredentialService {
    pub fn new(store: UserStore, hashing: PasswordHashing, limiter: LoginRateLimiter) -> Self {
        Self {
            store,
            hashing,
            limiter,
        }
    }

    pub fn store(&self) -> &UserStore {
        &self.store
    }

    pub fn limiter(&self) -> &LoginRateLimiter {
        &self.limiter
    }

    /// Authenticate `username`/`password` on behalf of `client_id`
    ///
    /// The attempt counts against the client's quota whatever the outcome.
    /// A blocked client is refused before the store is consulted. On success
    /// the client's history is cleared and the stored username is returned.
    pub fn login(&self, client_id: &str, username: &str, password: &str) -> Result<String, AuthError> {
        if self.limiter.check_and_record(client_id) {
            return Err(AuthError::TooManyAttempts);
        }

        let username = username.trim();
        let user = self.store.find_by_username(username)?;

        let verified = match &user {
            Some(user) => self.hashing.verify(&user.password_hash, password),
            None => {
                self.hashing.verify_dummy(password);
                false
            }
        };

        match user {
            Some(user) if verified => {
                self.limiter.reset(client_id);
                Ok(user.username)
            }
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    /// Create an account; does not sign the user in
    pub fn register(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let password_hash = self.hashing.hash(password)?;
        self.store.insert_user(username, &password_hash)?;
        Ok(username.to_string())
    }

    /// Hash and insert `username` if it is not registered yet
    pub fn seed_user(&self, username: &str, password: &str) -> Result<bool, AuthError> {
        if self.store.find_by_username(username)?.is_some() {
            return Ok(false);
        }
        let password_hash = self.hashing.hash(password)?;
        Ok(self.store.seed_user(username, &password_hash)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LoginRateLimitConfig, PasswordConfig};
    use tempfile::TempDir;

    fn service() -> (TempDir, CredentialService) {
        let dir = tempfile::tempdir().unwrap();
        let store = UserStore::open(dir.path().join("users.sqlite3"));
        store.initialize().unwrap();
        let hashing = PasswordHashing::new(&PasswordConfig {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap();
        let limiter = LoginRateLimiter::new(LoginRateLimitConfig::default());
        (dir, CredentialService::new(store, hashing, limiter))
    }

    #[test]
    fn test_register_then_login() {
        let (_dir, service) = service();
        assert_eq!(service.register("alice", "Secr3t!").unwrap(), "alice");

        assert_eq!(service.login("1.1.1.1", "alice", "Secr3t!").unwrap(), "alice");
        assert!(matches!(
            service.login("1.1.1.1", "alice", "Secr3t"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_username_is_trimmed_password_is_not() {
        let (_dir, service) = service();
        service.register("  alice ", " pw ").unwrap();

        assert_eq!(service.login("c", "alice", " pw ").unwrap(), "alice");
        assert!(service.login("c", "alice", "pw").is_err());
    }

    #[test]
    fn test_empty_fields_rejected_before_store() {
        let (_dir, service) = service();

        for (username, password) in [("", "pw"), ("alice", ""), ("   ", "pw"), ("", "")] {
            let err = service.register(username, password).unwrap_err();
            assert!(matches!(err, AuthError::MissingCredentials));
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        }
        assert_eq!(service.store().count_users().unwrap(), 0);
    }

    #[test]
    fn test_duplicate_registration() {
        let (_dir, service) = service();
        service.register("alice", "one").unwrap();

        let err = service.register("alice", "two").unwrap_err();
        assert!(matches!(err, AuthError::UsernameTaken));
        assert_eq!(err.user_message(), MSG_USERNAME_TAKEN);
        assert_eq!(service.store().count_users_named("alice").unwrap(), 1);
        assert_eq!(service.login("c", "alice", "one").unwrap(), "alice");
    }

    #[test]
    fn test_unknown_user_and_wrong_password_are_indistinguishable() {
        let (_dir, service) = service();
        service.register("alice", "Secr3t!").unwrap();

        let wrong_password = service.login("c", "alice", "nope").unwrap_err();
        let unknown_user = service.login("c", "mallory", "nope").unwrap_err();

        assert_eq!(wrong_password.user_message(), unknown_user.user_message());
        assert_eq!(wrong_password.status_code(), unknown_user.status_code());
    }

    #[test]
    fn test_sixth_attempt_blocked_even_with_correct_password() {
        let (_dir, service) = service();
        service.register("alice", "Secr3t!").unwrap();

        for _ in 0..5 {
            assert!(matches!(
                service.login("c", "alice", "wrong"),
                Err(AuthError::InvalidCredentials)
            ));
        }
        let err = service.login("c", "alice", "Secr3t!").unwrap_err();
        assert!(matches!(err, AuthError::TooManyAttempts));
        assert_eq!(err.user_message(), MSG_TOO_MANY_ATTEMPTS);

        // Another client is unaffected
        assert_eq!(service.login("d", "alice", "Secr3t!").unwrap(), "alice");
    }

    #[test]
    fn test_success_resets_quota() {
        let (_dir, service) = service();
        service.register("alice", "Secr3t!").unwrap();

        for _ in 0..4 {
            let _ = service.login("c", "alice", "wrong");
        }
        service.login("c", "alice", "Secr3t!").unwrap();
        assert_eq!(service.limiter().attempts_in_window("c"), 0);

        for _ in 0..5 {
            assert!(matches!(
                service.login("c", "alice", "wrong"),
                Err(AuthError::InvalidCredentials)
            ));
        }
        assert!(matches!(
            service.login("c", "alice", "wrong"),
            Err(AuthError::TooManyAttempts)
        ));
    }

    #[test]
    fn test_storage_failure_is_internal() {
        let dir = tempfile::tempdir().unwrap();
        // No initialize(): the users table is missing
        let store = UserStore::open(dir.path().join("broken.sqlite3"));
        let hashing = PasswordHashing::new(&PasswordConfig {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap();
        let service = CredentialService::new(
            store,
            hashing,
            LoginRateLimiter::new(LoginRateLimitConfig::default()),
        );

        let err = service.login("c", "alice", "pw").unwrap_err();
        assert!(err.is_internal());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_seed_user() {
        let (_dir, service) = service();
        assert!(service.seed_user("admin", "password123").unwrap());
        assert!(!service.seed_user("admin", "changed").unwrap());
        assert_eq!(service.login("c", "admin", "password123").unwrap(), "admin");
    }
}
