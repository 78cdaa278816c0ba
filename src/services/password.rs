//! Argon2 password hashing.

use crate::config::PasswordConfig;
use argon2::{Algorithm, Argon2, Params, PasswordHasher, PasswordVerifier, Version};
use password_hash::{PasswordHash, SaltString};

/// Failure inside the hashing primitive (bad parameters, no entropy)
#[derive(Debug, thiserror::Error)]
#[error("Password hashing failed: {0}")]
pub struct PasswordError(String);

/// Hashes new passwords and verifies candidates against stored PHC strings
#[derive(Clone)]
pub struct PasswordHashing {
    params: Params,
    /// Hash of a throwaway password, verified against when the user is unknown
    dummy_hash: String,
}

impl PasswordHashing {
    /// Build a hasher from configuration, rejecting out-of-range cost parameters
    pub fn new(config: &PasswordConfig) -> Result<Self, PasswordError> {
        let params = Params::new(config.memory_kib, config.iterations, config.parallelism, None)
            .map_err(|e| PasswordError(e.to_string()))?;
        let mut hashing = Self {
            params,
            dummy_hash: String::new(),
        };
        hashing.dummy_hash = hashing.hash("not-a-real-password")?;
        Ok(hashing)
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash `password` with a fresh random salt, returning a PHC string
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let mut salt_bytes = [0u8; 16];
        getrandom::getrandom(&mut salt_bytes).map_err(|e| PasswordError(e.to_string()))?;
        let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| PasswordError(e.to_string()))?;

        let phc = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| PasswordError(e.to_string()))?
            .to_string();
        Ok(phc)
    }

    /// Check `password` against a stored PHC string
    ///
    /// The comparison is constant time. An unparseable stored hash never matches.
    pub fn verify(&self, stored_hash: &str, password: &str) -> bool {
        match PasswordHash::new(stored_hash) {
            Ok(parsed) => self
                .argon2()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }

    /// Burn roughly the cost of one verification without a real account
    ///
    /// Used when the username does not exist so both failure paths take
    /// comparable time.
    pub fn verify_dummy(&self, password: &str) {
        let _ = self.verify(&self.dummy_hash, password);
    }
}
