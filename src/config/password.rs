//! Password hashing cost configuration.

use std::env;

/// Argon2id cost parameters used when hashing new passwords
///
/// Verification always uses the parameters embedded in the stored PHC string,
/// so changing these only affects accounts registered afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_kib: argon2::Params::DEFAULT_M_COST,
            iterations: argon2::Params::DEFAULT_T_COST,
            parallelism: argon2::Params::DEFAULT_P_COST,
        }
    }
}

impl PasswordConfig {
    /// Load configuration from environment variables, falling back to Argon2 defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let memory_kib = env::var("PASSWORD_HASH_MEMORY_KIB")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.memory_kib);

        let iterations = env::var("PASSWORD_HASH_ITERATIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.iterations);

        let parallelism = env::var("PASSWORD_HASH_PARALLELISM")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.parallelism);

        Self {
            memory_kib,
            iterations,
            parallelism,
        }
    }
}
