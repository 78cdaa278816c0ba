//! Business logic and service layer modules.
//!
//! This module contains the core logic of the login server: the per-client
//! rate limiter, credential checks, password hashing, the user store,
//! signed sessions and metrics collection.

pub mod auth;
pub mod metrics;
pub mod password;
pub mod rate_limit;
pub mod session;
pub mod store;

pub use auth::*;
pub use metrics::*;
pub use password::*;
pub use rate_limit::*;
pub use session::*;
pub use store::*;
