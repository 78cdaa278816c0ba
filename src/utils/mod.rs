//! Utility functions and helper modules.
//!
//! Client address and user agent extraction, route labels for metrics and
//! the HMAC helpers behind session cookie signing.

pub mod hmac;
pub mod http;
pub mod route;

pub use http::*;
pub use route::*;
