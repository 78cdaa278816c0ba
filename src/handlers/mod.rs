//! HTTP request handlers.
//!
//! Page handlers serve the login flow; the `/api` handlers expose health,
//! build and metrics information for operators.

pub mod health;
pub mod metrics;
pub mod openapi;
pub mod pages;
pub mod version;

pub use health::*;
pub use metrics::*;
pub use openapi::*;
pub use pages::*;
pub use version::*;
