//! Data models for the login server.
//!
//! Form bodies, JSON responses for the operational endpoints, structured
//! audit events and the login page view model.

pub mod api;
pub mod audit;
pub mod auth;
pub mod view;

pub use api::*;
pub use audit::*;
pub use auth::*;
pub use view::*;
