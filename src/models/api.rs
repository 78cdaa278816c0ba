//! JSON response models for the operational endpoints.

use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};

/// Response model for the health check endpoint
#[derive(Clone, Debug, Serialize, Deserialize, Apiv2Schema)]
pub struct HealthResponse {
    /// `healthy` when the user store answers, `unavailable` otherwise
    pub status: String,
}

/// Response model for the version information endpoint
#[derive(Clone, Debug, Serialize, Deserialize, Apiv2Schema)]
pub struct VersionResponse {
    pub version: String,
    pub commit: String,
    pub build_time: String,
}
