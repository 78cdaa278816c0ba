//! Health check endpoint handler.

use crate::{error::AppError, models::HealthResponse, services::CredentialService};
use actix_web::{Error, HttpResponse, web};
use paperclip::actix::api_v2_operation;
use tracing::warn;

/// Health check endpoint
///
/// Reports whether the user store answers a trivial query. Load balancers
/// and container probes should treat a 503 as "take out of rotation".
#[api_v2_operation(
    summary = "Health Check Endpoint",
    description = "Returns the health of the service and its user store in JSON format.",
    tags("Health"),
    responses(
        (status = 200, description = "Service healthy", body = HealthResponse),
        (status = 503, description = "User store unavailable", body = HealthResponse)
    )
)]
pub async fn health(credentials: web::Data<CredentialService>) -> Result<HttpResponse, Error> {
    let service = credentials.get_ref().clone();
    let ping = web::block(move || service.store().ping())
        .await
        .map_err(AppError::from)?;

    match ping {
        Ok(()) => Ok(HttpResponse::Ok().json(HealthResponse {
            status: "healthy".to_string(),
        })),
        Err(e) => {
            warn!(error = %e, "Health check failed");
            Ok(HttpResponse::ServiceUnavailable().json(HealthResponse {
                status: "unavailable".to_string(),
            }))
        }
    }
}
