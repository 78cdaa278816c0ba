//! Handler-level and startup error types.

use crate::{
    config::ConfigError,
    services::{AuthError, PasswordError, StoreError},
};
use actix_web::{
    HttpResponse, ResponseError,
    error::BlockingError,
    http::{StatusCode, header::ContentType},
};

const INTERNAL_ERROR_PAGE: &str = "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"UTF-8\"><title>Error</title></head>\n<body><h2>Something went wrong</h2><p>Please try again later.</p></body>\n</html>\n";

/// Failures a request handler cannot turn into an inline page message
///
/// Rendered as a generic 500 page; details go to the log only.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Blocking task was cancelled")]
    Blocking,

    #[error("Session cookie could not be issued: {0}")]
    Session(String),
}

impl From<BlockingError> for AppError {
    fn from(_: BlockingError) -> Self {
        AppError::Blocking
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        tracing::error!(error = %self, "Request failed with an internal error");
        HttpResponse::build(self.status_code())
            .content_type(ContentType::html())
            .body(INTERNAL_ERROR_PAGE)
    }
}

/// Failures that stop the server from starting
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Could not initialize user store: {0}")]
    Store(#[from] StoreError),

    #[error("Invalid password hashing parameters: {0}")]
    Hashing(#[from] PasswordError),

    #[error("Could not register metrics: {0}")]
    Metrics(#[from] prometheus::Error),

    #[error("Could not seed demo account: {0}")]
    Seed(#[from] AuthError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::MessageBody;

    #[test]
    fn test_internal_error_hides_details() {
        let err = AppError::Session("secret detail".to_string());
        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = response.into_body().try_into_bytes().unwrap();
        let body = std::str::from_utf8(&body).unwrap();
        assert!(body.contains("Something went wrong"));
        assert!(!body.contains("secret detail"));
    }
}
