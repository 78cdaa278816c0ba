//! Audit logging data structures and types.

use crate::utils::http::{extract_user_agent, request_id};
use actix_web::HttpRequest;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Types of authentication events for audit logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthEventType {
    LoginSuccess,
    LoginFailure,
    RateLimitExceeded,
    RegistrationSuccess,
    RegistrationFailure,
    Logout,
}

/// Outcomes of authentication events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthEventOutcome {
    Success,
    Failure,
}

/// Structured audit log entry for authentication events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthAuditEvent {
    pub event_type: AuthEventType,
    pub outcome: AuthEventOutcome,
    pub timestamp: DateTime<Utc>,
    pub ip_address: String,
    pub user_agent: Option<String>,
    /// Username as submitted; may name an account that does not exist
    pub user_id: Option<String>,
    pub method: String,
    pub endpoint: String,
    pub request_id: Option<String>,
    pub additional_context: Option<String>,
}

impl AuthAuditEvent {
    /// Create a new audit event with basic information
    pub fn new(
        event_type: AuthEventType,
        outcome: AuthEventOutcome,
        ip_address: String,
        method: String,
        endpoint: String,
    ) -> Self {
        Self {
            event_type,
            outcome,
            timestamp: Utc::now(),
            ip_address,
            user_agent: None,
            user_id: None,
            method,
            endpoint,
            request_id: None,
            additional_context: None,
        }
    }

    /// Create an event pre-filled with method, path, user agent and request id
    pub fn from_request(
        req: &HttpRequest,
        event_type: AuthEventType,
        outcome: AuthEventOutcome,
        ip_address: String,
    ) -> Self {
        Self::new(
            event_type,
            outcome,
            ip_address,
            req.method().to_string(),
            req.path().to_string(),
        )
        .with_user_agent(extract_user_agent(req))
        .with_request_id(request_id(req))
    }

    /// Add user agent information
    pub fn with_user_agent(mut self, user_agent: Option<String>) -> Self {
        self.user_agent = user_agent;
        self
    }

    /// Add user ID information
    pub fn with_user_id(mut self, user_id: Option<String>) -> Self {
        self.user_id = user_id;
        self
    }

    /// Add request ID information
    pub fn with_request_id(mut self, request_id: Option<String>) -> Self {
        self.request_id = request_id;
        self
    }

    /// Add additional context information
    pub fn with_context(mut self, context: Option<String>) -> Self {
        self.additional_context = context;
        self
    }

    /// Log the audit event using structured logging
    ///
    /// Failures are logged at `warn` so they stand out in the default filter.
    pub fn log(&self) {
        match self.outcome {
            AuthEventOutcome::Success => info!(
                target: "auth_audit",
                event_type = ?self.event_type,
                outcome = ?self.outcome,
                timestamp = %self.timestamp,
                ip_address = %self.ip_address,
                user_agent = ?self.user_agent,
                user_id = ?self.user_id,
                method = %self.method,
                endpoint = %self.endpoint,
                request_id = ?self.request_id,
                additional_context = ?self.additional_context,
                "Authentication audit event"
            ),
            AuthEventOutcome::Failure => warn!(
                target: "auth_audit",
                event_type = ?self.event_type,
                outcome = ?self.outcome,
                timestamp = %self.timestamp,
                ip_address = %self.ip_address,
                user_agent = ?self.user_agent,
                user_id = ?self.user_id,
                method = %self.method,
                endpoint = %self.endpoint,
                request_id = ?self.request_id,
                additional_context = ?self.additional_context,
                "Authentication audit event"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{HttpMessage, test::TestRequest};

    #[test]
    fn test_from_request_collects_context() {
        let req = TestRequest::post()
            .uri("/login")
            .insert_header(("User-Agent", "curl/8.0"))
            .to_http_request();
        req.extensions_mut()
            .insert(crate::utils::http::RequestId("req-1".to_string()));

        let event = AuthAuditEvent::from_request(
            &req,
            AuthEventType::LoginFailure,
            AuthEventOutcome::Failure,
            "10.0.0.1".to_string(),
        )
        .with_user_id(Some("alice".to_string()));

        assert_eq!(event.method, "POST");
        assert_eq!(event.endpoint, "/login");
        assert_eq!(event.user_agent.as_deref(), Some("curl/8.0"));
        assert_eq!(event.request_id.as_deref(), Some("req-1"));
        assert_eq!(event.user_id.as_deref(), Some("alice"));
    }

    #[test]
    fn test_event_serialization_uses_snake_case() {
        let event = AuthAuditEvent::new(
            AuthEventType::RateLimitExceeded,
            AuthEventOutcome::Failure,
            "10.0.0.1".to_string(),
            "POST".to_string(),
            "/login".to_string(),
        );
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event_type"], "rate_limit_exceeded");
        assert_eq!(json["outcome"], "failure");
    }
}
