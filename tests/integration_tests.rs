mod common;

use actix_web::{http::StatusCode, test};
use common::{body_string, form_post, test_context, test_context_with};
use warded_login::create_app;

/// Health reports the user store as reachable through the full middleware stack
#[actix_web::test]
async fn test_health_endpoint_integration() {
    let tc = test_context();
    let app = test::init_service(create_app(tc.ctx.clone())).await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK, "Expected 200 OK status");
    let content_type = resp.headers().get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.contains("application/json"), "Expected JSON content type, got: {}", content_type);

    let json: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
    assert_eq!(json, serde_json::json!({ "status": "healthy" }));
}

#[actix_web::test]
async fn test_health_reports_unavailable_store() {
    let tc = test_context();
    let app = test::init_service(create_app(tc.ctx.clone())).await;

    // Replace the database file with a directory so opening it fails
    let path = tc.ctx.config.database_path.clone();
    std::fs::remove_file(&path).unwrap();
    std::fs::create_dir(&path).unwrap();

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let json: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
    assert_eq!(json["status"], "unavailable");
}

#[actix_web::test]
async fn test_storage_failure_on_login_is_generic_500() {
    let tc = test_context();
    let app = test::init_service(create_app(tc.ctx.clone())).await;

    let path = tc.ctx.config.database_path.clone();
    std::fs::remove_file(&path).unwrap();
    std::fs::create_dir(&path).unwrap();

    let resp = test::call_service(&app, form_post("/login", "10.1.0.1", "alice", "pw").to_request()).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_string(resp).await;
    assert!(body.contains("Something went wrong"));
    assert!(!body.to_lowercase().contains("sqlite"));
}

#[actix_web::test]
async fn test_version_endpoint_integration() {
    let tc = test_context();
    let app = test::init_service(create_app(tc.ctx.clone())).await;

    let req = test::TestRequest::get().uri("/api/version").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert!(json["commit"].is_string());
    assert!(json["build_time"].is_string());
}

#[actix_web::test]
async fn test_metrics_endpoint_counts_login_outcomes() {
    let tc = test_context();
    let app = test::init_service(create_app(tc.ctx.clone())).await;

    test::call_service(&app, form_post("/login", "10.1.0.2", "ghost", "x").to_request()).await;

    let req = test::TestRequest::get().uri("/api/metrics").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_string(resp).await;
    assert!(body.contains("http_requests_total"));
    assert!(body.contains("login_attempts_total{outcome=\"invalid_credentials\"} 1"));
    assert!(body.contains("app_uptime_seconds"));
}

#[actix_web::test]
async fn test_metrics_endpoint_disabled() {
    let tc = test_context_with(|config| config.metrics.enabled = false);
    let app = test::init_service(create_app(tc.ctx.clone())).await;

    let req = test::TestRequest::get().uri("/api/metrics").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[actix_web::test]
async fn test_openapi_spec_lists_routes() {
    let tc = test_context();
    let app = test::init_service(create_app(tc.ctx.clone())).await;

    let req = test::TestRequest::get().uri("/api/spec/v2").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
    assert_eq!(json["info"]["title"], "Warded Login");
    for path in ["/", "/login", "/register", "/logout", "/api/health", "/api/version", "/api/metrics"] {
        assert!(json["paths"].get(path).is_some(), "OpenAPI document should list {}", path);
    }
}

#[actix_web::test]
async fn test_security_headers_and_request_id() {
    let tc = test_context();
    let app = test::init_service(create_app(tc.ctx.clone())).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let headers = resp.headers();
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    assert!(headers.contains_key("content-security-policy"));
    assert_eq!(headers.get("cache-control").unwrap(), "no-store");
    let request_id = headers.get("x-request-id").unwrap().to_str().unwrap();
    assert!(uuid::Uuid::parse_str(request_id).is_ok());
}

#[actix_web::test]
async fn test_inbound_request_id_is_propagated() {
    let tc = test_context();
    let app = test::init_service(create_app(tc.ctx.clone())).await;

    let req = test::TestRequest::get()
        .uri("/api/health")
        .insert_header(("X-Request-ID", "trace-abc-123"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.headers().get("x-request-id").unwrap(), "trace-abc-123");

    let oversized = "a".repeat(200);
    let req = test::TestRequest::get()
        .uri("/api/health")
        .insert_header(("X-Request-ID", oversized.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_ne!(resp.headers().get("x-request-id").unwrap(), oversized.as_str());
}
