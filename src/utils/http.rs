//! HTTP utility functions for extracting request information.

use actix_web::{HttpMessage, HttpRequest};

/// Request ID stored in request extensions by the request-id middleware
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestId(pub String);

/// Proxy headers consulted, in order of preference, when they are trusted
const FORWARDED_IP_HEADERS: [&str; 5] = [
    "X-Forwarded-For",
    "X-Real-IP",
    "CF-Connecting-IP", // Cloudflare
    "X-Cluster-Client-IP",
    "Forwarded-For",
];

/// Extract the client address used to key login rate limiting
///
/// Proxy headers are client-controlled, so they are only honoured when
/// `trust_proxy_headers` is set (i.e. the server sits behind a proxy that
/// overwrites them). Otherwise the TCP peer address is used.
pub fn extract_client_ip(req: &HttpRequest, trust_proxy_headers: bool) -> String {
    if trust_proxy_headers {
        for header_name in &FORWARDED_IP_HEADERS {
            if let Some(header_value) = req.headers().get(*header_name)
                && let Ok(header_str) = header_value.to_str()
            {
                // X-Forwarded-For can contain multiple IPs, take the first one
                let ip = header_str.split(',').next().unwrap_or(header_str).trim();
                if !ip.is_empty() {
                    return ip.to_string();
                }
            }
        }
    }

    req.connection_info()
        .peer_addr()
        .unwrap_or("unknown")
        .to_string()
}

/// Extract user agent from request headers
pub fn extract_user_agent(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("User-Agent")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string())
}

/// Request ID assigned by the request-id middleware, if it ran
pub fn request_id(req: &HttpRequest) -> Option<String> {
    req.extensions().get::<RequestId>().map(|id| id.0.clone())
}
