//! Response hardening for the login pages.
//!
//! The header set is resolved once when the app is built; every response
//! then gets the same list. Pages embed session state, so they also carry
//! `Cache-Control: no-store` unless a handler chose its own caching policy.

use crate::config::SecurityHeadersConfig;
use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header::{self, HeaderName, HeaderValue},
};
use std::{
    future::{Ready, ready},
    pin::Pin,
    rc::Rc,
};
use tracing::warn;

type HeaderList = Rc<Vec<(HeaderName, HeaderValue)>>;

pub struct SecurityHeaders {
    headers: Vec<(HeaderName, HeaderValue)>,
    no_store: bool,
}

impl SecurityHeaders {
    /// Resolve the configured header values, skipping any that are not valid header text
    pub fn new(config: SecurityHeadersConfig) -> Self {
        let mut headers = Vec::new();
        let mut push = |name: HeaderName, value: &str| match HeaderValue::from_str(value) {
            Ok(value) => headers.push((name, value)),
            Err(_) => warn!(header = %name, value, "Ignoring invalid security header value"),
        };

        if config.content_type_options {
            push(header::X_CONTENT_TYPE_OPTIONS, "nosniff");
        }
        push(header::X_FRAME_OPTIONS, &config.frame_options);
        push(header::REFERRER_POLICY, &config.referrer_policy);
        if config.csp_enabled {
            push(header::CONTENT_SECURITY_POLICY, &config.csp_directives);
        }
        if config.hsts_enabled {
            push(
                header::STRICT_TRANSPORT_SECURITY,
                &format!("max-age={}", config.hsts_max_age),
            );
        }

        Self {
            headers,
            no_store: config.no_store,
        }
    }

    pub fn header_names(&self) -> impl Iterator<Item = &HeaderName> {
        self.headers.iter().map(|(name, _)| name)
    }
}

impl<S, B> Transform<S, ServiceRequest> for SecurityHeaders
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SecurityHeadersMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SecurityHeadersMiddleware {
            service,
            headers: Rc::new(self.headers.clone()),
            no_store: self.no_store,
        }))
    }
}

pub struct SecurityHeadersMiddleware<S> {
    service: S,
    headers: HeaderList,
    no_store: bool,
}

impl<S, B> Service<ServiceRequest> for SecurityHeadersMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let fut = self.service.call(req);
        let headers = Rc::clone(&self.headers);
        let no_store = self.no_store;

        Box::pin(async move {
            let mut res = fut.await?;
            let response_headers = res.headers_mut();

            for (name, value) in headers.iter() {
                response_headers.insert(name.clone(), value.clone());
            }
            if no_store && !response_headers.contains_key(header::CACHE_CONTROL) {
                response_headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
            }

            Ok(res)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_values_are_skipped() {
        let config = SecurityHeadersConfig {
            frame_options: "DENY\nX-Injected: 1".to_string(),
            ..SecurityHeadersConfig::default()
        };
        let names: Vec<_> = SecurityHeaders::new(config).header_names().cloned().collect();

        assert!(!names.contains(&header::X_FRAME_OPTIONS));
        assert!(names.contains(&header::CONTENT_SECURITY_POLICY));
    }

    #[test]
    fn test_disabled_headers_are_omitted() {
        let config = SecurityHeadersConfig {
            csp_enabled: false,
            hsts_enabled: false,
            ..SecurityHeadersConfig::default()
        };
        let names: Vec<_> = SecurityHeaders::new(config).header_names().cloned().collect();

        assert!(!names.contains(&header::CONTENT_SECURITY_POLICY));
        assert!(!names.contains(&header::STRICT_TRANSPORT_SECURITY));
        assert!(names.contains(&header::X_CONTENT_TYPE_OPTIONS));
    }
}
