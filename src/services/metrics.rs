//! Metrics collection and Prometheus integration service.

use prometheus::{CounterVec, Gauge, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder};
use std::time::{Duration, Instant};

/// Outcome labels for `login_attempts_total`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Success,
    InvalidCredentials,
    RateLimited,
    Error,
}

impl LoginOutcome {
    fn as_label(self) -> &'static str {
        match self {
            LoginOutcome::Success => "success",
            LoginOutcome::InvalidCredentials => "invalid_credentials",
            LoginOutcome::RateLimited => "rate_limited",
            LoginOutcome::Error => "error",
        }
    }
}

/// Outcome labels for `registrations_total`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Created,
    MissingFields,
    UsernameTaken,
    Error,
}

impl RegistrationOutcome {
    fn as_label(self) -> &'static str {
        match self {
            RegistrationOutcome::Created => "created",
            RegistrationOutcome::MissingFields => "missing_fields",
            RegistrationOutcome::UsernameTaken => "username_taken",
            RegistrationOutcome::Error => "error",
        }
    }
}

/// Application metrics collector for Prometheus integration
#[derive(Clone)]
pub struct AppMetrics {
    pub registry: Registry,
    pub http_requests_total: CounterVec,
    pub http_request_duration_seconds: HistogramVec,
    pub login_attempts_total: CounterVec,
    pub registrations_total: CounterVec,
    pub app_uptime_seconds: Gauge,
    pub app_info: CounterVec,
    pub start_time: Instant,
}

impl AppMetrics {
    /// Create a new metrics collector with its own registry
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total = CounterVec::new(
            Opts::new("http_requests_total", "Total number of HTTP requests"),
            &["method", "status", "route"],
        )?;

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request duration in seconds",
            )
            // Argon2 verification dominates login latency, hence the long tail
            .buckets(vec![
                0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
            ]),
            &["method", "route"],
        )?;

        let login_attempts_total = CounterVec::new(
            Opts::new("login_attempts_total", "Login attempts by outcome"),
            &["outcome"],
        )?;

        let registrations_total = CounterVec::new(
            Opts::new("registrations_total", "Registration requests by outcome"),
            &["outcome"],
        )?;

        let app_uptime_seconds = Gauge::new("app_uptime_seconds", "Application uptime in seconds")?;

        let app_info = CounterVec::new(
            Opts::new("app_info", "Application information"),
            &["version", "commit", "build_time"],
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(login_attempts_total.clone()))?;
        registry.register(Box::new(registrations_total.clone()))?;
        registry.register(Box::new(app_uptime_seconds.clone()))?;
        registry.register(Box::new(app_info.clone()))?;

        app_info
            .with_label_values(&[
                env!("CARGO_PKG_VERSION"),
                crate::build_info::COMMIT,
                crate::build_info::BUILD_TIME,
            ])
            .inc();

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            login_attempts_total,
            registrations_total,
            app_uptime_seconds,
            app_info,
            start_time: Instant::now(),
        })
    }

    /// Record an HTTP request with method, route, status, and duration
    pub fn record_request(&self, method: &str, route: &str, status: u16, duration: Duration) {
        if route == "/api/metrics" {
            // Scrapes would otherwise dominate the request counts
            return;
        }

        self.http_requests_total
            .with_label_values(&[method, &status.to_string(), route])
            .inc();

        self.http_request_duration_seconds
            .with_label_values(&[method, route])
            .observe(duration.as_secs_f64());
    }

    pub fn record_login(&self, outcome: LoginOutcome) {
        self.login_attempts_total
            .with_label_values(&[outcome.as_label()])
            .inc();
    }

    pub fn record_registration(&self, outcome: RegistrationOutcome) {
        self.registrations_total
            .with_label_values(&[outcome.as_label()])
            .inc();
    }

    /// Update the application uptime gauge
    pub fn update_uptime(&self) {
        let uptime = self.start_time.elapsed().as_secs_f64();
        self.app_uptime_seconds.set(uptime);
    }

    /// Render metrics in Prometheus text format
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        encoder.encode_to_string(&metric_families)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_outcomes_are_counted() {
        let metrics = AppMetrics::new().unwrap();
        metrics.record_login(LoginOutcome::Success);
        metrics.record_login(LoginOutcome::RateLimited);
        metrics.record_login(LoginOutcome::RateLimited);

        assert_eq!(
            metrics
                .login_attempts_total
                .with_label_values(&["rate_limited"])
                .get(),
            2.0
        );

        let rendered = metrics.render().unwrap();
        assert!(rendered.contains("login_attempts_total{outcome=\"success\"} 1"));
    }

    #[test]
    fn test_metrics_route_is_not_recorded() {
        let metrics = AppMetrics::new().unwrap();
        metrics.record_request("GET", "/api/metrics", 200, Duration::from_millis(1));
        metrics.record_request("POST", "/login", 302, Duration::from_millis(1));

        let rendered = metrics.render().unwrap();
        assert!(!rendered.contains("route=\"/api/metrics\""));
        assert!(rendered.contains("route=\"/login\""));
    }
}
