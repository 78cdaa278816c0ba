//! OpenAPI specification generation and app factory.

use crate::{
    context::AppContext,
    handlers::{get_metrics, health, index, login, logout, register, version},
    middleware::{MetricsMiddleware, RequestIdMiddleware, SecurityHeaders},
};
use actix_web::App;
use paperclip::actix::{OpenApiExt, web};
use paperclip::v2::models::{DefaultApiRaw, Info};

/// Creates the OpenAPI document describing the login server
pub fn create_openapi_spec() -> DefaultApiRaw {
    DefaultApiRaw {
        info: Info {
            title: "Warded Login".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            description: Some(
                "Username and password login with per-client rate limiting.\n\n\
                ## Pages\n\
                - `GET /` renders the register and login forms\n\
                - `POST /register` creates an account (form fields `username`, `password`)\n\
                - `POST /login` starts a session and redirects to `/`\n\
                - `POST /logout` clears the session and redirects to `/`\n\
                \n\
                ## Rate limiting\n\
                Every login attempt counts against the client address, successful or not. \
                Once the limit is reached within the window, further attempts get \
                `429 Too Many Attempts` until older attempts age out. A successful login \
                clears the client's history.\n\
                \n\
                ## Configuration\n\
                - `LOGIN_RATE_LIMIT_MAX_ATTEMPTS` (default 5)\n\
                - `LOGIN_RATE_LIMIT_WINDOW_SECONDS` (default 60)\n\
                - `SESSION_SECRET` (required when `APP_ENV=production`)\n\
                - `TRUST_PROXY_HEADERS` to key clients by `X-Forwarded-For`"
                    .into(),
            ),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Creates the secure login application from prepared services
///
/// The app carries:
/// - Login page, registration, login and logout
/// - Health, version and metrics endpoints
/// - OpenAPI specification
/// - Security headers, request IDs and request metrics
///
/// Used by the server binary and by the integration tests.
pub fn create_app(
    ctx: AppContext,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppContext {
        config,
        credentials,
        sessions,
        metrics,
    } = ctx;

    App::new()
        .wrap(SecurityHeaders::new(config.security_headers.clone()))
        .wrap(RequestIdMiddleware)
        .wrap(MetricsMiddleware::new(metrics.clone()))
        .wrap_api_with_spec(create_openapi_spec())
        .app_data(web::Data::new(config))
        .app_data(web::Data::new(credentials))
        .app_data(web::Data::new(sessions))
        .app_data(web::Data::new(metrics))
        .service(web::resource("/").route(web::get().to(index)))
        .service(web::resource("/register").route(web::post().to(register)))
        .service(web::resource("/login").route(web::post().to(login)))
        .service(web::resource("/logout").route(web::post().to(logout)))
        .service(web::resource("/api/health").route(web::get().to(health)))
        .service(web::resource("/api/version").route(web::get().to(version)))
        .service(web::resource("/api/metrics").route(web::get().to(get_metrics)))
        .with_json_spec_at("/api/spec/v2")
        .build()
}
