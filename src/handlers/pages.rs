//! Login page, registration, login and logout handlers.

use crate::{
    config::AppConfig,
    error::AppError,
    models::{
        CredentialsForm,
        audit::{AuthAuditEvent, AuthEventOutcome, AuthEventType},
        view::{PageView, render_page},
    },
    services::{
        AppMetrics, AuthError, CredentialService, LoginOutcome, MSG_ACCOUNT_CREATED,
        RegistrationOutcome, SessionManager,
    },
    utils::http::extract_client_ip,
};
use actix_web::{
    Error, HttpRequest, HttpResponse,
    http::{
        StatusCode,
        header::{self, ContentType},
    },
    web,
};
use paperclip::actix::api_v2_operation;

fn page_response(status: StatusCode, view: &PageView) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(render_page(view))
}

/// Form fields, or empty ones when the body is missing or not urlencoded
fn submitted(form: Option<web::Form<CredentialsForm>>) -> CredentialsForm {
    form.map(web::Form::into_inner).unwrap_or_default()
}

fn redirect_home() -> actix_web::HttpResponseBuilder {
    let mut builder = HttpResponse::Found();
    builder.insert_header((header::LOCATION, "/"));
    builder
}

/// Login page
///
/// Shows the register and login forms, plus the signed-in user and a logout
/// button when the request carries a valid session.
#[api_v2_operation(
    summary = "Login Page",
    description = "Renders the registration and login forms and the current session state.",
    tags("Pages"),
    responses(
        (status = 200, description = "HTML page", content_type = "text/html")
    )
)]
pub async fn index(req: HttpRequest, sessions: web::Data<SessionManager>) -> HttpResponse {
    let view = PageView::for_session(sessions.current_user(&req));
    page_response(StatusCode::OK, &view)
}

/// Account registration
///
/// Validates the form, hashes the password and stores the account. The user
/// is not signed in; the page asks them to log in.
#[api_v2_operation(
    summary = "Register",
    description = "Create an account from a username and password form.",
    tags("Pages"),
    responses(
        (status = 200, description = "Account created", content_type = "text/html"),
        (status = 400, description = "Username or password missing", content_type = "text/html"),
        (status = 409, description = "Username taken", content_type = "text/html"),
        (status = 500, description = "Storage failure", content_type = "text/html")
    )
)]
pub async fn register(
    req: HttpRequest,
    form: Option<web::Form<CredentialsForm>>,
    credentials: web::Data<CredentialService>,
    sessions: web::Data<SessionManager>,
    metrics: web::Data<AppMetrics>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, Error> {
    let ip_address = extract_client_ip(&req, config.trust_proxy_headers);
    let CredentialsForm { username, password } = submitted(form);
    let attempted_user = username.trim().to_string();

    let service = credentials.get_ref().clone();
    let result = web::block(move || service.register(&username, &password))
        .await
        .map_err(AppError::from)?;

    let view = PageView::for_session(sessions.current_user(&req));

    match result {
        Ok(created) => {
            metrics.record_registration(RegistrationOutcome::Created);
            AuthAuditEvent::from_request(
                &req,
                AuthEventType::RegistrationSuccess,
                AuthEventOutcome::Success,
                ip_address,
            )
            .with_user_id(Some(created))
            .log();

            Ok(page_response(StatusCode::OK, &view.with_message(MSG_ACCOUNT_CREATED)))
        }
        Err(err) => {
            let outcome = match err {
                AuthError::MissingCredentials => RegistrationOutcome::MissingFields,
                AuthError::UsernameTaken => RegistrationOutcome::UsernameTaken,
                _ => RegistrationOutcome::Error,
            };
            metrics.record_registration(outcome);
            AuthAuditEvent::from_request(
                &req,
                AuthEventType::RegistrationFailure,
                AuthEventOutcome::Failure,
                ip_address,
            )
            .with_user_id((!attempted_user.is_empty()).then_some(attempted_user))
            .with_context(Some(err.to_string()))
            .log();

            if err.is_internal() {
                return Err(AppError::from(err).into());
            }
            Ok(page_response(err.status_code(), &view.with_message(err.user_message())))
        }
    }
}

/// Login
///
/// Counts the attempt against the client's quota, verifies the credentials
/// and on success sets the session cookie and redirects home. Unknown users
/// and wrong passwords get the same response.
#[api_v2_operation(
    summary = "Login",
    description = "Verify a username and password form and start a session.",
    tags("Pages"),
    responses(
        (status = 302, description = "Signed in, redirect to /"),
        (status = 401, description = "Invalid username or password", content_type = "text/html"),
        (status = 429, description = "Too many attempts", content_type = "text/html"),
        (status = 500, description = "Storage failure", content_type = "text/html")
    )
)]
pub async fn login(
    req: HttpRequest,
    form: Option<web::Form<CredentialsForm>>,
    credentials: web::Data<CredentialService>,
    sessions: web::Data<SessionManager>,
    metrics: web::Data<AppMetrics>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, Error> {
    let ip_address = extract_client_ip(&req, config.trust_proxy_headers);
    let CredentialsForm { username, password } = submitted(form);
    let attempted_user = username.trim().to_string();

    let service = credentials.get_ref().clone();
    let client_id = ip_address.clone();
    let result = web::block(move || service.login(&client_id, &username, &password))
        .await
        .map_err(AppError::from)?;

    match result {
        Ok(username) => {
            let cookie = sessions.issue(&username).map_err(AppError::Session)?;

            metrics.record_login(LoginOutcome::Success);
            AuthAuditEvent::from_request(
                &req,
                AuthEventType::LoginSuccess,
                AuthEventOutcome::Success,
                ip_address,
            )
            .with_user_id(Some(username))
            .log();

            Ok(redirect_home().cookie(cookie).finish())
        }
        Err(err) => {
            let (outcome, event_type) = match err {
                AuthError::TooManyAttempts => {
                    (LoginOutcome::RateLimited, AuthEventType::RateLimitExceeded)
                }
                AuthError::InvalidCredentials => {
                    (LoginOutcome::InvalidCredentials, AuthEventType::LoginFailure)
                }
                _ => (LoginOutcome::Error, AuthEventType::LoginFailure),
            };
            metrics.record_login(outcome);
            AuthAuditEvent::from_request(&req, event_type, AuthEventOutcome::Failure, ip_address)
                .with_user_id((!attempted_user.is_empty()).then_some(attempted_user))
                .with_context(err.is_internal().then(|| err.to_string()))
                .log();

            if err.is_internal() {
                return Err(AppError::from(err).into());
            }
            let view = PageView::for_session(sessions.current_user(&req))
                .with_message(err.user_message());
            Ok(page_response(err.status_code(), &view))
        }
    }
}

/// Logout
///
/// Clears the session cookie and redirects home. Safe to call without a session.
#[api_v2_operation(
    summary = "Logout",
    description = "End the current session.",
    tags("Pages"),
    responses(
        (status = 302, description = "Session cleared, redirect to /")
    )
)]
pub async fn logout(
    req: HttpRequest,
    sessions: web::Data<SessionManager>,
    config: web::Data<AppConfig>,
) -> HttpResponse {
    if let Some(username) = sessions.current_user(&req) {
        AuthAuditEvent::from_request(
            &req,
            AuthEventType::Logout,
            AuthEventOutcome::Success,
            extract_client_ip(&req, config.trust_proxy_headers),
        )
        .with_user_id(Some(username))
        .log();
    }

    redirect_home().cookie(sessions.clear()).finish()
}
