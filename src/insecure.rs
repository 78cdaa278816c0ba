//! Deliberately vulnerable login page.
//!
//! Kept as a negative example next to the hardened server: passwords sit in
//! memory as plaintext, attempts are unlimited and the submitted username is
//! reflected into the page without escaping. Never mount these routes into
//! [`crate::create_app`].

use crate::models::CredentialsForm;
use actix_web::{App, HttpResponse, http::header::ContentType, web};
use std::collections::HashMap;
use tracing::info;

pub const MSG_INVALID: &str = "Invalid username or password.";

const LOGIN_FORM: &str = r#"<h2>Insecure Login</h2>
<form method="POST">
  Username: <input name="username"><br>
  Password: <input name="password" type="password"><br><br>
  <button type="submit">Login</button>
</form>
"#;

/// Plaintext credential table
#[derive(Clone, Debug)]
pub struct PlaintextUsers {
    users: HashMap<String, String>,
}

impl Default for PlaintextUsers {
    fn default() -> Self {
        Self {
            users: HashMap::from([
                ("admin".to_string(), "password123".to_string()),
                ("user".to_string(), "letmein".to_string()),
            ]),
        }
    }
}

impl PlaintextUsers {
    /// Exact string comparison, case sensitive, no trimming
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.users.get(username).is_some_and(|stored| stored == password)
    }
}

fn login_page(message: &str) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(format!("{LOGIN_FORM}<p style=\"color:red;\">{message}</p>\n"))
}

/// `GET /`
pub async fn insecure_index() -> HttpResponse {
    login_page("")
}

/// `POST /`
pub async fn insecure_login(
    form: Option<web::Form<CredentialsForm>>,
    users: web::Data<PlaintextUsers>,
) -> HttpResponse {
    let CredentialsForm { username, password } =
        form.map(web::Form::into_inner).unwrap_or_default();

    if users.matches(&username, &password) {
        info!(username = %username, "Insecure login succeeded");
        // Unescaped on purpose: this page demonstrates reflected XSS
        return HttpResponse::Ok()
            .content_type(ContentType::html())
            .body(format!("<h1>Welcome, {username}!</h1><p>You are logged in.</p>"));
    }

    login_page(MSG_INVALID)
}

/// Creates the insecure demo application
pub fn create_insecure_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(PlaintextUsers::default()))
        .service(
            web::resource("/")
                .route(web::get().to(insecure_index))
                .route(web::post().to(insecure_login)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plaintext_matching_is_exact() {
        let users = PlaintextUsers::default();
        assert!(users.matches("admin", "password123"));
        assert!(users.matches("user", "letmein"));
        assert!(!users.matches("admin", "Password123"));
        assert!(!users.matches(" admin", "password123"));
        assert!(!users.matches("nobody", ""));
    }
}
