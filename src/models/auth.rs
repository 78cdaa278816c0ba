//! Form bodies for the login and registration endpoints.

use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};

/// `application/x-www-form-urlencoded` body of `/login` and `/register`
///
/// Missing fields deserialize to empty strings so a partial form is a
/// validation problem, never an extractor error.
#[derive(Clone, Default, Serialize, Deserialize, Apiv2Schema)]
pub struct CredentialsForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for CredentialsForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsForm")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
