//! Typed view model and renderer for the login page.

/// Everything the login page needs to render
///
/// Session state is passed in explicitly; the renderer never looks at the
/// request or cookies itself.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageView {
    pub is_logged_in: bool,
    pub username: Option<String>,
    pub message: Option<String>,
}

impl PageView {
    /// Build a view from the current session user
    pub fn for_session(username: Option<String>) -> Self {
        Self {
            is_logged_in: username.is_some(),
            username,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Escape text for inclusion in HTML element content or a quoted attribute
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            other => escaped.push(other),
        }
    }
    escaped
}

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Secure Login</title>
</head>
<body>
<h2>Secure Login</h2>
"#;

const REGISTER_AND_LOGIN_FORMS: &str = r#"
<h3>Register</h3>
<form method="POST" action="/register">
  Username: <input name="username" autocomplete="username"><br>
  Password: <input name="password" type="password" autocomplete="new-password"><br><br>
  <button type="submit">Create account</button>
</form>

<hr>

<h3>Login</h3>
<form method="POST" action="/login">
  Username: <input name="username" autocomplete="username"><br>
  Password: <input name="password" type="password" autocomplete="current-password"><br><br>
  <button type="submit">Login</button>
</form>
"#;

const PAGE_FOOT: &str = r#"<p style="color:gray; font-size: 0.9em;">
  Notes: Passwords are hashed. Queries are parameterized. Basic rate-limiting is enabled.
</p>
</body>
</html>
"#;

/// Render the login page
pub fn render_page(view: &PageView) -> String {
    let mut html = String::from(PAGE_HEAD);

    if view.is_logged_in
        && let Some(username) = &view.username
    {
        html.push_str(&format!(
            "\n<p><b>Logged in as:</b> {}</p>\n\
             <form method=\"POST\" action=\"/logout\">\n  \
             <button type=\"submit\">Logout</button>\n\
             </form>\n<hr>\n",
            escape_html(username)
        ));
    }

    html.push_str(REGISTER_AND_LOGIN_FORMS);

    html.push_str(&format!(
        "\n<p style=\"color:red;\">{}</p>\n",
        escape_html(view.message.as_deref().unwrap_or(""))
    ));

    html.push_str(PAGE_FOOT);
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_page() {
        let html = render_page(&PageView::for_session(None));
        assert!(html.contains("action=\"/register\""));
        assert!(html.contains("action=\"/login\""));
        assert!(!html.contains("Logged in as"));
        assert!(!html.contains("action=\"/logout\""));
    }

    #[test]
    fn test_logged_in_page() {
        let html = render_page(&PageView::for_session(Some("alice".to_string())));
        assert!(html.contains("<b>Logged in as:</b> alice"));
        assert!(html.contains("action=\"/logout\""));
    }

    #[test]
    fn test_message_rendered() {
        let view = PageView::default().with_message("That username is taken.");
        assert!(render_page(&view).contains("That username is taken."));
    }

    #[test]
    fn test_user_content_is_escaped() {
        let view = PageView::for_session(Some("<script>alert(1)</script>".to_string()))
            .with_message("\"quoted\" & 'single'");
        let html = render_page(&view);

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("&quot;quoted&quot; &amp; &#x27;single&#x27;"));
    }

    #[test]
    fn test_username_without_flag_is_not_shown() {
        let view = PageView {
            is_logged_in: false,
            username: Some("alice".to_string()),
            message: None,
        };
        assert!(!render_page(&view).contains("Logged in as"));
    }
}
