use askama::Template;
use axum::response::Html;

use crate::error::{AppError, Result};

/// The home page.
#[derive(Template)]
#[template(path = "index.html")]
pub struct HomePage {
    pub logged_in: bool,
    pub flash: Option<String>,
}

/// The registration form.
#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterPage {
    pub logged_in: bool,
    pub flash: Option<String>,
}

/// The login form.
#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub logged_in: bool,
    pub flash: Option<String>,
}

/// The protected secrets page.
#[derive(Template)]
#[template(path = "secrets.html")]
pub struct SecretsPage {
    pub name: String,
    pub logged_in: bool,
    pub flash: Option<String>,
}

/// Renders a template to an HTML response.
pub fn render<T: Template>(template: &T) -> Result<Html<String>> {
    template
        .render()
        .map(Html)
        .map_err(|e| AppError::Template(e.to_string()))
}
