use axum::{
    Extension,
    extract::{Form, State},
    response::{Html, Redirect},
};
use serde::Deserialize;
use tower_cookies::cookie::time::Duration;
use tower_cookies::{Cookie, Cookies};

use crate::{
    error::{AppError, Result},
    flash,
    middleware_layer::auth::{SESSION_COOKIE, session_user},
    models::session::CurrentUser,
    services::auth as auth_service,
    state::AppState,
    validation::auth::*,
    views::{self, LoginPage, RegisterPage},
};

/// The form payload for user registration.
#[derive(Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// The form payload for user login.
#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Creates the session cookie.
fn session_cookie(token: String, max_age_days: i64, secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, token);

    cookie.set_http_only(true);
    if secure {
        cookie.set_secure(true);
    }
    cookie.set_same_site(tower_cookies::cookie::SameSite::Lax);
    cookie.set_max_age(Duration::days(max_age_days));
    cookie.set_path("/");

    cookie
}

/// Renders the registration form.
pub async fn register_page(
    State(state): State<AppState>,
    cookies: Cookies,
) -> Result<Html<String>> {
    views::render(&RegisterPage {
        logged_in: session_user(&state, &cookies).is_some(),
        flash: flash::take_flash(&cookies),
    })
}

/// Handles user registration: creates the account and logs it straight in.
#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(payload): Form<RegisterForm>,
) -> Result<Redirect> {
    tracing::info!("📝 Register attempt: {}", payload.email);
    validate_email(&payload.email)?;
    validate_name(&payload.name)?;
    validate_password(&payload.password)?;

    let user = auth_service::register_user(&state, &payload.email, &payload.name, &payload.password)?;

    let token = state.sessions.issue(user.id)?;
    cookies.add(session_cookie(
        token,
        state.config.session_duration_days,
        state.config.cookie_secure,
    ));
    tracing::info!("✅ User registered and logged in: {}", user.id);

    Ok(Redirect::to("/secrets"))
}

/// Renders the login form.
pub async fn login_page(State(state): State<AppState>, cookies: Cookies) -> Result<Html<String>> {
    views::render(&LoginPage {
        logged_in: session_user(&state, &cookies).is_some(),
        flash: flash::take_flash(&cookies),
    })
}

/// Handles user login.
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(payload): Form<LoginForm>,
) -> Result<Redirect> {
    tracing::info!("🔐 Login attempt: {}", payload.email);

    // Empty input gets the same generic answer as a bad password.
    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err(AppError::InvalidCredentials);
    }

    let user = auth_service::authenticate_user(&state, &payload.email, &payload.password)?;

    let token = state.sessions.issue(user.id)?;
    cookies.add(session_cookie(
        token,
        state.config.session_duration_days,
        state.config.cookie_secure,
    ));
    tracing::info!("✅ User logged in: {}", user.id);

    Ok(Redirect::to("/secrets"))
}

/// Handles logout: revokes the session and clears its cookie.
#[axum::debug_handler]
pub async fn logout(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    cookies: Cookies,
) -> Result<Redirect> {
    tracing::info!("👋 Logout for user: {}", current.user_id);

    state.sessions.revoke(&current.token)?;

    let mut session_cookie = Cookie::new(SESSION_COOKIE, "");
    session_cookie.set_max_age(Duration::seconds(0));
    session_cookie.set_path("/");
    cookies.remove(session_cookie);

    tracing::info!("✅ User logged out: {}", current.user_id);

    Ok(Redirect::to("/"))
}
