use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use tower_cookies::Cookies;
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::session::CurrentUser,
    state::AppState,
};

/// The name of the session cookie.
pub const SESSION_COOKIE: &str = "session_token";

/// Extracts the session token from the request cookies.
fn extract_session_token(cookies: &Cookies) -> Option<String> {
    cookies
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
}

/// Resolves the session cookie to a user ID, if the request carries a
/// valid session. Public pages use this for their `logged_in` flag.
pub fn session_user(state: &AppState, cookies: &Cookies) -> Option<Uuid> {
    let token = extract_session_token(cookies)?;
    state.sessions.validate(&token).ok().flatten()
}

/// A middleware that requires a valid session before the handler runs.
///
/// Applied as a `route_layer` on every protected route, so it executes
/// ahead of any handler body, unconditionally. On success the resolved
/// `CurrentUser` is attached to the request; on failure the request is
/// rejected without touching the handler.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `cookies` - The request cookies.
/// * `request` - The incoming request.
/// * `next` - The next middleware in the chain.
///
/// # Returns
///
/// A `Response`, or `Unauthorized` when no valid session is presented.
pub async fn require_auth(
    State(state): State<AppState>,
    cookies: Cookies,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response> {
    tracing::debug!("🔐 Checking authentication...");

    let token = extract_session_token(&cookies).ok_or_else(|| {
        tracing::warn!("❌ No session cookie found");
        AppError::Unauthorized
    })?;

    let user_id = state.sessions.validate(&token)?.ok_or_else(|| {
        tracing::warn!("❌ Session unknown, revoked, or expired");
        AppError::Unauthorized
    })?;

    tracing::debug!("✅ User authenticated: {}", user_id);

    request.extensions_mut().insert(CurrentUser { user_id, token });

    Ok(next.run(request).await)
}
