//! A minimal credentialed-access gateway: account registration, login,
//! cookie sessions, and a session-gated document download.

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::get,
};
use tower_cookies::CookieManagerLayer;
use tower_http::{
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

pub mod config;
pub mod error;
pub mod flash;
pub mod state;
pub mod views;

pub mod models {
    pub mod session;
    pub mod user;
}

pub mod repositories {
    pub mod session;
    pub mod user;
}

pub mod services {
    pub mod auth;
}

pub mod handlers {
    pub mod auth;
    pub mod files;
    pub mod pages;
}

pub mod middleware_layer {
    pub mod auth;
}

pub mod validation {
    pub mod auth;
}

use state::AppState;

/// Builds the application router.
///
/// Protected routes get the auth guard as a `route_layer`, so the session
/// check runs before any handler body on every one of them.
pub fn app(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/", get(handlers::pages::home))
        .route(
            "/register",
            get(handlers::auth::register_page).post(handlers::auth::register),
        )
        .route(
            "/login",
            get(handlers::auth::login_page).post(handlers::auth::login),
        )
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route("/secrets", get(handlers::pages::secrets))
        .route("/logout", get(handlers::auth::logout))
        .route("/download", get(handlers::files::download))
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware_layer::auth::require_auth,
        ))
        .with_state(state.clone());

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default())
                .on_request(DefaultOnRequest::default().level(Level::DEBUG))
                .on_response(DefaultOnResponse::default().level(Level::DEBUG))
                .on_failure(DefaultOnFailure::default().level(Level::ERROR)),
        )
        .layer(CookieManagerLayer::new())
        .fallback_service(ServeDir::new(&state.config.static_dir))
}
