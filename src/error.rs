use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::flash;

/// The application's error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Registration hit an email that already has an account.
    #[error("email already registered")]
    DuplicateEmail,

    /// Login failed. Covers both an unknown email and a wrong password;
    /// callers cannot tell the two apart.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// A protected route was requested without a valid session.
    #[error("authorization failed")]
    Unauthorized,

    /// A resource not found error.
    #[error("resource not found")]
    NotFound,

    /// A validation error.
    #[error("validation error: {0}")]
    Validation(String),

    /// A password hashing error.
    #[error("hashing error: {0}")]
    Hash(String),

    /// A template rendering error.
    #[error("template error: {0}")]
    Template(String),

    /// An I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An internal server error.
    #[error("internal server error: {0}")]
    Internal(String),
}

/// A `Result` type that uses `AppError` as the error type.
pub type Result<T> = std::result::Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::DuplicateEmail => {
                tracing::debug!("Registration rejected: email already registered");
                flash::redirect_with_flash("/login", "You already have an account. Log in instead.")
            }

            AppError::InvalidCredentials => {
                tracing::warn!("Login failed");
                flash::redirect_with_flash(
                    "/login",
                    "Please check your login details and try again.",
                )
            }

            AppError::Unauthorized => {
                tracing::warn!("Unauthenticated request to a protected route");
                flash::redirect_with_flash("/login", "Please log in to access this page.")
            }

            AppError::Validation(ref msg) => {
                tracing::debug!("Validation error: {}", msg);
                flash::redirect_with_flash("/register", msg)
            }

            AppError::NotFound => {
                tracing::debug!("Resource not found");
                (StatusCode::NOT_FOUND, "Resource not found").into_response()
            }

            AppError::Hash(ref e) => {
                tracing::error!("Hashing error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }

            AppError::Template(ref e) => {
                tracing::error!("Template error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }

            AppError::Io(ref e) => {
                tracing::error!("IO error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }

            AppError::Internal(ref e) => {
                tracing::error!("Internal error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}
