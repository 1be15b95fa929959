use axum::{Extension, extract::State, response::Html};
use tower_cookies::Cookies;

use crate::{
    error::{AppError, Result},
    flash,
    middleware_layer::auth::session_user,
    models::session::CurrentUser,
    state::AppState,
    views::{self, HomePage, SecretsPage},
};

/// Renders the home page.
pub async fn home(State(state): State<AppState>, cookies: Cookies) -> Result<Html<String>> {
    views::render(&HomePage {
        logged_in: session_user(&state, &cookies).is_some(),
        flash: flash::take_flash(&cookies),
    })
}

/// Renders the protected secrets page with the current user's name.
pub async fn secrets(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    cookies: Cookies,
) -> Result<Html<String>> {
    let user = state
        .users
        .find_by_id(&current.user_id)?
        .ok_or(AppError::Unauthorized)?;

    views::render(&SecretsPage {
        name: user.name,
        logged_in: true,
        flash: flash::take_flash(&cookies),
    })
}
