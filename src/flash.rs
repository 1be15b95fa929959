use axum::{
    http::{header, HeaderValue},
    response::{IntoResponse, Redirect, Response},
};
use base64::{Engine as _, engine::general_purpose};
use tower_cookies::{Cookie, Cookies};

/// The name of the one-shot message cookie.
const FLASH_COOKIE: &str = "flash";

fn flash_cookie(value: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(FLASH_COOKIE, value);
    cookie.set_http_only(true);
    cookie.set_same_site(tower_cookies::cookie::SameSite::Lax);
    cookie.set_path("/");
    cookie
}

/// Takes the pending flash message, clearing it so it renders only once.
pub fn take_flash(cookies: &Cookies) -> Option<String> {
    let cookie = cookies.get(FLASH_COOKIE)?;
    let message = general_purpose::URL_SAFE_NO_PAD
        .decode(cookie.value())
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok());

    let mut removal = Cookie::new(FLASH_COOKIE, "");
    removal.set_path("/");
    cookies.remove(removal);

    message
}

/// Builds a redirect that carries a flash message for the next page.
///
/// The message travels base64-encoded in a raw `Set-Cookie` header on the
/// redirect itself, so this also works where no cookie jar is in scope.
pub fn redirect_with_flash(to: &str, message: &str) -> Response {
    let cookie = flash_cookie(general_purpose::URL_SAFE_NO_PAD.encode(message));
    let mut response = Redirect::to(to).into_response();
    if let Ok(value) = HeaderValue::from_str(&cookie.to_string()) {
        response.headers_mut().append(header::SET_COOKIE, value);
    }
    response
}
